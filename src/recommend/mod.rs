mod engine;
mod records;
mod store;

pub use engine::{
    canonicalize_known, next_chords_for_song, personalized_song_recommendation, playable_song_ids,
    request_chord_recommendation, score_all_candidates, songs_unlocked_by, CandidateScore,
};
pub use records::{
    calculate_recommendation, RecommendError, Recommendation, RecommendationOutcome,
};
pub use store::{InMemoryRecommendationStore, RecommendationStore};

#[cfg(feature = "mock")]
pub use store::MockRecommendationStore;
