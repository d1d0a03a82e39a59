use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Song;
use crate::theory::Theory;

use super::engine::request_chord_recommendation;
use super::store::RecommendationStore;

/// A persisted recommendation: the chord a user should learn next and
/// the songs it unlocks for them.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Recommendation {
    pub id: String,
    pub user: String,
    pub recommended_chord: String,
    pub unlocked_song_ids: Vec<String>,
    pub score: usize,
    pub generated_at: DateTime<Utc>,
}

/// Outcome of a stateful recommendation run. "Nothing to unlock" is a
/// first-class result, not a placeholder record.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Recommended(Recommendation),
    NothingToUnlock,
}

impl RecommendationOutcome {
    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            RecommendationOutcome::Recommended(recommendation) => Some(recommendation),
            RecommendationOutcome::NothingToUnlock => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("'{0}' is not a valid chord symbol")]
    InvalidChord(String),
    #[error("chord '{0}' is already known")]
    ChordAlreadyKnown(String),
    #[error("recommendation store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Runs the chord recommendation for `user` and persists the winning
/// candidate. When no candidate unlocks anything the outcome is
/// [`RecommendationOutcome::NothingToUnlock`] and nothing is stored.
pub fn calculate_recommendation<S: AsRef<str>>(
    theory: &Theory,
    store: &dyn RecommendationStore,
    user: &str,
    known: &[S],
    songs: &[Song],
) -> Result<RecommendationOutcome, RecommendError> {
    let best = match request_chord_recommendation(theory, known, songs) {
        Some(best) => best,
        None => {
            debug!("No unlockable songs for user '{}'", user);
            return Ok(RecommendationOutcome::NothingToUnlock);
        }
    };

    let recommendation = Recommendation {
        id: Uuid::new_v4().to_string(),
        user: user.to_string(),
        recommended_chord: best.chord,
        unlocked_song_ids: best.unlocked_song_ids,
        score: best.score,
        generated_at: Utc::now(),
    };
    store.add_recommendation(&recommendation)?;
    info!(
        "Recommended '{}' to '{}', unlocking {} songs",
        recommendation.recommended_chord, user, recommendation.score
    );
    Ok(RecommendationOutcome::Recommended(recommendation))
}
