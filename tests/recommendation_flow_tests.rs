mod common;

use fretwise_engine::recommend::{
    calculate_recommendation, next_chords_for_song, personalized_song_recommendation,
    playable_song_ids, request_chord_recommendation, score_all_candidates, songs_unlocked_by,
    InMemoryRecommendationStore, RecommendError, RecommendationOutcome, RecommendationStore,
};
use fretwise_engine::{Song, Theory};

fn campfire_catalog() -> Vec<Song> {
    serde_json::from_str(common::campfire_catalog_json()).unwrap()
}

#[test]
fn campfire_catalog_parses() {
    let songs = campfire_catalog();
    assert_eq!(songs.len(), 7);

    let wonder = songs.iter().find(|s| s.id == "wonder").unwrap();
    assert_eq!(wonder.title.as_deref(), Some("Wonderwall"));
    assert_eq!(wonder.difficulty, Some(2.0));
    assert_eq!(wonder.chords.len(), 6);
}

#[test]
fn score_table_over_the_campfire_catalog() {
    let songs = campfire_catalog();
    let scored = score_all_candidates(Theory::builtin(), &["C", "G", "D"], &songs);

    let table: Vec<(&str, usize)> = scored
        .iter()
        .map(|c| (c.chord.as_str(), c.score))
        .collect();
    assert_eq!(
        table,
        vec![
            ("A7sus4", 0),
            ("Am", 2),
            ("Dsus4", 0),
            ("Em", 2),
            ("Em7", 0),
            ("F", 0),
        ]
    );

    let am = scored.iter().find(|c| c.chord == "Am").unwrap();
    assert_eq!(am.unlocked_song_ids, vec!["knock", "stand"]);
    assert_eq!(am.mean_difficulty, Some(1.0));

    let em = scored.iter().find(|c| c.chord == "Em").unwrap();
    assert_eq!(em.unlocked_song_ids, vec!["horse", "mad"]);
    assert_eq!(em.mean_difficulty, Some(1.5));
}

/// Learn whatever the engine recommends, over and over, until it has
/// nothing left to offer. Each step exercises a different tie-break:
/// Am beats Em on mean difficulty, Em then beats F on name alone.
#[test]
fn greedy_learning_loop_works_through_the_repertoire() {
    let theory = Theory::builtin();
    let songs = campfire_catalog();
    let store = InMemoryRecommendationStore::default();
    let mut known = vec!["C".to_string(), "G".to_string(), "D".to_string()];

    let mut learned = Vec::new();
    loop {
        let outcome =
            calculate_recommendation(theory, &store, "ada", &known, &songs).unwrap();
        match outcome {
            RecommendationOutcome::Recommended(recommendation) => {
                learned.push(recommendation.recommended_chord.clone());
                known.push(recommendation.recommended_chord);
            }
            RecommendationOutcome::NothingToUnlock => break,
        }
        assert!(learned.len() <= 10, "loop should terminate");
    }

    assert_eq!(learned, vec!["Am", "Em", "F"]);

    // Everything but Wonderwall is now playable; its remaining chords
    // never appear alone, so the engine correctly stops.
    let playable = playable_song_ids(theory, &known, &songs);
    assert_eq!(
        playable,
        vec!["horse", "knock", "stand", "mad", "hey", "riptide"]
    );

    let records = store.get_user_recommendations("ada").unwrap();
    let chords: Vec<&str> = records
        .iter()
        .map(|r| r.recommended_chord.as_str())
        .collect();
    assert_eq!(chords, vec!["F", "Em", "Am"]);
    assert_eq!(records[0].unlocked_song_ids, vec!["hey", "riptide"]);
    assert_eq!(records[2].unlocked_song_ids, vec!["knock", "stand"]);
    assert!(records.iter().all(|r| r.user == "ada" && r.score == 2));
}

#[test]
fn equal_scores_fall_through_every_tie_break_tier() {
    let theory = Theory::builtin();
    let songs = vec![
        common::make_rated_song("a", &["C", "G"], 1.0),
        common::make_rated_song("b", &["C", "Am"], 5.0),
        common::make_rated_song("e", &["E"], 1.0),
    ];

    // G, Am and E each unlock exactly one song. Am loses on mean
    // difficulty; G and E tie there too, so the name decides.
    let scored = score_all_candidates(theory, &["C"], &songs);
    assert!(scored.iter().all(|c| c.score == 1));

    let best = request_chord_recommendation(theory, &["C"], &songs).unwrap();
    assert_eq!(best.chord, "E");
    assert_eq!(best.unlocked_song_ids, vec!["e"]);
    assert_eq!(best.mean_difficulty, Some(1.0));
}

#[test]
fn genre_builders_feed_the_personalized_ranking() {
    let theory = Theory::builtin();
    let songs = vec![
        common::make_genre_song("folk", &["C"], "Folk", 2.0),
        common::make_genre_song("jazz", &["C"], "Jazz", 1.0),
        common::make_song("plain", &["C"]),
    ];
    let preferences = vec!["folk".to_string()];

    let ranked = personalized_song_recommendation(theory, &["C"], &songs, Some(&preferences));
    assert_eq!(ranked, vec!["folk", "jazz", "plain"]);
}

#[test]
fn unlock_query_agrees_with_the_recommendation() {
    let songs = campfire_catalog();
    let unlocked =
        songs_unlocked_by(Theory::builtin(), &["C", "G", "D"], "Am", &songs).unwrap();
    assert_eq!(unlocked, vec!["knock", "stand"]);
}

#[test]
fn unlock_query_rejects_enharmonically_known_chords() {
    let songs = campfire_catalog();
    let known = ["C", "G", "D", "Bb"];

    let err = songs_unlocked_by(Theory::builtin(), &known, "A#", &songs).unwrap_err();
    assert!(matches!(err, RecommendError::ChordAlreadyKnown(chord) if chord == "A#"));

    let err = songs_unlocked_by(Theory::builtin(), &known, "H7", &songs).unwrap_err();
    assert!(matches!(err, RecommendError::InvalidChord(_)));
}

#[test]
fn personalized_ranking_puts_preferred_genres_first() {
    let songs = campfire_catalog();
    let known = ["C", "G", "D", "Am", "Em", "F"];
    let preferences = vec!["pop".to_string()];

    let ranked =
        personalized_song_recommendation(Theory::builtin(), &known, &songs, Some(&preferences));
    assert_eq!(
        ranked,
        vec!["riptide", "hey", "horse", "knock", "stand", "mad"]
    );

    let unranked = personalized_song_recommendation(Theory::builtin(), &known, &songs, None);
    assert_eq!(
        unranked,
        vec!["horse", "knock", "riptide", "stand", "hey", "mad"]
    );
}

#[test]
fn next_chords_for_wonderwall_follow_the_song() {
    let songs = campfire_catalog();
    let wonder = songs.iter().find(|s| s.id == "wonder").unwrap();
    let next = next_chords_for_song(Theory::builtin(), &["C", "G", "D"], wonder);
    assert_eq!(next, vec!["Em7", "Dsus4", "A7sus4"]);
}

#[test]
fn repeated_runs_agree_on_everything() {
    let theory = Theory::builtin();
    let songs = campfire_catalog();
    let known = ["C", "G", "D"];

    let first = score_all_candidates(theory, &known, &songs);
    for _ in 0..10 {
        assert_eq!(score_all_candidates(theory, &known, &songs), first);
    }
}
