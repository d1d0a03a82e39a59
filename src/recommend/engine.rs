use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::catalog::Song;
use crate::theory::Theory;

use super::records::RecommendError;

/// Scoring result for one candidate chord: how many songs the user
/// could newly play after learning it.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateScore {
    pub chord: String,
    /// Ids of the newly playable songs, in catalog order.
    pub unlocked_song_ids: Vec<String>,
    pub score: usize,
    /// Mean difficulty over the unlocked songs that carry one;
    /// `None` when none of them do.
    pub mean_difficulty: Option<f64>,
}

/// Per-song view against a known set, computed once and shared by
/// every candidate.
struct SongAnalysis {
    id: String,
    difficulty: Option<f64>,
    /// Distinct canonical chords; zero means the song has no valid
    /// chord data and is ignored by every query.
    chord_count: usize,
    /// Unparseable chord text makes a song permanently unplayable;
    /// its valid chords still feed the candidate pool.
    has_invalid_chords: bool,
    missing: BTreeSet<String>,
}

impl SongAnalysis {
    fn is_meaningful(&self) -> bool {
        self.chord_count > 0
    }

    fn is_playable(&self) -> bool {
        self.is_meaningful() && self.missing.is_empty() && !self.has_invalid_chords
    }

    fn is_unlocked_by_one_chord(&self) -> bool {
        self.is_meaningful() && self.missing.len() == 1 && !self.has_invalid_chords
    }
}

/// Canonicalizes a caller-supplied known set. Spellings fold to their
/// canonical form, unparseable entries drop out.
pub fn canonicalize_known<S: AsRef<str>>(theory: &Theory, known: &[S]) -> BTreeSet<String> {
    known
        .iter()
        .filter_map(|raw| theory.normalize(raw.as_ref()))
        .collect()
}

fn analyze_songs(theory: &Theory, known: &BTreeSet<String>, songs: &[Song]) -> Vec<SongAnalysis> {
    songs
        .par_iter()
        .map(|song| {
            let mut chords = BTreeSet::new();
            let mut has_invalid_chords = false;
            for raw in &song.chords {
                match theory.normalize(raw) {
                    Some(canonical) => {
                        chords.insert(canonical);
                    }
                    None => has_invalid_chords = true,
                }
            }
            let missing = chords
                .iter()
                .filter(|chord| !known.contains(*chord))
                .cloned()
                .collect();
            SongAnalysis {
                id: song.id.clone(),
                difficulty: song.difficulty,
                chord_count: chords.len(),
                has_invalid_chords,
                missing,
            }
        })
        .collect()
}

#[derive(Default)]
struct CandidateStats {
    unlocked_song_ids: Vec<String>,
    difficulties: Vec<f64>,
}

fn score_analyses(analyses: &[SongAnalysis]) -> Vec<CandidateScore> {
    let mut stats: BTreeMap<String, CandidateStats> = BTreeMap::new();
    for analysis in analyses {
        if !analysis.is_meaningful() {
            continue;
        }
        // A song is newly unlocked by a candidate exactly when that
        // candidate is the only chord still missing from it.
        let newly_unlocked = analysis.is_unlocked_by_one_chord();
        for chord in &analysis.missing {
            let entry = stats.entry(chord.clone()).or_default();
            if newly_unlocked {
                entry.unlocked_song_ids.push(analysis.id.clone());
                if let Some(difficulty) = analysis.difficulty {
                    entry.difficulties.push(difficulty);
                }
            }
        }
    }

    stats
        .into_iter()
        .map(|(chord, stats)| {
            let score = stats.unlocked_song_ids.len();
            let mean_difficulty = if stats.difficulties.is_empty() {
                None
            } else {
                Some(stats.difficulties.iter().sum::<f64>() / stats.difficulties.len() as f64)
            };
            CandidateScore {
                chord,
                unlocked_song_ids: stats.unlocked_song_ids,
                score,
                mean_difficulty,
            }
        })
        .collect()
}

/// Total order over candidates: higher score first, then easier
/// unlocked songs (candidates without difficulty data rank last),
/// then the lexicographically smaller name. Never returns `Equal`
/// for two distinct chords, so selection is deterministic no matter
/// the evaluation order.
fn rank(a: &CandidateScore, b: &CandidateScore) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| {
            let da = a.mean_difficulty.unwrap_or(f64::INFINITY);
            let db = b.mean_difficulty.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        })
        .then_with(|| a.chord.cmp(&b.chord))
}

/// Scores every candidate chord: every chord that appears in a song
/// and is not in the known set, including those unlocking nothing.
/// Results come back in lexicographic candidate order.
pub fn score_all_candidates<S: AsRef<str>>(
    theory: &Theory,
    known: &[S],
    songs: &[Song],
) -> Vec<CandidateScore> {
    let known = canonicalize_known(theory, known);
    let analyses = analyze_songs(theory, &known, songs);
    let scored = score_analyses(&analyses);
    debug!(
        "Scored {} candidate chords over {} songs ({} known chords)",
        scored.len(),
        songs.len(),
        known.len()
    );
    scored
}

/// The single best chord to learn next, or `None` when no candidate
/// unlocks any song.
pub fn request_chord_recommendation<S: AsRef<str>>(
    theory: &Theory,
    known: &[S],
    songs: &[Song],
) -> Option<CandidateScore> {
    score_all_candidates(theory, known, songs)
        .into_iter()
        .filter(|candidate| candidate.score > 0)
        .min_by(rank)
}

/// The songs that would become playable if `candidate` were learned.
///
/// Asking about a chord already in the known set is a precondition
/// failure, not an empty answer.
pub fn songs_unlocked_by<S: AsRef<str>>(
    theory: &Theory,
    known: &[S],
    candidate: &str,
    songs: &[Song],
) -> Result<Vec<String>, RecommendError> {
    let canonical = theory
        .normalize(candidate)
        .ok_or_else(|| RecommendError::InvalidChord(candidate.to_string()))?;
    let known = canonicalize_known(theory, known);
    if known.contains(&canonical) {
        return Err(RecommendError::ChordAlreadyKnown(canonical));
    }

    Ok(analyze_songs(theory, &known, songs)
        .into_iter()
        .filter(|analysis| {
            analysis.is_unlocked_by_one_chord() && analysis.missing.contains(&canonical)
        })
        .map(|analysis| analysis.id)
        .collect())
}

/// Ids of the songs already playable with the known set, in catalog
/// order. Songs without any valid chord data never count.
pub fn playable_song_ids<S: AsRef<str>>(
    theory: &Theory,
    known: &[S],
    songs: &[Song],
) -> Vec<String> {
    let known = canonicalize_known(theory, known);
    analyze_songs(theory, &known, songs)
        .into_iter()
        .filter(|analysis| analysis.is_playable())
        .map(|analysis| analysis.id)
        .collect()
}

/// Playable songs ranked for the user: preferred genres first, then
/// ascending difficulty (unknown difficulty last), then id.
pub fn personalized_song_recommendation<S: AsRef<str>>(
    theory: &Theory,
    known: &[S],
    songs: &[Song],
    genre_preferences: Option<&[String]>,
) -> Vec<String> {
    let playable: BTreeSet<String> = playable_song_ids(theory, known, songs).into_iter().collect();

    let preferred = |song: &Song| -> bool {
        match (genre_preferences, &song.genre) {
            (Some(preferences), Some(genre)) => preferences
                .iter()
                .any(|preference| preference.eq_ignore_ascii_case(genre)),
            _ => false,
        }
    };

    let mut ranked: Vec<&Song> = songs
        .iter()
        .filter(|song| playable.contains(&song.id))
        .collect();
    ranked.sort_by(|a, b| {
        preferred(b)
            .cmp(&preferred(a))
            .then_with(|| {
                let da = a.difficulty.unwrap_or(f64::INFINITY);
                let db = b.difficulty.unwrap_or(f64::INFINITY);
                da.total_cmp(&db)
            })
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.into_iter().map(|song| song.id.clone()).collect()
}

/// The chords still to learn for one target song, deduplicated, in
/// their first-occurrence order within the song.
pub fn next_chords_for_song<S: AsRef<str>>(
    theory: &Theory,
    known: &[S],
    song: &Song,
) -> Vec<String> {
    let known = canonicalize_known(theory, known);
    let mut seen = BTreeSet::new();
    let mut next = Vec::new();
    for raw in &song.chords {
        if let Some(canonical) = theory.normalize(raw) {
            if !known.contains(&canonical) && seen.insert(canonical.clone()) {
                next.push(canonical);
            }
        }
    }
    next
}
