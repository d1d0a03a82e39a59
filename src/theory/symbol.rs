use lazy_static::lazy_static;
use std::fmt;
use thiserror::Error;

use super::pitch::{match_root, parse_root, Root};
use super::suffix::{SUFFIXES, SUFFIX_SYNONYMS};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseChordError {
    #[error("empty chord symbol")]
    EmptyInput,
    #[error("unrecognized root note in '{0}'")]
    UnknownRoot(String),
    #[error("unrecognized suffix '{suffix}' in '{symbol}'")]
    UnknownSuffix { symbol: String, suffix: String },
    #[error("malformed bass note in '{0}'")]
    MalformedBass(String),
}

/// A chord symbol in canonical form: sharp-spelled root, canonical
/// suffix token, optional sharp-spelled bass note.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChordSymbol {
    pub root: Root,
    pub suffix: String,
    pub bass: Option<Root>,
}

impl ChordSymbol {
    /// The canonical text form, e.g. "A#m7" or "C/G".
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)?;
        if let Some(bass) = self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

/// The chord grammar tables: suffix vocabulary and synonym folds.
///
/// Instances are immutable; components borrow a `Theory` instead of
/// reaching for globals, so custom vocabularies can be injected.
/// [`Theory::builtin`] is the shared default.
#[derive(Clone, Debug)]
pub struct Theory {
    suffixes: Vec<String>,
    synonyms: Vec<(String, String)>,
}

lazy_static! {
    static ref BUILTIN_THEORY: Theory = Theory::new(
        SUFFIXES.iter().map(|s| s.to_string()).collect(),
        SUFFIX_SYNONYMS
            .iter()
            .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect(),
    );
}

impl Theory {
    pub fn new(suffixes: Vec<String>, synonyms: Vec<(String, String)>) -> Theory {
        Theory { suffixes, synonyms }
    }

    /// The process-wide default tables.
    pub fn builtin() -> &'static Theory {
        &BUILTIN_THEORY
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Parses `raw` into its canonical parts.
    ///
    /// Invalid input is an ordinary `Err` value carrying the reason;
    /// parsing never panics.
    pub fn parse(&self, raw: &str) -> Result<ChordSymbol, ParseChordError> {
        let clean = sanitize(raw);
        if clean.is_empty() {
            return Err(ParseChordError::EmptyInput);
        }

        // Only the first '/' separates the bass; the bass must consume
        // the whole right-hand fragment, so "C/G/B" is malformed.
        let (head, bass) = match clean.split_once('/') {
            Some((head, rest)) => {
                let bass =
                    parse_root(rest).ok_or_else(|| ParseChordError::MalformedBass(clean.clone()))?;
                (head, Some(bass))
            }
            None => (clean.as_str(), None),
        };

        let (root, consumed) =
            match_root(head).ok_or_else(|| ParseChordError::UnknownRoot(clean.clone()))?;

        let fragment = &head[consumed..];
        let suffix = self
            .canonical_suffix(fragment)
            .ok_or_else(|| ParseChordError::UnknownSuffix {
                symbol: clean.clone(),
                suffix: fragment.to_string(),
            })?;

        Ok(ChordSymbol {
            root,
            suffix: suffix.to_string(),
            bass,
        })
    }

    /// Canonical spelling of `raw`, or `None` if it is not a valid
    /// chord symbol. Idempotent on its own output.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        self.parse(raw).ok().map(|symbol| symbol.to_string())
    }

    pub fn is_valid(&self, raw: &str) -> bool {
        self.parse(raw).is_ok()
    }

    /// Folds synonym spellings, then requires exact membership in the
    /// vocabulary.
    fn canonical_suffix(&self, fragment: &str) -> Option<&str> {
        if let Some((_, canonical)) = self
            .synonyms
            .iter()
            .find(|(alias, _)| alias.as_str() == fragment)
        {
            return Some(canonical.as_str());
        }
        self.suffixes
            .iter()
            .find(|token| token.as_str() == fragment)
            .map(|token| token.as_str())
    }
}

impl Default for Theory {
    fn default() -> Theory {
        Theory::builtin().clone()
    }
}

/// Strips whitespace and maps the Unicode accidentals (♯, ♭) onto
/// their ASCII forms. Chord text never contains meaningful spaces.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '♯' => '#',
            '♭' => 'b',
            other => other,
        })
        .collect()
}
