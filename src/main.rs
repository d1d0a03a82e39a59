use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fretwise_engine::catalog::{difficulty_for_chord_count, load_songs};
use fretwise_engine::config::FileConfig;
use fretwise_engine::recommend::{
    calculate_recommendation, personalized_song_recommendation, InMemoryRecommendationStore,
};
use fretwise_engine::{ShapeLibrary, Song, Theory};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH"));

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "fretwise", version = VERSION, about = "Guitar chord theory and recommendation toolbox")]
struct CliArgs {
    /// Path to a TOML config file with defaults for the flags below.
    #[clap(long, value_parser = parse_path)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parses a chord symbol and prints its canonical parts.
    Parse { chord: String },

    /// Prints the canonical spelling of each given chord, '-' if invalid.
    Normalize { chords: Vec<String> },

    /// Prints every chord name the grammar accepts.
    Vocabulary {
        /// Include slash-bass variants of the bare major and minor triads.
        #[clap(long)]
        slash: bool,
    },

    /// Prints fretboard diagrams for a chord as JSON.
    Diagram { chord: String },

    /// Recommends the next chord to learn from a song catalog.
    Recommend {
        /// Path to the JSON song catalog.
        #[clap(long, value_parser = parse_path)]
        catalog: Option<PathBuf>,

        /// Comma-separated chords already known.
        #[clap(long, value_delimiter = ',')]
        known: Vec<String>,

        /// User handle recorded on the stored recommendation.
        #[clap(long)]
        user: Option<String>,
    },

    /// Lists playable songs, best matches first.
    Playable {
        /// Path to the JSON song catalog.
        #[clap(long, value_parser = parse_path)]
        catalog: Option<PathBuf>,

        /// Comma-separated chords already known.
        #[clap(long, value_delimiter = ',')]
        known: Vec<String>,

        /// Comma-separated genre preferences used for ranking.
        #[clap(long, value_delimiter = ',')]
        genres: Vec<String>,
    },
}

fn resolve_catalog(flag: Option<PathBuf>, config: &FileConfig) -> Result<PathBuf> {
    flag.or_else(|| config.catalog.clone())
        .context("No song catalog given; pass --catalog or set it in the config file")
}

fn resolve_known(flag: Vec<String>, config: &FileConfig) -> Vec<String> {
    if flag.is_empty() {
        config.known_chords.clone().unwrap_or_default()
    } else {
        flag
    }
}

/// Catalogs imported without a difficulty get the chord-count
/// estimate; the library keeps missing difficulties missing.
fn fill_missing_difficulty(theory: &Theory, songs: &mut [Song]) {
    for song in songs.iter_mut() {
        if song.difficulty.is_none() {
            let distinct = song.canonical_chords(theory).len();
            song.difficulty = Some(difficulty_for_chord_count(distinct));
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let theory = Theory::builtin();
    let library = ShapeLibrary::builtin();

    match cli_args.command {
        Command::Parse { chord } => match theory.parse(&chord) {
            Ok(symbol) => {
                println!("canonical: {}", symbol.canonical());
                println!("root: {}", symbol.root);
                if symbol.suffix.is_empty() {
                    println!("suffix: (major)");
                } else {
                    println!("suffix: {}", symbol.suffix);
                }
                if let Some(bass) = symbol.bass {
                    println!("bass: {}", bass);
                }
            }
            Err(err) => println!("invalid: {}", err),
        },

        Command::Normalize { chords } => {
            for chord in chords {
                match theory.normalize(&chord) {
                    Some(canonical) => println!("{}", canonical),
                    None => println!("-"),
                }
            }
        }

        Command::Vocabulary { slash } => {
            for name in theory.vocabulary(slash) {
                println!("{}", name);
            }
        }

        Command::Diagram { chord } => match library.diagrams_for(theory, &chord) {
            Some(diagrams) => println!("{}", serde_json::to_string_pretty(&diagrams)?),
            None => println!("No diagrams for '{}'", chord),
        },

        Command::Recommend {
            catalog,
            known,
            user,
        } => {
            let mut songs = load_songs(&resolve_catalog(catalog, &file_config)?)?;
            fill_missing_difficulty(theory, &mut songs);
            let known = resolve_known(known, &file_config);
            let user = user
                .or_else(|| file_config.user.clone())
                .unwrap_or_else(|| "local".to_string());

            let store = InMemoryRecommendationStore::default();
            let outcome = calculate_recommendation(theory, &store, &user, &known, &songs)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }

        Command::Playable {
            catalog,
            known,
            genres,
        } => {
            let mut songs = load_songs(&resolve_catalog(catalog, &file_config)?)?;
            fill_missing_difficulty(theory, &mut songs);
            let known = resolve_known(known, &file_config);
            let preferences = if genres.is_empty() {
                None
            } else {
                Some(genres.as_slice())
            };
            for id in personalized_song_recommendation(theory, &known, &songs, preferences) {
                println!("{}", id);
            }
        }
    }

    Ok(())
}
