//! Synonyms CLI
//!
//! Query nearby words and sentence similarity from the command line.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use synonyms::{Config, Synonyms};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Synonyms - Chinese synonyms and sentence similarity
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Binary word-vector model (overrides SYN_MODEL_W2V_PATH)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Segmenter user dictionary (overrides SYN_WORDSEG_CUSTOM_DICT)
    #[arg(long, global = true)]
    user_dict: Option<PathBuf>,

    /// Stopword list (overrides SYN_WORDSEG_STOPWORD_DICT)
    #[arg(long, global = true)]
    stopwords: Option<PathBuf>,

    /// Punctuation list (overrides SYN_WORDSEG_PUNCT_DICT)
    #[arg(long, global = true)]
    punctuation: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Segment text into words
    Seg {
        text: String,
        /// Drop stopwords
        #[arg(long)]
        no_stopwords: bool,
        /// Drop punctuation
        #[arg(long)]
        no_punctuation: bool,
    },
    /// Segment text with part-of-speech tags
    Tag { text: String },
    /// Print the vector of a word
    Vector { word: String },
    /// Nearest words with scores
    Nearby {
        word: String,
        #[arg(short, default_value_t = 10)]
        k: usize,
    },
    /// Nearest words as a ranked list
    Display {
        word: String,
        #[arg(short, default_value_t = 10)]
        k: usize,
    },
    /// Similarity of two sentences
    Compare { sen1: String, sen2: String },
    /// Model vocabulary size and dimension
    Info,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(path) = &self.model {
            config = config.with_model_path(path);
        }
        if let Some(path) = &self.user_dict {
            config = config.with_user_dict(path);
        }
        if let Some(path) = &self.stopwords {
            config = config.with_stopwords(path);
        }
        if let Some(path) = &self.punctuation {
            config = config.with_punctuation(path);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("synonyms=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    info!("Model: {}", config.model_path.display());

    let engine = Synonyms::new(config)?;

    match args.command {
        Cmd::Seg {
            text,
            no_stopwords,
            no_punctuation,
        } => {
            let words = engine.segment(&text, !no_stopwords, !no_punctuation).await?;
            println!("{}", words.join(" "));
        }
        Cmd::Tag { text } => {
            let tokens = engine.tag(&text)?;
            let line: Vec<String> = tokens
                .iter()
                .map(|t| format!("{}/{}", t.word, t.tag))
                .collect();
            println!("{}", line.join(" "));
        }
        Cmd::Vector { word } => {
            let vector = engine.vector(&word).await?;
            println!("{:?}", vector);
        }
        Cmd::Nearby { word, k } => {
            for n in engine.nearby(&word, k).await? {
                println!("{}\t{}", n.word, n.score);
            }
        }
        Cmd::Display { word, k } => {
            print!("{}", engine.display(&word, k).await?);
        }
        Cmd::Compare { sen1, sen2 } => {
            let score = engine.compare(&sen1, &sen2).await?;
            println!("{}", score);
        }
        Cmd::Info => {
            println!("vocabulary: {}", engine.vocabulary_size().await?);
            println!("dimension:  {}", engine.embedding_dim().await?);
        }
    }

    info!("{}", engine.metrics().summary());
    Ok(())
}
