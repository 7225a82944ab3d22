use std::io;
use std::path::PathBuf;

use grammar::Diagnostic;
use scaffold::ScaffoldError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{} is not an NPeg grammar file", .0.display())]
    NotAGrammarFile(PathBuf),

    #[error("{file} is not a valid grammar")]
    InvalidGrammar {
        file: String,
        diagnostics: Vec<Diagnostic>,
    },

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
