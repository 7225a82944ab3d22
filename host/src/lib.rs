//! Host side of the grammar tools: configuration, logging, language server
//! discovery and the session value tying them to the core.
//!
//! Everything that touches the filesystem or the process lives here. The
//! `grammar` and `scaffold` crates stay pure.

mod config;
mod discovery;
mod document;
mod error;
mod logging;
mod session;

pub use config::{GenerateConfig, HostConfig, LanguageServerConfig};
pub use discovery::{
    CandidateProvider, Configured, Fixed, FsProbe, HomeRelative, PathProbe, ServerLocator,
    SERVER_BINARY,
};
pub use document::{is_grammar_file, load_document, GRAMMAR_EXTENSION};
pub use error::{HostError, Result};
pub use logging::{init_tracing, level_for};
pub use session::{ServerCommand, Session, Transport};
