use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaffoldError {
    /// Generation is only defined over grammars that passed validation.
    #[error("cannot generate a scaffold from an invalid grammar ({errors} error(s) reported)")]
    InvalidInput { errors: usize },
    #[error("unknown target language `{requested}`, supported targets: {supported}")]
    UnknownTargetLanguage { requested: String, supported: String },
}
