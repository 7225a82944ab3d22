use std::path::PathBuf;

use grammar::{tokenize_with, validate, GrammarDocument, Tokens, ValidationResult};
use scaffold::ScaffoldResult;
use tracing::{info, warn};

use crate::config::HostConfig;
use crate::discovery::{PathProbe, ServerLocator};
use crate::error::{HostError, Result};

/// How the host talks to the language server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
}

/// What a host launches to get a language server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    pub program: PathBuf,
    pub transport: Transport,
}

/// Host owned state for working with grammars: configuration and the
/// language server, if one was found. Sessions are independent values; any
/// number may exist at once.
#[derive(Debug, Clone)]
pub struct Session {
    config: HostConfig,
    server: Option<ServerCommand>,
}

impl Session {
    /// A session without a language server.
    pub fn new(config: HostConfig) -> Self {
        Session {
            config,
            server: None,
        }
    }

    /// A session that looks for a language server if the config enables one.
    /// A missing server is not an error; the session just runs without it.
    pub fn start(config: HostConfig, probe: &dyn PathProbe) -> Self {
        let mut session = Session::new(config);
        if !session.config.language_server.enable {
            return session;
        }

        match ServerLocator::from_config(&session.config.language_server).locate(probe) {
            Some(program) => {
                info!(server = %program.display(), "using language server");
                session.server = Some(ServerCommand {
                    program,
                    transport: Transport::Stdio,
                });
            }
            None => warn!("language server not found, some features may not work"),
        }
        session
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn server(&self) -> Option<&ServerCommand> {
        self.server.as_ref()
    }

    /// Tokenize a document with the session's lexical rules.
    pub fn tokens<'a>(&'a self, document: &'a GrammarDocument) -> Tokens<'a, 'a> {
        tokenize_with(&document.source_text, &self.config.lexical)
    }

    pub fn validate(&self, document: &GrammarDocument) -> ValidationResult {
        validate(self.tokens(document))
    }

    /// Validate, then generate a scaffold. An invalid grammar fails with its
    /// diagnostics. `target` falls back to the configured default.
    pub fn generate(
        &self,
        document: &GrammarDocument,
        target: Option<&str>,
        entry_rule: Option<&str>,
    ) -> Result<ScaffoldResult> {
        let validation = self.validate(document);
        if !validation.is_valid() {
            return Err(HostError::InvalidGrammar {
                file: document.file_identifier.clone(),
                diagnostics: validation.diagnostics,
            });
        }

        let target = target.unwrap_or(self.config.generate.default_target.as_str());
        Ok(scaffold::generate(
            document,
            &validation,
            target,
            entry_rule,
        )?)
    }
}
