//! Finding the language server binary.
//!
//! Discovery walks an ordered list of candidate providers and stops at the
//! first one that resolves. Later providers are never consulted.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::config::LanguageServerConfig;

/// Name of the language server binary.
pub const SERVER_BINARY: &str = "npeg-lsp";

/// Answers whether a path holds something runnable.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probes the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// One source of a possible server location.
pub trait CandidateProvider: Debug {
    fn resolve(&self, probe: &dyn PathProbe) -> Option<PathBuf>;
}

/// A path the user configured explicitly. Trusted without probing.
#[derive(Debug, Clone)]
pub struct Configured(pub PathBuf);

impl CandidateProvider for Configured {
    fn resolve(&self, _probe: &dyn PathProbe) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// An absolute path, used if it exists.
#[derive(Debug, Clone)]
pub struct Fixed(pub PathBuf);

impl CandidateProvider for Fixed {
    fn resolve(&self, probe: &dyn PathProbe) -> Option<PathBuf> {
        probe.exists(&self.0).then(|| self.0.clone())
    }
}

/// A path relative to the user's home directory, used if it exists.
#[derive(Debug, Clone)]
pub struct HomeRelative(pub PathBuf);

impl CandidateProvider for HomeRelative {
    fn resolve(&self, probe: &dyn PathProbe) -> Option<PathBuf> {
        let path = dirs::home_dir()?.join(&self.0);
        probe.exists(&path).then_some(path)
    }
}

/// Ordered candidate providers.
#[derive(Debug, Default)]
pub struct ServerLocator {
    providers: Vec<Box<dyn CandidateProvider>>,
}

impl ServerLocator {
    pub fn new() -> Self {
        ServerLocator::default()
    }

    /// Append a provider, consulted after all existing ones.
    pub fn with(mut self, provider: impl CandidateProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Standard install locations: `/usr/local/bin`, `/usr/bin` and
    /// `~/.local/bin`.
    pub fn default_locations() -> Self {
        ServerLocator::new()
            .with(Fixed(Path::new("/usr/local/bin").join(SERVER_BINARY)))
            .with(Fixed(Path::new("/usr/bin").join(SERVER_BINARY)))
            .with(HomeRelative(Path::new(".local/bin").join(SERVER_BINARY)))
    }

    /// The configured path first, then the configured candidates, falling
    /// back to the standard install locations when none are configured.
    pub fn from_config(config: &LanguageServerConfig) -> Self {
        let mut locator = match &config.path {
            Some(path) => ServerLocator::new().with(Configured(path.clone())),
            None => ServerLocator::new(),
        };
        if config.candidates.is_empty() {
            locator
                .providers
                .extend(ServerLocator::default_locations().providers);
        } else {
            for candidate in &config.candidates {
                locator = locator.with(Fixed(candidate.clone()));
            }
        }
        locator
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve providers in order until one yields a path.
    pub fn locate(&self, probe: &dyn PathProbe) -> Option<PathBuf> {
        let found = self.providers.iter().find_map(|provider| {
            let resolved = provider.resolve(probe);
            trace!(?provider, ?resolved, "checked server candidate");
            resolved
        });
        debug!(?found, "language server lookup finished");
        found
    }
}
