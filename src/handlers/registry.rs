use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::traits::Handler;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no handler matches url: {0}")]
    NoHandler(String),

    #[error("handler already registered: {0}")]
    Duplicate(&'static str),

    #[error("handler declares no url patterns: {0}")]
    EmptyPatterns(&'static str),
}

/// Process-wide handler set, read-only after startup.
///
/// Registration order is part of the contract: among matching handlers of
/// equal weight, the first registered wins, so resolution stays stable
/// across calls and across process restarts.
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Add a handler at startup.
    ///
    /// Registering two handlers under the same name, or a handler with an
    /// empty pattern set, is a configuration error.
    pub fn register(&mut self, handler: Arc<dyn Handler>) -> Result<(), RegistryError> {
        if handler.url_patterns().is_empty() {
            return Err(RegistryError::EmptyPatterns(handler.name()));
        }
        if self.handlers.iter().any(|h| h.name() == handler.name()) {
            return Err(RegistryError::Duplicate(handler.name()));
        }

        debug!(
            handler = handler.name(),
            weight = handler.weight(),
            "handler registered"
        );
        self.handlers.push(handler);
        Ok(())
    }

    /// Select the handler for `url`: the matching handler with the highest
    /// weight, first-registered winning ties.
    ///
    /// Pure over (url, registered set) — no I/O, no locking — so it is cheap
    /// to call per incoming message and safe from concurrent tasks.
    pub fn resolve(&self, url: &str) -> Result<Arc<dyn Handler>, RegistryError> {
        let mut best: Option<&Arc<dyn Handler>> = None;

        for handler in &self.handlers {
            if !handler.url_patterns().is_match(url) {
                continue;
            }
            // Strict `>` keeps the earliest registration on equal weights.
            match best {
                Some(current) if handler.weight() <= current.weight() => {}
                _ => best = Some(handler),
            }
        }

        best.cloned()
            .ok_or_else(|| RegistryError::NoHandler(url.to_string()))
    }

    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
