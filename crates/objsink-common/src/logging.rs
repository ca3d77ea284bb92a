//! Logging collaborator used by validators and template bindings.
//!
//! Deprecation notices are routed through a [`ConfigLogger`] handed to the
//! schema at build time, so callers decide where the warnings end up.

use log::warn;
use std::sync::Arc;

/// Sink for notices emitted while options are validated or resolved.
pub trait ConfigLogger: Send + Sync {
    /// Report use of a deprecated option or template variable.
    fn deprecated(&self, subject: &str, message: &str);
}

/// Shared handle to a logger.
pub type SharedLogger = Arc<dyn ConfigLogger>;

/// Default logger forwarding to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl ConfigLogger for LogFacade {
    fn deprecated(&self, subject: &str, message: &str) {
        warn!(target: "objsink::config", "{subject} {message}");
    }
}

/// Build the default shared logger.
pub fn default_logger() -> SharedLogger {
    Arc::new(LogFacade)
}

/// Message appended to every deprecated option notice.
pub const DEPRECATED_OPTION_MESSAGE: &str =
    "property is deprecated please read documentation for the new name";

/// Message appended to every deprecated template variable notice.
pub const DEPRECATED_VARIABLE_MESSAGE: &str =
    "variable is deprecated please read documentation for the new name";
