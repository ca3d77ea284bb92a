//! Configuration model of the S3 sink connector.
//!
//! The host hands over a flat key/value map; [`S3SinkConfig`] validates it
//! against the sink schema and exposes typed getters that reconcile the
//! current option names with their deprecated predecessors.

pub mod config;
pub mod keys;
pub mod region;
pub mod schema;

pub use config::S3SinkConfig;
pub use region::Region;
pub use schema::build_schema;

/// Re-export for convenience.
pub use objsink_common as common;

/// Install `env_logger` as the `log` backend when built with the `logging`
/// feature, so deprecation notices and load diagnostics reach stderr.
///
/// Hosts that bring their own `log` backend can skip this. Calling it when a
/// logger is already installed leaves that logger in place.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        if env_logger::try_init().is_err() {
            log::debug!("log backend already installed; keeping it");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_repeatable() {
        init_logging();
        init_logging();
        let def = S3SinkConfig::config_def().expect("schema");
        assert!(!def.is_empty());
    }
}
