//! Shared helpers for sink configuration tests.

#![allow(dead_code)]

use objsink_s3::common::{ConfigLogger, RawConfig, SharedLogger};
use objsink_s3::keys::{
    AWS_ACCESS_KEY_ID, AWS_ACCESS_KEY_ID_CONFIG, AWS_S3_BUCKET, AWS_S3_BUCKET_NAME_CONFIG,
    AWS_SECRET_ACCESS_KEY, AWS_SECRET_ACCESS_KEY_CONFIG,
};
use std::sync::{Arc, Mutex};

/// Logger that keeps every notice for later assertions.
#[derive(Default)]
pub struct RecordingLogger {
    notices: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn shared() -> (Arc<Self>, SharedLogger) {
        let logger = Arc::new(Self::default());
        let shared: SharedLogger = logger.clone();
        (logger, shared)
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().expect("lock").clone()
    }

    pub fn mentions(&self, subject: &str) -> bool {
        self.notices()
            .iter()
            .any(|notice| notice.starts_with(&format!("{subject} ")))
    }
}

impl ConfigLogger for RecordingLogger {
    fn deprecated(&self, subject: &str, message: &str) {
        self.notices
            .lock()
            .expect("lock")
            .push(format!("{subject} {message}"));
    }
}

/// Required settings under their current names.
pub fn current_required() -> RawConfig {
    RawConfig::new()
        .with(AWS_ACCESS_KEY_ID_CONFIG, "AKIA-current")
        .with(AWS_SECRET_ACCESS_KEY_CONFIG, "secret-current")
        .with(AWS_S3_BUCKET_NAME_CONFIG, "bucket-current")
}

/// Required settings under their deprecated names.
pub fn legacy_required() -> RawConfig {
    RawConfig::new()
        .with(AWS_ACCESS_KEY_ID, "AKIA-legacy")
        .with(AWS_SECRET_ACCESS_KEY, "secret-legacy")
        .with(AWS_S3_BUCKET, "bucket-legacy")
}
