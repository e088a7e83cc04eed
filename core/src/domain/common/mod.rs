use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

/// Permissive on purpose: the detector over-generates and aggregation keeps
/// one record per label.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.03;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10MB

#[derive(Clone, Debug, Default)]
pub struct DiaSenseConfig {
    pub vision: VisionConfig,
    pub identity: IdentityConfig,
    pub detector: DetectorConfig,
    pub ingestion: IngestionConfig,
}

#[derive(Clone, Debug)]
pub struct VisionConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryConfig,
    pub max_concurrent_requests: usize,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
            max_concurrent_requests: 8,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (1-based): `initial * 2^(attempt-1)`.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor)
    }
}

#[derive(Clone, Debug)]
pub struct IdentityConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub insecure_dev_auth: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://identitytoolkit.googleapis.com".to_string(),
            timeout: Duration::from_secs(10),
            insecure_dev_auth: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DetectorConfig {
    pub url: Option<String>,
    pub confidence_threshold: f32,
    pub timeout: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            url: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug)]
pub struct IngestionConfig {
    pub max_upload_bytes: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
