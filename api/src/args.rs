use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use diasense_core::domain::common::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MAX_UPLOAD_BYTES, DetectorConfig, DiaSenseConfig,
    IdentityConfig, IngestionConfig, RetryConfig, VisionConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "diasense-api", version, about = "DiaSense meal analysis API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub vision: VisionArgs,

    #[command(flatten)]
    pub identity: IdentityArgs,

    #[command(flatten)]
    pub detector: DetectorArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "max-upload-bytes", env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct VisionArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub gemini_base_url: String,

    #[arg(id = "vision_timeout_secs", long = "vision-timeout-secs", env = "VISION_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long = "vision-max-retries", env = "VISION_MAX_RETRIES", default_value_t = 2)]
    pub max_retries: u32,

    #[arg(
        long = "vision-initial-backoff-ms",
        env = "VISION_INITIAL_BACKOFF_MS",
        default_value_t = 500
    )]
    pub initial_backoff_ms: u64,

    #[arg(
        long = "vision-max-concurrent-requests",
        env = "VISION_MAX_CONCURRENT_REQUESTS",
        default_value_t = 8
    )]
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct IdentityArgs {
    #[arg(long = "identity-api-key", env = "IDENTITY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(
        long = "identity-base-url",
        env = "IDENTITY_BASE_URL",
        default_value = "https://identitytoolkit.googleapis.com"
    )]
    pub base_url: String,

    #[arg(id = "identity_timeout_secs", long = "identity-timeout-secs", env = "IDENTITY_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Accept any bearer token without verification. Development only.
    #[arg(long = "insecure-dev-auth", env = "INSECURE_DEV_AUTH", default_value_t = false)]
    pub insecure_dev_auth: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DetectorArgs {
    /// Base URL of the detection sidecar. Local detection is disabled when unset.
    #[arg(long = "detector-url", env = "DETECTOR_URL")]
    pub url: Option<String>,

    #[arg(
        long = "detector-confidence-threshold",
        env = "DETECTOR_CONFIDENCE_THRESHOLD",
        default_value_t = DEFAULT_CONFIDENCE_THRESHOLD
    )]
    pub confidence_threshold: f32,

    #[arg(id = "detector_timeout_secs", long = "detector-timeout-secs", env = "DETECTOR_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Default filter, overridden by `RUST_LOG`
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for DiaSenseConfig {
    fn from(args: Args) -> Self {
        Self {
            vision: VisionConfig {
                gemini_api_key: args.vision.gemini_api_key,
                gemini_model: args.vision.gemini_model,
                base_url: args.vision.gemini_base_url,
                timeout: Duration::from_secs(args.vision.timeout_secs),
                retry: RetryConfig {
                    max_retries: args.vision.max_retries,
                    initial_backoff: Duration::from_millis(args.vision.initial_backoff_ms),
                },
                max_concurrent_requests: args.vision.max_concurrent_requests,
            },
            identity: IdentityConfig {
                api_key: args.identity.api_key,
                base_url: args.identity.base_url,
                timeout: Duration::from_secs(args.identity.timeout_secs),
                insecure_dev_auth: args.identity.insecure_dev_auth,
            },
            detector: DetectorConfig {
                url: args.detector.url,
                confidence_threshold: args.detector.confidence_threshold,
                timeout: Duration::from_secs(args.detector.timeout_secs),
            },
            ingestion: IngestionConfig {
                max_upload_bytes: args.server.max_upload_bytes,
            },
        }
    }
}
