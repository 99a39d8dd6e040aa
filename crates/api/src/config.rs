use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub speech: SpeechConfig,
    pub retry: RetryConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            speech: SpeechConfig {
                base_url: "http://localhost:2700".to_string(),
                model: "vosk-model-hi-0.22".to_string(),
                request_timeout_secs: 120,
            },
            retry: RetryConfig {
                max_retries: 3,
                initial_backoff_ms: 1000,
                max_backoff_ms: 10000,
            },
            cache: CacheConfig {
                enabled: true,
                max_entries: 1000,
            },
        }
    }
}

impl AppConfig {
    #![allow(dead_code)]

    /// Office runs against a local service: short timeouts, no retry
    /// patience, large transcript cache.
    pub fn local_mode() -> Self {
        Self {
            speech: SpeechConfig {
                request_timeout_secs: 30,
                ..Self::default().speech
            },
            retry: RetryConfig {
                max_retries: 1,
                initial_backoff_ms: 500,
                max_backoff_ms: 2000,
            },
            cache: CacheConfig {
                enabled: true,
                max_entries: 10000,
            },
        }
    }

    /// Field runs over an unreliable link: long timeouts, persistent
    /// retries, cache disabled so corrected re-recordings go through.
    pub fn field_mode() -> Self {
        Self {
            speech: SpeechConfig {
                request_timeout_secs: 300,
                ..Self::default().speech
            },
            retry: RetryConfig {
                max_retries: 5,
                initial_backoff_ms: 2000,
                max_backoff_ms: 30000,
            },
            cache: CacheConfig {
                enabled: false,
                max_entries: 0,
            },
        }
    }
}
