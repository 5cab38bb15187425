// Project-wide constants
//
// Centralised here so port numbers and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default bind address for the HTTP service (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";

/// Prefix every versioned route is mounted under.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Name reported by the root endpoint.
pub const DEFAULT_PROJECT_NAME: &str = "Mindit AI Chatbot API";

/// Chat-completions model used when neither config nor env names one.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";

/// OpenAI-compatible endpoint root (without the `/v1/...` path).
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Sampling temperature for every completion. Fixed; not configurable.
pub const LLM_TEMPERATURE: f32 = 0.7;

/// Default completion budget per request.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default per-call timeout for the provider, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Request bodies larger than this are rejected by the transport.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Location of the optional config file, relative to the home directory.
pub const CONFIG_FILE_RELATIVE: &str = ".mindit/config.toml";
