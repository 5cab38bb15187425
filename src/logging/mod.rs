// Tracing subscriber setup
//
// RUST_LOG wins when set; otherwise the configured level applies to this
// crate and tower_http.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter directives for the configured log level.
///
/// A plain level such as "info" is applied to this crate and tower_http.
/// Anything that already looks like a directive list ("mindit=debug",
/// "info,hyper=warn") is used unchanged.
pub fn default_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let level = if level.is_empty() {
        "info".to_string()
    } else {
        level.to_lowercase()
    };
    format!("mindit={level},tower_http={level}")
}

/// Install the global fmt subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives("DEBUG"), "mindit=debug,tower_http=debug");
        assert_eq!(default_directives(" "), "mindit=info,tower_http=info");
    }

    #[test]
    fn test_directive_lists_pass_through() {
        assert_eq!(default_directives("mindit=debug"), "mindit=debug");
        assert_eq!(
            default_directives(" info,tower_http=warn "),
            "info,tower_http=warn"
        );
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_tracing("info");
        init_tracing("debug");
    }
}
