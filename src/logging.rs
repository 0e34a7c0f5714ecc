//! Diagnostics go to stderr so stdout carries only the version list.

use tracing_subscriber::EnvFilter;

/// Directive used when neither `--log-level` nor `RUST_LOG` is given
pub const DEFAULT_LOG_DIRECTIVE: &str = "get_version=warn";

/// Install the global subscriber. `directive` wins over `RUST_LOG`.
pub fn init(directive: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive, std::env::var("RUST_LOG").ok()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn env_filter(directive: Option<&str>, rust_log: Option<String>) -> EnvFilter {
    let directive = directive
        .map(str::to_string)
        .or(rust_log)
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string());

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("debug"), Some("info".to_string()), "debug")]
    #[case(None, Some("info".to_string()), "info")]
    #[case(None, None, DEFAULT_LOG_DIRECTIVE)]
    fn env_filter_prefers_explicit_directive(
        #[case] directive: Option<&str>,
        #[case] rust_log: Option<String>,
        #[case] expected: &str,
    ) {
        assert_eq!(env_filter(directive, rust_log).to_string(), expected);
    }

    #[test]
    fn env_filter_falls_back_on_invalid_directive() {
        let filter = env_filter(Some("get_version=notalevel"), None);

        assert_eq!(filter.to_string(), DEFAULT_LOG_DIRECTIVE);
    }
}
