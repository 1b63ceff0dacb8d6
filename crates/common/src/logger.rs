use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Quiet targets that flood the log at debug level.
const NOISY_TARGETS: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn"];

pub fn setup_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        // .with_file(true)
        // .with_line_number(true)
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .compact()
        .with_env_filter(quiet_noisy_targets(filter))
        .init();
}

fn quiet_noisy_targets(mut filter: EnvFilter) -> EnvFilter {
    for target in NOISY_TARGETS {
        if let Ok(directive) = target.parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_user_spec() {
        let filter = quiet_noisy_targets(EnvFilter::new("relay=debug"));
        let rendered = filter.to_string();
        assert!(rendered.contains("relay=debug"));
        assert!(rendered.contains("hyper=warn"));
        assert!(rendered.contains("reqwest=warn"));
    }

    #[test]
    fn test_default_filter() {
        let filter = quiet_noisy_targets(EnvFilter::new(DEFAULT_FILTER));
        assert!(filter.to_string().contains("info"));
    }
}
