//! Log output for the CLI tool.
//!
//! The library logs through the `log` facade; the subscriber's `tracing-log`
//! bridge forwards those records to stderr.

use tracing_subscriber::filter::LevelFilter;

/// Installs the stderr subscriber. Warnings are shown unless `quiet`;
/// `verbose` adds pipeline progress.
pub fn init(quiet: bool, verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level_filter(quiet, verbose))
        .with_target(false)
        .without_time()
        .init();
}

fn level_filter(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::ERROR
    } else if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_follows_flags() {
        assert_eq!(level_filter(true, false), LevelFilter::ERROR);
        assert_eq!(level_filter(false, true), LevelFilter::DEBUG);
        assert_eq!(level_filter(false, false), LevelFilter::WARN);
    }
}
