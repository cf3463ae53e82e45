use std::io::Write;

use log::LevelFilter;

/// Installs an `env_logger` writing `[LEVEL] message` lines to stderr. `RUST_LOG` overrides
/// `level`. Calling it again (e.g. from several tests) keeps the first logger.
pub fn build_logger_for_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{:<5}] {}", record.level(), record.args()))
        .try_init();
}

/// Like [`build_logger_for_level`], but each unit of `verbosity` raises `default` by one level
pub fn build_logger_for_verbosity(default: LevelFilter, verbosity: usize) {
    build_logger_for_level(raise_level(default, verbosity));
}

fn raise_level(default: LevelFilter, verbosity: usize) -> LevelFilter {
    const LEVELS: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let base = LEVELS.iter().position(|&l| l == default).unwrap_or(0);
    LEVELS[(base + verbosity).min(LEVELS.len() - 1)]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verbosity() {
        assert_eq!(raise_level(LevelFilter::Warn, 0), LevelFilter::Warn);
        assert_eq!(raise_level(LevelFilter::Warn, 1), LevelFilter::Info);
        assert_eq!(raise_level(LevelFilter::Warn, 2), LevelFilter::Debug);
        assert_eq!(raise_level(LevelFilter::Warn, 17), LevelFilter::Trace);
        assert_eq!(raise_level(LevelFilter::Off, 1), LevelFilter::Error);
    }
}
