//! Logger setup.
//!
//! Log records go to stderr through a [`fern`] dispatcher, stamped with local time.

use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Parses a level name such as `"info"` or `"DEBUG"`. Unknown names yield `None`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse::<LevelFilter>().ok()
}

/// Picks the effective level: a plain level name in `RUST_LOG` wins over the configured one.
pub fn effective_level(configured: &str, env: Option<&str>) -> LevelFilter {
    env.and_then(parse_level)
        .or_else(|| parse_level(configured))
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. Subsequent calls are ignored.
pub fn init(configured_level: &str) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let level = effective_level(configured_level, env.as_deref());

        let result = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {:<5} {}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stderr())
            .apply();

        if let Err(e) = result {
            eprintln!("logger already installed: {e}");
        }
        log::debug!("logging initialized at {level}");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_config() {
        assert_eq!(effective_level("info", Some("trace")), LevelFilter::Trace);
    }

    #[test]
    fn test_env_with_filter_syntax_is_ignored() {
        assert_eq!(
            effective_level("warn", Some("hellogl=debug")),
            LevelFilter::Warn
        );
    }

    #[test]
    fn test_garbage_falls_back_to_info() {
        assert_eq!(effective_level("loud", None), LevelFilter::Info);
        assert_eq!(parse_level(" Error "), Some(LevelFilter::Error));
    }
}
