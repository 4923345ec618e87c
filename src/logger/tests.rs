//! Tests for the logger module

use crate::logger::config::*;
use crate::logger::{LoggerError, build_filter};
use tracing::Level;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.colored);
    }

    #[test]
    fn test_parse_from_settings_names() {
        let config = LoggerConfig::parse("WARN", "Compact", false).unwrap();
        assert_eq!(config.level, Level::WARN);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.colored);
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert!(matches!(
            LoggerConfig::parse("loud", "full", true),
            Err(LoggerError::Config { .. })
        ));
        assert!(LoggerConfig::parse("info", "yaml", true).is_err());
    }

    #[test]
    fn test_log_format_names() {
        for format in [LogFormat::Full, LogFormat::Compact, LogFormat::Json] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_debug_directive_quiets_http_internals() {
        let config = LoggerConfig::default().with_level(Level::DEBUG);
        let directive = config.directive();
        assert!(directive.starts_with("debug,"));
        assert!(directive.contains("hyper=info"));

        assert_eq!(LoggerConfig::default().directive(), "info");
        assert_eq!(
            LoggerConfig::default().with_level(Level::ERROR).directive(),
            "error"
        );
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let filter = build_filter("dingtalk_bot=debug,reqwest=warn").unwrap();
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing_subscriber::filter::LevelFilter::DEBUG)
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn property_level_names_parse_case_insensitively(
            level in prop::sample::select(vec!["trace", "debug", "info", "warn", "error"]),
            upper in any::<bool>(),
        ) {
            let name = if upper {
                level.to_uppercase()
            } else {
                level.to_string()
            };
            prop_assert!(parse_level(&name).is_ok());
        }

        #[test]
        fn property_unknown_levels_fail(level in "[a-z]{6,12}") {
            prop_assert!(parse_level(&level).is_err());
        }
    }
}
