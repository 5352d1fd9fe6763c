//! Tests for CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from_iter(["roomwatch"]);

        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_webhook_options() {
        let cli = Cli::parse_from_iter([
            "roomwatch",
            "--webhook-url",
            "https://hooks.slack.com/services/T000/B111/xyz",
            "--retry-count",
            "5",
            "--retry-delay",
            "2",
            "--timeout",
            "30",
        ]);

        assert_eq!(
            cli.webhook_url.as_deref(),
            Some("https://hooks.slack.com/services/T000/B111/xyz")
        );
        assert_eq!(cli.retry_count, Some(5));
        assert_eq!(cli.retry_delay, Some(2));
        assert_eq!(cli.timeout, Some(30));
    }

    #[test]
    fn parse_threshold_options() {
        let cli = Cli::parse_from_iter([
            "roomwatch",
            "--temp-low",
            "-5",
            "--temp-high",
            "35.5",
            "--humidity-low",
            "10",
            "--humidity-high",
            "80",
        ]);

        assert_eq!(cli.temp_low, Some(-5.0));
        assert_eq!(cli.temp_high, Some(35.5));
        assert_eq!(cli.humidity_low, Some(10.0));
        assert_eq!(cli.humidity_high, Some(80.0));
    }

    #[test]
    fn parse_timing_options() {
        let cli = Cli::parse_from_iter([
            "roomwatch",
            "--cooldown",
            "600",
            "--sampling-interval",
            "30",
            "--status-interval",
            "1800",
        ]);

        assert_eq!(cli.cooldown, Some(600));
        assert_eq!(cli.sampling_interval, Some(30));
        assert_eq!(cli.status_interval, Some(1800));
    }

    #[test]
    fn parse_sensor_options() {
        let cli = Cli::parse_from_iter([
            "roomwatch",
            "--mock-sensors",
            "--iio-device",
            "/sys/bus/iio/devices/iio:device1",
        ]);

        assert_eq!(cli.mock_sensors, Some(true));
        assert_eq!(
            cli.iio_device,
            Some(PathBuf::from("/sys/bus/iio/devices/iio:device1"))
        );
    }

    #[test]
    fn parse_config_and_verbose_short_flags() {
        let cli = Cli::parse_from_iter(["roomwatch", "-c", "room.toml", "-v"]);

        assert_eq!(cli.config, Some(PathBuf::from("room.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn non_numeric_retry_count_is_rejected() {
        let result = Cli::try_parse_from(["roomwatch", "--retry-count", "many"]);
        assert!(result.is_err());
    }
}

mod switches {
    use super::*;

    #[test]
    fn bare_flag_means_true() {
        let cli = Cli::parse_from_iter(["roomwatch", "--status-updates", "--status-on-startup"]);

        assert_eq!(cli.status_updates, Some(true));
        assert_eq!(cli.status_on_startup, Some(true));
    }

    #[test]
    fn explicit_false_is_kept() {
        let cli = Cli::parse_from_iter(["roomwatch", "--webhook-enabled", "false"]);
        assert_eq!(cli.webhook_enabled, Some(false));
    }

    #[test]
    fn boolish_spellings_are_accepted() {
        let on = Cli::parse_from_iter(["roomwatch", "--status-updates", "yes"]);
        assert_eq!(on.status_updates, Some(true));

        let off = Cli::parse_from_iter(["roomwatch", "--status-updates", "0"]);
        assert_eq!(off.status_updates, Some(false));
    }

    #[test]
    fn absent_switch_is_none() {
        let cli = Cli::parse_from_iter(["roomwatch"]);

        assert!(cli.webhook_enabled.is_none());
        assert!(cli.status_updates.is_none());
        assert!(cli.mock_sensors.is_none());
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn parse_init_default_output() {
        let cli = Cli::parse_from_iter(["roomwatch", "init"]);

        assert!(cli.is_init());
        assert!(!cli.is_test());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("roomwatch.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_init_custom_output() {
        let cli = Cli::parse_from_iter(["roomwatch", "init", "--output", "/etc/roomwatch.toml"]);

        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("/etc/roomwatch.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_test_command() {
        let cli = Cli::parse_from_iter(["roomwatch", "test"]);

        assert!(cli.is_test());
        assert!(!cli.is_init());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "roomwatch",
            "test",
            "--webhook-url",
            "https://example.com/hook",
            "-c",
            "room.toml",
        ]);

        assert!(cli.is_test());
        assert_eq!(cli.webhook_url.as_deref(), Some("https://example.com/hook"));
        assert_eq!(cli.config, Some(PathBuf::from("room.toml")));
    }
}
