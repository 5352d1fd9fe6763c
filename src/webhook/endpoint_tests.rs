//! Tests for `EndpointConfig` and `EndpointUpdate`.

use std::time::Duration;

use super::{EndpointConfig, EndpointError, EndpointUpdate, parse_endpoint_url};

fn configured() -> EndpointConfig {
    EndpointConfig::new(parse_endpoint_url("https://hooks.slack.com/services/T000/B111/xyz").unwrap())
}

mod construction {
    use super::*;

    #[test]
    fn new_is_enabled_with_defaults() {
        let endpoint = configured();

        assert!(endpoint.enabled);
        assert!(endpoint.is_active());
        assert_eq!(endpoint.retry_count, 3);
        assert_eq!(endpoint.retry_delay, Duration::from_secs(5));
        assert_eq!(endpoint.timeout, Duration::from_secs(10));
    }

    #[test]
    fn unconfigured_is_inactive() {
        let endpoint = EndpointConfig::unconfigured();

        assert!(endpoint.url.is_none());
        assert!(!endpoint.is_active());
        assert_eq!(EndpointConfig::default(), endpoint);
    }

    #[test]
    fn disabled_endpoint_is_inactive() {
        assert!(!configured().with_enabled(false).is_active());
    }

    #[test]
    fn display_masks_url() {
        let shown = configured().to_string();

        assert!(shown.starts_with("https://hooks.slack.com "));
        assert!(!shown.contains("T000"));
        assert!(shown.contains("retry: 3x/5s"));
    }

    #[test]
    fn unconfigured_display_says_none() {
        assert!(EndpointConfig::unconfigured().to_string().starts_with("none"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(configured().validate(), Ok(()));
        assert_eq!(EndpointConfig::unconfigured().validate(), Ok(()));
    }

    #[test]
    fn retry_count_bounds_are_inclusive() {
        assert!(configured().with_retry_count(1).validate().is_ok());
        assert!(configured().with_retry_count(10).validate().is_ok());
    }

    #[test]
    fn zero_retry_count_is_rejected() {
        let result = configured().with_retry_count(0).validate();

        assert_eq!(
            result,
            Err(EndpointError::OutOfRange {
                field: "retry_count",
                value: 0,
                min: 1,
                max: 10,
            })
        );
    }

    #[test]
    fn retry_delay_over_a_minute_is_rejected() {
        let result = configured()
            .with_retry_delay(Duration::from_secs(61))
            .validate();

        assert!(matches!(
            result,
            Err(EndpointError::OutOfRange {
                field: "retry_delay",
                ..
            })
        ));
    }

    #[test]
    fn short_timeout_is_rejected() {
        let result = configured().with_timeout(Duration::from_secs(4)).validate();

        assert!(matches!(
            result,
            Err(EndpointError::OutOfRange {
                field: "timeout",
                ..
            })
        ));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let result = parse_endpoint_url("ftp://example.com/hook");

        assert!(matches!(result, Err(EndpointError::InvalidUrl { .. })));
    }

    #[test]
    fn unparsable_url_error_does_not_echo_input() {
        let err = parse_endpoint_url("hooks.slack.com/services/SECRET").unwrap_err();

        assert!(!err.to_string().contains("SECRET"));
    }
}

mod retry_policy {
    use super::*;

    #[test]
    fn mirrors_endpoint_settings() {
        let policy = configured()
            .with_retry_count(4)
            .with_retry_delay(Duration::from_secs(2))
            .retry_policy();

        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(4));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(8));
    }

    #[test]
    fn backoff_is_capped_at_five_minutes() {
        let policy = configured()
            .with_retry_delay(Duration::from_secs(60))
            .retry_policy();

        assert_eq!(policy.delay_for_retry(4), Duration::from_secs(300));
    }
}

mod update {
    use super::*;

    #[test]
    fn empty_update_keeps_everything() {
        let current = configured();

        assert_eq!(EndpointUpdate::default().apply(&current), Ok(current));
    }

    #[test]
    fn merges_only_present_fields() {
        let update = EndpointUpdate {
            enabled: Some(false),
            retry_count: Some(5),
            ..EndpointUpdate::default()
        };

        let merged = update.apply(&configured()).unwrap();

        assert!(!merged.enabled);
        assert_eq!(merged.retry_count, 5);
        assert_eq!(merged.timeout, Duration::from_secs(10));
        assert_eq!(merged.url, configured().url);
    }

    #[test]
    fn url_update_configures_an_unconfigured_endpoint() {
        let update = EndpointUpdate {
            url: Some("https://example.com/hook".to_string()),
            enabled: Some(true),
            ..EndpointUpdate::default()
        };

        let merged = update.apply(&EndpointConfig::unconfigured()).unwrap();

        assert!(merged.is_active());
        assert_eq!(merged.url.unwrap().as_str(), "https://example.com/hook");
    }

    #[test]
    fn invalid_field_rejects_whole_update() {
        let update = EndpointUpdate {
            enabled: Some(false),
            timeout: Some(500),
            ..EndpointUpdate::default()
        };

        assert!(update.apply(&configured()).is_err());
    }

    #[test]
    fn deserializes_from_json() {
        let update: EndpointUpdate =
            serde_json::from_str(r#"{"enabled": false, "retry_delay": 10}"#).unwrap();

        assert_eq!(update.enabled, Some(false));
        assert_eq!(update.retry_delay, Some(10));
        assert!(update.url.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<EndpointUpdate>(r#"{"retries": 3}"#);

        assert!(result.is_err());
    }
}
