//! Tests for `RetryPolicy`.

use super::RetryPolicy;
use std::time::Duration;

fn policy(attempts: u32, base_secs: u64) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_secs(base_secs))
}

mod construction {
    use super::*;

    #[test]
    fn keeps_budget_and_base_delay() {
        let policy = policy(4, 7);

        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.base_delay(), Duration::from_secs(7));
    }

    #[test]
    fn zero_attempts_still_allows_one() {
        assert_eq!(policy(0, 5).max_attempts(), 1);
    }

    #[test]
    fn ceiling_is_five_minutes() {
        assert_eq!(RetryPolicy::MAX_DELAY, Duration::from_secs(300));
    }
}

mod delay_for_retry {
    use super::*;

    #[test]
    fn first_retry_waits_base_delay() {
        assert_eq!(policy(3, 5).delay_for_retry(0), Duration::from_secs(5));
    }

    #[test]
    fn each_retry_doubles_the_delay() {
        let policy = policy(10, 5);

        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(10));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(20));
        assert_eq!(policy.delay_for_retry(3), Duration::from_secs(40));
    }

    #[test]
    fn delay_is_capped() {
        // 60 * 2^3 = 480 -> 300
        assert_eq!(policy(10, 60).delay_for_retry(3), Duration::from_secs(300));
    }

    #[test]
    fn huge_retry_number_stays_at_cap() {
        let policy = policy(10, 1);

        assert_eq!(policy.delay_for_retry(31), Duration::from_secs(300));
        assert_eq!(policy.delay_for_retry(32), Duration::from_secs(300));
        assert_eq!(policy.delay_for_retry(u32::MAX), Duration::from_secs(300));
    }

    #[test]
    fn sub_second_base_is_kept() {
        let policy = RetryPolicy::new(3, Duration::from_millis(250));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(1));
    }
}

mod should_retry {
    use super::*;

    #[test]
    fn true_while_under_budget() {
        let policy = policy(3, 1);

        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
    }

    #[test]
    fn false_at_or_over_budget() {
        let policy = policy(3, 1);

        assert!(!policy.should_retry(3));
        assert!(!policy.should_retry(4));
    }

    #[test]
    fn single_attempt_never_retries() {
        assert!(!policy(1, 1).should_retry(1));
    }
}
