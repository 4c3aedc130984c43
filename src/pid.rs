use std::sync::LazyLock;

use regex::Regex;

/// Digits at the start of the token (`1234`), or right after `",` or
/// `",pid=` as in ss's `users:(("sshd",pid=812,fd=3))`.
static PID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|",|",pid=)(?P<pid>\d+)"#).expect("PID pattern is valid")
});

/// Pulls the owning PID out of an owner column token.
///
/// A missing token (row too short) or a token without a recognisable PID
/// yields `None`.
#[must_use]
pub fn extract_pid(token: Option<&str>) -> Option<u32> {
    let caps = PID_PATTERN.captures(token?)?;
    caps["pid"].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_pid() {
        assert_eq!(extract_pid(Some("1234")), Some(1234));
    }

    #[test]
    fn ss_users_attribute() {
        assert_eq!(
            extract_pid(Some(r#"users:(("avahi-daemon",pid=812,fd=12))"#)),
            Some(812)
        );
    }

    #[test]
    fn first_process_wins_when_several_share_a_socket() {
        assert_eq!(
            extract_pid(Some(
                r#"users:(("nginx",pid=1001,fd=6),("nginx",pid=1000,fd=6))"#
            )),
            Some(1001)
        );
    }

    #[test]
    fn leading_digits_of_mixed_token() {
        assert_eq!(extract_pid(Some("4321:launchd")), Some(4321));
    }

    #[test]
    fn digits_after_quote_comma() {
        assert_eq!(extract_pid(Some(r#""name",77"#)), Some(77));
    }

    #[test]
    fn missing_token_is_absent() {
        assert_eq!(extract_pid(None), None);
    }

    #[test]
    fn token_without_pid_is_absent() {
        assert_eq!(extract_pid(Some("LISTEN")), None);
        assert_eq!(extract_pid(Some("*:*")), None);
        assert_eq!(extract_pid(Some("")), None);
        assert_eq!(extract_pid(Some("fd=12")), None);
    }

    #[test]
    fn overflowing_pid_is_absent() {
        assert_eq!(extract_pid(Some("99999999999")), None);
    }
}
