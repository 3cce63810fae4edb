use chrono::Utc;

/// Get current timestamp in milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_positive_and_monotonic() {
        let first = now_ms();
        let second = now_ms();
        assert!(first > 0);
        assert!(second >= first);
    }
}
