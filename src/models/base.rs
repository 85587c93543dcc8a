//! Identifiers and timestamps for records this service writes itself.

use chrono::{DateTime, SubsecRound, Utc};
use ulid::Ulid;

/// Returns a new sortable unique id: a lower-cased ULID.
pub fn new_id() -> String {
    Ulid::new().to_string().to_lowercase()
}

/// Returns the current UTC time truncated to microseconds, the precision the store keeps.
pub fn new_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn ids_are_lowercase_and_sortable() {
        let first = new_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = new_id();

        assert_eq!(first.len(), 26);
        assert_eq!(first, first.to_lowercase());
        assert!(first < second);
    }

    #[test]
    fn timestamps_have_microsecond_precision() {
        assert_eq!(new_timestamp().nanosecond() % 1_000, 0);
    }
}
