//! Property-based tests for member IDs

use proptest::prelude::*;

use membergate::shared::MemberId;

proptest! {
    #[test]
    fn test_format_parse_round_trip(value in 0u32..10_000_000) {
        let id = MemberId::new(value);
        let rendered = id.to_string();

        prop_assert!(rendered.starts_with('M'));
        prop_assert!(rendered.len() >= 5);
        prop_assert_eq!(MemberId::parse(&rendered).unwrap(), id);
    }

    #[test]
    fn test_next_is_strictly_greater(value in 0u32..u32::MAX) {
        let id = MemberId::new(value);
        let next = id.next().unwrap();
        prop_assert!(next > id);
        prop_assert_eq!(next.value(), value + 1);
    }

    #[test]
    fn test_parse_rejects_missing_prefix(digits in "[0-9]{4,8}") {
        prop_assert!(MemberId::parse(&digits).is_err());
    }

    #[test]
    fn test_parse_rejects_short_suffix(digits in "[0-9]{0,3}") {
        let raw = format!("M{}", digits);
        prop_assert!(MemberId::parse(&raw).is_err());
    }
}
