use std::str::FromStr;

use num_traits::PrimInt;

/// Retrosheet uses 0 (and sometimes -1) for unknown numeric info values.
pub(crate) fn parse_positive_int<T: PrimInt + FromStr>(int_str: &str) -> Option<T> {
    int_str
        .parse::<T>()
        .ok()
        .filter(|i| !i.is_zero())
}

/// Non-overlapping substring count, scanning left to right.
pub(crate) fn count_matches(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Empty strings become `None`.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_int_filters_unknowns() {
        assert_eq!(parse_positive_int::<u8>("72"), Some(72));
        assert_eq!(parse_positive_int::<u8>("0"), None);
        assert_eq!(parse_positive_int::<u8>("-1"), None);
        assert_eq!(parse_positive_int::<u32>(""), None);
    }

    #[test]
    fn counts_do_not_overlap() {
        assert_eq!(count_matches("SB2;SB3", "SB"), 2);
        assert_eq!(count_matches("URUR", "UR"), 2);
        assert_eq!(count_matches("HHH", "HH"), 1);
        assert_eq!(count_matches("K", "SB"), 0);
    }
}
