/// Separator between the launch year and the launch sequence in an
/// international designator (e.g., "2023-001A").
pub const DESIGNATOR_SEPARATOR: char = '-';

/// The year derived from an international designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearResolution {
    /// The leading segment parsed as a year.
    Year(i32),
    /// The leading segment is an integer, but too large to be a year any
    /// chronology could list. Such designators can never be found.
    OutOfRange,
    /// The leading segment is not an integer.
    Invalid,
}

/// Derive the launch year from a designator such as "2023-001A".
///
/// Only the segment before the first separator is considered. A designator
/// with no separator is parsed whole, so "1998" resolves to 1998. The segment
/// may carry surrounding whitespace, a leading `+`, and single underscores
/// between digit groups ("2_023"). Anything else resolves to
/// [`YearResolution::Invalid`] rather than an error; callers are expected to
/// have rejected blank input.
pub fn resolve_year(designator: &str) -> YearResolution {
    let leading = designator
        .split(DESIGNATOR_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim();

    let Some(digits) = integer_digits(leading) else {
        return YearResolution::Invalid;
    };

    // All ASCII digits, so overflow is the only way parsing can fail.
    match digits.parse::<i32>() {
        Ok(year) => YearResolution::Year(year),
        Err(_) => YearResolution::OutOfRange,
    }
}

/// The bare digits of an unsigned integer literal, or `None` if `segment`
/// is not one.
fn integer_digits(segment: &str) -> Option<String> {
    let unsigned = segment.strip_prefix('+').unwrap_or(segment);

    let starts_with_digit = unsigned.starts_with(|c: char| c.is_ascii_digit());
    let ends_with_digit = unsigned.ends_with(|c: char| c.is_ascii_digit());
    if !starts_with_digit || !ends_with_digit || unsigned.contains("__") {
        return None;
    }
    if !unsigned.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return None;
    }

    Some(unsigned.chars().filter(|c| *c != '_').collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_year() {
        assert_eq!(resolve_year("2023-001"), YearResolution::Year(2023));
        assert_eq!(resolve_year("1957-001B"), YearResolution::Year(1957));
        assert_eq!(resolve_year("1998"), YearResolution::Year(1998));
        assert_eq!(resolve_year("2023 -001"), YearResolution::Year(2023));
        assert_eq!(resolve_year("+2023-001"), YearResolution::Year(2023));
    }

    #[test]
    fn test_resolve_year_digit_groups() {
        assert_eq!(resolve_year("2_023-001"), YearResolution::Year(2023));
        assert_eq!(resolve_year("2__023-001"), YearResolution::Invalid);
        assert_eq!(resolve_year("_2023-001"), YearResolution::Invalid);
        assert_eq!(resolve_year("2023_-001"), YearResolution::Invalid);
    }

    #[test]
    fn test_resolve_year_only_uses_first_segment() {
        assert_eq!(resolve_year("2023-abc-xyz"), YearResolution::Year(2023));
        assert_eq!(resolve_year("abcd-2023"), YearResolution::Invalid);
    }

    #[test]
    fn test_resolve_year_out_of_range() {
        assert_eq!(resolve_year("99999999999-001"), YearResolution::OutOfRange);
        assert_eq!(resolve_year("+99999999999999999999999-001"), YearResolution::OutOfRange);
    }

    #[test]
    fn test_resolve_year_invalid() {
        assert_eq!(resolve_year("abcd-002"), YearResolution::Invalid);
        assert_eq!(resolve_year("-2023-001"), YearResolution::Invalid);
        assert_eq!(resolve_year("20x3-001"), YearResolution::Invalid);
        assert_eq!(resolve_year("+-001"), YearResolution::Invalid);
        assert_eq!(resolve_year("++2023-001"), YearResolution::Invalid);
    }
}
