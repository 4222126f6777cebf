//! Ordinal date display used throughout the agreement text.
//!
//! Agreement dates are stored and rendered as `"7th March 2012"`; the
//! registration date drops the ordinal suffix (`"07 March 2012"`).

use chrono::{Datelike, NaiveDate};

/// English ordinal suffix for a day of month: 1 -> "st", 2 -> "nd",
/// 3 -> "rd", everything else "th". The teens (10..=20) are always "th".
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (10..=20).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// `"7th March 2012"` — unpadded day with ordinal suffix.
pub fn format_with_ordinal(date: NaiveDate) -> String {
    format!(
        "{}{} {}",
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%B %Y")
    )
}

/// `"07 March 2012"` — zero-padded day, no suffix.
pub fn format_without_ordinal(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// Parse `"7th March 2012"` (suffix optional) back into a date.
///
/// The suffix is stripped by trimming trailing letters from the day token,
/// so `"07 March 2012"` parses too.
pub fn parse_ordinal(text: &str) -> chrono::ParseResult<NaiveDate> {
    let mut parts = text.split_whitespace();
    let day_token = parts.next().unwrap_or("");
    let day = day_token.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let rest: Vec<&str> = parts.collect();
    let normalized = format!("{} {}", day, rest.join(" "));
    NaiveDate::parse_from_str(normalized.trim(), "%d %B %Y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_suffix_teens() {
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(23), "rd");
    }

    #[test]
    fn test_format_round_trip() {
        let date = NaiveDate::from_ymd_opt(2012, 3, 7).unwrap();
        assert_eq!(format_with_ordinal(date), "7th March 2012");
        assert_eq!(format_without_ordinal(date), "07 March 2012");
        assert_eq!(parse_ordinal("7th March 2012").unwrap(), date);
        assert_eq!(parse_ordinal("07 March 2012").unwrap(), date);
    }
}
