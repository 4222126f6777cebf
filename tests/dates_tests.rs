use chrono::NaiveDate;
use contract_desk_server::docgen::dates::{
    format_with_ordinal, format_without_ordinal, ordinal_suffix, parse_ordinal,
};

#[test]
fn test_ordinal_suffix_table() {
    assert_eq!(ordinal_suffix(1), "st");
    assert_eq!(ordinal_suffix(2), "nd");
    assert_eq!(ordinal_suffix(3), "rd");
    assert_eq!(ordinal_suffix(4), "th");
    assert_eq!(ordinal_suffix(11), "th");
    assert_eq!(ordinal_suffix(12), "th");
    assert_eq!(ordinal_suffix(13), "th");
    assert_eq!(ordinal_suffix(21), "st");
    assert_eq!(ordinal_suffix(22), "nd");
    assert_eq!(ordinal_suffix(23), "rd");
    assert_eq!(ordinal_suffix(30), "th");
    assert_eq!(ordinal_suffix(31), "st");
    // The suffix follows day % 100, so the hundreds behave like the teens.
    assert_eq!(ordinal_suffix(101), "st");
    assert_eq!(ordinal_suffix(111), "th");
}

#[test]
fn test_format_with_ordinal_unpadded_day() {
    let date = NaiveDate::from_ymd_opt(2012, 3, 7).unwrap();
    assert_eq!(format_with_ordinal(date), "7th March 2012");

    let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    assert_eq!(format_with_ordinal(date), "30th June 2025");

    let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    assert_eq!(format_with_ordinal(date), "1st March 2025");
}

#[test]
fn test_format_without_ordinal_zero_pads() {
    let date = NaiveDate::from_ymd_opt(2012, 3, 7).unwrap();
    assert_eq!(format_without_ordinal(date), "07 March 2012");

    let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
    assert_eq!(format_without_ordinal(date), "25 December 2024");
}

#[test]
fn test_parse_accepts_suffixed_and_padded_forms() {
    let expected = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    assert_eq!(parse_ordinal("1st March 2025").unwrap(), expected);
    assert_eq!(parse_ordinal("01 March 2025").unwrap(), expected);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(parse_ordinal("not a date").is_err());
    assert!(parse_ordinal("").is_err());
    assert!(parse_ordinal("32nd March 2025").is_err());
}

#[test]
fn test_round_trip_every_day_of_march() {
    for day in 1..=31 {
        let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let formatted = format_with_ordinal(date);
        assert_eq!(parse_ordinal(&formatted).unwrap(), date, "{formatted}");
    }
}

#[test]
fn test_round_trip_every_day_of_february() {
    for day in 1..=28 {
        let date = NaiveDate::from_ymd_opt(2023, 2, day).unwrap();
        let formatted = format_with_ordinal(date);
        assert_eq!(parse_ordinal(&formatted).unwrap(), date, "{formatted}");
    }
}
