//! Currency amounts as English words and display strings.
//!
//! The agreement text spells the professional fee out in words next to the
//! numeric amount, and the persisted payment fields carry the
//! thousands-separated display form.

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Convert a whole number to English short-scale words.
///
/// Groups by hundred/thousand/million; there is no grouping word above
/// "Million", so a billion comes out as "One Thousand Million".
/// Returns an empty string for zero — callers decide how zero reads.
pub fn number_to_words(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n < 100 {
        let tail = n % 10;
        if tail == 0 {
            TENS[(n / 10) as usize].to_string()
        } else {
            format!("{} {}", TENS[(n / 10) as usize], ONES[tail as usize])
        }
    } else if n < 1_000 {
        let tail = n % 100;
        if tail == 0 {
            format!("{} Hundred", ONES[(n / 100) as usize])
        } else {
            format!("{} Hundred {}", ONES[(n / 100) as usize], number_to_words(tail))
        }
    } else if n < 1_000_000 {
        let tail = n % 1_000;
        if tail == 0 {
            format!("{} Thousand", number_to_words(n / 1_000))
        } else {
            format!("{} Thousand {}", number_to_words(n / 1_000), number_to_words(tail))
        }
    } else {
        let tail = n % 1_000_000;
        if tail == 0 {
            format!("{} Million", number_to_words(n / 1_000_000))
        } else {
            format!("{} Million {}", number_to_words(n / 1_000_000), number_to_words(tail))
        }
    }
}

/// Spell a non-negative USD amount out in words, e.g.
/// `"One Thousand Two Hundred US Dollars and Fifty Cents Only"`.
///
/// "Dollars" stays plural even for exactly one dollar; "Cent" is singular
/// for exactly one cent. Cents are rounded from the fractional part.
pub fn amount_to_words(amount: f64) -> String {
    let dollars = amount.floor() as u64;
    let cents = ((amount - amount.floor()) * 100.0).round() as u64;

    let dollar_words = if dollars == 0 {
        "Zero".to_string()
    } else {
        number_to_words(dollars)
    };

    if cents > 0 {
        let unit = if cents == 1 { "Cent" } else { "Cents" };
        format!(
            "{} US Dollars and {} {} Only",
            dollar_words,
            number_to_words(cents),
            unit
        )
    } else {
        format!("{} US Dollars Only", dollar_words)
    }
}

/// Format an amount as `"USD 1,234.50"` — thousands separators, two decimals.
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (number, fraction) = match fixed.split_once('.') {
        Some((n, f)) => (n, f),
        None => (fixed.as_str(), "00"),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("USD {sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_to_words_grouping() {
        assert_eq!(number_to_words(1_234), "One Thousand Two Hundred Thirty Four");
        assert_eq!(number_to_words(40), "Forty");
        assert_eq!(number_to_words(115), "One Hundred Fifteen");
        assert_eq!(number_to_words(2_000_000), "Two Million");
    }

    #[test]
    fn test_amount_to_words_cents() {
        assert_eq!(amount_to_words(1.01), "One US Dollars and One Cent Only");
        assert_eq!(amount_to_words(1.50), "One US Dollars and Fifty Cents Only");
    }

    #[test]
    fn test_format_usd_grouping() {
        assert_eq!(format_usd(1234.5), "USD 1,234.50");
        assert_eq!(format_usd(0.0), "USD 0.00");
        assert_eq!(format_usd(1_000_000.0), "USD 1,000,000.00");
    }
}
