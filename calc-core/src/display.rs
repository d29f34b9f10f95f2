//! Display formatting: compact numerals and the English words line.
//!
//! The device has two display rows: a compact magnitude-suffixed numeral
//! (`1.234567m`) and a long-form English reading of the same value
//! ("one point two three..."). Both consume the quantized value; neither
//! feeds back into any computation.
//!
//! A non-finite value (the NaN sentinel from division by zero or a zero
//! periodic rate, or an overflowed register) has no numeral. It renders
//! as the error indicator, never as a numeric string.

use crate::calculations::quantize::quantize4;

/// Numeral shown for non-finite register values.
pub const ERROR_INDICATOR: &str = "Error";

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const ONES_WORDS: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS_WORDS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Renders the value as a compact magnitude-suffixed numeral.
///
/// Magnitudes at or above a billion, a million, and a thousand divide down
/// and take a `b`/`m`/`k` suffix with trailing zeros (and a trailing point)
/// stripped; smaller magnitudes show exactly four fractional digits at
/// display resolution. The sign is prefixed separately.
///
/// # Examples
///
/// ```
/// use calc_core::display::format_compact;
///
/// assert_eq!(format_compact(1234567.0), "1.234567m");
/// assert_eq!(format_compact(999.0), "999.0000");
/// assert_eq!(format_compact(-2500000000.0), "-2.5b");
/// assert_eq!(format_compact(f64::NAN), "Error");
/// ```
pub fn format_compact(v: f64) -> String {
    if !v.is_finite() {
        return ERROR_INDICATOR.to_string();
    }

    let sign = if v < 0.0 { "-" } else { "" };
    let a = v.abs();

    if a >= 1e9 {
        format!("{sign}{}b", strip_zeros(format!("{:.9}", a / 1e9)))
    } else if a >= 1e6 {
        format!("{sign}{}m", strip_zeros(format!("{:.6}", a / 1e6)))
    } else if a >= 1e3 {
        format!("{sign}{}k", strip_zeros(format!("{:.6}", a / 1e3)))
    } else {
        format!("{sign}{:.4}", quantize4(a))
    }
}

/// Renders the value as long-form English at display resolution.
///
/// The integer part reads through recursive billion/million/thousand
/// grouping; the four fractional display digits are spelled one at a time
/// after "point". Negative values take a "minus " prefix, and non-finite
/// values read as "error".
///
/// # Examples
///
/// ```
/// use calc_core::display::words;
///
/// assert_eq!(words(0.0), "zero point zero zero zero zero");
/// assert_eq!(words(-3.14), "minus three point one four zero zero");
/// ```
pub fn words(v: f64) -> String {
    if !v.is_finite() {
        return "error".to_string();
    }

    let sign = if v < 0.0 { "minus " } else { "" };
    let fixed = format!("{:.4}", quantize4(v.abs()));
    // Fixed-precision formatting always emits a point; the fallback only
    // keeps the parse total.
    let (int_text, frac_text) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0000"));

    let int_words = match int_text.parse::<u64>() {
        Ok(n) => integer_words(n),
        // Beyond the grouping range the integer digits are spelled
        // individually, like the fractional ones.
        Err(_) => spell_digits(int_text),
    };

    format!("{sign}{int_words} point {}", spell_digits(frac_text))
}

/// Drops trailing zeros, then a trailing point, from a fixed-precision
/// numeral.
fn strip_zeros(fixed: String) -> String {
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn spell_digits(digits: &str) -> String {
    digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|d| DIGIT_WORDS[(d - b'0') as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

fn under_hundred(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        ONES_WORDS[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS_WORDS[(n / 10) as usize].to_string()
    } else {
        format!(
            "{}-{}",
            TENS_WORDS[(n / 10) as usize],
            ONES_WORDS[(n % 10) as usize]
        )
    }
}

fn under_thousand(n: u64) -> String {
    debug_assert!(n < 1000);
    if n < 100 {
        under_hundred(n)
    } else if n % 100 == 0 {
        format!("{} hundred", ONES_WORDS[(n / 100) as usize])
    } else {
        format!(
            "{} hundred {}",
            ONES_WORDS[(n / 100) as usize],
            under_hundred(n % 100)
        )
    }
}

fn integer_words(mut n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    let mut parts = Vec::new();
    for (scale, name) in [
        (1_000_000_000, "billion"),
        (1_000_000, "million"),
        (1_000, "thousand"),
    ] {
        if n >= scale {
            parts.push(format!("{} {name}", integer_words(n / scale)));
            n %= scale;
        }
    }
    if n > 0 {
        parts.push(under_thousand(n));
    }
    parts.join(" ")
}
