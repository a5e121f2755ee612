//! Challenge rating parsing.
//!
//! Source data spells challenge ratings in several ways: plain numbers
//! (`"5"`), fractions (`"1/4"`), and open-ended ratings (`"20+"`). Every
//! failure is reported as `None`; nothing here panics or returns an error.

/// A challenge rating as it appears in the source, before parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawChallengeRating<'a> {
    /// The field is absent.
    Missing,
    /// The field is already numeric and passes through unchanged.
    Number(f64),
    /// Free text such as `"1/2"` or `"30+"`.
    Text(&'a str),
}

impl<'a> From<&'a str> for RawChallengeRating<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<Option<&'a str>> for RawChallengeRating<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Self::Missing, Self::Text)
    }
}

impl From<f64> for RawChallengeRating<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Parses a challenge rating into a finite number.
///
/// - Missing or blank input yields `None`.
/// - Numeric input passes through (non-finite numbers yield `None`).
/// - Text containing `/` is split on `/` and the leading number of each of
///   the first two pieces is read; when both parse and the denominator is
///   non-zero the quotient is returned. Otherwise the whole text, with every
///   `+` removed, must parse as a float, which a malformed fraction won't.
/// - Any other text has every `+` removed and its leading number is read,
///   ignoring anything after it (`"10 (5,900 XP)"` is 10).
///
/// # Examples
///
/// ```
/// use bestiary_data::challenge_rating::parse_challenge_rating;
///
/// assert_eq!(parse_challenge_rating("1/4"), Some(0.25));
/// assert_eq!(parse_challenge_rating("20+"), Some(20.0));
/// assert_eq!(parse_challenge_rating("0"), Some(0.0));
/// assert_eq!(parse_challenge_rating(""), None);
/// assert_eq!(parse_challenge_rating("1/0"), None);
/// assert_eq!(parse_challenge_rating("1/2 (100 XP)"), Some(0.5));
/// assert_eq!(parse_challenge_rating("CR ?"), None);
/// assert_eq!(parse_challenge_rating(7.0_f64), Some(7.0));
/// ```
#[must_use]
pub fn parse_challenge_rating<'a, R>(raw: R) -> Option<f64>
where
    R: Into<RawChallengeRating<'a>>,
{
    match raw.into() {
        RawChallengeRating::Missing => None,
        RawChallengeRating::Number(value) => value.is_finite().then_some(value),
        RawChallengeRating::Text(text) => parse_text(text),
    }
}

fn parse_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let plain = text.replace('+', "");
    if text.contains('/') {
        let mut pieces = text.split('/');
        if let (Some(numerator), Some(denominator)) = (pieces.next(), pieces.next())
            && let Some(numerator) = parse_leading(numerator)
            && let Some(denominator) = parse_leading(denominator)
            && denominator != 0.0
        {
            return Some(numerator / denominator);
        }
        return parse_finite(&plain);
    }

    parse_leading(&plain)
}

/// Reads the longest decimal number at the start of `text`.
fn parse_leading(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses a trimmed float, rejecting `inf`/`NaN` spellings.
pub(crate) fn parse_finite(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions() {
        assert_eq!(parse_challenge_rating("1/8"), Some(0.125));
        assert_eq!(parse_challenge_rating("1/2"), Some(0.5));
        assert_eq!(parse_challenge_rating(" 1 / 4 "), Some(0.25));
    }

    #[test]
    fn test_plus_suffix_and_embedded_plus() {
        assert_eq!(parse_challenge_rating("20+"), Some(20.0));
        assert_eq!(parse_challenge_rating("+3"), Some(3.0));
        assert_eq!(parse_challenge_rating("1+0"), Some(10.0));
    }

    #[test]
    fn test_zero_and_decimal() {
        assert_eq!(parse_challenge_rating("0"), Some(0.0));
        assert_eq!(parse_challenge_rating("2.5"), Some(2.5));
    }

    #[test]
    fn test_missing_and_blank() {
        assert_eq!(parse_challenge_rating(None::<&str>), None);
        assert_eq!(parse_challenge_rating(""), None);
        assert_eq!(parse_challenge_rating("   "), None);
    }

    #[test]
    fn test_fraction_reads_first_two_pieces() {
        assert_eq!(parse_challenge_rating("1/4/2"), Some(0.25));
        assert_eq!(parse_challenge_rating("1/2 (100 XP)"), Some(0.5));
    }

    #[test]
    fn test_malformed_fraction_falls_through_and_fails() {
        assert_eq!(parse_challenge_rating("1/0"), None);
        assert_eq!(parse_challenge_rating("a/4"), None);
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(parse_challenge_rating("10 (5,900 XP)"), Some(10.0));
        assert_eq!(parse_challenge_rating("2.5e1x"), Some(25.0));
        assert_eq!(parse_challenge_rating("3e"), Some(3.0));
        assert_eq!(parse_challenge_rating(".5"), Some(0.5));
        assert_eq!(parse_challenge_rating("-."), None);
    }

    #[test]
    fn test_garbage_and_non_finite() {
        assert_eq!(parse_challenge_rating("unknown"), None);
        assert_eq!(parse_challenge_rating("inf"), None);
        assert_eq!(parse_challenge_rating("NaN"), None);
        assert_eq!(parse_challenge_rating(f64::NAN), None);
        assert_eq!(parse_challenge_rating(f64::INFINITY), None);
    }
}
