use fixed_decimal::{Decimal, SignedRoundingMode};
use icu::decimal::options::DecimalFormatterOptions;
use icu::decimal::{DecimalFormatter, DecimalFormatterPreferences};
use icu_provider::{DataError, DataErrorKind};
use log::trace;

use crate::error::{FormatError, Result};
use crate::options::{
    DigitOptions, NumberFormatOptions, RoundingPriority, SignDisplay, Style, TrailingZeroDisplay,
};
use crate::parts::{Fragment, PartKind};
use crate::value::NumericValue;

/// Splits a single formatted number into typed fragments.
///
/// Range formatting calls this once per endpoint and never looks inside the
/// options it passes through.
pub trait NumberPartitioner {
    fn partition(
        &self,
        value: &NumericValue,
        options: &NumberFormatOptions,
    ) -> Result<Vec<Fragment>>;
}

impl<F> NumberPartitioner for F
where
    F: Fn(&NumericValue, &NumberFormatOptions) -> Result<Vec<Fragment>>,
{
    fn partition(
        &self,
        value: &NumericValue,
        options: &NumberFormatOptions,
    ) -> Result<Vec<Fragment>> {
        self(value, options)
    }
}

/// Partitioner backed by ICU4X's `DecimalFormatter`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecimalPartitioner;

impl NumberPartitioner for DecimalPartitioner {
    fn partition(
        &self,
        value: &NumericValue,
        options: &NumberFormatOptions,
    ) -> Result<Vec<Fragment>> {
        let digits = options.digit_options()?;
        let mut parts = match value {
            NumericValue::NaN => nan_parts(options),
            NumericValue::Infinity { negative } => infinity_parts(*negative, options),
            NumericValue::Finite(d) => finite_parts(d, &digits, options)?,
        };
        if options.style == Style::Percent {
            if let Some(space) = percent_space(options.language()) {
                parts.push(Fragment::new(PartKind::Literal, space));
            }
            parts.push(Fragment::new(PartKind::PercentSign, "%"));
        }
        trace!("partitioned {value} into {} fragments", parts.len());
        Ok(parts)
    }
}

fn nan_string(options: &NumberFormatOptions) -> &'static str {
    let id = &options.locale.id;
    match id.language.as_str() {
        "zh" => {
            let traditional = id.script.is_some_and(|s| s.as_str() == "Hant")
                || id
                    .region
                    .is_some_and(|r| matches!(r.as_str(), "TW" | "HK" | "MO"));
            if traditional {
                "\u{975E}\u{6578}\u{503C}"
            } else {
                "\u{975E}\u{6570}\u{5B57}"
            }
        }
        "ar" => "\u{0644}\u{064A}\u{0633}\u{0020}\u{0631}\u{0642}\u{0645}\u{064B}\u{0627}",
        _ => "NaN",
    }
}

fn nan_parts(options: &NumberFormatOptions) -> Vec<Fragment> {
    let mut parts = Vec::new();
    if options.sign_display == SignDisplay::Always {
        parts.push(Fragment::new(PartKind::PlusSign, "+"));
    }
    parts.push(Fragment::new(PartKind::Nan, nan_string(options)));
    parts
}

fn infinity_parts(negative: bool, options: &NumberFormatOptions) -> Vec<Fragment> {
    let mut parts = Vec::new();
    let sign = match options.sign_display {
        SignDisplay::Always | SignDisplay::ExceptZero => {
            Some(if negative { PartKind::MinusSign } else { PartKind::PlusSign })
        }
        SignDisplay::Never => None,
        SignDisplay::Auto | SignDisplay::Negative => negative.then_some(PartKind::MinusSign),
    };
    if let Some(kind) = sign {
        let text = if kind == PartKind::MinusSign { "-" } else { "+" };
        parts.push(Fragment::new(kind, text));
    }
    parts.push(Fragment::new(PartKind::Infinity, "\u{221E}"));
    parts
}

fn finite_parts(
    value: &Decimal,
    digits: &DigitOptions,
    options: &NumberFormatOptions,
) -> Result<Vec<Fragment>> {
    let mut dec = value.clone();
    dec.absolute.trim_start();
    dec.absolute.trim_end();
    if options.style == Style::Percent {
        dec.multiply_pow10(2);
    }

    apply_rounding(&mut dec, digits, options.rounding_mode.to_fd());

    if digits.min_integer > 1 {
        dec.absolute.pad_start((digits.min_integer as i16) - 1);
    }
    if options.trailing_zero_display == TrailingZeroDisplay::StripIfInteger {
        dec.absolute.trim_end_if_integer();
    }
    dec.apply_sign_display(options.sign_display.to_fd());

    let formatter = decimal_formatter(options)?;
    let text = formatter.format(&dec).to_string();
    let has_fraction = dec.absolute.to_string().contains('.');

    let mut parts = decompose(&text, has_fraction);
    if digits.min_integer > 1 {
        let zero = locale_zero(&formatter);
        pad_integer_digits(&mut parts, digits.min_integer as usize, zero);
    }
    Ok(parts)
}

fn decimal_formatter(options: &NumberFormatOptions) -> Result<DecimalFormatter> {
    let prefs = DecimalFormatterPreferences::from(&options.locale);
    let mut opts = DecimalFormatterOptions::default();
    opts.grouping_strategy = Some(options.use_grouping.to_icu());
    DecimalFormatter::try_new(prefs, opts).map_err(|e| {
        log::debug!("no decimal formatter for {}: {e}", options.locale);
        formatter_error(e, options)
    })
}

fn formatter_error(e: DataError, options: &NumberFormatOptions) -> FormatError {
    if matches!(
        e.kind,
        DataErrorKind::IdentifierNotFound | DataErrorKind::MarkerNotFound
    ) {
        FormatError::LocaleDataMissing {
            locale: options.locale.to_string(),
        }
    } else {
        FormatError::Collaborator(e.to_string())
    }
}

/// The zero digit of the numbering system `formatter` renders with.
fn locale_zero(formatter: &DecimalFormatter) -> char {
    formatter
        .format(&Decimal::from(0i32))
        .to_string()
        .chars()
        .find(|c| c.is_numeric())
        .unwrap_or('0')
}

fn apply_rounding(dec: &mut Decimal, digits: &DigitOptions, mode: SignedRoundingMode) {
    match (digits.significant, digits.fraction) {
        (Some((min_sd, max_sd)), None) => round_significant(dec, min_sd, max_sd, mode),
        (None, Some((min_fd, max_fd))) => round_fraction(dec, min_fd, max_fd, mode),
        (Some((min_sd, max_sd)), Some((min_fd, max_fd))) => {
            let mut by_sd = dec.clone();
            round_significant(&mut by_sd, min_sd, max_sd, mode);
            let mut by_fd = dec.clone();
            round_fraction(&mut by_fd, min_fd, max_fd, mode);

            // Magnitude of the last digit each strategy keeps.
            let sd_mag = if dec.absolute.is_zero() {
                1 - max_sd as i16
            } else {
                dec.absolute.nonzero_magnitude_start() - max_sd as i16 + 1
            };
            let fd_mag = -(max_fd as i16);
            let use_sd = match digits.priority {
                RoundingPriority::LessPrecision => sd_mag >= fd_mag,
                _ => sd_mag <= fd_mag,
            };
            *dec = if use_sd { by_sd } else { by_fd };
        }
        (None, None) => {}
    }
}

fn round_fraction(dec: &mut Decimal, min: u32, max: u32, mode: SignedRoundingMode) {
    dec.round_with_mode(-(max as i16), mode);
    dec.absolute.trim_end();
    if min > 0 {
        dec.absolute.pad_end(-(min as i16));
    }
}

fn round_significant(dec: &mut Decimal, min: u32, max: u32, mode: SignedRoundingMode) {
    if !dec.absolute.is_zero() {
        let mag_start = dec.absolute.nonzero_magnitude_start();
        let mag_end = dec.absolute.nonzero_magnitude_end();
        if mag_start - mag_end + 1 > max as i16 {
            dec.round_with_mode(mag_start - max as i16 + 1, mode);
        }
        dec.absolute.trim_end();
    }

    let pad_to = if dec.absolute.is_zero() {
        1 - min as i16
    } else {
        dec.absolute.nonzero_magnitude_start() - min as i16 + 1
    };
    if pad_to < 0 {
        dec.absolute.pad_end(pad_to);
    }
}

fn is_bidi_mark(c: char) -> bool {
    matches!(c, '\u{061C}' | '\u{200E}' | '\u{200F}')
}

fn is_sign_char(c: char) -> bool {
    matches!(c, '-' | '+' | '\u{2212}')
}

/// Splits ICU output into fragments. Digits in any script are integer or
/// fraction digits; a non-digit run between two digit runs is a separator,
/// and when the number has fraction digits the last such separator is the
/// decimal mark.
pub(crate) fn decompose(text: &str, has_fraction: bool) -> Vec<Fragment> {
    let mut parts: Vec<Fragment> = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_numeric() {
            current.push(c);
            continue;
        }
        if !current.is_empty() {
            parts.push(Fragment::new(PartKind::Integer, std::mem::take(&mut current)));
        }

        let bidi_sign = is_bidi_mark(c) && chars.peek().is_some_and(|&n| is_sign_char(n));
        if is_sign_char(c) || bidi_sign {
            let mut sign = String::from(c);
            let mut sign_char = c;
            if bidi_sign {
                if let Some(s) = chars.next() {
                    sign.push(s);
                    sign_char = s;
                }
            }
            if let Some(&trail) = chars.peek()
                && is_bidi_mark(trail)
            {
                sign.push(trail);
                chars.next();
            }
            let kind = if sign_char == '+' {
                PartKind::PlusSign
            } else {
                PartKind::MinusSign
            };
            parts.push(Fragment::new(kind, sign));
            continue;
        }

        let mut run = String::from(c);
        while let Some(&n) = chars.peek() {
            if n.is_numeric() || is_sign_char(n) || is_bidi_mark(n) {
                break;
            }
            run.push(n);
            chars.next();
        }
        parts.push(Fragment::new(PartKind::Literal, run));
    }
    if !current.is_empty() {
        parts.push(Fragment::new(PartKind::Integer, current));
    }

    let separators: Vec<usize> = (1..parts.len().saturating_sub(1))
        .filter(|&i| {
            parts[i].kind == PartKind::Literal
                && parts[i - 1].kind == PartKind::Integer
                && parts[i + 1].kind == PartKind::Integer
        })
        .collect();
    let decimal_at = if has_fraction {
        separators.last().copied()
    } else {
        None
    };
    for &i in &separators {
        parts[i].kind = if Some(i) == decimal_at {
            PartKind::Decimal
        } else {
            PartKind::Group
        };
    }
    if let Some(i) = decimal_at {
        parts[i + 1].kind = PartKind::Fraction;
    }
    parts
}

/// `pad_start` is not honoured for zero, so make sure the integer digits
/// reach the configured minimum.
fn pad_integer_digits(parts: &mut [Fragment], min_integer: usize, zero: char) {
    let have: usize = parts
        .iter()
        .filter(|p| p.kind == PartKind::Integer)
        .map(|p| p.value.chars().count())
        .sum();
    if have >= min_integer {
        return;
    }
    if let Some(first) = parts.iter_mut().find(|p| p.kind == PartKind::Integer) {
        let mut padded: String = std::iter::repeat_n(zero, min_integer - have).collect();
        padded.push_str(&first.value);
        first.value = padded;
    }
}

/// Space between the number and a trailing percent sign, per CLDR.
fn percent_space(lang: &str) -> Option<&'static str> {
    match lang {
        "fr" => Some("\u{202F}"),
        "de" | "es" | "ca" | "da" | "fi" | "nb" | "nn" | "no" | "sv" | "pl" | "cs" | "sk"
        | "hu" | "ro" | "bg" | "hr" | "sl" | "sr" | "el" | "uk" | "ru" | "be" | "et" | "lv"
        | "lt" | "kk" | "uz" | "ky" | "mk" | "bs" | "gl" => Some("\u{00A0}"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Grouping, RoundingMode};

    fn opts(tag: &str) -> NumberFormatOptions {
        NumberFormatOptions::try_new(tag).unwrap()
    }

    fn kinds_values(parts: &[Fragment]) -> Vec<(&'static str, &str)> {
        parts.iter().map(|p| (p.kind.as_str(), p.value.as_str())).collect()
    }

    fn partition(value: &str, options: &NumberFormatOptions) -> Vec<Fragment> {
        DecimalPartitioner
            .partition(&value.parse().unwrap(), options)
            .unwrap()
    }

    #[test]
    fn decompose_grouped_decimal() {
        let parts = decompose("-1,234.5", true);
        assert_eq!(
            kinds_values(&parts),
            vec![
                ("minusSign", "-"),
                ("integer", "1"),
                ("group", ","),
                ("integer", "234"),
                ("decimal", "."),
                ("fraction", "5"),
            ]
        );
    }

    #[test]
    fn decompose_without_fraction_has_only_groups() {
        let parts = decompose("1.234.567", false);
        assert_eq!(
            kinds_values(&parts),
            vec![
                ("integer", "1"),
                ("group", "."),
                ("integer", "234"),
                ("group", "."),
                ("integer", "567"),
            ]
        );
    }

    #[test]
    fn decompose_keeps_bidi_marks_with_sign() {
        let parts = decompose("\u{200E}-5", false);
        assert_eq!(
            kinds_values(&parts),
            vec![("minusSign", "\u{200E}-"), ("integer", "5")]
        );
    }

    #[test]
    fn italian_integers() {
        let it = opts("it");
        assert_eq!(kinds_values(&partition("10", &it)), vec![("integer", "10")]);
        assert_eq!(
            kinds_values(&partition("-3", &it)),
            vec![("minusSign", "-"), ("integer", "3")]
        );
    }

    #[test]
    fn english_grouping_and_rounding() {
        let en = opts("en");
        assert_eq!(
            kinds_values(&partition("1234.5678", &en)),
            vec![
                ("integer", "1"),
                ("group", ","),
                ("integer", "234"),
                ("decimal", "."),
                ("fraction", "568"),
            ]
        );
        let no_group = opts("en").with_grouping(Grouping::Never);
        assert_eq!(
            kinds_values(&partition("1234", &no_group)),
            vec![("integer", "1234")]
        );
    }

    #[test]
    fn fraction_and_integer_padding() {
        let en = opts("en")
            .with_fraction_digits(Some(2), None)
            .with_minimum_integer_digits(3);
        assert_eq!(
            kinds_values(&partition("0", &en)),
            vec![("integer", "000"), ("decimal", "."), ("fraction", "00")]
        );
    }

    #[test]
    fn integer_padding_uses_locale_digits() {
        let fa = opts("fa").with_minimum_integer_digits(3);
        assert_eq!(
            kinds_values(&partition("5", &fa)),
            vec![("integer", "\u{06F0}\u{06F0}\u{06F5}")]
        );
        assert_eq!(
            kinds_values(&partition("0", &fa)),
            vec![("integer", "\u{06F0}\u{06F0}\u{06F0}")]
        );
        let ar = opts("ar-EG").with_minimum_integer_digits(3);
        let integer: String = partition("0", &ar)
            .iter()
            .filter(|p| p.kind == PartKind::Integer)
            .map(|p| p.value.as_str())
            .collect();
        assert_eq!(integer, "\u{0660}\u{0660}\u{0660}");
        let bn = opts("bn").with_minimum_integer_digits(3);
        assert_eq!(
            kinds_values(&partition("0", &bn)),
            vec![("integer", "\u{09E6}\u{09E6}\u{09E6}")]
        );
    }

    #[test]
    fn missing_decimal_data_is_reported_per_locale() {
        let fr = opts("fr");
        assert_eq!(
            formatter_error(DataErrorKind::IdentifierNotFound.into_error(), &fr),
            FormatError::LocaleDataMissing {
                locale: "fr".into()
            }
        );
        assert!(matches!(
            formatter_error(DataErrorKind::Custom.into_error(), &fr),
            FormatError::Collaborator(_)
        ));
    }

    #[test]
    fn significant_digits() {
        let en = opts("en").with_significant_digits(Some(3), Some(3));
        assert_eq!(
            kinds_values(&partition("1.23456", &en)),
            vec![("integer", "1"), ("decimal", "."), ("fraction", "23")]
        );
        assert_eq!(
            kinds_values(&partition("0.5", &en)),
            vec![("integer", "0"), ("decimal", "."), ("fraction", "500")]
        );
    }

    #[test]
    fn rounding_modes() {
        let floor = opts("en")
            .with_fraction_digits(None, Some(0))
            .with_rounding_mode(RoundingMode::Floor);
        assert_eq!(
            kinds_values(&partition("-2.5", &floor)),
            vec![("minusSign", "-"), ("integer", "3")]
        );
        let trunc = floor.clone().with_rounding_mode(RoundingMode::Trunc);
        assert_eq!(
            kinds_values(&partition("-2.5", &trunc)),
            vec![("minusSign", "-"), ("integer", "2")]
        );
    }

    #[test]
    fn sign_display() {
        let always = opts("en").with_sign_display(SignDisplay::Always);
        assert_eq!(
            kinds_values(&partition("5", &always)),
            vec![("plusSign", "+"), ("integer", "5")]
        );
        let never = opts("en").with_sign_display(SignDisplay::Never);
        assert_eq!(kinds_values(&partition("-5", &never)), vec![("integer", "5")]);
    }

    #[test]
    fn percent_style() {
        let en = opts("en").with_style(Style::Percent);
        assert_eq!(
            kinds_values(&partition("0.25", &en)),
            vec![("integer", "25"), ("percentSign", "%")]
        );
        let de = opts("de").with_style(Style::Percent);
        assert_eq!(
            kinds_values(&partition("0.25", &de)),
            vec![("integer", "25"), ("literal", "\u{00A0}"), ("percentSign", "%")]
        );
        let fr = opts("fr").with_style(Style::Percent);
        assert_eq!(
            kinds_values(&partition("0.25", &fr)),
            vec![("integer", "25"), ("literal", "\u{202F}"), ("percentSign", "%")]
        );
        let eu = opts("eu").with_style(Style::Percent);
        assert!(partition("0.25", &eu)
            .iter()
            .all(|p| p.kind != PartKind::Literal));
    }

    #[test]
    fn non_finite_values() {
        let en = opts("en");
        assert_eq!(
            kinds_values(&partition("-Infinity", &en)),
            vec![("minusSign", "-"), ("infinity", "\u{221E}")]
        );
        assert_eq!(kinds_values(&partition("NaN", &en)), vec![("nan", "NaN")]);
        let always = opts("en").with_sign_display(SignDisplay::Always);
        assert_eq!(
            kinds_values(&partition("Infinity", &always)),
            vec![("plusSign", "+"), ("infinity", "\u{221E}")]
        );
        assert_eq!(
            kinds_values(&partition("NaN", &opts("zh-TW"))),
            vec![("nan", "\u{975E}\u{6578}\u{503C}")]
        );
    }

    #[test]
    fn invalid_options_fail_before_formatting() {
        let bad = opts("en").with_fraction_digits(Some(4), Some(2));
        assert!(matches!(
            DecimalPartitioner.partition(&NumericValue::from(1), &bad),
            Err(FormatError::InvalidOption { .. })
        ));
    }
}
