use std::str::FromStr;

use fixed_decimal::{SignedRoundingMode, UnsignedRoundingMode};
use icu::decimal::options::GroupingStrategy;
use icu::locale::Locale;

use crate::error::{FormatError, Result};

macro_rules! option_enum {
    ($(#[$meta:meta])* $name:ident, $option:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = FormatError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(FormatError::InvalidOption {
                        option: $option,
                        reason: format!("unknown value `{other}`"),
                    }),
                }
            }
        }
    };
}

option_enum!(Style, "style", {
    Decimal => "decimal",
    Percent => "percent",
});

option_enum!(SignDisplay, "signDisplay", {
    Auto => "auto",
    Always => "always",
    ExceptZero => "exceptZero",
    Negative => "negative",
    Never => "never",
});

option_enum!(
    /// `false` disables grouping entirely.
    Grouping, "useGrouping", {
    Auto => "auto",
    Always => "always",
    Min2 => "min2",
    Never => "false",
});

option_enum!(RoundingMode, "roundingMode", {
    HalfExpand => "halfExpand",
    Ceil => "ceil",
    Floor => "floor",
    Expand => "expand",
    Trunc => "trunc",
    HalfCeil => "halfCeil",
    HalfFloor => "halfFloor",
    HalfTrunc => "halfTrunc",
    HalfEven => "halfEven",
});

option_enum!(RoundingPriority, "roundingPriority", {
    Auto => "auto",
    MorePrecision => "morePrecision",
    LessPrecision => "lessPrecision",
});

option_enum!(TrailingZeroDisplay, "trailingZeroDisplay", {
    Auto => "auto",
    StripIfInteger => "stripIfInteger",
});

impl RoundingMode {
    pub(crate) fn to_fd(self) -> SignedRoundingMode {
        match self {
            RoundingMode::Ceil => SignedRoundingMode::Ceil,
            RoundingMode::Floor => SignedRoundingMode::Floor,
            RoundingMode::Expand => SignedRoundingMode::Unsigned(UnsignedRoundingMode::Expand),
            RoundingMode::Trunc => SignedRoundingMode::Unsigned(UnsignedRoundingMode::Trunc),
            RoundingMode::HalfCeil => SignedRoundingMode::HalfCeil,
            RoundingMode::HalfFloor => SignedRoundingMode::HalfFloor,
            RoundingMode::HalfTrunc => {
                SignedRoundingMode::Unsigned(UnsignedRoundingMode::HalfTrunc)
            }
            RoundingMode::HalfEven => SignedRoundingMode::Unsigned(UnsignedRoundingMode::HalfEven),
            RoundingMode::HalfExpand => {
                SignedRoundingMode::Unsigned(UnsignedRoundingMode::HalfExpand)
            }
        }
    }
}

impl SignDisplay {
    pub(crate) fn to_fd(self) -> fixed_decimal::SignDisplay {
        match self {
            SignDisplay::Always => fixed_decimal::SignDisplay::Always,
            SignDisplay::ExceptZero => fixed_decimal::SignDisplay::ExceptZero,
            SignDisplay::Negative => fixed_decimal::SignDisplay::Negative,
            SignDisplay::Never => fixed_decimal::SignDisplay::Never,
            SignDisplay::Auto => fixed_decimal::SignDisplay::Auto,
        }
    }
}

impl Grouping {
    pub(crate) fn to_icu(self) -> GroupingStrategy {
        match self {
            Grouping::Always => GroupingStrategy::Always,
            Grouping::Min2 => GroupingStrategy::Min2,
            Grouping::Never => GroupingStrategy::Never,
            Grouping::Auto => GroupingStrategy::Auto,
        }
    }
}

/// Everything that shapes how one number is rendered.
///
/// The value is immutable once built and is handed to every formatting call;
/// nothing about it is registered or cached elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberFormatOptions {
    pub locale: Locale,
    pub style: Style,
    pub sign_display: SignDisplay,
    pub use_grouping: Grouping,
    pub minimum_integer_digits: u32,
    pub minimum_fraction_digits: Option<u32>,
    pub maximum_fraction_digits: Option<u32>,
    pub minimum_significant_digits: Option<u32>,
    pub maximum_significant_digits: Option<u32>,
    pub rounding_mode: RoundingMode,
    pub rounding_priority: RoundingPriority,
    pub trailing_zero_display: TrailingZeroDisplay,
}

/// Digit settings after defaults have been filled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DigitOptions {
    pub min_integer: u32,
    pub fraction: Option<(u32, u32)>,
    pub significant: Option<(u32, u32)>,
    pub priority: RoundingPriority,
}

impl NumberFormatOptions {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            style: Style::default(),
            sign_display: SignDisplay::default(),
            use_grouping: Grouping::default(),
            minimum_integer_digits: 1,
            minimum_fraction_digits: None,
            maximum_fraction_digits: None,
            minimum_significant_digits: None,
            maximum_significant_digits: None,
            rounding_mode: RoundingMode::default(),
            rounding_priority: RoundingPriority::default(),
            trailing_zero_display: TrailingZeroDisplay::default(),
        }
    }

    pub fn try_new(tag: &str) -> Result<Self> {
        let locale: Locale = tag
            .parse()
            .map_err(|_| FormatError::InvalidLocale(tag.to_string()))?;
        Ok(Self::new(locale))
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_sign_display(mut self, sign_display: SignDisplay) -> Self {
        self.sign_display = sign_display;
        self
    }

    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.use_grouping = grouping;
        self
    }

    pub fn with_minimum_integer_digits(mut self, digits: u32) -> Self {
        self.minimum_integer_digits = digits;
        self
    }

    pub fn with_fraction_digits(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.minimum_fraction_digits = min;
        self.maximum_fraction_digits = max;
        self
    }

    pub fn with_significant_digits(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.minimum_significant_digits = min;
        self.maximum_significant_digits = max;
        self
    }

    pub fn with_rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.rounding_mode = mode;
        self
    }

    pub fn with_rounding_priority(mut self, priority: RoundingPriority) -> Self {
        self.rounding_priority = priority;
        self
    }

    pub fn with_trailing_zero_display(mut self, display: TrailingZeroDisplay) -> Self {
        self.trailing_zero_display = display;
        self
    }

    /// Checks every digit option against its allowed range.
    pub fn validate(&self) -> Result<()> {
        self.digit_options().map(|_| ())
    }

    pub(crate) fn digit_options(&self) -> Result<DigitOptions> {
        check_range("minimumIntegerDigits", self.minimum_integer_digits, 1, 21)?;

        let has_sd = self.minimum_significant_digits.is_some()
            || self.maximum_significant_digits.is_some();
        let need_sd = has_sd || self.rounding_priority != RoundingPriority::Auto;
        let need_fd = !has_sd || self.rounding_priority != RoundingPriority::Auto;

        let significant = if need_sd {
            let min = self.minimum_significant_digits.unwrap_or(1);
            check_range("minimumSignificantDigits", min, 1, 21)?;
            let max = self.maximum_significant_digits.unwrap_or(21);
            check_range("maximumSignificantDigits", max, min, 21)?;
            Some((min, max))
        } else {
            None
        };

        let fraction = if need_fd {
            let (default_min, default_max) = match self.style {
                Style::Percent => (0, 0),
                Style::Decimal => (0, 3),
            };
            let (min, max) = match (self.minimum_fraction_digits, self.maximum_fraction_digits) {
                (None, None) => (default_min, default_max),
                (Some(min), None) => {
                    check_range("minimumFractionDigits", min, 0, 100)?;
                    (min, default_max.max(min))
                }
                (None, Some(max)) => {
                    check_range("maximumFractionDigits", max, 0, 100)?;
                    (default_min.min(max), max)
                }
                (Some(min), Some(max)) => {
                    check_range("minimumFractionDigits", min, 0, 100)?;
                    check_range("maximumFractionDigits", max, min, 100)?;
                    (min, max)
                }
            };
            Some((min, max))
        } else {
            None
        };

        Ok(DigitOptions {
            min_integer: self.minimum_integer_digits,
            fraction,
            significant,
            priority: self.rounding_priority,
        })
    }

    /// Language subtag of the configured locale, e.g. `it` for `it-CH`.
    pub fn language(&self) -> &str {
        self.locale.id.language.as_str()
    }
}

fn check_range(option: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(FormatError::InvalidOption {
            option,
            reason: format!("{value} is not between {min} and {max}"),
        })
    }
}
