use std::sync::LazyLock;

use icu::locale::Locale;
use rustc_hash::FxHashMap;
use tinystr::TinyAsciiStr;

use crate::error::{FormatError, Result};

/// Where the approximately sign goes relative to the formatted number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApproximatelyPosition {
    /// Before everything, e.g. `~-5`.
    #[default]
    Prefix,
    /// After a leading sign, e.g. `-~5`. Unsigned numbers get it in front.
    AfterSign,
    Suffix,
}

/// Which endpoint an approximate range is rendered from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApproximateEndpoint {
    #[default]
    Start,
    End,
}

/// Locale data needed to lay out a range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangePatterns {
    pub separator: String,
    pub approximately_sign: String,
    pub approximately_position: ApproximatelyPosition,
    pub approximate_endpoint: ApproximateEndpoint,
}

impl RangePatterns {
    pub fn new(separator: impl Into<String>, approximately_sign: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            approximately_sign: approximately_sign.into(),
            approximately_position: ApproximatelyPosition::default(),
            approximate_endpoint: ApproximateEndpoint::default(),
        }
    }

    pub fn with_approximately_position(mut self, position: ApproximatelyPosition) -> Self {
        self.approximately_position = position;
        self
    }

    pub fn with_approximate_endpoint(mut self, endpoint: ApproximateEndpoint) -> Self {
        self.approximate_endpoint = endpoint;
        self
    }
}

/// Looks up range patterns for a locale.
pub trait RangePatternSource {
    fn range_patterns(&self, locale: &Locale) -> Result<RangePatterns>;
}

// language, range separator, approximately sign
const BUILTIN: &[(&str, &str, &str)] = &[
    ("ar", "\u{2013}", "~"),
    ("ca", "-", "~"),
    ("da", "\u{2013}", "~"),
    ("de", "\u{2013}", "\u{2248}"),
    ("el", "\u{2013}", "~"),
    ("en", "\u{2013}", "~"),
    ("es", "-", "~"),
    ("fi", "\u{2013}", "~"),
    ("fr", "\u{2013}", "\u{2243}"),
    ("gl", "-", "~"),
    ("he", "\u{2013}", "~"),
    ("hi", "-", "~"),
    ("it", "-", "~"),
    ("ja", "\u{FF5E}", "\u{7D04}"),
    ("ko", "~", "\u{C57D}"),
    ("nb", "\u{2013}", "~"),
    ("nl", "\u{2013}", "~"),
    ("pl", "\u{2013}", "~"),
    ("pt", "\u{2013}", "~"),
    ("ro", "-", "~"),
    ("ru", "\u{2013}", "\u{2248}"),
    ("sv", "\u{2013}", "~"),
    ("tr", "-", "~"),
    ("uk", "\u{2013}", "~"),
    ("zh", "-", "\u{7EA6}"),
];

static BUILTIN_TABLE: LazyLock<RangePatternTable> = LazyLock::new(RangePatternTable::builtin);

/// Range patterns keyed by language subtag.
#[derive(Clone, Debug, Default)]
pub struct RangePatternTable {
    entries: FxHashMap<TinyAsciiStr<8>, RangePatterns>,
}

impl RangePatternTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table with the bundled CLDR range and approximately symbols.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for &(language, separator, approx) in BUILTIN {
            if let Ok(key) = TinyAsciiStr::try_from_str(language) {
                table
                    .entries
                    .insert(key, RangePatterns::new(separator, approx));
            }
        }
        table
    }

    /// The bundled table, built on first use.
    pub fn shared() -> &'static Self {
        &BUILTIN_TABLE
    }

    /// Adds or replaces the patterns for `language`.
    pub fn insert(&mut self, language: &str, patterns: RangePatterns) -> Result<()> {
        let key = language_key(language)?;
        self.entries.insert(key, patterns);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn language_key(language: &str) -> Result<TinyAsciiStr<8>> {
    TinyAsciiStr::try_from_str(language)
        .map(|s| s.to_ascii_lowercase())
        .map_err(|_| FormatError::InvalidLocale(language.to_string()))
}

impl RangePatternSource for RangePatternTable {
    fn range_patterns(&self, locale: &Locale) -> Result<RangePatterns> {
        let missing = || FormatError::LocaleDataMissing {
            locale: locale.to_string(),
        };
        let key = language_key(locale.id.language.as_str()).map_err(|_| missing())?;
        self.entries.get(&key).cloned().ok_or_else(missing)
    }
}

impl<S: RangePatternSource + ?Sized> RangePatternSource for &S {
    fn range_patterns(&self, locale: &Locale) -> Result<RangePatterns> {
        (**self).range_patterns(locale)
    }
}
