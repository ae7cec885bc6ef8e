//! Locale-aware formatting of numeric ranges into tagged parts.
//!
//! ```
//! use numrange::{NumberFormatOptions, NumericValue, format_range_to_parts};
//!
//! let options = NumberFormatOptions::try_new("it").unwrap();
//! let parts = format_range_to_parts(
//!     &NumericValue::from(-3),
//!     &NumericValue::from(10),
//!     &options,
//! )
//! .unwrap();
//! let text: String = parts.iter().map(|p| p.value.as_str()).collect();
//! assert_eq!(text, "-3-10");
//! ```

mod error;
mod options;
mod partition;
mod parts;
mod patterns;
mod range;
mod value;

pub use error::{Endpoint, FormatError, Result};
pub use options::{
    Grouping, NumberFormatOptions, RoundingMode, RoundingPriority, SignDisplay, Style,
    TrailingZeroDisplay,
};
pub use partition::{DecimalPartitioner, NumberPartitioner};
pub use parts::{Fragment, PartKind, Source, TaggedPart, concat_values};
pub use patterns::{
    ApproximateEndpoint, ApproximatelyPosition, RangePatternSource, RangePatternTable,
    RangePatterns,
};
pub use range::{
    RangeTemplate, TemplateKind, approximately_equal, assemble, format_range_to_parts_with,
    select_template,
};
pub use value::NumericValue;

/// Formats `start..end` with the ICU partitioner and the bundled range
/// patterns.
pub fn format_range_to_parts(
    start: &NumericValue,
    end: &NumericValue,
    options: &NumberFormatOptions,
) -> Result<Vec<TaggedPart>> {
    format_range_to_parts_with(
        &DecimalPartitioner,
        RangePatternTable::shared(),
        start,
        end,
        options,
    )
}

/// Like [`format_range_to_parts_with`], joined into display text.
pub fn format_range_with<P, S>(
    partitioner: &P,
    patterns: &S,
    start: &NumericValue,
    end: &NumericValue,
    options: &NumberFormatOptions,
) -> Result<String>
where
    P: NumberPartitioner + ?Sized,
    S: RangePatternSource + ?Sized,
{
    let tagged = format_range_to_parts_with(partitioner, patterns, start, end, options)?;
    Ok(parts::parts_text(&tagged))
}

pub fn format_range(
    start: &NumericValue,
    end: &NumericValue,
    options: &NumberFormatOptions,
) -> Result<String> {
    format_range_with(
        &DecimalPartitioner,
        RangePatternTable::shared(),
        start,
        end,
        options,
    )
}

/// Formats a single value into fragments. NaN is rendered, not rejected.
pub fn format_to_parts(
    value: &NumericValue,
    options: &NumberFormatOptions,
) -> Result<Vec<Fragment>> {
    DecimalPartitioner.partition(value, options)
}

pub fn format(value: &NumericValue, options: &NumberFormatOptions) -> Result<String> {
    let fragments = format_to_parts(value, options)?;
    Ok(concat_values(fragments.iter().map(|f| f.value.as_str())))
}
