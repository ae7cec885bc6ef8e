//! Formatting of numeric ranges into tagged parts.
//!
//! A range call formats each endpoint through a [`NumberPartitioner`], picks
//! one of three layouts and stitches the fragments together:
//!
//! - **normal**: `start`, separator, `end`, each side tagged with its source;
//! - **approximate**: the endpoints differ but render identically, so one
//!   rendering is shown with an approximately sign;
//! - **degenerate**: both endpoints are the same value and it is shown once.

use log::trace;

use crate::error::{Endpoint, FormatError, Result};
use crate::options::NumberFormatOptions;
use crate::partition::NumberPartitioner;
use crate::parts::{Fragment, PartKind, Source, TaggedPart, fragments_text};
use crate::patterns::{
    ApproximateEndpoint, ApproximatelyPosition, RangePatternSource, RangePatterns,
};
use crate::value::NumericValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    Normal,
    Approximate,
    Degenerate,
}

/// The layout chosen for one range call, with the literals it needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeTemplate {
    pub kind: TemplateKind,
    pub separator: String,
    pub approximately_sign: String,
    pub approximately_position: ApproximatelyPosition,
    pub approximate_endpoint: ApproximateEndpoint,
}

/// True when both endpoints render to the same text under `options`.
pub fn approximately_equal<P>(
    partitioner: &P,
    start: &NumericValue,
    end: &NumericValue,
    options: &NumberFormatOptions,
) -> Result<bool>
where
    P: NumberPartitioner + ?Sized,
{
    if start.is_nan() || end.is_nan() {
        return Ok(false);
    }
    let start_text = fragments_text(&partitioner.partition(start, options)?);
    let end_text = fragments_text(&partitioner.partition(end, options)?);
    Ok(start_text == end_text)
}

pub fn select_template(
    start: &NumericValue,
    end: &NumericValue,
    approximately_equal: bool,
    patterns: RangePatterns,
) -> RangeTemplate {
    let kind = if start.same_value(end) {
        TemplateKind::Degenerate
    } else if approximately_equal {
        TemplateKind::Approximate
    } else {
        TemplateKind::Normal
    };
    RangeTemplate {
        kind,
        separator: patterns.separator,
        approximately_sign: patterns.approximately_sign,
        approximately_position: patterns.approximately_position,
        approximate_endpoint: patterns.approximate_endpoint,
    }
}

pub fn assemble<P>(
    partitioner: &P,
    start: &NumericValue,
    end: &NumericValue,
    template: &RangeTemplate,
    options: &NumberFormatOptions,
) -> Result<Vec<TaggedPart>>
where
    P: NumberPartitioner + ?Sized,
{
    match template.kind {
        TemplateKind::Degenerate => {
            let fragments = partitioner.partition(start, options)?;
            Ok(tag_all(fragments, Source::Shared))
        }
        TemplateKind::Approximate => {
            let value = match template.approximate_endpoint {
                ApproximateEndpoint::Start => start,
                ApproximateEndpoint::End => end,
            };
            let mut parts = tag_all(partitioner.partition(value, options)?, Source::Shared);
            let at = match template.approximately_position {
                ApproximatelyPosition::Prefix => 0,
                ApproximatelyPosition::AfterSign => parts
                    .iter()
                    .position(|p| !p.kind.is_sign())
                    .unwrap_or(parts.len()),
                ApproximatelyPosition::Suffix => parts.len(),
            };
            parts.insert(
                at,
                TaggedPart::new(
                    Source::Shared,
                    PartKind::ApproximatelySign,
                    template.approximately_sign.as_str(),
                ),
            );
            Ok(parts)
        }
        TemplateKind::Normal => {
            let start_parts = partitioner.partition(start, options)?;
            let end_parts = partitioner.partition(end, options)?;
            let mut parts = Vec::with_capacity(start_parts.len() + end_parts.len() + 1);
            parts.extend(tag_all(start_parts, Source::StartRange));
            parts.push(TaggedPart::new(
                Source::Shared,
                PartKind::Literal,
                template.separator.as_str(),
            ));
            parts.extend(tag_all(end_parts, Source::EndRange));
            Ok(parts)
        }
    }
}

fn tag_all(fragments: Vec<Fragment>, source: Source) -> Vec<TaggedPart> {
    fragments.into_iter().map(|f| f.tagged(source)).collect()
}

/// Formats `start..end` with injected collaborators.
///
/// NaN on either side is rejected before anything is formatted. Every other
/// error comes from `partitioner` or `patterns` and is returned as is.
pub fn format_range_to_parts_with<P, S>(
    partitioner: &P,
    patterns: &S,
    start: &NumericValue,
    end: &NumericValue,
    options: &NumberFormatOptions,
) -> Result<Vec<TaggedPart>>
where
    P: NumberPartitioner + ?Sized,
    S: RangePatternSource + ?Sized,
{
    if start.is_nan() {
        return Err(FormatError::InvalidNumericInput {
            endpoint: Endpoint::Start,
        });
    }
    if end.is_nan() {
        return Err(FormatError::InvalidNumericInput {
            endpoint: Endpoint::End,
        });
    }

    let range_patterns = patterns.range_patterns(&options.locale)?;
    let verdict = approximately_equal(partitioner, start, end, options)?;
    let template = select_template(start, end, verdict, range_patterns);
    trace!("range {start} .. {end} uses {:?} template", template.kind);

    assemble(partitioner, start, end, &template, options)
}
