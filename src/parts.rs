use std::fmt;

/// The type of a formatted fragment, named as in `Intl.NumberFormat`.
///
/// The set is open: partitioners other than the built-in one may emit kinds
/// of their own through `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    Integer,
    Fraction,
    Decimal,
    Group,
    Literal,
    MinusSign,
    PlusSign,
    PercentSign,
    Nan,
    Infinity,
    ApproximatelySign,
    Other(&'static str),
}

impl PartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Integer => "integer",
            PartKind::Fraction => "fraction",
            PartKind::Decimal => "decimal",
            PartKind::Group => "group",
            PartKind::Literal => "literal",
            PartKind::MinusSign => "minusSign",
            PartKind::PlusSign => "plusSign",
            PartKind::PercentSign => "percentSign",
            PartKind::Nan => "nan",
            PartKind::Infinity => "infinity",
            PartKind::ApproximatelySign => "approximatelySign",
            PartKind::Other(name) => *name,
        }
    }

    pub fn is_sign(&self) -> bool {
        matches!(self, PartKind::MinusSign | PartKind::PlusSign)
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed piece of a single formatted number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub kind: PartKind,
    pub value: String,
}

impl Fragment {
    pub fn new(kind: PartKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn tagged(self, source: Source) -> TaggedPart {
        TaggedPart {
            kind: self.kind,
            value: self.value,
            source,
        }
    }
}

/// Which side of a range a part was produced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    StartRange,
    EndRange,
    Shared,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::StartRange => "startRange",
            Source::EndRange => "endRange",
            Source::Shared => "shared",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedPart {
    pub kind: PartKind,
    pub value: String,
    pub source: Source,
}

impl TaggedPart {
    pub fn new(source: Source, kind: PartKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            source,
        }
    }
}

/// Joins part values back into display text.
pub fn concat_values<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().collect()
}

pub(crate) fn fragments_text(fragments: &[Fragment]) -> String {
    concat_values(fragments.iter().map(|f| f.value.as_str()))
}

pub(crate) fn parts_text(parts: &[TaggedPart]) -> String {
    concat_values(parts.iter().map(|p| p.value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_intl() {
        assert_eq!(PartKind::MinusSign.to_string(), "minusSign");
        assert_eq!(PartKind::ApproximatelySign.as_str(), "approximatelySign");
        assert_eq!(PartKind::Other("compact").as_str(), "compact");
        assert_eq!(Source::StartRange.to_string(), "startRange");
        assert_eq!(Source::Shared.as_str(), "shared");
    }

    #[test]
    fn tagging_keeps_fragment() {
        let part = Fragment::new(PartKind::Integer, "42").tagged(Source::EndRange);
        assert_eq!(part, TaggedPart::new(Source::EndRange, PartKind::Integer, "42"));
    }

    #[test]
    fn text_concatenation() {
        let fragments = vec![
            Fragment::new(PartKind::MinusSign, "-"),
            Fragment::new(PartKind::Integer, "1"),
            Fragment::new(PartKind::Group, ","),
            Fragment::new(PartKind::Integer, "000"),
        ];
        assert_eq!(fragments_text(&fragments), "-1,000");
    }
}
