use std::fmt;

/// Persisted symbol for "no opinion". Never written to an export.
pub const NEUTRAL_SYMBOL: &str = "中性";
/// Persisted symbol for "the image fits the song"
pub const POSITIVE_SYMBOL: &str = "是";
/// Persisted symbol for "the image does not fit the song"
pub const NEGATIVE_SYMBOL: &str = "否";

/// Three-way choice offered for every image on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Label {
    #[default]
    Neutral,
    Positive,
    Negative,
}

impl Label {
    /// Order of the choices in the label control
    pub const ALL: [Label; 3] = [Label::Neutral, Label::Positive, Label::Negative];

    /// The persistable part of the label, `None` for neutral
    pub fn verdict(self) -> Option<Verdict> {
        match self {
            Label::Neutral => None,
            Label::Positive => Some(Verdict::Positive),
            Label::Negative => Some(Verdict::Negative),
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Label::Neutral
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Label::Neutral => NEUTRAL_SYMBOL,
            Label::Positive => POSITIVE_SYMBOL,
            Label::Negative => NEGATIVE_SYMBOL,
        }
    }

    /// Text of the label control
    pub fn display_name(self) -> &'static str {
        match self {
            Label::Neutral => "Neutral",
            Label::Positive => "Yes",
            Label::Negative => "No",
        }
    }
}

impl From<Verdict> for Label {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Positive => Label::Positive,
            Verdict::Negative => Label::Negative,
        }
    }
}

/// A non-neutral label, the only kind that is ever persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Positive,
    Negative,
}

impl Verdict {
    pub fn symbol(self) -> &'static str {
        Label::from(self).symbol()
    }

    /// Parse a persisted label. Accepts the export symbols and the English
    /// aliases `positive`/`yes` and `negative`/`no`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value {
            POSITIVE_SYMBOL => return Some(Verdict::Positive),
            NEGATIVE_SYMBOL => return Some(Verdict::Negative),
            _ => {}
        }

        match value.to_ascii_lowercase().as_str() {
            "positive" | "yes" => Some(Verdict::Positive),
            "negative" | "no" => Some(Verdict::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_has_no_verdict() {
        assert_eq!(Label::default(), Label::Neutral);
        assert_eq!(Label::Neutral.verdict(), None);
        assert_eq!(Label::Positive.verdict(), Some(Verdict::Positive));
        assert_eq!(Label::Negative.verdict(), Some(Verdict::Negative));
    }

    #[test]
    fn test_verdict_parse_symbols_and_aliases() {
        assert_eq!(Verdict::parse("是"), Some(Verdict::Positive));
        assert_eq!(Verdict::parse(" 否 "), Some(Verdict::Negative));
        assert_eq!(Verdict::parse("Positive"), Some(Verdict::Positive));
        assert_eq!(Verdict::parse("no"), Some(Verdict::Negative));
        assert_eq!(Verdict::parse(NEUTRAL_SYMBOL), None);
        assert_eq!(Verdict::parse("maybe"), None);
    }
}
