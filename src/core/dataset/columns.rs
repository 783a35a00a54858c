use std::fmt;

/// Candidate image groups a dataset column can feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageGroup {
    /// Images expected to match the mood of the song
    Positive,
    /// Images expected to contradict the mood of the song
    Negative,
    /// Day and night city scenes
    City,
}

impl ImageGroup {
    /// Display order of the groups on a page
    pub const ALL: [ImageGroup; 3] = [ImageGroup::Positive, ImageGroup::Negative, ImageGroup::City];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageGroup::Positive => "positive",
            ImageGroup::Negative => "negative",
            ImageGroup::City => "city",
        }
    }

    /// Section heading shown above the group's images
    pub fn title(&self) -> &'static str {
        match self {
            ImageGroup::Positive => "Images that match the feel of the song",
            ImageGroup::Negative => "Images that contradict the feel of the song",
            ImageGroup::City => "Does the city scene fit the mood of the song?",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(ImageGroup::Positive),
            "negative" => Some(ImageGroup::Negative),
            "city" => Some(ImageGroup::City),
            _ => None,
        }
    }
}

impl fmt::Display for ImageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Naming convention that maps dataset columns onto image groups.
///
/// A column feeds the positive group when it starts with `match_prefix` and
/// ends with `positive_suffix`, the negative group when it starts with
/// `match_prefix` and ends with `negative_suffix`, and the city group when it
/// starts with any of `city_prefixes`. Every other column is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPatterns {
    pub match_prefix: String,
    pub positive_suffix: String,
    pub negative_suffix: String,
    pub city_prefixes: Vec<String>,
}

impl Default for ColumnPatterns {
    fn default() -> Self {
        Self {
            match_prefix: "match_img".to_string(),
            positive_suffix: "_x".to_string(),
            negative_suffix: "_y".to_string(),
            city_prefixes: vec!["city_day_img".to_string(), "city_night_img".to_string()],
        }
    }
}

impl ColumnPatterns {
    /// Group fed by `column`, if any
    pub fn classify(&self, column: &str) -> Option<ImageGroup> {
        if column.starts_with(&self.match_prefix) {
            if column.ends_with(&self.positive_suffix) {
                return Some(ImageGroup::Positive);
            }
            if column.ends_with(&self.negative_suffix) {
                return Some(ImageGroup::Negative);
            }
        }

        if self
            .city_prefixes
            .iter()
            .any(|prefix| column.starts_with(prefix.as_str()))
        {
            return Some(ImageGroup::City);
        }

        None
    }
}
