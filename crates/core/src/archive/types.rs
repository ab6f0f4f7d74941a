//! Types for the archive search system.

use serde::{Deserialize, Deserializer, Serialize};

/// Display budget for card descriptions, in characters.
pub const DESCRIPTION_BUDGET: usize = 120;

/// Parameters for one search against the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text search term. May be empty.
    pub query: String,
    /// Creator filter text. May be empty.
    pub creator: String,
    /// Media-type filter; `All` places no restriction.
    #[serde(default)]
    pub media_type: MediaType,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, creator: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            query: query.into(),
            creator: creator.into(),
            media_type,
        }
    }

    /// At least one of query/creator must survive trimming for the request
    /// to be runnable.
    pub fn is_searchable(&self) -> bool {
        !self.query.trim().is_empty() || !self.creator.trim().is_empty()
    }
}

/// Media-type filter for search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    All,
    Audio,
    Movies,
    Texts,
    Software,
    Image,
}

impl MediaType {
    /// Every filter value, in menu order.
    pub const ALL: [MediaType; 6] = [
        MediaType::All,
        MediaType::Audio,
        MediaType::Movies,
        MediaType::Texts,
        MediaType::Software,
        MediaType::Image,
    ];

    /// Wire and persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::All => "all",
            MediaType::Audio => "audio",
            MediaType::Movies => "movies",
            MediaType::Texts => "texts",
            MediaType::Software => "software",
            MediaType::Image => "image",
        }
    }

    /// Human-readable label for menus.
    pub fn label(self) -> &'static str {
        match self {
            MediaType::All => "All Media",
            MediaType::Audio => "Audio",
            MediaType::Movies => "Movies & Videos",
            MediaType::Texts => "Texts",
            MediaType::Software => "Software",
            MediaType::Image => "Images",
        }
    }

    /// Parse a persisted code; unknown values fall back to `All`.
    pub fn parse(code: &str) -> MediaType {
        Self::ALL
            .into_iter()
            .find(|mt| mt.as_str() == code)
            .unwrap_or(MediaType::All)
    }

    pub fn next(self) -> MediaType {
        let idx = Self::ALL.iter().position(|mt| *mt == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> MediaType {
        let idx = Self::ALL.iter().position(|mt| *mt == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A field the archive returns as either a bare string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexList {
    One(String),
    Many(Vec<String>),
}

impl FlexList {
    pub fn join(&self, sep: &str) -> String {
        match self {
            FlexList::One(s) => s.clone(),
            FlexList::Many(items) => items.join(sep),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FlexList::One(s) => s.is_empty(),
            FlexList::Many(items) => items.iter().all(|s| s.is_empty()),
        }
    }
}

impl Default for FlexList {
    fn default() -> Self {
        FlexList::Many(Vec::new())
    }
}

/// One result record from the archive.
///
/// `identifier` is the only required field and the sole correlation key
/// between a result card and its detail view; everything else is display
/// metadata with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveItem {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<FlexList>,
    /// The endpoint emits years as JSON strings or numbers; both accepted.
    #[serde(
        default,
        deserialize_with = "de_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    /// Informational category as reported by the archive; not validated
    /// against the filter enum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mediatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FlexList>,
}

impl ArchiveItem {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => "Untitled",
        }
    }

    pub fn display_creator(&self) -> String {
        match &self.creator {
            Some(creator) if !creator.is_empty() => creator.join(", "),
            _ => "N/A".to_string(),
        }
    }

    pub fn display_year(&self) -> &str {
        match self.year.as_deref() {
            Some(year) if !year.is_empty() => year,
            _ => "N/A",
        }
    }

    pub fn display_mediatype(&self) -> &str {
        self.mediatype.as_deref().unwrap_or("N/A")
    }

    /// Description joined and cut to the display budget.
    pub fn short_description(&self) -> String {
        let text = self
            .description
            .as_ref()
            .map(|d| d.join(" "))
            .unwrap_or_default();
        if text.is_empty() {
            return "No description available.".to_string();
        }
        let cut: String = text.chars().take(DESCRIPTION_BUDGET).collect();
        format!("{}...", cut)
    }
}

fn de_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearField {
        Num(i64),
        Text(String),
    }

    Ok(Option::<YearField>::deserialize(deserializer)?.map(|year| match year {
        YearField::Num(n) => n.to_string(),
        YearField::Text(s) => s,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_searchable_requires_non_blank_term() {
        let request = SearchRequest::new("  ", "", MediaType::All);
        assert!(!request.is_searchable());

        let request = SearchRequest::new("cats", "", MediaType::All);
        assert!(request.is_searchable());

        let request = SearchRequest::new("", "Prelinger", MediaType::All);
        assert!(request.is_searchable());
    }

    #[test]
    fn test_media_type_round_trip() {
        for mt in MediaType::ALL {
            assert_eq!(MediaType::parse(mt.as_str()), mt);
        }
    }

    #[test]
    fn test_media_type_unknown_falls_back_to_all() {
        assert_eq!(MediaType::parse("holograms"), MediaType::All);
        assert_eq!(MediaType::parse(""), MediaType::All);
    }

    #[test]
    fn test_media_type_cycle() {
        assert_eq!(MediaType::All.next(), MediaType::Audio);
        assert_eq!(MediaType::All.prev(), MediaType::Image);
        assert_eq!(MediaType::Image.next(), MediaType::All);
    }

    #[test]
    fn test_item_single_valued_fields() {
        let item: ArchiveItem = serde_json::from_str(
            r#"{
                "identifier": "moby-dick",
                "title": "Moby Dick",
                "creator": "Herman Melville",
                "year": "1851",
                "mediatype": "texts",
                "description": "Call me Ishmael."
            }"#,
        )
        .unwrap();

        assert_eq!(item.identifier, "moby-dick");
        assert_eq!(item.display_title(), "Moby Dick");
        assert_eq!(item.display_creator(), "Herman Melville");
        assert_eq!(item.display_year(), "1851");
    }

    #[test]
    fn test_item_multi_valued_fields_join() {
        let item: ArchiveItem = serde_json::from_str(
            r#"{
                "identifier": "duet",
                "creator": ["Simon", "Garfunkel"],
                "description": ["First part.", "Second part."]
            }"#,
        )
        .unwrap();

        assert_eq!(item.display_creator(), "Simon, Garfunkel");
        assert!(item.short_description().starts_with("First part. Second part."));
    }

    #[test]
    fn test_item_numeric_year() {
        let item: ArchiveItem =
            serde_json::from_str(r#"{"identifier": "x", "year": 1968}"#).unwrap();
        assert_eq!(item.display_year(), "1968");
    }

    #[test]
    fn test_item_display_defaults() {
        let item: ArchiveItem = serde_json::from_str(r#"{"identifier": "bare"}"#).unwrap();
        assert_eq!(item.display_title(), "Untitled");
        assert_eq!(item.display_creator(), "N/A");
        assert_eq!(item.display_year(), "N/A");
        assert_eq!(item.short_description(), "No description available.");
    }

    #[test]
    fn test_short_description_honors_budget() {
        let long = "x".repeat(500);
        let item = ArchiveItem {
            identifier: "long".to_string(),
            title: None,
            creator: None,
            year: None,
            mediatype: None,
            description: Some(FlexList::One(long)),
        };

        let shown = item.short_description();
        assert_eq!(shown.chars().count(), DESCRIPTION_BUDGET + 3);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_item_serialization_round_trip() {
        let item = ArchiveItem {
            identifier: "night-of-the-living-dead".to_string(),
            title: Some("Night of the Living Dead".to_string()),
            creator: Some(FlexList::One("George A. Romero".to_string())),
            year: Some("1968".to_string()),
            mediatype: Some("movies".to_string()),
            description: Some(FlexList::Many(vec!["Classic.".to_string()])),
        };

        let json = serde_json::to_string(&item).unwrap();
        let parsed: ArchiveItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
