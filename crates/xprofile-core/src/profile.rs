//! Profile records and the per-field outcome vocabulary shared by the
//! extractor and every sink.

use serde::{Serialize, Serializer};

/// Placeholder for a field whose absence is expected or whose wait elapsed.
pub const SENTINEL_NOT_FOUND: &str = "not found";

/// Placeholder for a field whose page element was not present.
pub const SENTINEL_ELEMENT_MISSING: &str = "Element not found";

/// The seven semantic fields read from a profile page, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    DisplayName,
    Bio,
    FollowingCount,
    FollowersCount,
    Location,
    Website,
}

impl Field {
    /// Every field in the fixed order they are extracted and exported.
    pub const ALL: [Field; 7] = [
        Field::Username,
        Field::DisplayName,
        Field::Bio,
        Field::FollowingCount,
        Field::FollowersCount,
        Field::Location,
        Field::Website,
    ];

    /// Column header used by the CSV export.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::DisplayName => "Display Name",
            Field::Bio => "Bio",
            Field::FollowingCount => "Following Count",
            Field::FollowersCount => "Followers Count",
            Field::Location => "Location",
            Field::Website => "Website",
        }
    }

    /// Sentinel written when the field cannot be read.
    ///
    /// Username (bounded wait) and website (commonly absent) use
    /// `"not found"`; every other field uses `"Element not found"`.
    #[must_use]
    pub fn absent_sentinel(self) -> &'static str {
        match self {
            Field::Username | Field::Website => SENTINEL_NOT_FOUND,
            Field::DisplayName
            | Field::Bio
            | Field::FollowingCount
            | Field::FollowersCount
            | Field::Location => SENTINEL_ELEMENT_MISSING,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of reading one field from a loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Found(String),
    /// The page loaded but the element did not turn up within its bound.
    NotFound,
    /// The element (or the container it lives in) is not on the page.
    ElementMissing,
    Error(String),
}

impl FieldOutcome {
    /// Renders the outcome as record text, substituting sentinels for failures.
    ///
    /// `Error` carries no text of its own and falls back to the field's
    /// designated sentinel.
    #[must_use]
    pub fn render(self, field: Field) -> String {
        match self {
            FieldOutcome::Found(text) => text,
            FieldOutcome::NotFound => SENTINEL_NOT_FOUND.to_string(),
            FieldOutcome::ElementMissing => SENTINEL_ELEMENT_MISSING.to_string(),
            FieldOutcome::Error(_) => field.absent_sentinel().to_string(),
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, FieldOutcome::Found(_))
    }
}

/// Classification of a raw profile reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Carries the normalized URL that extraction should load.
    Valid(String),
    /// Carries the reference exactly as it was read.
    Invalid(String),
}

/// Record-level outcome of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileStatus {
    Success,
    InvalidUrl,
    Timeout,
    Error(String),
}

impl std::fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileStatus::Success => write!(f, "Success"),
            ProfileStatus::InvalidUrl => write!(f, "Invalid URL"),
            ProfileStatus::Timeout => write!(f, "Timeout Error"),
            ProfileStatus::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

impl Serialize for ProfileStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One extracted profile. Field order matches the export header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    #[serde(rename = "Profile URL")]
    pub url: String,
    #[serde(rename = "Status")]
    pub status: ProfileStatus,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Display Name")]
    pub display_name: String,
    #[serde(rename = "Bio")]
    pub bio: String,
    #[serde(rename = "Following Count")]
    pub following_count: String,
    #[serde(rename = "Followers Count")]
    pub followers_count: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Website")]
    pub website: String,
}

impl ProfileRecord {
    /// A record whose page was never queried: every field is empty.
    #[must_use]
    pub fn unqueried(url: impl Into<String>, status: ProfileStatus) -> Self {
        Self {
            url: url.into(),
            status,
            username: String::new(),
            display_name: String::new(),
            bio: String::new(),
            following_count: String::new(),
            followers_count: String::new(),
            location: String::new(),
            website: String::new(),
        }
    }

    #[must_use]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::DisplayName => &self.display_name,
            Field::Bio => &self.bio,
            Field::FollowingCount => &self.following_count,
            Field::FollowersCount => &self.followers_count,
            Field::Location => &self.location,
            Field::Website => &self.website,
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Username => &mut self.username,
            Field::DisplayName => &mut self.display_name,
            Field::Bio => &mut self.bio,
            Field::FollowingCount => &mut self.following_count,
            Field::FollowersCount => &mut self.followers_count,
            Field::Location => &mut self.location,
            Field::Website => &mut self.website,
        };
        *slot = value;
    }

    /// Returns `true` when no field was ever queried (all empty).
    #[must_use]
    pub fn is_unqueried(&self) -> bool {
        Field::ALL.iter().all(|f| self.field(*f).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_matches_export_strings() {
        assert_eq!(ProfileStatus::Success.to_string(), "Success");
        assert_eq!(ProfileStatus::InvalidUrl.to_string(), "Invalid URL");
        assert_eq!(ProfileStatus::Timeout.to_string(), "Timeout Error");
        assert_eq!(
            ProfileStatus::Error("net::ERR_NAME_NOT_RESOLVED".to_string()).to_string(),
            "Error: net::ERR_NAME_NOT_RESOLVED"
        );
    }

    #[test]
    fn sentinels_follow_field_policy() {
        assert_eq!(Field::Username.absent_sentinel(), "not found");
        assert_eq!(Field::Website.absent_sentinel(), "not found");
        assert_eq!(Field::Bio.absent_sentinel(), "Element not found");
        assert_eq!(Field::Location.absent_sentinel(), "Element not found");
    }

    #[test]
    fn render_substitutes_sentinels() {
        assert_eq!(
            FieldOutcome::Found("hello".to_string()).render(Field::Bio),
            "hello"
        );
        assert_eq!(FieldOutcome::NotFound.render(Field::Website), "not found");
        assert_eq!(
            FieldOutcome::ElementMissing.render(Field::DisplayName),
            "Element not found"
        );
        assert_eq!(
            FieldOutcome::Error("bad selector".to_string()).render(Field::Website),
            "not found"
        );
        assert_eq!(
            FieldOutcome::Error("bad selector".to_string()).render(Field::FollowingCount),
            "Element not found"
        );
    }

    #[test]
    fn unqueried_record_has_empty_fields() {
        let record = ProfileRecord::unqueried("https://x.com/a", ProfileStatus::Timeout);
        assert!(record.is_unqueried());
        assert_eq!(record.status, ProfileStatus::Timeout);
    }

    #[test]
    fn set_field_writes_matching_slot() {
        let mut record = ProfileRecord::unqueried("https://x.com/a", ProfileStatus::Success);
        for (i, field) in Field::ALL.iter().enumerate() {
            record.set_field(*field, format!("v{i}"));
        }
        assert_eq!(record.username, "v0");
        assert_eq!(record.website, "v6");
        assert_eq!(record.field(Field::FollowersCount), "v4");
        assert!(!record.is_unqueried());
    }

    #[test]
    fn record_serializes_with_export_keys() {
        let record = ProfileRecord::unqueried("https://x.com/a", ProfileStatus::InvalidUrl);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Profile URL"], "https://x.com/a");
        assert_eq!(json["Status"], "Invalid URL");
        assert_eq!(json["Display Name"], "");
    }
}
