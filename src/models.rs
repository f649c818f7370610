// Data models — the scored items that flow through filtering and reporting.
//
// Items arrive already scored by an external provider (Perspective API) and
// already parsed (dates are real timestamps). Nothing here talks to the
// network or a database.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The attribute every toxicity range filter and average is computed over.
pub const TOXICITY: &str = "TOXICITY";

/// A social media post — just the fields FeedShield needs for triage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaItem {
    pub id: String,
    pub text: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_screen_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_image: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweet_count: Option<u64>,
}

/// Read access to the fields filters and the report aggregator look at.
///
/// `ScoredItem` is generic over this trait so callers can wrap their own post
/// types without converting them into `SocialMediaItem` first.
pub trait FilterableItem {
    fn text(&self) -> &str;

    fn date(&self) -> DateTime<Utc>;

    fn author_name(&self) -> Option<&str> {
        None
    }

    fn author_screen_name(&self) -> Option<&str> {
        None
    }

    fn has_image(&self) -> bool {
        false
    }

    fn verified(&self) -> bool {
        false
    }
}

impl FilterableItem for SocialMediaItem {
    fn text(&self) -> &str {
        &self.text
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn author_name(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    fn author_screen_name(&self) -> Option<&str> {
        self.author_screen_name.as_deref()
    }

    fn has_image(&self) -> bool {
        self.has_image == Some(true)
    }

    fn verified(&self) -> bool {
        self.verified == Some(true)
    }
}

impl SocialMediaItem {
    /// Likes plus retweets, treating missing counts as zero.
    pub fn engagement(&self) -> u64 {
        self.favorite_count.unwrap_or(0) + self.retweet_count.unwrap_or(0)
    }
}

/// An optional text field with empty or whitespace-only values treated as
/// missing. Filters and the report aggregator share this rule for authors.
pub fn non_blank(field: Option<&str>) -> Option<&str> {
    field.filter(|value| !value.trim().is_empty())
}

/// Attribute name -> score in [0, 1].
///
/// A missing key means the attribute was never scored, which is not the same
/// as a score of 0.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scores(BTreeMap<String, f64>);

impl Scores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures.
    pub fn with(mut self, attribute: impl Into<String>, score: f64) -> Self {
        self.0.insert(attribute.into(), score);
        self
    }

    pub fn insert(&mut self, attribute: impl Into<String>, score: f64) {
        self.0.insert(attribute.into(), score);
    }

    pub fn get(&self, attribute: &str) -> Option<f64> {
        self.0.get(attribute).copied()
    }

    pub fn toxicity(&self) -> Option<f64> {
        self.get(TOXICITY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Scores {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A post paired with its moderation scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem<T = SocialMediaItem> {
    pub item: T,
    #[serde(default)]
    pub scores: Scores,
}

impl<T> ScoredItem<T> {
    pub fn new(item: T, scores: Scores) -> Self {
        Self { item, scores }
    }
}

/// The Perspective attributes FeedShield knows how to label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Toxicity,
    SevereToxicity,
    IdentityAttack,
    Insult,
    Profanity,
    Threat,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Toxicity,
        Attribute::SevereToxicity,
        Attribute::IdentityAttack,
        Attribute::Insult,
        Attribute::Profanity,
        Attribute::Threat,
    ];

    /// The wire name used as a key in score maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Toxicity => TOXICITY,
            Attribute::SevereToxicity => "SEVERE_TOXICITY",
            Attribute::IdentityAttack => "IDENTITY_ATTACK",
            Attribute::Insult => "INSULT",
            Attribute::Profanity => "PROFANITY",
            Attribute::Threat => "THREAT",
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Toxicity => "Toxic",
            Attribute::SevereToxicity => "Severely toxic",
            Attribute::IdentityAttack => "Identity attack",
            Attribute::Insult => "Insult",
            Attribute::Profanity => "Profanity",
            Attribute::Threat => "Threat",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_score_is_not_zero() {
        let scores = Scores::new().with("INSULT", 0.0);
        assert_eq!(scores.get("INSULT"), Some(0.0));
        assert_eq!(scores.toxicity(), None);
    }

    #[test]
    fn test_attribute_names_round_trip() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::from_name(attribute.as_str()), Some(attribute));
        }
        assert_eq!(Attribute::from_name("FLIRTATION"), None);
    }

    #[test]
    fn test_item_json_uses_camel_case() {
        let json = r#"{
            "item": {
                "id": "a",
                "text": "hello",
                "date": "2024-03-01T12:00:00Z",
                "authorScreenName": "someone",
                "hasImage": true
            },
            "scores": {"TOXICITY": 0.42}
        }"#;
        let scored: ScoredItem = serde_json::from_str(json).unwrap();
        assert_eq!(scored.item.author_screen_name.as_deref(), Some("someone"));
        assert!(scored.item.has_image());
        assert!(!scored.item.verified());
        assert_eq!(scored.scores.toxicity(), Some(0.42));
    }
}
