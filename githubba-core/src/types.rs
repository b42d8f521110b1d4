use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The owner account of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

/// License metadata as reported by the search API. Every field may be absent
/// for repositories carrying a non-standard license file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub spdx_id: Option<String>,
}

/// One repository as returned by the GitHub search API.
///
/// The card-stack engine only needs `id` and `html_url` (through
/// [`CardRecord`]); every other field belongs to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<License>,
}

/// Identity and external link of a record, the only view the stack has of it.
pub trait CardRecord {
    /// Stable unique identifier of the record.
    fn card_id(&self) -> u64;
    /// URL opened when the record is liked.
    fn external_url(&self) -> &str;
}

impl CardRecord for RepositoryRecord {
    fn card_id(&self) -> u64 {
        self.id
    }

    fn external_url(&self) -> &str {
        &self.html_url
    }
}

/// Strategy the data source uses to pick repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    /// Random sampling across star-count buckets.
    #[default]
    Random,
    /// Recently created repositories, newest first.
    New,
}

impl FeedType {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedType::Random => "random",
            FeedType::New => "new",
        }
    }

    /// The other feed type; used by the settings popup toggle.
    pub fn toggled(self) -> Self {
        match self {
            FeedType::Random => FeedType::New,
            FeedType::New => FeedType::Random,
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown feed name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feed type '{0}', expected 'random' or 'new'")]
pub struct ParseFeedTypeError(pub String);

impl FromStr for FeedType {
    type Err = ParseFeedTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(FeedType::Random),
            "new" => Ok(FeedType::New),
            other => Err(ParseFeedTypeError(other.to_owned())),
        }
    }
}

/// Direction of a completed horizontal swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Dismiss the card.
    Left,
    /// Like the card and open it externally.
    Right,
}

/// Visual confirmation shown after an accepted swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Like,
    Dislike,
}

impl From<SwipeDirection> for FeedbackKind {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => FeedbackKind::Dislike,
            SwipeDirection::Right => FeedbackKind::Like,
        }
    }
}
