use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

/// Row index of a post within the dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u64);

impl RowId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A collected Stack Overflow post. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub accepted_answer: Option<String>,
    /// Up to 5 additional answers kept per post at collection time
    pub other_answers: Vec<String>,
    pub creation_date: DateTime<Utc>,
    pub view_count: u64,
    pub score: i64,
    pub answer_count: u32,
}

impl Post {
    /// Tags as a single space-joined string, the form the dataset file stores
    pub fn tags_joined(&self) -> String {
        self.tags.join(" ")
    }
}

/// A post after the preprocessing pipeline has run over its text fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedPost {
    pub row: RowId,
    pub processed_title: String,
    pub processed_description: String,
    pub processed_accepted_answer: String,
    pub processed_other_answers: Vec<String>,
    pub processed_tags: Vec<String>,
}
