use std::path::Path;
use serde::{Serialize, Deserialize};
use tracing::info;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{Post, ProcessedPost};
use crate::dataset::reader::PostCsv;

/// Preprocessed dataset row: the original columns plus the processed text.
/// Readers that only want the raw columns deserialize this file as `PostCsv`
/// and ignore the extras.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedCsv {
    // Raw columns, kept in the same order as PostCsv (the csv serializer
    // does not support flattened structs)
    pub title: String,
    pub description: String,
    pub tags: String,
    pub accepted_answer: String,
    pub other_answers: String,
    pub creation_date: i64,
    pub view_count: u64,
    pub score: i64,
    pub answer_count: u32,

    pub processed_title: String,
    pub processed_description: String,
    pub processed_accepted_answer: String,
    /// JSON array, same encoding as `other_answers`
    pub processed_other_answers: String,
    /// Space-separated, same encoding as `tags`
    pub processed_tags: String,
}

/// Writes dataset files back to CSV
pub struct DatasetWriter;

impl DatasetWriter {
    pub fn write_posts(path: &Path, posts: &[Post]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for post in posts {
            writer.serialize(PostCsv::from_post(post))?;
        }
        writer.flush()?;
        info!(path = %path.display(), rows = posts.len(), "dataset written");
        Ok(())
    }

    /// Write the preprocessed dataset. `posts` and `processed` must be
    /// parallel slices over the same rows.
    pub fn write_processed(path: &Path, posts: &[Post], processed: &[ProcessedPost]) -> Result<()> {
        if posts.len() != processed.len() {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!(
                    "row count mismatch: {} posts, {} processed",
                    posts.len(),
                    processed.len()
                ),
            ));
        }

        let mut writer = csv::Writer::from_path(path)?;
        for (post, proc) in posts.iter().zip(processed) {
            let raw = PostCsv::from_post(post);
            writer.serialize(ProcessedCsv {
                title: raw.title,
                description: raw.description,
                tags: raw.tags,
                accepted_answer: raw.accepted_answer,
                other_answers: raw.other_answers,
                creation_date: raw.creation_date,
                view_count: raw.view_count,
                score: raw.score,
                answer_count: raw.answer_count,
                processed_title: proc.processed_title.clone(),
                processed_description: proc.processed_description.clone(),
                processed_accepted_answer: proc.processed_accepted_answer.clone(),
                processed_other_answers: serde_json::to_string(&proc.processed_other_answers)
                    .unwrap_or_default(),
                processed_tags: proc.processed_tags.join(" "),
            })?;
        }
        writer.flush()?;
        info!(path = %path.display(), rows = posts.len(), "preprocessed dataset written");
        Ok(())
    }
}
