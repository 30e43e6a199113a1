use std::fs::File;
use std::path::{Path, PathBuf};
use chrono::{TimeZone, Utc};
use serde::{Serialize, Deserialize};
use tracing::warn;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Post;

/// Raw dataset row as stored in the CSV file.
///
/// `tags` is a single space-separated field; `other_answers` is a JSON array
/// of strings (a field holding plain text is treated as one answer, which is
/// how older collector runs wrote it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCsv {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub accepted_answer: String,
    #[serde(default)]
    pub other_answers: String,
    pub creation_date: i64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub answer_count: u32,
}

impl PostCsv {
    pub fn into_post(self) -> Result<Post> {
        let creation_date = Utc
            .timestamp_opt(self.creation_date, 0)
            .single()
            .ok_or_else(|| Error::new(
                ErrorKind::Parse,
                format!("invalid creation_date: {}", self.creation_date),
            ))?;

        let other_answers = parse_other_answers(&self.other_answers);

        Ok(Post {
            title: self.title,
            description: self.description,
            tags: self.tags.split_whitespace().map(String::from).collect(),
            accepted_answer: if self.accepted_answer.is_empty() {
                None
            } else {
                Some(self.accepted_answer)
            },
            other_answers,
            creation_date,
            view_count: self.view_count,
            score: self.score,
            answer_count: self.answer_count,
        })
    }

    pub fn from_post(post: &Post) -> Self {
        PostCsv {
            title: post.title.clone(),
            description: post.description.clone(),
            tags: post.tags_joined(),
            accepted_answer: post.accepted_answer.clone().unwrap_or_default(),
            other_answers: serde_json::to_string(&post.other_answers).unwrap_or_default(),
            creation_date: post.creation_date.timestamp(),
            view_count: post.view_count,
            score: post.score,
            answer_count: post.answer_count,
        }
    }
}

fn parse_other_answers(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(field) {
        Ok(answers) => answers,
        Err(_) => vec![field.to_string()],
    }
}

/// Whole-file dataset reader. Malformed rows are skipped, not fatal;
/// a missing file reads as an empty dataset.
pub struct DatasetReader {
    pub path: PathBuf,
}

impl DatasetReader {
    pub fn new(path: PathBuf) -> Self {
        DatasetReader { path }
    }

    pub fn read_all(&self) -> Result<Vec<Post>> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "dataset file missing, treating as empty");
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        let mut reader = csv::Reader::from_path(&self.path)?;
        for (row, record) in reader.deserialize::<PostCsv>().enumerate() {
            match record.map_err(Error::from).and_then(PostCsv::into_post) {
                Ok(post) => posts.push(post),
                Err(err) => {
                    warn!(row, error = %err, "skipping malformed dataset row");
                }
            }
        }
        Ok(posts)
    }
}

/// Streaming reader yielding the dataset in chunks of at most `chunk_size`
/// rows. Only one chunk is buffered at a time and a row is never split
/// across chunks. Malformed rows are skipped within the chunk they fall in.
pub struct ChunkedReader {
    rows: csv::DeserializeRecordsIntoIter<File, PostCsv>,
    chunk_size: usize,
    next_row: usize,
    exhausted: bool,
}

impl ChunkedReader {
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "chunk_size must be non-zero".to_string(),
            ));
        }
        if !path.exists() {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("dataset file not found: {}", path.display()),
            ));
        }

        let reader = csv::Reader::from_path(path)?;
        Ok(ChunkedReader {
            rows: reader.into_deserialize(),
            chunk_size,
            next_row: 0,
            exhausted: false,
        })
    }
}

impl Iterator for ChunkedReader {
    type Item = Result<Vec<Post>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let mut chunk = Vec::with_capacity(self.chunk_size);
        while chunk.len() < self.chunk_size {
            match self.rows.next() {
                Some(record) => {
                    let row = self.next_row;
                    self.next_row += 1;
                    match record.map_err(Error::from).and_then(PostCsv::into_post) {
                        Ok(post) => chunk.push(post),
                        Err(err) => {
                            warn!(row, error = %err, "skipping malformed dataset row");
                        }
                    }
                }
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}
