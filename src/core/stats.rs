use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::core::types::Post;

/// Corpus statistics for monitoring and the stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_posts: usize,
    /// Taxonomy name → total categorized posts across its categories
    pub category_totals: HashMap<String, usize>,
    pub top_tags: Vec<TagCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Count tag occurrences over the corpus and keep the `limit` most frequent.
/// Ties break lexicographically so the ordering is stable.
pub fn top_tags(posts: &[Post], limit: usize) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in &post.tags {
            if !tag.is_empty() {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount { tag: tag.to_string(), count })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    tags.truncate(limit);
    tags
}

impl CorpusStats {
    pub fn compute(
        posts: &[Post],
        category_totals: HashMap<String, usize>,
        tag_limit: usize,
    ) -> Self {
        CorpusStats {
            total_posts: posts.len(),
            category_totals,
            top_tags: top_tags(posts, tag_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post_with_tags(tags: &[&str]) -> Post {
        Post {
            title: String::new(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            accepted_answer: None,
            other_answers: Vec::new(),
            creation_date: Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
            view_count: 0,
            score: 0,
            answer_count: 0,
        }
    }

    #[test]
    fn top_tags_sorted_by_count_then_name() {
        let posts = vec![
            post_with_tags(&["nlp", "python"]),
            post_with_tags(&["nlp", "spacy"]),
            post_with_tags(&["nlp", "python", "nltk"]),
        ];

        let tags = top_tags(&posts, 3);
        assert_eq!(tags[0], TagCount { tag: "nlp".to_string(), count: 3 });
        assert_eq!(tags[1], TagCount { tag: "python".to_string(), count: 2 });
        assert_eq!(tags[2], TagCount { tag: "nltk".to_string(), count: 1 });
    }

    #[test]
    fn empty_tags_ignored() {
        let posts = vec![post_with_tags(&["", "nlp"])];
        let tags = top_tags(&posts, 10);
        assert_eq!(tags.len(), 1);
    }
}
