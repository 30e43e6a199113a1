use std::collections::BTreeMap;
use tracing::info;
use crate::categorize::taxonomy::{Taxonomy, TextSource};
use crate::core::types::{Post, ProcessedPost, RowId};

/// Result of running one taxonomy over the corpus: category name mapped to
/// the sorted row indices of its posts. Many-to-many across categories.
#[derive(Debug, Clone)]
pub struct CategoryAssignment {
    pub taxonomy: String,
    pub categories: BTreeMap<String, Vec<RowId>>,
}

impl CategoryAssignment {
    pub fn total_posts(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

pub struct Categorizer {
    pub taxonomies: Vec<Taxonomy>,
    pub min_posts_per_category: usize,
}

impl Categorizer {
    pub fn new(min_posts_per_category: usize) -> Self {
        Categorizer {
            taxonomies: Taxonomy::builtin(),
            min_posts_per_category,
        }
    }

    pub fn with_taxonomies(taxonomies: Vec<Taxonomy>, min_posts_per_category: usize) -> Self {
        Categorizer {
            taxonomies,
            min_posts_per_category,
        }
    }

    /// `posts` and `processed` must be parallel slices over the same rows.
    pub fn assign(&self, posts: &[Post], processed: &[ProcessedPost]) -> Vec<CategoryAssignment> {
        self.taxonomies
            .iter()
            .map(|taxonomy| self.assign_taxonomy(taxonomy, posts, processed))
            .collect()
    }

    fn assign_taxonomy(
        &self,
        taxonomy: &Taxonomy,
        posts: &[Post],
        processed: &[ProcessedPost],
    ) -> CategoryAssignment {
        let mut categories: BTreeMap<String, Vec<RowId>> = taxonomy
            .categories
            .iter()
            .map(|category| (category.name.clone(), Vec::new()))
            .collect();

        for (i, (post, proc)) in posts.iter().zip(processed).enumerate() {
            let text = match taxonomy.source {
                TextSource::ProcessedTitle => proc.processed_title.clone(),
                TextSource::RawTitle => post.title.to_lowercase(),
            };

            for category in &taxonomy.categories {
                if category.matches(&text, &proc.processed_tags, taxonomy.check_tags) {
                    if let Some(rows) = categories.get_mut(&category.name) {
                        rows.push(RowId(i as u64));
                    }
                    if taxonomy.first_match_only {
                        break;
                    }
                }
            }
        }

        if taxonomy.prune_small {
            categories.retain(|_, rows| rows.len() >= self.min_posts_per_category);
        }

        info!(
            taxonomy = %taxonomy.name,
            categories = categories.len(),
            "categorization finished"
        );

        CategoryAssignment {
            taxonomy: taxonomy.name.clone(),
            categories,
        }
    }
}
