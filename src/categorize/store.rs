use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;
use serde::{Serialize, Deserialize};
use tracing::{info, warn};
use crate::categorize::categorizer::CategoryAssignment;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Post;
use crate::dataset::reader::DatasetReader;
use crate::dataset::writer::DatasetWriter;

/// Summary written alongside the category files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizationSummary {
    pub categorization_methods: BTreeMap<String, MethodSummary>,
    /// Assignments summed across methods (a post counts once per category)
    pub total_categorized_posts: usize,
    /// Distinct posts that landed in at least one category
    pub total_unique_posts: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSummary {
    pub categories: BTreeMap<String, usize>,
    pub total_posts: usize,
}

/// A category as listed for browsing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListing {
    pub name: String,
    pub count: usize,
    pub file: String,
}

/// Persists category assignments as one CSV per category under
/// `<root>/<taxonomy>/<category>.csv`, plus a summary JSON at the root.
pub struct CategoryStore {
    pub root: PathBuf,
}

const SUMMARY_FILE: &str = "categorization_summary.json";

impl CategoryStore {
    pub fn new(root: PathBuf) -> Self {
        CategoryStore { root }
    }

    pub fn save(&self, posts: &[Post], assignments: &[CategoryAssignment]) -> Result<()> {
        let mut methods = BTreeMap::new();
        let mut unique_rows = BTreeSet::new();
        let mut total = 0usize;

        for assignment in assignments {
            let dir = self.root.join(&assignment.taxonomy);
            fs::create_dir_all(&dir)?;

            let mut category_counts = BTreeMap::new();
            for (category, rows) in &assignment.categories {
                let members: Vec<Post> = rows
                    .iter()
                    .filter_map(|row| posts.get(row.value() as usize).cloned())
                    .collect();

                let path = dir.join(category_file_name(category));
                DatasetWriter::write_posts(&path, &members)?;

                unique_rows.extend(rows.iter().copied());
                total += members.len();
                category_counts.insert(category.clone(), members.len());
            }

            methods.insert(
                assignment.taxonomy.clone(),
                MethodSummary {
                    total_posts: category_counts.values().sum(),
                    categories: category_counts,
                },
            );
        }

        let summary = CategorizationSummary {
            categorization_methods: methods,
            total_categorized_posts: total,
            total_unique_posts: unique_rows.len(),
        };

        let summary_path = self.root.join(SUMMARY_FILE);
        fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
        info!(
            path = %summary_path.display(),
            total,
            unique = unique_rows.len(),
            "category files written"
        );
        Ok(())
    }

    /// Taxonomy names present in the store, sorted
    pub fn list_taxonomies(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Categories of one taxonomy with their post counts, largest first
    pub fn list_categories(&self, taxonomy: &str) -> Result<Vec<CategoryListing>> {
        let dir = self.root.join(taxonomy);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut listings = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }

            let file = entry.file_name().to_string_lossy().into_owned();
            let name = file.trim_end_matches(".csv").replace('_', " ");
            let count = match DatasetReader::new(path.clone()).read_all() {
                Ok(posts) => posts.len(),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "unreadable category file");
                    0
                }
            };
            listings.push(CategoryListing { name, count, file });
        }

        listings.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        Ok(listings)
    }

    /// Posts of one category. A category that does not exist loads as empty.
    pub fn load_category(&self, taxonomy: &str, category: &str) -> Result<Vec<Post>> {
        let path = self.root.join(taxonomy).join(category_file_name(category));
        DatasetReader::new(path).read_all()
    }

    /// Taxonomy name → total categorized posts, for corpus stats
    pub fn category_totals(&self) -> Result<HashMap<String, usize>> {
        let mut totals = HashMap::new();
        for taxonomy in self.list_taxonomies()? {
            let total = self
                .list_categories(&taxonomy)?
                .iter()
                .map(|listing| listing.count)
                .sum();
            totals.insert(taxonomy, total);
        }
        Ok(totals)
    }

    pub fn load_summary(&self) -> Result<CategorizationSummary> {
        let path = self.root.join(SUMMARY_FILE);
        let data = fs::read_to_string(&path).map_err(|_| {
            Error::new(
                ErrorKind::NotFound,
                format!("summary not found: {}", path.display()),
            )
        })?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// "Named Entity Recognition" → "Named_Entity_Recognition.csv"
fn category_file_name(category: &str) -> String {
    format!("{}.csv", category.replace(' ', "_").replace('/', "_"))
}
