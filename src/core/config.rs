use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub dataset_file: String,
    pub preprocessed_file: String,
    pub categories_dir: PathBuf,

    // Search layer
    pub chunk_size: usize,              // Rows read per chunk
    pub page_size: usize,               // Default results per page
    pub cache_capacity: usize,          // Cached search pages

    // Categorization
    pub min_posts_per_category: usize,  // Categories below this are pruned
    pub top_tags: usize,                // Tags reported by corpus stats
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("./data"),
            dataset_file: "nlp_stackoverflow_dataset.csv".to_string(),
            preprocessed_file: "preprocessed_nlp_dataset.csv".to_string(),
            categories_dir: PathBuf::from("./data/categories"),

            chunk_size: 1000,
            page_size: 10,
            cache_capacity: 64,

            min_posts_per_category: 10,
            top_tags: 10,
        }
    }
}

impl Config {
    /// Path of the preferred dataset: preprocessed when present, raw otherwise
    pub fn dataset_path(&self) -> PathBuf {
        let preprocessed = self.data_dir.join(&self.preprocessed_file);
        if preprocessed.exists() {
            preprocessed
        } else {
            self.data_dir.join(&self.dataset_file)
        }
    }
}
