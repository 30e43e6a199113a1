use tracing::info;
use crate::analysis::analyzer::Preprocessor;
use crate::categorize::categorizer::{Categorizer, CategoryAssignment};
use crate::categorize::store::CategoryStore;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::stats::CorpusStats;
use crate::dataset::reader::DatasetReader;
use crate::dataset::writer::DatasetWriter;
use crate::search::cache::{CacheStats, SearchCache};
use crate::search::chunked::ChunkedSearcher;
use crate::search::page::{SearchPage, SearchRequest};

/// Facade over the whole corpus: preprocessing, categorization, statistics
/// and cached paginated search. Single-threaded, blocking I/O throughout.
pub struct Corpus {
    pub config: Config,
    searcher: ChunkedSearcher,
    cache: SearchCache,
    store: CategoryStore,
}

impl Corpus {
    pub fn open(config: Config) -> Self {
        let searcher = ChunkedSearcher::new(config.chunk_size);
        let cache = SearchCache::new(config.cache_capacity);
        let store = CategoryStore::new(config.categories_dir.clone());
        Corpus {
            config,
            searcher,
            cache,
            store,
        }
    }

    /// Cached chunked search over the preferred dataset file
    pub fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        if let Some(page) = self.cache.get(request) {
            return Ok(page);
        }

        let page = self.searcher.search_file(&self.config.dataset_path(), request)?;
        self.cache.put(request.clone(), page.clone());
        Ok(page)
    }

    /// Run the preprocessing pipeline over the raw dataset and write the
    /// preprocessed dataset next to it. Returns the number of rows written.
    pub fn preprocess(&self, remove_code: bool) -> Result<usize> {
        let raw_path = self.config.data_dir.join(&self.config.dataset_file);
        let posts = DatasetReader::new(raw_path).read_all()?;

        let preprocessor = Preprocessor::new(remove_code);
        let processed = preprocessor.process_all(&posts);

        let out_path = self.config.data_dir.join(&self.config.preprocessed_file);
        DatasetWriter::write_processed(&out_path, &posts, &processed)?;

        // The searchable dataset changed, cached pages are stale
        self.cache.clear();

        info!(rows = posts.len(), "preprocessing pipeline finished");
        Ok(posts.len())
    }

    /// Categorize the preferred dataset with the built-in taxonomies and
    /// persist the category files
    pub fn categorize(&self) -> Result<Vec<CategoryAssignment>> {
        let posts = DatasetReader::new(self.config.dataset_path()).read_all()?;

        let preprocessor = Preprocessor::new(false);
        let processed = preprocessor.process_all(&posts);

        let categorizer = Categorizer::new(self.config.min_posts_per_category);
        let assignments = categorizer.assign(&posts, &processed);
        self.store.save(&posts, &assignments)?;
        info!(
            taxonomies = assignments.len(),
            assigned = assignments.iter().map(CategoryAssignment::total_posts).sum::<usize>(),
            "categorization persisted"
        );
        Ok(assignments)
    }

    pub fn stats(&self) -> Result<CorpusStats> {
        let posts = DatasetReader::new(self.config.dataset_path()).read_all()?;
        let totals = self.store.category_totals()?;
        Ok(CorpusStats::compute(&posts, totals, self.config.top_tags))
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
