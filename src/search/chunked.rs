use std::path::Path;
use tracing::debug;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Post;
use crate::dataset::reader::ChunkedReader;
use crate::search::page::{SearchPage, SearchRequest, TotalMode};

/// Bounded-memory paginated search.
///
/// Scans the dataset one chunk at a time, keeps a running total of matches,
/// and copies into the page buffer only the matched rows that fall inside
/// the requested window. Memory use is O(chunk size + page size) regardless
/// of dataset size.
pub struct ChunkedSearcher {
    pub chunk_size: usize,
}

impl ChunkedSearcher {
    pub fn new(chunk_size: usize) -> Self {
        ChunkedSearcher { chunk_size }
    }

    /// Search the dataset file at `path`. A missing file is an empty
    /// dataset, not an error. Argument validation is the same as
    /// `search_chunks` either way.
    pub fn search_file(&self, path: &Path, request: &SearchRequest) -> Result<SearchPage> {
        match ChunkedReader::open(path, self.chunk_size) {
            Ok(reader) => Self::search_chunks(reader, request),
            Err(Error { kind: ErrorKind::NotFound, .. }) => {
                Self::search_chunks(std::iter::empty(), request)
            }
            Err(err) => Err(err),
        }
    }

    /// Search any chunk source. Each item is one chunk of rows; chunks are
    /// consumed in dataset order and a failed chunk read aborts the search.
    pub fn search_chunks<I>(chunks: I, request: &SearchRequest) -> Result<SearchPage>
    where
        I: IntoIterator<Item = Result<Vec<Post>>>,
    {
        if request.page == 0 || request.per_page == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!(
                    "page and per_page must be non-zero (page={}, per_page={})",
                    request.page, request.per_page
                ),
            ));
        }

        if request.query.is_empty() {
            return Ok(SearchPage::empty(request.page, request.per_page));
        }

        let needle = request.query.to_lowercase();
        let offset = request.offset();

        let mut total = 0usize;
        let mut results: Vec<Post> = Vec::with_capacity(request.per_page);
        let mut stopped_early = false;
        let mut chunks = chunks.into_iter().peekable();

        while let Some(chunk) = chunks.next() {
            let chunk = chunk?;

            // Match mask for this chunk, then the page slice is carved out
            // of the matched rows by global match index.
            let mask: Vec<bool> = chunk.iter().map(|post| matches_post(post, &needle)).collect();
            let chunk_matches = mask.iter().filter(|&&m| m).count();

            if chunk_matches > 0 && total + chunk_matches > offset && results.len() < request.per_page {
                let mut match_index = total;
                for (post, matched) in chunk.into_iter().zip(mask.iter().copied()) {
                    if !matched {
                        continue;
                    }
                    if match_index >= offset && results.len() < request.per_page {
                        results.push(post);
                    }
                    match_index += 1;
                    if results.len() >= request.per_page {
                        break;
                    }
                }
            }

            total += chunk_matches;

            // The total is only a lower bound if chunks actually remain
            // unscanned when the page fills.
            if request.total_mode == TotalMode::AtLeast
                && results.len() >= request.per_page
                && chunks.peek().is_some()
            {
                stopped_early = true;
                break;
            }
        }

        debug!(
            query = %request.query,
            page = request.page,
            total,
            returned = results.len(),
            stopped_early,
            "chunked search finished"
        );

        Ok(SearchPage {
            results,
            total,
            page: request.page,
            per_page: request.per_page,
            total_is_lower_bound: stopped_early,
        })
    }
}

/// Case-insensitive substring match over the searchable fields
fn matches_post(post: &Post, needle_lower: &str) -> bool {
    post.title.to_lowercase().contains(needle_lower)
        || post.description.to_lowercase().contains(needle_lower)
        || post.tags_joined().to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(title: &str) -> Post {
        Post {
            title: title.to_string(),
            description: String::new(),
            tags: vec!["nlp".to_string()],
            accepted_answer: None,
            other_answers: Vec::new(),
            creation_date: Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
            view_count: 0,
            score: 0,
            answer_count: 0,
        }
    }

    fn chunks_of(posts: Vec<Post>, size: usize) -> Vec<Result<Vec<Post>>> {
        let mut out = Vec::new();
        let mut current = Vec::new();
        for p in posts {
            current.push(p);
            if current.len() == size {
                out.push(Ok(std::mem::take(&mut current)));
            }
        }
        if !current.is_empty() {
            out.push(Ok(current));
        }
        out
    }

    #[test]
    fn empty_query_is_empty_page() {
        let request = SearchRequest::new("", 1, 10);
        let page = ChunkedSearcher::search_chunks(chunks_of(vec![post("a")], 2), &request).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn match_is_case_insensitive_across_fields() {
        let mut tagged = post("unrelated");
        tagged.tags = vec!["Tokenize".to_string()];
        let mut described = post("unrelated");
        described.description = "how to TOKENIZE".to_string();

        let posts = vec![post("Tokenize this"), tagged, described, post("nothing")];
        let request = SearchRequest::new("tokenize", 1, 10);
        let page = ChunkedSearcher::search_chunks(chunks_of(posts, 2), &request).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.results.len(), 3);
    }

    #[test]
    fn page_window_spans_chunk_boundary() {
        // Matches at rows 0..6, chunk size 4, page 2 of 3 → rows 3, 4, 5
        let posts: Vec<Post> = (0..8)
            .map(|i| {
                if i < 6 {
                    post(&format!("tokenize {}", i))
                } else {
                    post(&format!("other {}", i))
                }
            })
            .collect();

        let request = SearchRequest::new("tokenize", 2, 3);
        let page = ChunkedSearcher::search_chunks(chunks_of(posts, 4), &request).unwrap();
        assert_eq!(page.total, 6);
        let titles: Vec<&str> = page.results.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["tokenize 3", "tokenize 4", "tokenize 5"]);
    }

    #[test]
    fn offset_beyond_total_returns_empty_with_exact_total() {
        let posts = vec![post("tokenize a"), post("tokenize b")];
        let request = SearchRequest::new("tokenize", 5, 10);
        let page = ChunkedSearcher::search_chunks(chunks_of(posts, 2), &request).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total, 2);
        assert!(!page.total_is_lower_bound);
    }

    #[test]
    fn at_least_mode_stops_early_and_says_so() {
        let posts: Vec<Post> = (0..10).map(|i| post(&format!("tokenize {}", i))).collect();
        let request =
            SearchRequest::new("tokenize", 1, 2).with_total_mode(TotalMode::AtLeast);
        let page = ChunkedSearcher::search_chunks(chunks_of(posts, 2), &request).unwrap();
        assert_eq!(page.results.len(), 2);
        assert!(page.total_is_lower_bound);
        assert!(page.total <= 10);
        assert!(page.total >= 2);
    }

    #[test]
    fn at_least_mode_with_full_scan_is_exact() {
        let posts = vec![post("tokenize a"), post("nothing")];
        let request =
            SearchRequest::new("tokenize", 1, 5).with_total_mode(TotalMode::AtLeast);
        let page = ChunkedSearcher::search_chunks(chunks_of(posts, 2), &request).unwrap();
        assert_eq!(page.total, 1);
        assert!(!page.total_is_lower_bound);
    }

    #[test]
    fn at_least_mode_filled_on_final_chunk_is_exact() {
        // The page fills exactly as the last chunk is scanned, so nothing
        // was skipped and the total is exact.
        let posts: Vec<Post> = (0..4).map(|i| post(&format!("tokenize {}", i))).collect();
        let request =
            SearchRequest::new("tokenize", 1, 4).with_total_mode(TotalMode::AtLeast);
        let page = ChunkedSearcher::search_chunks(chunks_of(posts, 2), &request).unwrap();
        assert_eq!(page.results.len(), 4);
        assert_eq!(page.total, 4);
        assert!(!page.total_is_lower_bound);
    }

    #[test]
    fn zero_page_is_rejected() {
        let request = SearchRequest::new("tokenize", 0, 10);
        assert!(ChunkedSearcher::search_chunks(chunks_of(vec![post("a")], 2), &request).is_err());
    }

    #[test]
    fn zero_page_is_rejected_for_empty_queries_too() {
        let request = SearchRequest::new("", 0, 10);
        assert!(ChunkedSearcher::search_chunks(chunks_of(vec![post("a")], 2), &request).is_err());

        // search_file applies the same validation, even without a dataset
        let searcher = ChunkedSearcher::new(4);
        assert!(searcher.search_file(Path::new("no-such-dataset.csv"), &request).is_err());
    }
}
