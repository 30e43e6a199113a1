// End-to-end corpus workflow: ingest → preprocess → categorize → stats → search.

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use stacklens::core::config::Config;
use stacklens::core::corpus::Corpus;
use stacklens::core::types::Post;
use stacklens::dataset::reader::DatasetReader;
use stacklens::dataset::writer::DatasetWriter;
use stacklens::search::page::SearchRequest;

fn post(title: &str, description: &str, tags: &[&str]) -> Post {
    Post {
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        accepted_answer: Some("<p>Accepted answer body.</p>".to_string()),
        other_answers: vec!["<p>Another take.</p>".to_string()],
        creation_date: Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
        view_count: 42,
        score: 3,
        answer_count: 2,
    }
}

fn sample_corpus() -> Vec<Post> {
    let mut posts = Vec::new();
    for i in 0..12 {
        posts.push(post(
            &format!("How to tokenize a corpus with NLTK? ({})", i),
            "<p>I need to <b>tokenize</b> sentences, see https://nltk.org</p>",
            &["nlp", "nltk"],
        ));
    }
    for i in 0..11 {
        posts.push(post(
            &format!("What is sentiment analysis? ({})", i),
            "<p>Explain polarity scores.</p>",
            &["nlp", "sentiment-analysis"],
        ));
    }
    posts.push(post(
        "Why is my spaCy pipeline slow?",
        "<p><code>nlp.pipe</code> takes minutes</p>",
        &["spacy", "performance"],
    ));
    posts
}

fn setup() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        categories_dir: dir.path().join("categories"),
        chunk_size: 5,
        min_posts_per_category: 10,
        ..Config::default()
    };

    let raw = dir.path().join(&config.dataset_file);
    DatasetWriter::write_posts(&raw, &sample_corpus()).unwrap();
    (dir, config)
}

#[test]
fn preprocess_writes_preferred_dataset() {
    let (dir, config) = setup();
    let corpus = Corpus::open(config.clone());

    let rows = corpus.preprocess(true).unwrap();
    assert_eq!(rows, 24);

    let preprocessed = dir.path().join(&config.preprocessed_file);
    assert!(preprocessed.exists());
    assert_eq!(config.dataset_path(), preprocessed);

    // The preprocessed file still reads back as a plain post dataset
    let posts = DatasetReader::new(preprocessed).read_all().unwrap();
    assert_eq!(posts.len(), 24);
    assert_eq!(posts[0].tags, vec!["nlp", "nltk"]);
}

#[test]
fn categorize_persists_category_files_and_summary() {
    let (_dir, config) = setup();
    let corpus = Corpus::open(config);
    corpus.preprocess(false).unwrap();

    let assignments = corpus.categorize().unwrap();
    let keyword = assignments
        .iter()
        .find(|a| a.taxonomy == "keyword_based")
        .unwrap();
    // 12 tokenize posts clear the min-posts threshold of 10
    assert!(keyword.categories.contains_key("Text Preprocessing"));

    let store = corpus.store();
    let taxonomies = store.list_taxonomies().unwrap();
    assert!(taxonomies.contains(&"keyword_based".to_string()));
    assert!(taxonomies.contains(&"question_type".to_string()));

    let listings = store.list_categories("keyword_based").unwrap();
    assert!(!listings.is_empty());
    // Largest category first
    for pair in listings.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }

    let members = store
        .load_category("keyword_based", "Text Preprocessing")
        .unwrap();
    assert_eq!(members.len(), 12);
    assert!(members[0].title.contains("tokenize"));

    let summary = store.load_summary().unwrap();
    assert!(summary.total_unique_posts <= 24);
    assert!(summary.categorization_methods.contains_key("question_type"));
}

#[test]
fn question_type_buckets_cover_the_titles() {
    let (_dir, config) = setup();
    let corpus = Corpus::open(config);
    corpus.preprocess(false).unwrap();
    corpus.categorize().unwrap();

    let store = corpus.store();
    assert_eq!(store.load_category("question_type", "how").unwrap().len(), 12);
    assert_eq!(store.load_category("question_type", "what").unwrap().len(), 11);
    assert_eq!(store.load_category("question_type", "why").unwrap().len(), 1);
    assert!(store.load_category("question_type", "where").unwrap().is_empty());
}

#[test]
fn stats_report_totals_and_top_tags() {
    let (_dir, config) = setup();
    let corpus = Corpus::open(config);
    corpus.preprocess(false).unwrap();
    corpus.categorize().unwrap();

    let stats = corpus.stats().unwrap();
    assert_eq!(stats.total_posts, 24);
    assert_eq!(stats.top_tags[0].tag, "nlp");
    assert_eq!(stats.top_tags[0].count, 23);
    assert!(stats.category_totals.contains_key("keyword_based"));
}

#[test]
fn search_goes_through_the_cache() {
    let (_dir, config) = setup();
    let corpus = Corpus::open(config);

    let request = SearchRequest::new("sentiment", 1, 5);
    let first = corpus.search(&request).unwrap();
    assert_eq!(first.total, 11);
    assert_eq!(first.results.len(), 5);

    let second = corpus.search(&request).unwrap();
    assert_eq!(second.total, first.total);

    let stats = corpus.cache_stats();
    assert_eq!(stats.hit_count, 1);
    assert_eq!(stats.miss_count, 1);
}

#[test]
fn preprocess_invalidates_cached_pages() {
    let (dir, config) = setup();
    let corpus = Corpus::open(config.clone());

    let request = SearchRequest::new("tokenize", 1, 5);
    assert_eq!(corpus.search(&request).unwrap().total, 12);

    // Preprocessing rewrites the preferred dataset; a fresh search must
    // re-scan rather than serve the raw-dataset page.
    corpus.preprocess(false).unwrap();
    assert!(dir.path().join(&config.preprocessed_file).exists());
    let after = corpus.search(&request).unwrap();
    assert_eq!(after.total, 12);
    assert_eq!(corpus.cache_stats().miss_count, 2);
}
