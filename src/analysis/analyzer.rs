use tracing::info;
use crate::analysis::cleaner::HtmlCleaner;
use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::filters::stemmer::StemmerFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};
use crate::core::types::{Post, ProcessedPost, RowId};

/// Text analysis pipeline: clean HTML, strip URLs and punctuation,
/// tokenize, then run token filters in order
pub struct Analyzer {
    pub cleaner: HtmlCleaner,
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, cleaner: HtmlCleaner, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            cleaner,
            tokenizer,
            filters: Vec::new(),
            name,
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let cleaned = self.cleaner.clean_html(text);
        let cleaned = self.cleaner.strip_urls(&cleaned);
        let cleaned = self.cleaner.strip_punctuation(&cleaned);

        let mut tokens = self.tokenizer.tokenize(&cleaned);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Analyzed text joined back into a single space-separated string
    pub fn analyze_to_string(&self, text: &str) -> String {
        self.analyze(text)
            .into_iter()
            .map(|token| token.text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Analyzer for post titles. Stopwords are kept: titles are short and
    /// question words like "how"/"what" carry category signal.
    pub fn post_title() -> Self {
        Analyzer::new(
            "post_title".to_string(),
            HtmlCleaner::new(false),
            case_preserving_tokenizer(),
        )
        .add_filter(Box::new(LowercaseFilter))
    }

    /// Analyzer for post bodies and answers: stopwords removed
    pub fn post_body(remove_code: bool) -> Self {
        Analyzer::new(
            "post_body".to_string(),
            HtmlCleaner::new(remove_code),
            case_preserving_tokenizer(),
        )
        .add_filter(Box::new(LowercaseFilter))
        .add_filter(Box::new(StopWordFilter::english()))
    }
}

/// Tokenizer for the built-in pipelines. Case folding is left to the
/// `LowercaseFilter` stage so every text rewrite happens in a filter.
fn case_preserving_tokenizer() -> Box<StandardTokenizer> {
    Box::new(StandardTokenizer {
        lowercase: false,
        ..StandardTokenizer::default()
    })
}

/// Runs the analyzers over every text field of a post
pub struct Preprocessor {
    title_analyzer: Analyzer,
    body_analyzer: Analyzer,
}

impl Preprocessor {
    pub fn new(remove_code: bool) -> Self {
        Preprocessor {
            title_analyzer: Analyzer::post_title(),
            body_analyzer: Analyzer::post_body(remove_code),
        }
    }

    /// Add English stemming to the body pipeline
    pub fn with_stemming(mut self) -> Self {
        self.body_analyzer = self.body_analyzer.add_filter(Box::new(StemmerFilter::english()));
        self
    }

    pub fn process(&self, row: RowId, post: &Post) -> ProcessedPost {
        ProcessedPost {
            row,
            processed_title: self.title_analyzer.analyze_to_string(&post.title),
            processed_description: self.body_analyzer.analyze_to_string(&post.description),
            processed_accepted_answer: post
                .accepted_answer
                .as_deref()
                .map(|answer| self.body_analyzer.analyze_to_string(answer))
                .unwrap_or_default(),
            processed_other_answers: post
                .other_answers
                .iter()
                .map(|answer| self.body_analyzer.analyze_to_string(answer))
                .collect(),
            processed_tags: post.tags.iter().map(|tag| tag.to_lowercase()).collect(),
        }
    }

    pub fn process_all(&self, posts: &[Post]) -> Vec<ProcessedPost> {
        info!(posts = posts.len(), "preprocessing corpus");
        posts
            .iter()
            .enumerate()
            .map(|(i, post)| self.process(RowId(i as u64), post))
            .collect()
    }
}
