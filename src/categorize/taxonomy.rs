use regex::Regex;

/// Which text a taxonomy matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Preprocessed title (lowercased, punctuation stripped)
    ProcessedTitle,
    /// Raw title, lowercased at match time. Question words survive here
    /// even when a body analyzer would have dropped them.
    RawTitle,
}

enum Matcher {
    /// Lowercase substring match, first hit wins within the category
    Substrings(Vec<String>),
    /// Word-boundary regex match
    Pattern(Regex),
}

pub struct Category {
    pub name: String,
    matcher: Matcher,
}

impl Category {
    pub fn substrings(name: &str, keywords: &[&str]) -> Self {
        Category {
            name: name.to_string(),
            matcher: Matcher::Substrings(keywords.iter().map(|k| k.to_string()).collect()),
        }
    }

    pub fn pattern(name: &str, pattern: &str) -> Self {
        Category {
            name: name.to_string(),
            matcher: Matcher::Pattern(Regex::new(pattern).expect("category pattern")),
        }
    }

    /// Match against lowercased text, optionally consulting the post's tags
    pub fn matches(&self, text: &str, tags: &[String], check_tags: bool) -> bool {
        match &self.matcher {
            Matcher::Substrings(keywords) => {
                for keyword in keywords {
                    if text.contains(keyword.as_str()) {
                        return true;
                    }
                    if check_tags && tags.iter().any(|tag| tag.contains(keyword.as_str())) {
                        return true;
                    }
                }
                false
            }
            Matcher::Pattern(pattern) => pattern.is_match(text),
        }
    }
}

/// A named set of keyword categories. A post may land in many categories of
/// the same taxonomy unless `first_match_only` is set.
pub struct Taxonomy {
    pub name: String,
    pub categories: Vec<Category>,
    pub source: TextSource,
    pub first_match_only: bool,
    pub check_tags: bool,
    /// Whether categories below min_posts_per_category are dropped
    pub prune_small: bool,
}

impl Taxonomy {
    pub fn keyword_based() -> Self {
        Taxonomy {
            name: "keyword_based".to_string(),
            categories: vec![
                Category::substrings("Text Classification", &["classification", "classifier", "classify", "categorization", "categorize"]),
                Category::substrings("Named Entity Recognition", &["ner", "named entity", "entity recognition", "entity extraction"]),
                Category::substrings("Sentiment Analysis", &["sentiment", "emotion", "polarity", "opinion"]),
                Category::substrings("Text Summarization", &["summary", "summarization", "summarize", "summarizing"]),
                Category::substrings("Machine Translation", &["translation", "translate", "translator", "machine translation", "mt"]),
                Category::substrings("Question Answering", &["question answering", "qa system", "answer questions"]),
                Category::substrings("Topic Modeling", &["topic", "lda", "topic model", "latent dirichlet"]),
                Category::substrings("Word Embeddings", &["word2vec", "glove", "embedding", "word embedding", "vector"]),
                Category::substrings("Text Preprocessing", &["preprocessing", "preprocess", "tokenization", "tokenize", "lemmatization", "stemming"]),
                Category::substrings("Language Identification", &["language identification", "language detection", "detect language", "identify language"]),
                Category::substrings("Text Similarity", &["similarity", "similar text", "document similarity", "semantic similarity"]),
                Category::substrings("Part-of-Speech Tagging", &["pos", "part of speech", "tagging", "tagger"]),
                Category::substrings("Implementation Issues", &["how to", "how do i", "implementation", "code", "example"]),
                Category::substrings("Understanding Concepts", &["what is", "explain", "understand", "concept", "difference between", "why"]),
                Category::substrings("Performance Issues", &["slow", "performance", "speed", "memory", "efficient", "optimization"]),
                Category::substrings("Error Troubleshooting", &["error", "problem", "issue", "bug", "fix", "solve", "exception", "failed"]),
                Category::substrings("Library Usage", &["spacy", "nltk", "huggingface", "transformers", "gensim", "pytorch", "tensorflow", "bert"]),
                Category::substrings("Data Collection", &["corpus", "dataset", "data collection", "scraping", "crawling"]),
                Category::substrings("Evaluation Metrics", &["accuracy", "precision", "recall", "f1", "bleu", "rouge", "evaluation", "metric"]),
            ],
            source: TextSource::ProcessedTitle,
            first_match_only: false,
            check_tags: false,
            prune_small: true,
        }
    }

    pub fn task_based() -> Self {
        Taxonomy {
            name: "task_based".to_string(),
            categories: vec![
                Category::substrings("Text Classification", &["classification", "classifier", "classify", "categorization", "categorize"]),
                Category::substrings("Named Entity Recognition", &["ner", "named entity", "entity recognition", "entity extraction"]),
                Category::substrings("Sentiment Analysis", &["sentiment", "emotion", "polarity", "opinion"]),
                Category::substrings("Text Summarization", &["summary", "summarization", "summarize", "summarizing"]),
                Category::substrings("Machine Translation", &["translation", "translate", "translator", "machine translation", "mt"]),
                Category::substrings("Question Answering", &["question answering", "qa system", "answer questions"]),
                Category::substrings("Topic Modeling", &["topic", "lda", "topic model", "latent dirichlet"]),
                Category::substrings("Word Embeddings", &["word2vec", "glove", "embedding", "word embedding", "vector"]),
                Category::substrings("Tokenization", &["tokenization", "tokenize", "tokenizer", "tokens"]),
                Category::substrings("Lemmatization", &["lemmatization", "lemmatize", "lemmatizer", "lemma"]),
                Category::substrings("Stemming", &["stemming", "stem", "stemmer", "porter"]),
                Category::substrings("Language Identification", &["language identification", "language detection", "detect language", "identify language"]),
                Category::substrings("Text Similarity", &["similarity", "similar text", "document similarity", "semantic similarity"]),
                Category::substrings("Part-of-Speech Tagging", &["pos", "part of speech", "tagging", "tagger"]),
                Category::substrings("Dependency Parsing", &["dependency parsing", "dependency parser", "syntactic parsing"]),
                Category::substrings("Coreference Resolution", &["coreference", "coreference resolution", "anaphora"]),
                Category::substrings("Text Generation", &["text generation", "generate text", "text generator", "gpt"]),
            ],
            source: TextSource::ProcessedTitle,
            first_match_only: false,
            check_tags: false,
            prune_small: true,
        }
    }

    pub fn question_type() -> Self {
        Taxonomy {
            name: "question_type".to_string(),
            categories: vec![
                Category::pattern("what", r"\bwhat\b|\bwhich\b"),
                Category::pattern("why", r"\bwhy\b"),
                Category::pattern("how", r"\bhow\b"),
                Category::pattern("when", r"\bwhen\b"),
                Category::pattern("where", r"\bwhere\b"),
            ],
            source: TextSource::RawTitle,
            first_match_only: true,
            check_tags: false,
            prune_small: false,
        }
    }

    pub fn library_based() -> Self {
        Taxonomy {
            name: "library_based".to_string(),
            categories: vec![
                Category::substrings("NLTK", &["nltk", "natural language toolkit"]),
                Category::substrings("spaCy", &["spacy", "spacy nlp"]),
                Category::substrings("Hugging Face", &["huggingface", "hugging face", "transformers"]),
                Category::substrings("BERT", &["bert", "distilbert", "roberta", "albert"]),
                Category::substrings("Word2Vec", &["word2vec", "word vectors", "word embedding"]),
                Category::substrings("GloVe", &["glove", "global vectors"]),
                Category::substrings("fastText", &["fasttext"]),
                Category::substrings("Gensim", &["gensim"]),
                Category::substrings("Stanford NLP", &["stanford nlp", "stanford core nlp", "stanfordnlp", "stanza"]),
                Category::substrings("OpenNLP", &["opennlp"]),
                Category::substrings("TextBlob", &["textblob"]),
                Category::substrings("GPT", &["gpt", "gpt-2", "gpt-3", "gpt-4", "chatgpt"]),
                Category::substrings("WordNet", &["wordnet"]),
                Category::substrings("TensorFlow", &["tensorflow", "tf"]),
                Category::substrings("PyTorch", &["pytorch", "torch"]),
                Category::substrings("scikit-learn", &["scikit learn", "sklearn"]),
            ],
            source: TextSource::ProcessedTitle,
            first_match_only: false,
            check_tags: true,
            prune_small: true,
        }
    }

    /// All built-in taxonomies in pipeline order
    pub fn builtin() -> Vec<Taxonomy> {
        vec![
            Taxonomy::keyword_based(),
            Taxonomy::task_based(),
            Taxonomy::question_type(),
            Taxonomy::library_based(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_category_matches_anywhere() {
        let category = Category::substrings("Sentiment Analysis", &["sentiment", "polarity"]);
        assert!(category.matches("best sentiment model", &[], false));
        assert!(category.matches("polarity of reviews", &[], false));
        assert!(!category.matches("tokenizer speed", &[], false));
    }

    #[test]
    fn tag_matching_is_opt_in() {
        let category = Category::substrings("NLTK", &["nltk"]);
        let tags = vec!["nltk".to_string()];
        assert!(!category.matches("tokenizing a corpus", &tags, false));
        assert!(category.matches("tokenizing a corpus", &tags, true));
    }

    #[test]
    fn pattern_category_respects_word_boundaries() {
        let category = Category::pattern("how", r"\bhow\b");
        assert!(category.matches("how to train a model", &[], false));
        assert!(!category.matches("showing results", &[], false));
    }
}
