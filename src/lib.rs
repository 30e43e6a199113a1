pub mod core;
pub mod analysis;
pub mod dataset;
pub mod categorize;
pub mod search;

/*
┌──────────────────────────────────────────────────────────────────────────┐
│                        STACKLENS ARCHITECTURE                            │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── CORE ────────────────────────────────────┐
│                                                                          │
│  ┌──────────────────┐  ┌──────────────────┐  ┌───────────────────────┐   │
│  │ struct Post      │  │ struct Config    │  │ struct CorpusStats    │   │
│  │ • title          │  │ • data_dir       │  │ • total_posts         │   │
│  │ • description    │  │ • dataset_file   │  │ • top_tags: Vec<>     │   │
│  │ • tags: Vec<Str> │  │ • chunk_size     │  │ • category_totals:    │   │
│  │ • accepted_answer│  │ • page_size      │  │   HashMap<Str, usize> │   │
│  │ • other_answers  │  │ • categories_dir │  └───────────────────────┘   │
│  │ • creation_date  │  │ • cache_capacity │                              │
│  │ • view_count     │  └──────────────────┘  ┌───────────────────────┐   │
│  │ • score          │                        │ struct Error          │   │
│  │ • answer_count   │  ┌──────────────────┐  │ • kind: ErrorKind     │   │
│  └──────────────────┘  │ struct RowId     │  │ • context: String     │   │
│                        │ • 0: u64         │  └───────────────────────┘   │
│                        └──────────────────┘                              │
└──────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────── ANALYSIS ──────────────────────────────────┐
│                                                                          │
│  ┌────────────────────┐  ┌──────────────────┐  ┌─────────────────────┐   │
│  │ struct Analyzer    │  │ struct Token     │  │ trait Tokenizer     │   │
│  │ • cleaner          │  │ • text           │  │ • StandardTokenizer │   │
│  │ • tokenizer: Box<> │  │ • position       │  └─────────────────────┘   │
│  │ • filters: Vec<>   │  │ • offset         │                            │
│  │ • analyze()        │  └──────────────────┘  ┌─────────────────────┐   │
│  └────────────────────┘                        │ trait TokenFilter   │   │
│                          ┌──────────────────┐  │ • LowercaseFilter   │   │
│  ┌────────────────────┐  │ struct           │  │ • StopWordFilter    │   │
│  │ struct Preprocessor│  │ HtmlCleaner      │  │ • StemmerFilter     │   │
│  │ • title_analyzer   │  │ • strip tags     │  └─────────────────────┘   │
│  │ • body_analyzer    │  │ • strip code     │                            │
│  │ • process(Post)    │  │ • strip urls     │                            │
│  └────────────────────┘  └──────────────────┘                            │
└──────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────── DATASET ───────────────────────────────────┐
│                                                                          │
│  ┌────────────────────┐  ┌───────────────────────────────────────────┐   │
│  │ struct             │  │ struct ChunkedReader                      │   │
│  │ DatasetReader      │  │ • iterator of Vec<Post> chunks            │   │
│  │ • read_all()       │  │ • at most chunk_size rows resident        │   │
│  │ • skip bad rows    │  │ • rows never split across chunks          │   │
│  └────────────────────┘  └───────────────────────────────────────────┘   │
└──────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────── CATEGORIZE ─────────────────────────────────┐
│                                                                          │
│  ┌────────────────────┐  ┌──────────────────┐  ┌─────────────────────┐   │
│  │ struct Taxonomy    │  │ struct           │  │ struct CategoryStore│   │
│  │ • keyword lists    │  │ Categorizer      │  │ • per-category CSVs │   │
│  │ • regex patterns   │  │ • assign() →     │  │ • summary JSON      │   │
│  │ • match_post()     │  │   name → indices │  │ • listings by count │   │
│  └────────────────────┘  └──────────────────┘  └─────────────────────┘   │
└──────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── SEARCH ───────────────────────────────────┐
│                                                                          │
│  ┌──────────────────────────┐  ┌──────────────────────────────────────┐  │
│  │ struct ChunkedSearcher   │  │ struct SearchPage                    │  │
│  │ • scan chunks in order   │  │ • results: Vec<Post>                 │  │
│  │ • running match total    │  │ • total, page, per_page              │  │
│  │ • slice page window      │  │ • total_is_lower_bound               │  │
│  │ • TotalMode Exact/AtLeast│  └──────────────────────────────────────┘  │
│  └──────────────────────────┘  ┌──────────────────────────────────────┐  │
│                                │ struct SearchCache (LRU, hit/miss)   │  │
│                                └──────────────────────────────────────┘  │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────── RELATIONSHIPS ───────────────────────────────┐
│                                                                          │
│  Corpus ──owns──> Config + ChunkedSearcher + SearchCache + CategoryStore │
│                                                                          │
│  DatasetReader ──rows──> Preprocessor ──ProcessedPost──> Categorizer     │
│        │                                                      │          │
│        └──chunks──> ChunkedSearcher ──SearchPage──> SearchCache          │
│                                                                          │
│  Categorizer ──assignments──> CategoryStore ──listings──> CorpusStats    │
└──────────────────────────────────────────────────────────────────────────┘
*/
