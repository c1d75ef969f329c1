//! Core modules for dreamlog

pub mod scorer;
pub mod polarity;
pub mod theme_affinity;
pub mod mood;
pub mod trend;
pub mod tfidf;
pub mod kmeans;
pub mod themes;
pub mod patterns;
pub mod store;
pub mod journal;
pub mod api;

pub use scorer::{SentimentScorer, LexiconScorer};
pub use polarity::PolarityScorer;
pub use theme_affinity::{ThemeAffinityScorer, clean_text};
pub use mood::{MoodAnalyzer, combine};
pub use trend::TrendAnalyzer;
pub use tfidf::TfidfVectorizer;
pub use kmeans::KMeans;
pub use themes::{ThemeMiner, ThemeError};
pub use store::{
    EntryStore, MemoryStore, StoreError, JournalData, save_journal, write_journal, load_journal,
    open_journal,
};
pub use journal::{DreamJournal, synthesize};
pub use api::{create_router, run_server};
