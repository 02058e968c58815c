#![doc = include_str!("../README.md")]

pub mod dataset;
pub mod document;
pub mod engine;
pub mod index;
pub mod similarity;
pub mod tfidf;
pub mod tokenizer;
pub mod traits;

pub use document::{DocId, Document, DocumentProcessor, Term};
pub use engine::{Hit, SearchEngine, DEFAULT_LIMIT};
pub use index::InvertedIndex;
pub use traits::{Indexed, Indexer, Processor};
