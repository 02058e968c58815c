use crate::tokenizer::normalize;
use crate::traits::{Indexed, Processor};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub type DocId = u64;
pub type Term = String;

/// One corpus entry after processing.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    /// Original content, never reprocessed.
    pub text: String,
    /// Normalized terms in order of appearance.
    pub terms: Vec<Term>,
    /// Occurrences of each distinct term in `terms`.
    pub frequencies: HashMap<Term, u32>,
    /// TF-IDF weight per vocabulary term, in vocabulary order. Empty until vectorized.
    pub vector: Vec<f32>,
}

impl Document {
    pub fn new(id: DocId, text: String, terms: Vec<Term>) -> Self {
        let mut frequencies: HashMap<Term, u32> = HashMap::new();
        for term in &terms {
            *frequencies.entry(term.clone()).or_insert(0) += 1;
        }
        Self { id, text, terms, frequencies, vector: Vec::new() }
    }

    /// Raw count of `term` in this document, 0 when absent.
    pub fn frequency(&self, term: &str) -> u32 {
        self.frequencies.get(term).copied().unwrap_or(0)
    }
}

impl Indexed for Document {
    type Id = DocId;
    type Term = Term;

    fn id(&self) -> DocId { self.id }

    fn distinct_terms(&self) -> impl Iterator<Item = &Term> { self.frequencies.keys() }
}

/// Turns raw text into [`Document`]s, handing out ids from a counter that only moves forward.
///
/// Clones share the counter, so documents made by any of them never collide.
#[derive(Debug, Clone, Default)]
pub struct DocumentProcessor {
    next_id: Arc<AtomicU64>,
}

impl DocumentProcessor {
    pub fn new() -> Self { Self::default() }

    fn allocate_id(&self) -> DocId { self.next_id.fetch_add(1, Ordering::Relaxed) }
}

impl Processor for DocumentProcessor {
    type Output = Document;

    fn process(&self, raw: &str) -> Document {
        let id = self.allocate_id();
        Document::new(id, raw.to_string(), normalize(raw))
    }
}
