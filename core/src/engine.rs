use crate::document::{DocId, Document, DocumentProcessor, Term};
use crate::index::InvertedIndex;
use crate::similarity::cosine_similarity;
use crate::tfidf::vectorize;
use crate::traits::{Indexer, Processor};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Result count used when a caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 5;

/// A ranked document together with its cosine similarity to the query.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub document: &'a Document,
    pub score: f32,
}

/// TF-IDF search over an in-memory corpus.
///
/// The corpus is ingested once in full; every later [`ingest`](Self::ingest) replaces the
/// vocabulary, collection and index rather than merging into them. Until a non-empty corpus has
/// been ingested, searches return nothing.
pub struct SearchEngine<P = DocumentProcessor, I = InvertedIndex> {
    processor: P,
    indexer: I,
    vocabulary: Vec<Term>,
    collection: HashMap<DocId, Document>,
    order: Vec<DocId>, // ingestion order
}

impl SearchEngine {
    pub fn new() -> Self { Self::with_parts(DocumentProcessor::new(), InvertedIndex::new()) }

    /// An empty engine that keeps drawing ids from this engine's counter.
    ///
    /// Lets a host ingest a replacement corpus while this engine keeps serving, then swap the
    /// two without ids from the old and new collections ever colliding.
    pub fn successor(&self) -> Self { Self::with_parts(self.processor.clone(), InvertedIndex::new()) }
}

impl Default for SearchEngine {
    fn default() -> Self { Self::new() }
}

impl<P, I> SearchEngine<P, I>
where
    P: Processor<Output = Document>,
    I: Indexer<Document = Document>,
{
    pub fn with_parts(processor: P, indexer: I) -> Self {
        Self { processor, indexer, vocabulary: Vec::new(), collection: HashMap::new(), order: Vec::new() }
    }

    /// Process, index and vectorize a full corpus, replacing whatever was loaded before.
    /// Returns the number of documents now in the collection.
    pub fn ingest<S: AsRef<str>>(&mut self, texts: impl IntoIterator<Item = S>) -> usize {
        let mut documents: Vec<Document> = Vec::new();
        let mut term_set: BTreeSet<Term> = BTreeSet::new();
        for text in texts {
            let document = self.processor.process(text.as_ref());
            term_set.extend(document.terms.iter().cloned());
            documents.push(document);
        }

        let vocabulary: Vec<Term> = term_set.into_iter().collect();
        self.indexer.build_index(&vocabulary, &documents);

        let collection_size = documents.len();
        for document in documents.iter_mut() {
            vectorize(document, &vocabulary, &self.indexer, collection_size);
        }

        self.order = documents.iter().map(|d| d.id).collect();
        self.collection = documents.into_iter().map(|d| (d.id, d)).collect();
        self.vocabulary = vocabulary;
        tracing::info!(num_docs = self.collection.len(), num_terms = self.vocabulary.len(), "ingested documents");
        self.collection.len()
    }

    /// Top `limit` documents for `query`, most relevant first.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Document> {
        self.search_scored(query, limit).into_iter().map(|hit| hit.document).collect()
    }

    /// Like [`search`](Self::search) but keeps the similarity scores.
    pub fn search_scored(&self, query: &str, limit: usize) -> Vec<Hit<'_>> {
        if limit == 0 {
            return Vec::new();
        }
        let mut hits = self.rank(query);
        hits.truncate(limit);
        hits
    }

    /// Every candidate with a non-zero score, ranked by descending similarity.
    ///
    /// Candidates are the documents sharing at least one term with the query; ties keep the
    /// order in which candidates were retrieved.
    pub fn rank(&self, query: &str) -> Vec<Hit<'_>> {
        if self.collection.is_empty() {
            return Vec::new();
        }
        let query_doc = self.query_document(query);

        let mut seen: HashSet<DocId> = HashSet::new();
        let mut candidates: Vec<&Document> = Vec::new();
        for term in &query_doc.terms {
            for id in self.indexer.postings(term) {
                if seen.insert(*id) {
                    if let Some(doc) = self.collection.get(id) {
                        candidates.push(doc);
                    }
                }
            }
        }

        let mut hits: Vec<Hit<'_>> = candidates
            .into_iter()
            .map(|document| Hit { document, score: cosine_similarity(&query_doc.vector, &document.vector) })
            .filter(|hit| hit.score != 0.0 && hit.score.is_finite())
            .collect();
        // stable: equal scores keep retrieval order
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        tracing::debug!(query, candidates = seen.len(), hits = hits.len(), "ranked query");
        hits
    }

    pub fn get_document(&self, id: DocId) -> Option<&Document> { self.collection.get(&id) }

    pub fn is_loaded(&self) -> bool { !self.collection.is_empty() }

    pub fn len(&self) -> usize { self.collection.len() }

    pub fn is_empty(&self) -> bool { self.collection.is_empty() }

    pub fn vocabulary(&self) -> &[Term] { &self.vocabulary }

    /// Documents in ingestion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ {
        self.order.iter().filter_map(|id| self.collection.get(id))
    }

    pub fn document_frequency(&self, term: &str) -> u32 { self.indexer.document_frequency(&term.to_string()) }

    pub fn postings(&self, term: &str) -> &[DocId] { self.indexer.postings(&term.to_string()) }

    /// The query as a transient document, vectorized against the current vocabulary. It is
    /// never added to the collection.
    fn query_document(&self, query: &str) -> Document {
        let mut document = self.processor.process(query);
        vectorize(&mut document, &self.vocabulary, &self.indexer, self.collection.len());
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_before_ingest_is_empty() {
        let engine = SearchEngine::new();
        assert!(!engine.is_loaded());
        assert!(engine.search("anything", 5).is_empty());
    }

    #[test]
    fn ingest_builds_sorted_vocabulary() {
        let mut engine = SearchEngine::new();
        engine.ingest(["plum fig", "pear fig"]);
        assert_eq!(engine.vocabulary(), &["fig", "pear", "plum"]);
        assert_eq!(engine.document_frequency("fig"), 2);
        assert_eq!(engine.document_frequency("kiwi"), 0);
        assert!(engine.postings("kiwi").is_empty());
    }

    #[test]
    fn empty_corpus_stays_unloaded() {
        let mut engine = SearchEngine::new();
        assert_eq!(engine.ingest(Vec::<String>::new()), 0);
        assert!(!engine.is_loaded());
        assert!(engine.vocabulary().is_empty());
    }

    #[test]
    fn successor_never_reuses_ids() {
        let mut engine = SearchEngine::new();
        engine.ingest(["fig pear", "plum kiwi"]);
        let mut next = engine.successor();
        assert!(!next.is_loaded());
        next.ingest(["fig pear", "plum kiwi"]);
        for doc in engine.documents() {
            assert!(next.get_document(doc.id).is_none());
        }
    }

    #[test]
    fn limit_zero_returns_nothing() {
        let mut engine = SearchEngine::new();
        engine.ingest(["fig pear", "plum kiwi", "lime"]);
        assert!(engine.search("fig", 0).is_empty());
        assert_eq!(engine.search("fig", 10).len(), 1);
    }

    #[test]
    fn results_reference_the_collection() {
        let mut engine = SearchEngine::new();
        engine.ingest(["fig pear", "plum kiwi", "lime"]);
        let hits = engine.search("plum", 5);
        assert_eq!(hits.len(), 1);
        let stored = engine.get_document(hits[0].id).unwrap();
        assert!(std::ptr::eq(hits[0], stored));
    }
}
