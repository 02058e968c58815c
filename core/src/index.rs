use crate::document::Document;
use crate::traits::{IdOf, Indexed, Indexer, TermOf};
use std::collections::HashMap;
use std::hash::Hash;

/// Document frequencies and postings for every vocabulary term.
pub struct InvertedIndex<D: Indexed = Document> {
    pub df: HashMap<D::Term, u32>,
    pub postings: HashMap<D::Term, Vec<D::Id>>, // postings in document iteration order
}

impl<D: Indexed> Default for InvertedIndex<D> {
    fn default() -> Self {
        Self { df: HashMap::new(), postings: HashMap::new() }
    }
}

impl<D: Indexed> InvertedIndex<D> {
    pub fn new() -> Self { Self::default() }

    pub fn num_terms(&self) -> usize { self.postings.len() }
}

impl<D> Indexer for InvertedIndex<D>
where
    D: Indexed,
    D::Term: Eq + Hash + Clone,
{
    type Document = D;

    fn build_index(&mut self, vocabulary: &[D::Term], documents: &[D]) {
        self.df.clear();
        self.postings.clear();
        for term in vocabulary {
            self.df.insert(term.clone(), 0);
            self.postings.insert(term.clone(), Vec::new());
        }

        // Terms outside the vocabulary are not indexed.
        for doc in documents {
            for term in doc.distinct_terms() {
                if let Some(list) = self.postings.get_mut(term) {
                    list.push(doc.id());
                    if let Some(count) = self.df.get_mut(term) {
                        *count += 1;
                    }
                }
            }
        }
        tracing::debug!(num_terms = self.postings.len(), num_docs = documents.len(), "built inverted index");
    }

    fn document_frequency(&self, term: &TermOf<Self>) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    fn postings(&self, term: &TermOf<Self>) -> &[IdOf<Self>] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }
}
