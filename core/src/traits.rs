//! Capability contracts the engine is generic over.

/// Can process raw input into a typed record.
pub trait Processor {
    type Output;

    fn process(&self, raw: &str) -> Self::Output;
}

/// A record an [`Indexer`] can build postings for.
pub trait Indexed {
    type Id;
    type Term;

    fn id(&self) -> Self::Id;

    /// Each term the record contains, once.
    fn distinct_terms(&self) -> impl Iterator<Item = &Self::Term>;
}

/// Can build and query an inverted index over the term type of its documents.
pub trait Indexer {
    type Document: Indexed;

    /// Rebuild document frequencies and postings from scratch.
    fn build_index(&mut self, vocabulary: &[TermOf<Self>], documents: &[Self::Document]);

    /// Number of documents containing `term`; 0 for unknown terms.
    fn document_frequency(&self, term: &TermOf<Self>) -> u32;

    /// Ids of the documents containing `term`, in indexing order; empty for unknown terms.
    fn postings(&self, term: &TermOf<Self>) -> &[IdOf<Self>];
}

pub type TermOf<I> = <<I as Indexer>::Document as Indexed>::Term;
pub type IdOf<I> = <<I as Indexer>::Document as Indexed>::Id;
