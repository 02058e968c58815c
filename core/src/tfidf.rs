use crate::document::{Document, Term};
use crate::traits::Indexer;

/// TF-IDF weight of `term` for `document` within a collection of `collection_size` documents.
///
/// `tf` is the raw count divided by the document length (0 for a document without terms) and
/// `idf = log2(N / (1 + df))`, so a term missing from the corpus still gets a finite weight.
pub fn term_weight<I>(term: &Term, document: &Document, indexer: &I, collection_size: usize) -> f32
where
    I: Indexer<Document = Document>,
{
    let len = document.terms.len();
    if len == 0 {
        return 0.0;
    }
    let tf = document.frequency(term) as f32 / len as f32;
    let df = indexer.document_frequency(term);
    let idf = (collection_size as f32 / (1.0 + df as f32)).log2();
    tf * idf
}

/// Replace `document.vector` with one weight per vocabulary term, in vocabulary order.
pub fn vectorize<I>(document: &mut Document, vocabulary: &[Term], indexer: &I, collection_size: usize)
where
    I: Indexer<Document = Document>,
{
    let vector: Vec<f32> = vocabulary
        .iter()
        .map(|term| term_weight(term, document, indexer, collection_size))
        .collect();
    document.vector = vector;
}
