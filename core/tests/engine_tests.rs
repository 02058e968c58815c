use lexsearch_core::{SearchEngine, DEFAULT_LIMIT};

const CORPUS: &[&str] = &[
    "Rust compilers check ownership and borrowing at compile time",
    "The football team won the league after a late goal",
    "Compilers translate source code into machine code",
    "Fans celebrated the league title with the football team",
    "Garbage collectors reclaim memory at runtime",
    "Ownership rules let Rust reclaim memory without a garbage collector",
];

fn loaded() -> SearchEngine {
    let mut engine = SearchEngine::new();
    engine.ingest(CORPUS);
    engine
}

fn texts<'a>(engine: &'a SearchEngine, query: &str, k: usize) -> Vec<&'a str> {
    engine.search(query, k).into_iter().map(|d| d.text.as_str()).collect()
}

#[test]
fn cat_query_never_ranks_the_unrelated_document_first() {
    let mut engine = SearchEngine::new();
    engine.ingest(["the cat sat", "dogs run fast"]);
    // with two documents, idf = log2(2 / 2) = 0, so nothing scores at all
    let results = engine.search("cat", DEFAULT_LIMIT);
    assert!(results.iter().all(|d| d.text != "dogs run fast"));
    if let Some(first) = results.first() {
        assert_eq!(first.text, "the cat sat");
    }
}

#[test]
fn cat_query_ranks_matching_document_first() {
    let mut engine = SearchEngine::new();
    engine.ingest(["the cat sat", "dogs run fast", "birds fly high"]);
    let results = engine.search("cat", DEFAULT_LIMIT);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "the cat sat");
}

#[test]
fn identical_inputs_rank_identically() {
    let a = loaded();
    let b = loaded();
    for query in ["football league", "rust ownership memory", "compilers"] {
        assert_eq!(texts(&a, query, 10), texts(&b, query, 10));
        assert_eq!(texts(&a, query, 10), texts(&a, query, 10));
    }
}

#[test]
fn every_document_term_is_in_the_vocabulary() {
    let engine = loaded();
    let vocabulary = engine.vocabulary();
    for doc in engine.documents() {
        for term in doc.frequencies.keys() {
            assert!(vocabulary.binary_search(term).is_ok(), "{term} missing");
        }
    }
    assert!(vocabulary.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn vectors_align_with_the_vocabulary() {
    let engine = loaded();
    assert_eq!(engine.len(), CORPUS.len());
    for doc in engine.documents() {
        assert_eq!(doc.vector.len(), engine.vocabulary().len());
    }
}

#[test]
fn limit_is_respected() {
    let engine = loaded();
    for k in 0..5 {
        assert!(engine.search("rust football compilers memory league", k).len() <= k);
    }
}

#[test]
fn zero_scores_are_excluded() {
    let engine = loaded();
    for hit in engine.search_scored("football memory", 100) {
        assert!(hit.score != 0.0 && hit.score.is_finite());
    }
    let all = engine.rank("football");
    assert!(all.iter().all(|hit| hit.document.text.to_lowercase().contains("football")));
    assert!(all.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn unknown_terms_return_nothing() {
    let engine = loaded();
    assert!(engine.search("xylophone quasar", 10).is_empty());
    assert!(engine.search("", 10).is_empty());
    assert!(engine.search("the and of", 10).is_empty());
}

#[test]
fn reingest_replaces_state() {
    let once = loaded();
    let mut twice = loaded();
    twice.ingest(CORPUS);

    assert_eq!(once.vocabulary(), twice.vocabulary());
    assert_eq!(once.len(), twice.len());
    for term in once.vocabulary() {
        assert_eq!(once.document_frequency(term), twice.document_frequency(term));
        assert_eq!(once.postings(term).len(), twice.postings(term).len());
    }
    let a: Vec<_> = once.documents().map(|d| (&d.text, &d.vector)).collect();
    let b: Vec<_> = twice.documents().map(|d| (&d.text, &d.vector)).collect();
    assert_eq!(a, b);
}

#[test]
fn reingest_never_reuses_ids() {
    let mut engine = loaded();
    let first: Vec<_> = engine.documents().map(|d| d.id).collect();
    engine.ingest(CORPUS);
    for id in first {
        assert!(engine.get_document(id).is_none());
    }
}

#[test]
fn lookup_by_id() {
    let engine = loaded();
    let doc = engine.search("garbage", 1)[0];
    assert_eq!(engine.get_document(doc.id).map(|d| d.text.as_str()), Some(doc.text.as_str()));
    assert!(engine.get_document(u64::MAX).is_none());
}

#[test]
fn tied_scores_keep_postings_order() {
    let mut engine = SearchEngine::new();
    engine.ingest(["cat sat", "dog ran", "cat sat", "bird flew"]);
    let cat_ids: Vec<u64> = engine.postings("cat").to_vec();
    assert_eq!(cat_ids.len(), 2);

    let hits = engine.search_scored("cat", 5);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].score, hits[1].score);
    assert_eq!(hits.iter().map(|h| h.document.id).collect::<Vec<_>>(), cat_ids);

    let top = engine.search("cat", 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, cat_ids[0]);
}
