use crate::document::Term;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"\b\w+(?:\.\w+)?\b").expect("valid regex");
    static ref DIGIT_RE: Regex = Regex::new(r"\d").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            // articles, determiners, quantifiers
            "a","an","the","this","that","these","those","some","few","all","any","each","every","much","many","several",
            "both","either","neither","other","another","such",
            // pronouns
            "i","me","my","mine","you","your","yours","he","him","his","she","her","hers","it","its",
            "we","us","our","ours","they","them","their","theirs","one","ones","someone","anyone","everyone",
            // prepositions
            "of","in","to","for","with","on","at","by","about","from","into","over","under","up","down","off","out",
            "near","between","among","against","through","during","before","after","above","below","toward","upon",
            "across","along","within","without",
            // conjunctions
            "and","or","but","nor","so","yet","if","while","although","because","as","since","unless","until",
            "when","where","whereas","than",
            // auxiliary and modal verbs
            "be","am","is","are","was","were","being","been","have","has","had","do","does","did",
            "can","could","will","would","shall","should","may","might","must",
            // adverbs
            "also","too","not","just","only","even","more","most","very","really","now","then","there","here",
            "again","always","never"
        ];
        words.iter().copied().collect()
    };
}

/// Returns true when `token` (already lower-cased) is on the fixed stop-word list.
pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Normalize raw text into its ordered term sequence.
///
/// After NFKC normalization the text is split into word-character runs (a single embedded
/// period is allowed, as in `u.s`). Tokens holding any digit are dropped, the rest are
/// lower-cased, stop words and single-character tokens are removed, and what survives is
/// stemmed with the English Snowball stemmer. Output keeps the order of appearance; empty or
/// fully filtered input gives an empty vector.
pub fn normalize(text: &str) -> Vec<Term> {
    let text = text.nfkc().collect::<String>();
    WORD_RE
        .find_iter(&text)
        .map(|mat| mat.as_str())
        .filter(|token| !DIGIT_RE.is_match(token))
        .map(str::to_lowercase)
        .filter(|token| !is_stopword(token))
        .filter(|token| token.chars().count() != 1)
        .map(|token| STEMMER.stem(&token).into_owned())
        .collect()
}
