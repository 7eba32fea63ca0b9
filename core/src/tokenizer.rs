use crate::Term;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static! {
    static ref NON_TERM_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9,\-/]").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Character substitution, whitespace split, stemming and lowercasing, in that order.
/// Shared by documents and queries; only documents are filtered afterwards.
fn stemmed_tokens(text: &str) -> Vec<String> {
    let cleaned = NON_TERM_CHARS.replace_all(text, " ");
    cleaned
        .split_whitespace()
        .map(|raw| STEMMER.stem(raw).to_lowercase())
        .collect()
}

/// Whether a stemmed, lowercased token is kept as an index term.
pub fn is_index_term(token: &str, max_term_len: usize) -> bool {
    let len = token.chars().count();
    len > 1 && len < max_term_len && !is_stopword(token)
}

/// Normalize one block of document text into index terms. Tokens failing the
/// length or stopword predicate are dropped silently.
pub fn normalize_document(text: &str, max_term_len: usize) -> Vec<Term> {
    stemmed_tokens(text)
        .into_iter()
        .filter(|tok| is_index_term(tok, max_term_len))
        .map(Term::new)
        .collect()
}

/// Normalize a query string. No length or stopword filtering: every token is
/// looked up against the vocabulary as is.
pub fn normalize_query(query: &str) -> Vec<String> {
    stemmed_tokens(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize() {
        let t = normalize_document("Running, runner's run!", 30);
        assert!(t.iter().any(|w| w.as_str() == "run"));
    }

    #[test]
    fn keeps_commas_hyphens_and_slashes() {
        let t = normalize_query("state-of-the-art 1,000 and/or x.y");
        assert!(t.iter().any(|w| w == "state-of-the-art"));
        assert!(t.iter().any(|w| w == "1,000"));
        assert!(t.iter().any(|w| w == "and/or"));
        assert!(t.iter().any(|w| w == "x"));
        assert!(t.iter().any(|w| w == "y"));
    }

    #[test]
    fn length_bounds_are_exclusive() {
        assert!(!is_index_term("x", 30));
        assert!(is_index_term("xy", 30));
        assert!(is_index_term(&"z".repeat(29), 30));
        assert!(!is_index_term(&"z".repeat(30), 30));
    }
}
