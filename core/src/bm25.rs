//! BM25 ranking over a finalized collection.
//!
//! score(t, d) = idf(t) * (k1 + 1) * tf / (tf + k1 * ((1 - b) + b * len(d) / avg_len))
//!
//! Per-term scores are summed per document. Query tokens are stemmed and
//! lowercased like document tokens but not length or stopword filtered; tokens
//! missing from the vocabulary contribute nothing.

use crate::config::Bm25Params;
use crate::error::CollectionError;
use crate::tokenizer::normalize_query;
use crate::{Collection, DocName, TermId};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDoc {
    pub doc: DocName,
    pub score: f64,
}

/// Contribution of a single (term, document) pair.
#[inline]
pub fn term_score(idf: f64, freq: u32, doc_len: u64, avg_doc_len: f64, params: &Bm25Params) -> f64 {
    let tf = freq as f64;
    let norm = (1.0 - params.b) + params.b * doc_len as f64 / avg_doc_len;
    idf * (params.k1 + 1.0) * tf / (tf + params.k1 * norm)
}

impl Collection {
    /// Query tokens that resolve to a term id, in query order.
    pub fn query_terms(&self, query: &str) -> Vec<TermId> {
        normalize_query(query)
            .iter()
            .filter_map(|tok| self.vocabulary.id_of(tok))
            .collect()
    }

    /// Aggregate BM25 score for every document matching at least one query term.
    /// An empty map means nothing matched.
    pub fn score(&self, query: &str, params: &Bm25Params) -> Result<HashMap<DocName, f64>, CollectionError> {
        params.validate()?;
        let mut scores: HashMap<DocName, f64> = HashMap::new();
        for id in self.query_terms(query) {
            let idf = self.idf[id.index()];
            for posting in &self.index[id.index()] {
                let doc_len = self.doc_lengths.get(&posting.doc).copied().unwrap_or(0);
                *scores.entry(posting.doc.clone()).or_insert(0.0) +=
                    term_score(idf, posting.freq, doc_len, self.avg_doc_length, params);
            }
        }
        Ok(scores)
    }

    /// At most `top_k` documents by descending score; equal scores order by document name.
    pub fn search(&self, query: &str, params: &Bm25Params) -> Result<Vec<ScoredDoc>, CollectionError> {
        let scores = self.score(query, params)?;
        let k = params.top_k;

        // Min-heap of size k keyed on (score, Reverse(doc)): the root is the weakest hit.
        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, Reverse<DocName>)>> = BinaryHeap::with_capacity(k.min(scores.len()) + 1);
        for (doc, score) in scores {
            heap.push(Reverse((OrderedFloat(score), Reverse(doc))));
            if heap.len() > k {
                heap.pop();
            }
        }
        let mut ranked: Vec<(OrderedFloat<f64>, Reverse<DocName>)> = heap.into_iter().map(|Reverse(entry)| entry).collect();
        ranked.sort_unstable_by(|a, b| b.cmp(a));
        let results: Vec<ScoredDoc> = ranked
            .into_iter()
            .map(|(score, Reverse(doc))| ScoredDoc { doc, score: score.0 })
            .collect();
        tracing::debug!(query, hits = results.len(), "bm25 search");
        Ok(results)
    }
}

/// Render results one per line as `<doc> : <score>`, or a no-match notice.
pub fn render_results(query: &str, results: &[ScoredDoc]) -> String {
    if results.is_empty() {
        return format!("no document found for the query: {query}\n");
    }
    let mut out = String::new();
    for hit in results {
        let _ = writeln!(out, "{} : {}", hit.doc, hit.score);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::CollectionBuilder;

    fn build_corpus() -> Collection {
        let mut builder = CollectionBuilder::new(BuildConfig { min_freq: 1, ..BuildConfig::default() });
        builder.add_document("rust", &["rust programming systems language fast"]).unwrap();
        builder.add_document("python", &["python programming scripting easy"]).unwrap();
        builder.add_document("java", &["java enterprise programming verbose"]).unwrap();
        builder.add_document("safety", &["rust memory safety zero cost abstractions"]).unwrap();
        builder.finalize().unwrap()
    }

    #[test]
    fn finds_matching_docs() {
        let collection = build_corpus();
        let results = collection.search("rust", &Bm25Params::default()).unwrap();
        let docs: Vec<&str> = results.iter().map(|h| h.doc.as_str()).collect();
        assert_eq!(docs.len(), 2);
        assert!(docs.contains(&"rust"));
        assert!(docs.contains(&"safety"));
    }

    #[test]
    fn shorter_document_ranks_first_on_equal_tf() {
        let collection = build_corpus();
        let results = collection.search("rust", &Bm25Params::default()).unwrap();
        // both have tf = 1; "rust" has 5 terms, "safety" has 6
        assert_eq!(results[0].doc, "rust");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn query_terms_are_not_stopword_filtered() {
        let mut builder = CollectionBuilder::new(BuildConfig { min_freq: 1, ..BuildConfig::default() });
        builder.add_document("a", &["alpha beta"]).unwrap();
        let collection = builder.finalize().unwrap();
        // "the" is unknown to the vocabulary and ignored, "Alpha" is stemmed and lowercased
        assert_eq!(collection.query_terms("the Alpha"), collection.query_terms("alpha"));
        assert_eq!(collection.query_terms("alpha").len(), 1);
    }

    #[test]
    fn no_match_is_empty() {
        let collection = build_corpus();
        assert!(collection.score("nonexistent", &Bm25Params::default()).unwrap().is_empty());
        assert!(collection.search("", &Bm25Params::default()).unwrap().is_empty());
    }

    #[test]
    fn top_k_truncates_and_breaks_ties_by_name() {
        let collection = build_corpus();
        let params = Bm25Params { top_k: 2, ..Bm25Params::default() };
        let results = collection.search("programming", &params).unwrap();
        // tf = 1 everywhere; "java" and "python" share the shortest length
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].doc, "java");
        assert_eq!(results[1].doc, "python");
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let collection = build_corpus();
        let params = Bm25Params { b: 2.0, ..Bm25Params::default() };
        assert!(matches!(collection.search("rust", &params), Err(CollectionError::InvalidParameter(_))));
    }

    #[test]
    fn renders_hits_and_empty_notice() {
        let hits = vec![ScoredDoc { doc: "a".into(), score: 1.5 }, ScoredDoc { doc: "b".into(), score: 0.25 }];
        assert_eq!(render_results("q", &hits), "a : 1.5\nb : 0.25\n");
        assert_eq!(render_results("zzz", &[]), "no document found for the query: zzz\n");
    }
}
