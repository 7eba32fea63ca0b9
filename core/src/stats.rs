//! Corpus statistics derived from a finalized inverted index: per-term IDF,
//! per-document length and the average document length. Always recomputed
//! from scratch, never patched.

use crate::error::CollectionError;
use crate::{Collection, DocName, PostingList};
use std::collections::BTreeMap;

/// Smoothed inverse document frequency, `1 + ln(N / (1 + df))`.
pub fn idf(num_docs: u64, df: usize) -> f64 {
    1.0 + (num_docs as f64 / (1.0 + df as f64)).ln()
}

/// Sum of posting frequencies per document. Documents without any posting do not appear.
pub fn document_lengths(index: &[PostingList]) -> BTreeMap<DocName, u64> {
    let mut lengths: BTreeMap<DocName, u64> = BTreeMap::new();
    for plist in index {
        for posting in plist {
            *lengths.entry(posting.doc.clone()).or_insert(0) += posting.freq as u64;
        }
    }
    lengths
}

pub fn average_length(lengths: &BTreeMap<DocName, u64>) -> Result<f64, CollectionError> {
    if lengths.is_empty() {
        return Err(CollectionError::EmptyCollection);
    }
    let total: u64 = lengths.values().sum();
    Ok(total as f64 / lengths.len() as f64)
}

impl Collection {
    /// Recompute document lengths, average length and every IDF value.
    pub(crate) fn refresh_statistics(&mut self) -> Result<(), CollectionError> {
        let doc_lengths = document_lengths(&self.index);
        let avg_doc_length = average_length(&doc_lengths)?;
        self.idf = self.index.iter().map(|plist| idf(self.num_docs, plist.len())).collect();
        self.doc_lengths = doc_lengths;
        self.avg_doc_length = avg_doc_length;
        tracing::debug!(
            num_docs = self.num_docs,
            indexed_docs = self.doc_lengths.len(),
            num_terms = self.idf.len(),
            avg_doc_length = self.avg_doc_length,
            "statistics computed"
        );
        Ok(())
    }
}
