//! Corpus scan and vocabulary/index construction.
//!
//! Each document is normalized on its own into a [`DocumentCounts`]; the
//! [`CollectionBuilder`] is the single place those per-document counts are
//! folded into corpus-wide state. Folding is commutative, and id assignment
//! breaks frequency ties by term text, so the finished collection does not
//! depend on scan order.

use crate::config::BuildConfig;
use crate::error::CollectionError;
use crate::extract::TextExtractor;
use crate::tokenizer::normalize_document;
use crate::{Collection, DocName, Posting, PostingList, Term, Vocabulary};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Document identifier for a file name: everything before the first `.`.
pub fn doc_name(file_name: &str) -> DocName {
    file_name.split('.').next().unwrap_or_default().to_string()
}

/// Term occurrence counts for one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentCounts {
    pub doc: DocName,
    pub counts: HashMap<Term, u32>,
}

impl DocumentCounts {
    /// Normalize each text block of a document and count the surviving terms.
    pub fn from_blocks<S: AsRef<str>>(doc: impl Into<DocName>, blocks: &[S], max_term_len: usize) -> Self {
        let mut counts: HashMap<Term, u32> = HashMap::new();
        for block in blocks {
            for term in normalize_document(block.as_ref(), max_term_len) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }
        Self { doc: doc.into(), counts }
    }

    /// Number of term occurrences retained for this document.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }
}

pub struct CollectionBuilder {
    config: BuildConfig,
    num_docs: u64,
    documents: BTreeSet<DocName>,
    global_freq: HashMap<Term, u64>,
    raw_index: HashMap<Term, HashMap<DocName, u32>>,
}

impl CollectionBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            num_docs: 0,
            documents: BTreeSet::new(),
            global_freq: HashMap::new(),
            raw_index: HashMap::new(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Documents scanned so far, including those that produced no terms.
    pub fn num_docs(&self) -> u64 {
        self.num_docs
    }

    /// Normalize and add one document given its text blocks in order.
    pub fn add_document<S: AsRef<str>>(&mut self, doc: &str, blocks: &[S]) -> Result<(), CollectionError> {
        let counts = DocumentCounts::from_blocks(doc, blocks, self.config.max_term_len);
        self.absorb(counts)
    }

    /// Fold one document's counts into the corpus-wide accumulators.
    pub fn absorb(&mut self, counts: DocumentCounts) -> Result<(), CollectionError> {
        let DocumentCounts { doc, counts } = counts;
        if !self.documents.insert(doc.clone()) {
            return Err(CollectionError::DuplicateDocument(doc));
        }
        self.num_docs += 1;
        debug!(doc = %doc, distinct_terms = counts.len(), "document counted");
        for (term, freq) in counts {
            *self.global_freq.entry(term.clone()).or_insert(0) += freq as u64;
            *self.raw_index.entry(term).or_default().entry(doc.clone()).or_insert(0) += freq;
        }
        Ok(())
    }

    /// Scan the files directly inside `dir` whose name carries the extractor's marker.
    /// Returns the number of documents added.
    pub fn scan_directory(&mut self, dir: &Path, extractor: &dyn TextExtractor) -> Result<usize, CollectionError> {
        let mut added = 0;
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                warn!(path = %entry.path().display(), "skipping file with non UTF-8 name");
                continue;
            };
            if !extractor.accepts(file_name) {
                continue;
            }
            let doc = doc_name(file_name);
            debug!(path = %entry.path().display(), doc = %doc, "reading document");
            let blocks = extractor.extract(entry.path())?;
            self.add_document(&doc, &blocks)?;
            added += 1;
        }
        info!(dir = %dir.display(), added, "directory scanned");
        Ok(added)
    }

    /// Drop rare terms, assign term ids, build the posting lists and compute statistics.
    pub fn finalize(self) -> Result<Collection, CollectionError> {
        let CollectionBuilder { config, num_docs, documents, mut global_freq, mut raw_index } = self;

        let seen_terms = global_freq.len();
        global_freq.retain(|_, freq| *freq >= config.min_freq);
        raw_index.retain(|term, _| global_freq.contains_key(term));

        let mut ranked: Vec<(Term, u64)> = global_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut vocabulary = Vocabulary::new();
        let mut index: Vec<PostingList> = Vec::with_capacity(ranked.len());
        for (term, _) in ranked {
            let docs = raw_index.remove(&term).unwrap_or_default();
            let mut plist: PostingList = docs.into_iter().map(|(doc, freq)| Posting { doc, freq }).collect();
            plist.sort_by(|a, b| b.freq.cmp(&a.freq).then_with(|| a.doc.cmp(&b.doc)));
            vocabulary.push(term);
            index.push(plist);
        }

        let mut collection = Collection {
            vocabulary,
            index,
            documents,
            doc_lengths: BTreeMap::new(),
            idf: Vec::new(),
            num_docs,
            avg_doc_length: 0.0,
        };
        collection.refresh_statistics()?;
        info!(
            num_docs,
            num_terms = collection.vocabulary.len(),
            dropped_terms = seen_terms - collection.vocabulary.len(),
            min_freq = config.min_freq,
            "collection finalized"
        );
        Ok(collection)
    }
}

impl Collection {
    /// Build a finalized collection from the documents directly inside `dir`.
    pub fn build(dir: &Path, extractor: &dyn TextExtractor, config: BuildConfig) -> Result<Collection, CollectionError> {
        let mut builder = CollectionBuilder::new(config);
        builder.scan_directory(dir, extractor)?;
        builder.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min_freq: u64) -> BuildConfig {
        BuildConfig { min_freq, ..BuildConfig::default() }
    }

    #[test]
    fn doc_name_truncates_at_first_dot() {
        assert_eq!(doc_name("report.pdf"), "report");
        assert_eq!(doc_name("report.v2.pdf"), "report");
        assert_eq!(doc_name(".hidden.pdf"), "");
    }

    #[test]
    fn counts_span_all_blocks() {
        let counts = DocumentCounts::from_blocks("d", &["apple banana", "apple"], 30);
        assert_eq!(counts.counts.get("appl"), Some(&2));
        assert_eq!(counts.counts.get("banana"), Some(&1));
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn duplicate_document_is_rejected() {
        let mut builder = CollectionBuilder::new(config(1));
        builder.add_document("a", &["apple"]).unwrap();
        let err = builder.add_document("a", &["banana"]).unwrap_err();
        assert!(matches!(err, CollectionError::DuplicateDocument(name) if name == "a"));
    }

    #[test]
    fn frequency_ties_break_by_term() {
        let mut builder = CollectionBuilder::new(config(1));
        builder.add_document("d1", &["zebra apple mango"]).unwrap();
        builder.add_document("d2", &["mango"]).unwrap();
        let collection = builder.finalize().unwrap();
        let terms: Vec<&str> = collection.vocabulary().iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(terms, vec!["mango", "appl", "zebra"]);
    }

    #[test]
    fn postings_sorted_by_frequency_then_doc() {
        let mut builder = CollectionBuilder::new(config(1));
        builder.add_document("c", &["kiwi"]).unwrap();
        builder.add_document("b", &["kiwi kiwi"]).unwrap();
        builder.add_document("a", &["kiwi"]).unwrap();
        let collection = builder.finalize().unwrap();
        let id = collection.vocabulary().id_of("kiwi").unwrap();
        let docs: Vec<&str> = collection.postings(id).unwrap().iter().map(|p| p.doc.as_str()).collect();
        assert_eq!(docs, vec!["b", "a", "c"]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = CollectionBuilder::new(config(1));
        let err = builder
            .scan_directory(&dir.path().join("nope"), &crate::PlainTextExtractor::default())
            .unwrap_err();
        assert!(matches!(err, CollectionError::Io(_)));
    }

    #[test]
    fn empty_corpus_cannot_be_finalized() {
        let builder = CollectionBuilder::new(config(1));
        assert_eq!(builder.num_docs(), 0);
        assert!(matches!(builder.finalize(), Err(CollectionError::EmptyCollection)));
    }
}
