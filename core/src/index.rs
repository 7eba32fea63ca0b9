use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Document identifier: the file name up to its first `.`.
pub type DocName = String;

/// A normalized token. Postings are keyed by `TermId` once the vocabulary is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term(String);

impl Term {
    pub fn new(s: impl Into<String>) -> Self {
        Term(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dense id in `[0, |vocabulary|)`, assigned by descending global frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermId(pub u32);

impl TermId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc: DocName,
    pub freq: u32,
}

pub type PostingList = Vec<Posting>;

/// Bidirectional Term <-> TermId mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    ids: HashMap<Term, TermId>,
    terms: Vec<Term>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `term` with the next free id. The caller guarantees it is not present yet.
    pub(crate) fn push(&mut self, term: Term) -> TermId {
        let id = TermId(self.terms.len() as u32);
        self.ids.insert(term.clone(), id);
        self.terms.push(term);
        id
    }

    pub fn id_of(&self, term: &str) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.terms.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &Term)> {
        self.terms.iter().enumerate().map(|(i, t)| (TermId(i as u32), t))
    }
}

/// A finalized, queryable corpus: vocabulary, inverted index and the BM25 statistics
/// derived from them. Built by [`crate::CollectionBuilder`], extended by [`Collection::merge`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub(crate) vocabulary: Vocabulary,
    /// Indexed by `TermId`; never holds an empty list.
    pub(crate) index: Vec<PostingList>,
    /// Every scanned document, including those with no surviving terms.
    pub(crate) documents: BTreeSet<DocName>,
    pub(crate) doc_lengths: BTreeMap<DocName, u64>,
    pub(crate) idf: Vec<f64>,
    pub(crate) num_docs: u64,
    pub(crate) avg_doc_length: f64,
}

impl Collection {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn postings(&self, id: TermId) -> Option<&[Posting]> {
        self.index.get(id.index()).map(Vec::as_slice)
    }

    /// Number of distinct documents containing `id`.
    pub fn document_frequency(&self, id: TermId) -> Option<usize> {
        self.postings(id).map(<[Posting]>::len)
    }

    /// Sum of posting frequencies of `id` across the collection.
    pub fn collection_frequency(&self, id: TermId) -> Option<u64> {
        self.postings(id)
            .map(|plist| plist.iter().map(|p| p.freq as u64).sum())
    }

    pub fn idf(&self, id: TermId) -> Option<f64> {
        self.idf.get(id.index()).copied()
    }

    pub fn doc_length(&self, doc: &str) -> Option<u64> {
        self.doc_lengths.get(doc).copied()
    }

    pub fn doc_lengths(&self) -> &BTreeMap<DocName, u64> {
        &self.doc_lengths
    }

    pub fn documents(&self) -> &BTreeSet<DocName> {
        &self.documents
    }

    pub fn num_docs(&self) -> u64 {
        self.num_docs
    }

    pub fn avg_doc_length(&self) -> f64 {
        self.avg_doc_length
    }
}
