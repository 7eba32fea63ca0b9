use crate::error::CollectionError;
use crate::{Collection, DocName};
use tracing::info;

impl Collection {
    /// Merge `incoming` into `self`.
    ///
    /// The two collections must cover disjoint documents; any shared document name
    /// fails with [`CollectionError::OverlappingCollections`] and leaves `self`
    /// untouched. Terms new to `self` get the next free ids and keep their posting
    /// lists as is; shared terms get `incoming`'s postings appended. All statistics
    /// are recomputed over the merged index afterwards.
    pub fn merge(&mut self, incoming: Collection) -> Result<(), CollectionError> {
        let shared: Vec<DocName> = self.documents.intersection(&incoming.documents).cloned().collect();
        if !shared.is_empty() {
            return Err(CollectionError::OverlappingCollections(shared));
        }

        let Collection { vocabulary, index, documents, num_docs, .. } = incoming;
        let terms_before = self.vocabulary.len();
        let mut extended = 0usize;
        for ((_, term), plist) in vocabulary.iter().zip(index) {
            match self.vocabulary.id_of(term.as_str()) {
                Some(id) => self.index[id.index()].extend(plist),
                None => {
                    self.vocabulary.push(term.clone());
                    self.index.push(plist);
                    extended += 1;
                }
            }
        }
        self.documents.extend(documents);
        self.num_docs += num_docs;
        self.refresh_statistics()?;

        info!(
            num_docs = self.num_docs,
            terms_before,
            new_terms = extended,
            num_terms = self.vocabulary.len(),
            "collections merged"
        );
        Ok(())
    }
}
