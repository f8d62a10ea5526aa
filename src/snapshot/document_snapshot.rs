use super::{DocumentKey, Element};
use crate::Result;
use ohno::app_err;
use std::collections::HashMap;

/// The merged, read-only result of one retrieval cycle.
#[derive(Debug, Clone, Default)]
pub struct DocumentSnapshot {
    documents: HashMap<DocumentKey, Element>,
}

impl DocumentSnapshot {
    #[must_use]
    pub fn from_documents(documents: impl IntoIterator<Item = (DocumentKey, Element)>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
        }
    }

    /// The root element of the document retrieved for `key`.
    pub fn document(&self, key: DocumentKey) -> Result<&Element> {
        self.documents
            .get(&key)
            .ok_or_else(|| app_err!("document '{key}' is not part of the snapshot"))
    }

    pub fn career(&self) -> Result<&Element> {
        self.document(DocumentKey::CareerSavegame)
    }

    pub fn economy(&self) -> Result<&Element> {
        self.document(DocumentKey::Economy)
    }

    pub fn vehicles(&self) -> Result<&Element> {
        self.document(DocumentKey::Vehicles)
    }

    pub fn server(&self) -> Result<&Element> {
        self.document(DocumentKey::Server)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lookup() {
        let snapshot = DocumentSnapshot::from_documents([(DocumentKey::Economy, Element::new("economy"))]);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.economy().unwrap().name(), "economy");

        let err = snapshot.server().unwrap_err();
        assert!(err.to_string().contains("server"), "unexpected error: {err}");
    }
}
