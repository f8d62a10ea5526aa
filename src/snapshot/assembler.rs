use super::{DocumentKey, DocumentRequest, DocumentSnapshot, DocumentSource, Element};
use crate::Result;
use futures_util::future::join_all;
use ohno::{EnrichableExt, app_err};

const LOG_TARGET: &str = " assembler";

/// Fetches every configured document concurrently and merges them into one snapshot.
///
/// The snapshot is all-or-nothing: if any single document fails to arrive or to parse,
/// no snapshot is produced.
#[derive(Debug)]
pub struct Assembler<S> {
    source: S,
    requests: Vec<DocumentRequest>,
}

impl<S: DocumentSource> Assembler<S> {
    /// An assembler for the standard four documents.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_requests(source, DocumentRequest::standard_set())
    }

    #[must_use]
    pub const fn with_requests(source: S, requests: Vec<DocumentRequest>) -> Self {
        Self { source, requests }
    }

    #[must_use]
    pub fn requests(&self) -> &[DocumentRequest] {
        &self.requests
    }

    pub async fn assemble(&self) -> Result<DocumentSnapshot> {
        let results = join_all(self.requests.iter().map(|request| self.fetch_and_parse(request))).await;

        let mut documents = Vec::with_capacity(results.len());
        let mut first_error = None;
        for (key, result) in results {
            match result {
                Ok(element) => documents.push((key, element)),
                Err(e) => {
                    log::error!(target: LOG_TARGET, "Could not retrieve document '{key}': {e:#}");
                    let _ = first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e.enrich("assembling document snapshot"));
        }

        log::debug!(target: LOG_TARGET, "Assembled snapshot of {} documents", documents.len());
        Ok(DocumentSnapshot::from_documents(documents))
    }

    async fn fetch_and_parse(&self, request: &DocumentRequest) -> (DocumentKey, Result<Element>) {
        let key = request.key;
        let result = match self.source.fetch(request).await {
            Ok(markup) => parse_document(key, &markup),
            Err(e) => Err(e),
        };

        (key, result)
    }
}

/// Parse one document, checking that it carries the root element expected for `key`.
fn parse_document(key: DocumentKey, markup: &str) -> Result<Element> {
    let element = Element::parse(markup).map_err(|e| e.enrich_with(|| format!("parsing document '{key}'")))?;

    if element.name() != key.root_element() {
        return Err(app_err!(
            "document '{key}' has root element '{}', expected '{}'",
            element.name(),
            key.root_element()
        ));
    }

    Ok(element)
}
