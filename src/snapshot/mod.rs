//! Document retrieval and navigation
//!
//! This module turns the dedicated server's reporting API into an in-memory
//! [`DocumentSnapshot`]: one parsed [`Element`] tree per [`DocumentKey`].
//!
//! # Implementation Model
//!
//! A [`DocumentSource`] fetches raw markup for a [`DocumentRequest`]. The production
//! source is [`HttpDocumentSource`]; tests substitute canned sources. The [`Assembler`]
//! issues every request concurrently, parses each response with `roxmltree` into an
//! owned [`Element`] tree, and merges the results. A single failed retrieval or parse
//! fails the whole snapshot, since later derivations join fields across documents.
//!
//! The navigator helpers on [`Element`] (`child`, `nth_child`, `find_child`,
//! `filter_children`, `path`, and the `require_*` variants) are how derivations read the
//! snapshot. Optional lookups return `Option`; required lookups return errors.

mod assembler;
mod document_key;
mod document_snapshot;
mod document_source;
mod element;
mod navigator;

pub use assembler::Assembler;
pub use document_key::{DocumentKey, DocumentRequest, SAVEGAME_ENDPOINT, STATS_ENDPOINT};
pub use document_snapshot::DocumentSnapshot;
pub use document_source::{DocumentSource, HttpDocumentSource};
pub use element::Element;
pub use navigator::{coerce_float, coerce_int};
