//! Traversal helpers over [`Element`] trees.
//!
//! Lookups of optional nodes return `Option` and leave the default to the caller. The
//! `require_*` variants turn an absent node into an error for derivations that cannot
//! produce a meaningful record without it.

use super::Element;
use crate::Result;
use ohno::app_err;

const LOG_TARGET: &str = " navigator";

impl Element {
    /// First child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children(name).next()
    }

    /// All child elements with the given name, in document order.
    pub fn children<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Self> {
        self.elements().iter().filter(move |e| e.name() == name)
    }

    /// The `n`-th child element with the given name.
    #[must_use]
    pub fn nth_child(&self, name: &str, n: usize) -> Option<&Self> {
        self.children(name).nth(n)
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes().get(name).map(String::as_str)
    }

    /// First child element with the given name that satisfies `predicate`.
    pub fn find_child(&self, name: &str, predicate: impl Fn(&Self) -> bool) -> Option<&Self> {
        self.children(name).find(|e| predicate(*e))
    }

    /// Every child element with the given name that satisfies `predicate`.
    pub fn filter_children<'a, P>(&'a self, name: &str, predicate: P) -> impl Iterator<Item = &'a Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.children(name).filter(move |e| predicate(*e))
    }

    /// Follow the first matching child at each step of `path`.
    #[must_use]
    pub fn path(&self, path: &[&str]) -> Option<&Self> {
        path.iter().try_fold(self, |current, name| current.child(name))
    }

    pub fn require_path(&self, path: &[&str]) -> Result<&Self> {
        self.path(path)
            .ok_or_else(|| app_err!("missing required element '{}' under '{}'", path.join("/"), self.name()))
    }

    pub fn require_attr(&self, name: &str) -> Result<&str> {
        self.attr(name)
            .ok_or_else(|| app_err!("missing required attribute '{name}' on '{}'", self.name()))
    }

    /// Text content of the element at `path`. An element that exists but carries no text
    /// reads as an empty string and is left to numeric coercion.
    pub fn require_text(&self, path: &[&str]) -> Result<&str> {
        Ok(self.require_path(path)?.text().unwrap_or_default())
    }
}

/// Parse an integer field value.
///
/// Decimal text is truncated toward zero. Anything unparsable coerces to 0.
#[must_use]
pub fn coerce_int(field: &str, raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return v;
    }

    match raw.parse::<f64>() {
        #[expect(clippy::cast_possible_truncation, reason = "integer fields truncate decimal source text")]
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => {
            log::debug!(target: LOG_TARGET, "Field '{field}' has non-numeric value '{raw}', using 0");
            0
        }
    }
}

/// Parse a float field value. Anything unparsable or non-finite coerces to 0.
#[must_use]
pub fn coerce_float(field: &str, raw: &str) -> f64 {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            log::debug!(target: LOG_TARGET, "Field '{field}' has non-numeric value '{raw}', using 0");
            0.0
        }
    }
}
