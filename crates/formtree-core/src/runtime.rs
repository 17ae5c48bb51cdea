//! Runtime Data: state accumulated during one widget invocation
use serde::Serialize;

use crate::datum::{Datum, Request};
use crate::error::{ExtractionError, WidgetError};

/// Per-invocation record of a widget's pipelines.
///
/// `extracted`, `rendered` and `errors` are append-only. A record is never
/// shared between invocations unless the caller explicitly hands it back in
/// to avoid running extraction twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuntimeData {
    /// Request the caller supplied, `None` for a pure render.
    pub request: Option<Request>,
    /// Working value established by preprocessing.
    pub value: Option<Datum>,
    pub extracted: Vec<Datum>,
    pub rendered: Vec<String>,
    pub errors: Vec<ExtractionError>,
}

impl RuntimeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once preprocessing has established the working value.
    pub fn is_preprocessed(&self) -> bool {
        self.value.is_some()
    }

    /// Last extractor output, or [`Datum::Unset`] when nothing was extracted.
    pub fn last_extracted(&self) -> &Datum {
        const UNSET: &Datum = &Datum::Unset;
        self.extracted.last().unwrap_or(UNSET)
    }

    /// Last renderer output, or the empty string.
    pub fn last_rendered(&self) -> &str {
        self.rendered.last().map(String::as_str).unwrap_or("")
    }

    /// Working value, `null` before preprocessing.
    pub fn value(&self) -> Datum {
        self.value.clone().unwrap_or_else(Datum::null)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether anything was extracted, recursing into nested records.
    ///
    /// A `Map` or `List` holding only nested records is treated as a subtree
    /// and is true if any record in it has extracted something. A `Map`
    /// mixing records with plain values is a caller bug and fails with
    /// [`WidgetError::Integrity`]; any other `List` is true when non-empty.
    pub fn has_extracted(&self) -> Result<bool, WidgetError> {
        match self.last_extracted() {
            Datum::Map(map) => {
                let records: Vec<&RuntimeData> =
                    map.values().filter_map(Datum::as_record).collect();
                if records.is_empty() {
                    return Ok(!map.is_empty());
                }
                if records.len() != map.len() {
                    return Err(WidgetError::Integrity(format!(
                        "mapping mixes {} nested records with {} plain values",
                        records.len(),
                        map.len() - records.len()
                    )));
                }
                any_extracted(records)
            }
            Datum::List(list) => {
                let records: Vec<&RuntimeData> =
                    list.iter().filter_map(Datum::as_record).collect();
                if records.is_empty() || records.len() != list.len() {
                    return Ok(!list.is_empty());
                }
                any_extracted(records)
            }
            other => Ok(other.is_truthy()),
        }
    }
}

fn any_extracted(records: Vec<&RuntimeData>) -> Result<bool, WidgetError> {
    for record in records {
        if record.has_extracted()? {
            return Ok(true);
        }
    }
    Ok(false)
}
