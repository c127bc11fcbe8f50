//! Static table resolution
//!
//! Fallback strategy backed by a bundled suffix↔UTI dataset. The dataset is
//! embedded at compile time and parsed once, lazily, on first lookup; the
//! resulting maps are shared read-only for the rest of the process.
//!
//! The dataset was extracted offline from a live macOS type registry and is
//! regenerated by an external process, so duplicate suffix rows can occur:
//! the last row wins.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::error::{UtiError, UtiErrorKind, UtiResult};
use super::Resolver;

const UTI_CSV: &str = include_str!("../data/uti.csv");
const UTI_TREE_JSON: &str = include_str!("../data/uti_tree.json");

const CSV_HEADER: &str = "extension,UTI,preferred_extension";

/// Immutable suffix↔UTI mapping built from the bundled dataset.
///
/// One suffix maps to exactly one UTI; several suffixes may map to the same
/// UTI, and each UTI carries at most one preferred suffix.
pub struct MappingTable {
    suffix_to_uti: HashMap<String, String>,
    uti_to_suffix: HashMap<String, String>,
}

impl MappingTable {
    /// Parses a `extension,UTI,preferred_extension` table.
    ///
    /// Rows that do not have exactly three fields, or whose extension or UTI
    /// field is empty, are skipped. A missing or unrecognized header makes
    /// the whole table unusable.
    pub fn parse(text: &str) -> UtiResult<Self> {
        let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));

        let header = lines
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| UtiError::new(UtiErrorKind::InvalidData, "dataset is empty"))?;
        if !header.trim().eq_ignore_ascii_case(CSV_HEADER) {
            return Err(UtiError::new(
                UtiErrorKind::InvalidData,
                format!("unrecognized dataset header: {:?}", header),
            ));
        }

        let mut suffix_to_uti = HashMap::new();
        let mut uti_to_suffix = HashMap::new();

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 3 {
                warn!("skipping malformed dataset row: {:?}", line);
                continue;
            }
            let (extension, uti, preferred) = (fields[0], fields[1], fields[2]);
            if extension.is_empty() || uti.is_empty() {
                warn!("skipping dataset row with empty key: {:?}", line);
                continue;
            }
            suffix_to_uti.insert(extension.to_ascii_lowercase(), uti.to_string());
            if !preferred.is_empty() {
                uti_to_suffix.insert(uti.to_ascii_lowercase(), preferred.to_ascii_lowercase());
            }
        }

        Ok(Self {
            suffix_to_uti,
            uti_to_suffix,
        })
    }

    pub fn uti_for_suffix(&self, suffix: &str) -> Option<&str> {
        self.suffix_to_uti
            .get(&suffix.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn preferred_suffix_for_uti(&self, uti: &str) -> Option<&str> {
        self.uti_to_suffix
            .get(&uti.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.suffix_to_uti.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffix_to_uti.is_empty()
    }
}

static TABLE: Lazy<UtiResult<MappingTable>> = Lazy::new(|| MappingTable::parse(UTI_CSV));

static TREE: Lazy<HashMap<String, Vec<String>>> = Lazy::new(|| match parse_tree(UTI_TREE_JSON) {
    Ok(tree) => tree,
    Err(e) => {
        warn!("bundled conformance data unusable: {}", e);
        HashMap::new()
    }
});

/// Parses the `UTI -> conformance tree` companion dataset.
fn parse_tree(text: &str) -> UtiResult<HashMap<String, Vec<String>>> {
    Ok(serde_json::from_str(text)?)
}

/// Strategy backed by the bundled dataset.
pub struct TableResolver;

impl TableResolver {
    /// Fails when the bundled dataset cannot be parsed, in which case the
    /// dispatch layer degrades to [`NullResolver`](super::NullResolver).
    pub fn try_new() -> UtiResult<Self> {
        match TABLE.as_ref() {
            Ok(_) => Ok(Self),
            Err(e) => Err(UtiError::new(UtiErrorKind::InvalidData, e.to_string())),
        }
    }

    fn table() -> Option<&'static MappingTable> {
        TABLE.as_ref().ok()
    }
}

impl Resolver for TableResolver {
    fn name(&self) -> &'static str {
        "table"
    }

    fn uti_for_suffix(&self, suffix: &str) -> Option<String> {
        Self::table()?.uti_for_suffix(suffix).map(String::from)
    }

    fn preferred_suffix_for_uti(&self, uti: &str) -> Option<String> {
        Self::table()?.preferred_suffix_for_uti(uti).map(String::from)
    }

    fn conformance_tree(&self, uti: &str) -> Vec<String> {
        TREE.get(uti).cloned().unwrap_or_default()
    }
}
