//! Resolution strategy dispatch
//!
//! The `Resolver` trait provides a unified interface over the two ways a
//! suffix or UTI can be resolved: the macOS type registry and the bundled
//! static table. The strategy chain is probed once per process and memoized;
//! every public operation normalizes its input and walks the chain, taking
//! the first answer.

pub mod table;

#[cfg(target_os = "macos")]
pub mod native;

use std::path::Path;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::normalize::{normalize_suffix, normalize_uti, suffix_of_path};
use self::table::TableResolver;

/// Trait that all resolution strategies implement.
///
/// Inputs are already normalized (lower-case, no leading separator) by the
/// dispatch layer. Suffixes are returned bare; the public API re-attaches
/// the leading `.` where the contract asks for it.
pub trait Resolver: Send + Sync {
    fn name(&self) -> &'static str;

    fn uti_for_suffix(&self, suffix: &str) -> Option<String>;

    fn preferred_suffix_for_uti(&self, uti: &str) -> Option<String>;

    /// Full conformance tree for a UTI, the UTI itself first. Empty when the
    /// strategy does not know the type.
    fn conformance_tree(&self, uti: &str) -> Vec<String>;
}

/// Degraded-mode strategy: answers nothing, used when the bundled dataset is
/// unusable and no native service exists.
pub struct NullResolver;

impl Resolver for NullResolver {
    fn name(&self) -> &'static str {
        "null"
    }

    fn uti_for_suffix(&self, _suffix: &str) -> Option<String> {
        None
    }

    fn preferred_suffix_for_uti(&self, _uti: &str) -> Option<String> {
        None
    }

    fn conformance_tree(&self, _uti: &str) -> Vec<String> {
        Vec::new()
    }
}

static CHAIN: Lazy<Vec<Box<dyn Resolver>>> = Lazy::new(build_chain);

fn build_chain() -> Vec<Box<dyn Resolver>> {
    let mut chain: Vec<Box<dyn Resolver>> = Vec::new();

    #[cfg(target_os = "macos")]
    chain.push(Box::new(native::NativeResolver::new()));

    match TableResolver::try_new() {
        Ok(resolver) => chain.push(Box::new(resolver)),
        Err(e) => {
            warn!("bundled dataset unusable, lookups degrade to not-found: {}", e);
            chain.push(Box::new(NullResolver));
        }
    }

    let names: Vec<&str> = chain.iter().map(|r| r.name()).collect();
    debug!("resolver chain: {}", names.join(" -> "));
    chain
}

/// Gets the UTI for a file-name suffix.
///
/// The suffix may carry a leading `.` and mixed case; both are normalized
/// away. Returns `None` when no strategy knows the suffix.
///
/// # Example
/// ```
/// assert_eq!(utikit::uti_for_suffix("jpeg").as_deref(), Some("public.jpeg"));
/// assert_eq!(utikit::uti_for_suffix(".JPG").as_deref(), Some("public.jpeg"));
/// assert_eq!(utikit::uti_for_suffix("zzqqxx"), None);
/// ```
pub fn uti_for_suffix(suffix: &str) -> Option<String> {
    let suffix = normalize_suffix(suffix)?;
    CHAIN.iter().find_map(|r| r.uti_for_suffix(&suffix))
}

/// Gets the preferred file-name suffix for a UTI, with a leading `.`
/// (e.g. `".jpeg"` for `"public.jpeg"`). Returns `None` for unknown UTIs.
pub fn preferred_suffix_for_uti(uti: &str) -> Option<String> {
    let uti = normalize_uti(uti);
    if uti.is_empty() {
        return None;
    }
    CHAIN
        .iter()
        .find_map(|r| r.preferred_suffix_for_uti(&uti))
        .map(|suffix| format!(".{}", suffix))
}

/// Gets the UTI for a file at the given path, based on its extension.
/// Returns `None` when the path has no extension or the extension is
/// unknown.
pub fn uti_for_path(path: impl AsRef<Path>) -> Option<String> {
    let suffix = suffix_of_path(path.as_ref())?;
    CHAIN.iter().find_map(|r| r.uti_for_suffix(&suffix))
}

/// Returns the full conformance tree for a UTI: the UTI itself first, then
/// every UTI it conforms to, directly or transitively. Empty for unknown
/// UTIs.
pub fn content_type_tree_for_uti(uti: &str) -> Vec<String> {
    let uti = normalize_uti(uti);
    if uti.is_empty() {
        return Vec::new();
    }
    CHAIN
        .iter()
        .map(|r| r.conformance_tree(&uti))
        .find(|tree| !tree.is_empty())
        .unwrap_or_default()
}

/// Returns true if `uti` conforms to `other`.
///
/// # Example
/// ```
/// assert!(utikit::conforms_to_uti("public.jpeg", "public.image"));
/// assert!(!utikit::conforms_to_uti("public.jpeg", "public.audio"));
/// ```
pub fn conforms_to_uti(uti: &str, other: &str) -> bool {
    content_type_tree_for_uti(uti)
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(other))
}
