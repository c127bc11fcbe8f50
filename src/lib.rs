//! # utikit - Uniform Type Identifier lookup
//!
//! A small library for translating between file-name suffixes and Uniform
//! Type Identifiers (UTIs), with conformance queries over the UTI hierarchy.
//!
//! ## Overview
//!
//! utikit answers four questions: which UTI corresponds to a file-name
//! suffix, which suffix a UTI prefers, which UTI a path's extension implies,
//! and which other UTIs a given UTI conforms to.
//!
//! On macOS the answers come from the operating system's live type registry.
//! Everywhere else (and on macOS when the registry has no answer) a bundled
//! dataset extracted from a real registry serves the same lookups, so the
//! library behaves identically across platforms for common types.
//!
//! ## Core Concepts
//!
//! - **Suffix**: a file-name extension, accepted with or without the leading
//!   `.` and in any case
//! - **UTI**: a reverse-DNS type identifier such as `public.jpeg`
//! - **Resolver**: a lookup strategy; strategies are chained and the first
//!   answer wins
//! - **Conformance**: the UTI type hierarchy, e.g. `public.jpeg` conforms to
//!   `public.image`
//!
//! ## Example
//!
//! ```
//! assert_eq!(utikit::uti_for_suffix(".jpg").as_deref(), Some("public.jpeg"));
//! assert_eq!(
//!     utikit::preferred_suffix_for_uti("public.jpeg").as_deref(),
//!     Some(".jpeg")
//! );
//! assert_eq!(
//!     utikit::uti_for_path("/tmp/photo.HEIC").as_deref(),
//!     Some("public.heic")
//! );
//! assert!(utikit::conforms_to_uti("public.png", "public.image"));
//! ```

pub mod error;
pub mod normalize;
pub mod resolver;

pub use error::{UtiError, UtiErrorKind, UtiResult};
pub use resolver::table::{MappingTable, TableResolver};
pub use resolver::{
    conforms_to_uti, content_type_tree_for_uti, preferred_suffix_for_uti, uti_for_path,
    uti_for_suffix, NullResolver, Resolver,
};

#[cfg(target_os = "macos")]
pub use resolver::native::NativeResolver;
