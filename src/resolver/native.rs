//! Native resolution via the macOS type registry
//!
//! Two API generations exist for talking to the registry: the legacy
//! `CoreServices` tag-translation functions (deprecated since 10.15) and the
//! `UTType` class from the `UniformTypeIdentifiers` framework (11+). The
//! generation is picked once per process from the OS version and kept for
//! every call.
//!
//! Misses and failures here are never surfaced to callers: the dispatch
//! layer falls through to the static table.

use tracing::debug;

use super::Resolver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Generation {
    /// `UTTypeCreatePreferredIdentifierForTag` and friends.
    Legacy,
    /// `UTType` through the Objective-C runtime.
    Modern,
}

/// Strategy backed by the operating system's type registry.
pub struct NativeResolver {
    generation: Generation,
}

impl NativeResolver {
    pub fn new() -> Self {
        let generation = probe_generation();
        debug!("native type registry generation: {:?}", generation);
        Self { generation }
    }
}

impl Default for NativeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for NativeResolver {
    fn name(&self) -> &'static str {
        "native"
    }

    fn uti_for_suffix(&self, suffix: &str) -> Option<String> {
        match self.generation {
            Generation::Legacy => legacy::uti_for_suffix(suffix),
            Generation::Modern => modern::uti_for_suffix(suffix),
        }
    }

    fn preferred_suffix_for_uti(&self, uti: &str) -> Option<String> {
        match self.generation {
            Generation::Legacy => legacy::preferred_suffix_for_uti(uti),
            Generation::Modern => modern::preferred_suffix_for_uti(uti),
        }
    }

    fn conformance_tree(&self, uti: &str) -> Vec<String> {
        let mut tree = match self.generation {
            Generation::Legacy => legacy::conformance_tree(uti),
            Generation::Modern => modern::conformance_tree(uti),
        };
        // The registry reports conformances only; the tree contract puts the
        // queried UTI itself first.
        if !tree.is_empty() && !tree.iter().any(|u| u.eq_ignore_ascii_case(uti)) {
            tree.insert(0, uti.to_string());
        }
        tree
    }
}

fn probe_generation() -> Generation {
    match macos_major_version() {
        Some(major) if major >= 11 && load_uniform_type_identifiers() => Generation::Modern,
        _ => Generation::Legacy,
    }
}

/// Reads the major OS version from `kern.osproductversion`.
fn macos_major_version() -> Option<u32> {
    const NAME: &[u8] = b"kern.osproductversion\0";
    let mut buf = [0u8; 32];
    let mut len: libc::size_t = buf.len();
    let rc = unsafe {
        libc::sysctlbyname(
            NAME.as_ptr() as *const libc::c_char,
            buf.as_mut_ptr() as *mut libc::c_void,
            &mut len,
            std::ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return None;
    }
    let version = std::str::from_utf8(&buf[..len]).ok()?.trim_end_matches('\0');
    version.split('.').next()?.parse().ok()
}

/// Loads the `UniformTypeIdentifiers` framework so the `UTType` class is
/// available to the Objective-C runtime. The handle stays open for the
/// process lifetime.
fn load_uniform_type_identifiers() -> bool {
    const PATH: &[u8] =
        b"/System/Library/Frameworks/UniformTypeIdentifiers.framework/UniformTypeIdentifiers\0";
    let handle = unsafe { libc::dlopen(PATH.as_ptr() as *const libc::c_char, libc::RTLD_LAZY) };
    !handle.is_null()
}

mod legacy {
    use core_foundation::array::{CFArrayGetCount, CFArrayGetTypeID, CFArrayGetValueAtIndex, CFArrayRef};
    use core_foundation::base::{CFGetTypeID, CFRelease, CFTypeRef, TCFType};
    use core_foundation::dictionary::{CFDictionaryGetValue, CFDictionaryRef};
    use core_foundation::string::{CFString, CFStringGetTypeID, CFStringRef};

    #[link(name = "CoreServices", kind = "framework")]
    extern "C" {
        static kUTTagClassFilenameExtension: CFStringRef;

        fn UTTypeCreatePreferredIdentifierForTag(
            tag_class: CFStringRef,
            tag: CFStringRef,
            conforming_to: CFStringRef,
        ) -> CFStringRef;

        fn UTTypeCopyPreferredTagWithClass(uti: CFStringRef, tag_class: CFStringRef) -> CFStringRef;

        fn UTTypeCopyDeclaration(uti: CFStringRef) -> CFDictionaryRef;
    }

    pub(super) fn uti_for_suffix(suffix: &str) -> Option<String> {
        let tag = CFString::new(suffix);
        let uti = unsafe {
            let uti_ref = UTTypeCreatePreferredIdentifierForTag(
                kUTTagClassFilenameExtension,
                tag.as_concrete_TypeRef(),
                std::ptr::null(),
            );
            if uti_ref.is_null() {
                None
            } else {
                Some(CFString::wrap_under_create_rule(uti_ref).to_string())
            }
        };
        // The registry coins a dynamic identifier for unknown tags; that
        // counts as "no known type".
        let uti = uti.filter(|u| !u.starts_with("dyn."));
        if uti.is_none() && suffix == "heic" {
            // HEIC predates its registry entry on older systems.
            return Some("public.heic".to_string());
        }
        uti
    }

    pub(super) fn preferred_suffix_for_uti(uti: &str) -> Option<String> {
        let uti_cf = CFString::new(uti);
        let suffix = unsafe {
            let tag_ref = UTTypeCopyPreferredTagWithClass(
                uti_cf.as_concrete_TypeRef(),
                kUTTagClassFilenameExtension,
            );
            if tag_ref.is_null() {
                None
            } else {
                Some(CFString::wrap_under_create_rule(tag_ref).to_string())
            }
        };
        if suffix.is_none() && uti == "public.heic" {
            return Some("heic".to_string());
        }
        suffix
    }

    pub(super) fn conformance_tree(uti: &str) -> Vec<String> {
        let mut tree = Vec::new();
        collect_conformances(uti, &mut tree);
        tree
    }

    /// Walks `UTTypeConformsTo` declarations depth-first. The declared value
    /// may be a single string or an array of strings.
    fn collect_conformances(uti: &str, out: &mut Vec<String>) {
        let uti_cf = CFString::new(uti);
        let parents = unsafe {
            let decl = UTTypeCopyDeclaration(uti_cf.as_concrete_TypeRef());
            if decl.is_null() {
                return;
            }
            let parents = conforms_to_entries(decl);
            CFRelease(decl as CFTypeRef);
            parents
        };
        for parent in parents {
            if !out.iter().any(|u| u == &parent) {
                out.push(parent.clone());
                collect_conformances(&parent, out);
            }
        }
    }

    unsafe fn conforms_to_entries(decl: CFDictionaryRef) -> Vec<String> {
        let key = CFString::from_static_string("UTTypeConformsTo");
        let value =
            CFDictionaryGetValue(decl, key.as_concrete_TypeRef() as *const std::os::raw::c_void);
        if value.is_null() {
            return Vec::new();
        }
        let type_id = CFGetTypeID(value as CFTypeRef);
        if type_id == CFStringGetTypeID() {
            return vec![CFString::wrap_under_get_rule(value as CFStringRef).to_string()];
        }
        if type_id == CFArrayGetTypeID() {
            let array = value as CFArrayRef;
            let mut entries = Vec::new();
            for i in 0..CFArrayGetCount(array) {
                let item = CFArrayGetValueAtIndex(array, i);
                if !item.is_null() && CFGetTypeID(item as CFTypeRef) == CFStringGetTypeID() {
                    entries.push(CFString::wrap_under_get_rule(item as CFStringRef).to_string());
                }
            }
            return entries;
        }
        Vec::new()
    }
}

mod modern {
    use core_foundation::base::TCFType;
    use core_foundation::string::{CFString, CFStringRef};
    use objc::rc::autoreleasepool;
    use objc::runtime::{Class, Object, BOOL, YES};
    use objc::{msg_send, sel, sel_impl};

    fn ut_type_class() -> Option<&'static Class> {
        Class::get("UTType")
    }

    fn nsstring_to_string(ns: CFStringRef) -> Option<String> {
        if ns.is_null() {
            return None;
        }
        // NSString is toll-free bridged to CFString.
        Some(unsafe { CFString::wrap_under_get_rule(ns) }.to_string())
    }

    pub(super) fn uti_for_suffix(suffix: &str) -> Option<String> {
        autoreleasepool(|| {
            let cls = ut_type_class()?;
            let tag = CFString::new(suffix);
            let identifier = unsafe {
                let ut: *mut Object =
                    msg_send![cls, typeWithFilenameExtension: tag.as_concrete_TypeRef()];
                if ut.is_null() {
                    return None;
                }
                let identifier: CFStringRef = msg_send![ut, identifier];
                nsstring_to_string(identifier)
            }?;
            // Dynamic UTIs are not useful for file type identification.
            if identifier.starts_with("dyn.") {
                None
            } else {
                Some(identifier)
            }
        })
    }

    pub(super) fn preferred_suffix_for_uti(uti: &str) -> Option<String> {
        autoreleasepool(|| {
            let cls = ut_type_class()?;
            let identifier = CFString::new(uti);
            unsafe {
                let ut: *mut Object =
                    msg_send![cls, typeWithIdentifier: identifier.as_concrete_TypeRef()];
                if ut.is_null() {
                    return None;
                }
                let suffix: CFStringRef = msg_send![ut, preferredFilenameExtension];
                nsstring_to_string(suffix)
            }
        })
    }

    pub(super) fn conformance_tree(uti: &str) -> Vec<String> {
        autoreleasepool(|| {
            let Some(cls) = ut_type_class() else {
                return Vec::new();
            };
            let identifier = CFString::new(uti);
            unsafe {
                let ut: *mut Object =
                    msg_send![cls, typeWithIdentifier: identifier.as_concrete_TypeRef()];
                if ut.is_null() {
                    return Vec::new();
                }
                let supertypes: *mut Object = msg_send![ut, supertypes];
                if supertypes.is_null() {
                    return Vec::new();
                }
                let all: *mut Object = msg_send![supertypes, allObjects];
                if all.is_null() {
                    return Vec::new();
                }
                let count: usize = msg_send![all, count];
                let mut types: Vec<*mut Object> = Vec::with_capacity(count);
                for i in 0..count {
                    let item: *mut Object = msg_send![all, objectAtIndex: i];
                    if !item.is_null() {
                        types.push(item);
                    }
                }
                // Most-derived types first: rank each supertype by how many
                // of the others it is itself a subtype of.
                let mut ranked: Vec<(usize, *mut Object)> = Vec::with_capacity(types.len());
                for &candidate in &types {
                    let mut rank = 0;
                    for &other in &types {
                        let is_subtype: BOOL = msg_send![candidate, isSubtypeOfType: other];
                        if is_subtype == YES {
                            rank += 1;
                        }
                    }
                    ranked.push((rank, candidate));
                }
                ranked.sort_by(|a, b| b.0.cmp(&a.0));
                let mut tree = Vec::with_capacity(ranked.len());
                for (_, ut) in ranked {
                    let name: CFStringRef = msg_send![ut, identifier];
                    if let Some(name) = nsstring_to_string(name) {
                        tree.push(name);
                    }
                }
                tree
            }
        })
    }
}
