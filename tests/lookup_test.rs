use utikit::{preferred_suffix_for_uti, uti_for_path, uti_for_suffix};

#[test]
fn test_uti_for_suffix() {
    let cases = [
        (".jpeg", Some("public.jpeg")),
        ("jpg", Some("public.jpeg")),
        (".png", Some("public.png")),
        (".heic", Some("public.heic")),
        ("cr2", Some("com.canon.cr2-raw-image")),
        ("unknown", None),
        ("", None),
        ("!@#$%^&*", None),
    ];
    for (suffix, expected) in cases {
        assert_eq!(
            uti_for_suffix(suffix).as_deref(),
            expected,
            "suffix {:?}",
            suffix
        );
    }
}

#[test]
fn test_uti_for_suffix_case_insensitive() {
    assert_eq!(uti_for_suffix(".JPEG").as_deref(), Some("public.jpeg"));
    assert_eq!(uti_for_suffix("JpG").as_deref(), Some("public.jpeg"));
    assert_eq!(uti_for_suffix(".PNG").as_deref(), Some("public.png"));
}

#[test]
fn test_preferred_suffix_for_uti() {
    let cases = [
        ("public.jpeg", Some(".jpeg")),
        ("public.png", Some(".png")),
        ("public.heic", Some(".heic")),
        ("com.canon.cr2-raw-image", Some(".cr2")),
        ("public.unknown", None),
        ("", None),
        ("!@#$%^&*", None),
    ];
    for (uti, expected) in cases {
        assert_eq!(
            preferred_suffix_for_uti(uti).as_deref(),
            expected,
            "uti {:?}",
            uti
        );
    }
}

#[test]
fn test_preferred_suffix_always_has_leading_dot() {
    for uti in ["public.jpeg", "public.png", "com.adobe.pdf", "public.mp3"] {
        let suffix = preferred_suffix_for_uti(uti).expect("known uti");
        assert!(suffix.starts_with('.'), "{:?} for {:?}", suffix, uti);
        assert!(suffix.len() > 1, "{:?} for {:?}", suffix, uti);
    }
}

#[test]
fn test_lookup_round_trip() {
    // The preferred suffix of the UTI a suffix maps to must map back to the
    // same UTI.
    for suffix in ["jpg", "png", "heic", "pdf", "zip", "mp3"] {
        let uti = uti_for_suffix(suffix).expect("known suffix");
        let preferred = preferred_suffix_for_uti(&uti).expect("known uti");
        assert_eq!(uti_for_suffix(&preferred).as_deref(), Some(uti.as_str()));
    }
}

#[test]
fn test_uti_for_path() {
    let cases = [
        ("/Users/doe/Desktop/image.jpg", Some("public.jpeg")),
        ("~/Downloads/screenshot.png", Some("public.png")),
        ("/Users/doe/Desktop/foo", None),
    ];
    for (path, expected) in cases {
        assert_eq!(uti_for_path(path).as_deref(), expected, "path {:?}", path);
    }
}

#[test]
fn test_uti_for_path_mixed_case_extension() {
    assert_eq!(
        uti_for_path("/tmp/IMG_0001.HEIC").as_deref(),
        Some("public.heic")
    );
    assert_eq!(
        uti_for_path("/tmp/archive.ZiP").as_deref(),
        Some("public.zip-archive")
    );
}

#[test]
fn test_uti_for_path_dotfiles_and_edge_paths() {
    // A dotfile has no extension component.
    assert_eq!(uti_for_path("/home/doe/.bashrc"), None);
    assert_eq!(uti_for_path(""), None);
    // Only the last component counts.
    assert_eq!(
        uti_for_path("/tmp/photos.old/picture.png").as_deref(),
        Some("public.png")
    );
}

#[test]
fn test_uti_for_path_accepts_pathbuf() {
    let path = std::path::PathBuf::from("/tmp/notes.pdf");
    assert_eq!(uti_for_path(&path).as_deref(), Some("com.adobe.pdf"));
    assert_eq!(uti_for_path(path).as_deref(), Some("com.adobe.pdf"));
}
