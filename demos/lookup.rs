//! Example: Look up UTIs for paths and suffixes
//!
//! This example demonstrates suffix, path, and conformance lookups.

use utikit::{
    conforms_to_uti, content_type_tree_for_uti, preferred_suffix_for_uti, uti_for_path,
    uti_for_suffix,
};

fn main() {
    tracing_subscriber::fmt::init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let inputs: Vec<String> = if args.len() > 1 {
        args[1..].to_vec()
    } else {
        vec![
            "photo.jpg".to_string(),
            "notes.txt".to_string(),
            "archive.tar.gz".to_string(),
            "IMG_0001.HEIC".to_string(),
        ]
    };

    for input in inputs {
        let looks_like_path = input.contains('/') || (input.contains('.') && !input.starts_with('.'));
        let uti = if looks_like_path {
            uti_for_path(&input)
        } else {
            uti_for_suffix(&input)
        };

        match uti {
            Some(uti) => {
                println!("{}", input);
                println!("  UTI:              {}", uti);
                println!(
                    "  preferred suffix: {}",
                    preferred_suffix_for_uti(&uti).unwrap_or_else(|| "(none)".to_string())
                );
                let tree = content_type_tree_for_uti(&uti);
                if tree.len() > 1 {
                    println!("  conforms to:      {}", tree[1..].join(", "));
                }
                println!(
                    "  is image:         {}",
                    conforms_to_uti(&uti, "public.image")
                );
            }
            None => println!("{}\n  (no known type)", input),
        }
    }
}
