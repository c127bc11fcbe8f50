use utikit::{MappingTable, NullResolver, Resolver, TableResolver};

#[test]
fn test_mapping_table_parse_basic() {
    let text = "extension,UTI,preferred_extension\n\
                jpeg,public.jpeg,jpeg\n\
                jpg,public.jpeg,jpeg\n\
                png,public.png,png\n";
    let table = MappingTable::parse(text).expect("valid dataset");

    assert_eq!(table.len(), 3);
    assert_eq!(table.uti_for_suffix("jpg"), Some("public.jpeg"));
    assert_eq!(table.uti_for_suffix("jpeg"), Some("public.jpeg"));
    assert_eq!(table.preferred_suffix_for_uti("public.jpeg"), Some("jpeg"));
    assert_eq!(table.uti_for_suffix("tiff"), None);
}

#[test]
fn test_mapping_table_lookups_are_case_insensitive() {
    let text = "extension,UTI,preferred_extension\n\
                jpeg,public.jpeg,jpeg\n";
    let table = MappingTable::parse(text).expect("valid dataset");

    assert_eq!(table.uti_for_suffix("JPEG"), Some("public.jpeg"));
    assert_eq!(table.preferred_suffix_for_uti("Public.JPEG"), Some("jpeg"));
}

#[test]
fn test_mapping_table_last_duplicate_wins() {
    let text = "extension,UTI,preferred_extension\n\
                jpg,public.old-jpeg,jpg\n\
                jpg,public.jpeg,jpeg\n";
    let table = MappingTable::parse(text).expect("valid dataset");

    assert_eq!(table.len(), 1);
    assert_eq!(table.uti_for_suffix("jpg"), Some("public.jpeg"));
}

#[test]
fn test_mapping_table_skips_malformed_rows() {
    let text = "extension,UTI,preferred_extension\n\
                jpeg,public.jpeg,jpeg\n\
                not-enough-fields\n\
                a,b,c,too-many\n\
                ,public.empty-key,x\n\
                noext,,x\n\
                png,public.png,png\n";
    let table = MappingTable::parse(text).expect("valid dataset");

    assert_eq!(table.len(), 2);
    assert_eq!(table.uti_for_suffix("jpeg"), Some("public.jpeg"));
    assert_eq!(table.uti_for_suffix("png"), Some("public.png"));
}

#[test]
fn test_mapping_table_row_without_preferred_suffix() {
    let text = "extension,UTI,preferred_extension\n\
                xyz,com.example.xyz,\n";
    let table = MappingTable::parse(text).expect("valid dataset");

    assert_eq!(table.uti_for_suffix("xyz"), Some("com.example.xyz"));
    assert_eq!(table.preferred_suffix_for_uti("com.example.xyz"), None);
}

#[test]
fn test_mapping_table_tolerates_blank_lines_and_crlf() {
    let text = "extension,UTI,preferred_extension\r\n\
                \r\n\
                jpeg,public.jpeg,jpeg\r\n\
                \n\
                png,public.png,png\n";
    let table = MappingTable::parse(text).expect("valid dataset");
    assert_eq!(table.len(), 2);
}

#[test]
fn test_mapping_table_rejects_bad_header() {
    assert!(MappingTable::parse("").is_err());
    assert!(MappingTable::parse("suffix;uti;preferred\n").is_err());
    assert!(MappingTable::parse("jpeg,public.jpeg,jpeg\n").is_err());
}

#[test]
fn test_null_resolver_answers_nothing() {
    let resolver = NullResolver;
    assert_eq!(resolver.name(), "null");
    assert_eq!(resolver.uti_for_suffix("jpeg"), None);
    assert_eq!(resolver.preferred_suffix_for_uti("public.jpeg"), None);
    assert!(resolver.conformance_tree("public.jpeg").is_empty());
}

#[test]
fn test_table_resolver_bundled_dataset() {
    let resolver = TableResolver::try_new().expect("bundled dataset parses");
    assert_eq!(resolver.name(), "table");
    assert_eq!(
        resolver.uti_for_suffix("jpeg").as_deref(),
        Some("public.jpeg")
    );
    assert_eq!(
        resolver.preferred_suffix_for_uti("public.jpeg").as_deref(),
        Some("jpeg")
    );

    let tree = resolver.conformance_tree("public.jpeg");
    assert_eq!(tree.first().map(String::as_str), Some("public.jpeg"));
    assert!(tree.iter().any(|u| u == "public.image"));
}

#[test]
fn test_resolvers_are_object_safe() {
    let chain: Vec<Box<dyn Resolver>> = vec![
        Box::new(TableResolver::try_new().expect("bundled dataset parses")),
        Box::new(NullResolver),
    ];
    let answer = chain.iter().find_map(|r| r.uti_for_suffix("png"));
    assert_eq!(answer.as_deref(), Some("public.png"));
}
