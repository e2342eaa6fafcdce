//! Unit tests for document loading and JSON conversion

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {

    use serde_json::json;
    use values_checker::document::{Node, NodeKind, Tag, parse_mapping, parse_str};

    fn parse(source: &str) -> Node {
        parse_str(source).unwrap().unwrap()
    }

    #[test]
    fn scalar_tags_and_lines() {
        let root = parse("name: web\ncount: 3\nratio: 0.5\nenabled: true\nnothing: null\ntilde: ~\nempty:\nquoted: \"42\"\nblock: |\n  text\n");
        let tags: Vec<(&str, &Tag, usize)> = root
            .entries()
            .iter()
            .map(|e| (e.key.as_str(), &e.value.tag, e.line))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("name", &Tag::Str, 1),
                ("count", &Tag::Int, 2),
                ("ratio", &Tag::Float, 3),
                ("enabled", &Tag::Bool, 4),
                ("nothing", &Tag::Null, 5),
                ("tilde", &Tag::Null, 6),
                ("empty", &Tag::Null, 7),
                ("quoted", &Tag::Str, 8),
                ("block", &Tag::Str, 9),
            ]
        );
    }

    #[test]
    fn yaml_1_1_booleans_are_strings() {
        let root = parse("a: yes\nb: off\nc: True\n");
        assert_eq!(root.get("a").unwrap().tag, Tag::Str);
        assert_eq!(root.get("b").unwrap().tag, Tag::Str);
        assert_eq!(root.get("c").unwrap().tag, Tag::Bool);
    }

    #[test]
    fn explicit_and_custom_tags() {
        let root = parse("a: !!str 42\nb: !!int \"7\"\nc: !vault secret/db\n");
        assert_eq!(root.get("a").unwrap().tag, Tag::Str);
        assert_eq!(root.get("b").unwrap().tag, Tag::Int);
        assert_eq!(root.get("c").unwrap().tag, Tag::Custom("!vault".to_owned()));
    }

    #[test]
    fn containers() {
        let root = parse("list:\n  - a\n  - b\nmap:\n  key: value\nflow: {x: 1}\n");
        let list = root.get("list").unwrap();
        assert!(list.is_sequence());
        assert_eq!(list.tag, Tag::Seq);
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.items()[1].literal(), Some("b"));
        assert_eq!(list.items()[1].line, 3);

        let map = root.get("map").unwrap();
        assert!(map.is_mapping());
        assert_eq!(map.tag, Tag::Map);
        assert_eq!(map.entry("key").unwrap().line, 5);

        assert_eq!(root.get("flow").unwrap().get("x").unwrap().tag, Tag::Int);
    }

    #[test]
    fn empty_document() {
        assert!(parse_str("").unwrap().is_none());
        assert!(parse_str("# only a comment\n").unwrap().is_none());
        assert!(parse_mapping("", "values.yaml").unwrap().entries().is_empty());
    }

    #[test]
    fn only_the_first_document_is_read() {
        let root = parse("a: 1\n---\nb: 2\n");
        assert!(root.get("a").is_some());
        assert!(root.get("b").is_none());
    }

    #[test]
    fn non_mapping_root_rejected_by_parse_mapping() {
        let err = parse_mapping("- a\n- b\n", "values.yaml").unwrap_err();
        assert!(err.to_string().contains("expected a YAML mapping"));
        assert!(parse_mapping("just text", "values.yaml").is_err());
    }

    #[test]
    fn invalid_yaml() {
        let err = parse_str("a: [1, 2\n").unwrap_err();
        assert!(err.to_string().starts_with("Document error:"));
    }

    #[test]
    fn duplicate_keys_rejected() {
        let err = parse_str("a: 1\nb: 2\na: 3\n").unwrap_err();
        assert!(err.to_string().contains("already defined"));
    }

    #[test]
    fn non_scalar_keys_rejected() {
        let err = parse_str("? [a, b]\n: value\n").unwrap_err();
        assert!(err.to_string().contains("keys must be scalars"));
    }

    #[test]
    fn aliases_are_resolved() {
        let root = parse("base: &base\n  port: 80\n  host: web\ncopy: *base\nname: &n web\nother: *n\n");
        assert_eq!(root.get("copy").unwrap().get("port").unwrap().literal(), Some("80"));
        assert_eq!(root.get("other").unwrap().literal(), Some("web"));
    }

    #[test]
    fn self_referencing_alias_is_an_error() {
        assert!(parse_str("a: &x\n  b: *x\n").is_err());
    }

    #[test]
    fn nested_alias_expansion_is_bounded() {
        let mut source = String::from("a0: &a0 [x, x, x, x, x, x, x, x, x, x]\n");
        for level in 1..=7 {
            let previous = format!("*a{}", level - 1);
            let items = vec![previous.as_str(); 10].join(", ");
            source.push_str(&format!("a{level}: &a{level} [{items}]\n"));
        }

        let err = parse_str(&source).unwrap_err();
        assert!(err.to_string().contains("excessive aliasing"));
    }

    #[test]
    fn repeated_small_aliases_are_accepted() {
        let mut source = String::from("base: &base\n  x: 1\n");
        for index in 0..200 {
            source.push_str(&format!("k{index}: *base\n"));
        }

        let root = parse(&source);
        assert_eq!(root.entries().len(), 201);
        assert_eq!(root.get("k199").unwrap().get("x").unwrap().literal(), Some("1"));
    }

    #[test]
    fn merge_keys_are_expanded() {
        let root = parse(
            "defaults: &defaults\n  port: 80\n  host: web\nextra: &extra\n  tls: true\nservice:\n  <<: [*defaults, *extra]\n  port: 8080\n",
        );
        let service = root.get("service").unwrap();
        let keys: Vec<&str> = service.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["port", "host", "tls"]);
        assert_eq!(service.get("port").unwrap().literal(), Some("8080"));
    }

    #[test]
    fn merge_key_with_scalar_value_rejected() {
        assert!(parse_str("a:\n  <<: 1\n").is_err());
    }

    #[test]
    fn to_json_conversion() {
        let root = parse("name: web\ncount: 3\nhex: 0x1F\nratio: 0.5\non: true\nnone: ~\nlist: [1, two]\nnested:\n  key: value\ncustom: !vault x\n");
        assert_eq!(
            root.to_json().unwrap(),
            json!({
                "name": "web",
                "count": 3,
                "hex": 31,
                "ratio": 0.5,
                "on": true,
                "none": null,
                "list": [1, "two"],
                "nested": {"key": "value"},
                "custom": "x"
            })
        );
    }

    #[test]
    fn to_json_rejects_unrepresentable_numbers() {
        let root = parse("big: 123456789012345678901234567890\n");
        let err = root.to_json().unwrap_err();
        assert!(err.to_string().starts_with("Conversion error:"));

        let root = parse("inf: .inf\n");
        assert!(root.to_json().is_err());
    }

    #[test]
    fn node_kind_names() {
        let root = parse("a: 1\nb: [1]\nc: {}\n");
        assert_eq!(root.get("a").unwrap().kind_name(), "scalar");
        assert_eq!(root.get("b").unwrap().kind_name(), "sequence");
        assert!(matches!(root.get("c").unwrap().kind, NodeKind::Mapping(ref e) if e.is_empty()));
    }
}
