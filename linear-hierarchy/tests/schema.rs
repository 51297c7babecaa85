use linear_hierarchy::{HierarchyError, Node, NodeKey, NodeKind, parse_document};

// =============================================================================
// Schema Constants
// =============================================================================

#[test]
fn test_node_keys_round_trip() {
    for key in NodeKey::ALL {
        assert_eq!(NodeKey::parse(key.as_str()), Some(key));
    }
    assert_eq!(NodeKey::Children.as_str(), "children");
    assert_eq!(NodeKey::Name.as_str(), "name");
    assert_eq!(NodeKey::Type.as_str(), "type");
    assert_eq!(NodeKey::Editable.as_str(), "editable");
    assert_eq!(NodeKey::parse("label"), None);
}

#[test]
fn test_node_kind_strings() {
    assert_eq!(NodeKind::parse("static"), Some(NodeKind::Static));
    assert_eq!(NodeKind::parse("dynamic"), Some(NodeKind::Dynamic));
    assert_eq!(NodeKind::parse("Dynamic"), None);
    assert_eq!(NodeKind::default(), NodeKind::Static);
}

// =============================================================================
// Valid Documents
// =============================================================================

#[test]
fn test_parse_nested_array_document() {
    let json = r#"[
        {
            "name": "Projects",
            "type": "static",
            "editable": true,
            "children": [
                { "name": "Alpha", "type": "dynamic" },
                { "name": "Beta", "children": null }
            ]
        },
        { "name": "Trash" }
    ]"#;

    let roots = parse_document(json).unwrap();

    assert_eq!(
        roots,
        vec![
            Node::new("Projects")
                .editable(true)
                .with_children(vec![Node::dynamic("Alpha"), Node::new("Beta")]),
            Node::new("Trash"),
        ]
    );
}

#[test]
fn test_parse_object_document() {
    let json = r#"{ "children": [ { "name": "Only" } ] }"#;
    let roots = parse_document(json).unwrap();
    assert_eq!(roots, vec![Node::new("Only")]);
}

#[test]
fn test_parse_empty_document() {
    assert!(parse_document("[]").unwrap().is_empty());
}

// =============================================================================
// Rejected Documents
// =============================================================================

#[test]
fn test_missing_name_reports_path() {
    let json = r#"[ { "name": "A", "children": [ { "name": "A1" }, { "type": "static" } ] } ]"#;

    let err = parse_document(json).unwrap_err();

    match err {
        HierarchyError::MalformedNode { path, reason } => {
            assert_eq!(path, "[0].children[1]");
            assert!(reason.contains("name"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_type_is_rejected() {
    let err = parse_document(r#"[ { "name": "A", "type": "virtual" } ]"#).unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::UnknownNodeType { ref path, ref value }
            if path == "[0]" && value == "virtual"
    ));
    assert!(err.is_configuration());
}

#[test]
fn test_unknown_key_is_rejected() {
    let err = parse_document(r#"[ { "name": "A", "icon": "folder" } ]"#).unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::MalformedNode { ref reason, .. } if reason.contains("icon")
    ));
}

#[test]
fn test_wrong_value_types_are_rejected() {
    for json in [
        r#"[ { "name": 3 } ]"#,
        r#"[ { "name": "A", "editable": "yes" } ]"#,
        r#"[ { "name": "A", "children": {} } ]"#,
        r#"[ { "name": "A", "type": 1 } ]"#,
        r#"[ "A" ]"#,
        r#"{ "name": "A" }"#,
        r#""A""#,
    ] {
        let err = parse_document(json).unwrap_err();
        assert!(
            matches!(err, HierarchyError::MalformedNode { .. }),
            "{json} gave {err}"
        );
    }
}

#[test]
fn test_invalid_json_is_rejected() {
    let err = parse_document("[ { \"name\": ").unwrap_err();
    assert!(matches!(err, HierarchyError::Json(_)));
    assert!(err.is_configuration());
}

// =============================================================================
// Node Builders
// =============================================================================

#[test]
fn test_node_builders() {
    let node = Node::new("A").editable(true).with_children(vec![Node::dynamic("B")]);
    assert!(!node.is_leaf());
    assert!(!node.is_dynamic());
    assert!(node.editable);
    assert!(node.children[0].is_leaf());
    assert!(node.children[0].is_dynamic());
}
