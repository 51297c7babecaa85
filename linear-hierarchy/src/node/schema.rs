//! Typed schema for hierarchy documents.
//!
//! A document is either a JSON array of root nodes or an object whose
//! `children` key holds them. Each node is an object:
//!
//! ```json
//! { "name": "Docs", "type": "static", "editable": true, "children": [] }
//! ```
//!
//! `name` is required. `type` defaults to `static`, `editable` to `false`,
//! `children` (absent or `null`) to an empty list. Any other key is rejected.

use log::debug;
use serde_json::{Map, Value};

use super::Node;
use crate::error::{HierarchyError, Result};

/// Keys recognised in a node object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Children,
    Name,
    Type,
    Editable,
}

impl NodeKey {
    pub const ALL: [NodeKey; 4] = [
        NodeKey::Children,
        NodeKey::Name,
        NodeKey::Type,
        NodeKey::Editable,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKey::Children => "children",
            NodeKey::Name => "name",
            NodeKey::Type => "type",
            NodeKey::Editable => "editable",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// Whether a node was supplied up front or created at navigation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    #[default]
    Static,
    Dynamic,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Static => "static",
            NodeKind::Dynamic => "dynamic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "static" => Some(NodeKind::Static),
            "dynamic" => Some(NodeKind::Dynamic),
            _ => None,
        }
    }
}

/// Parse and validate a hierarchy document, returning the root nodes.
pub fn parse_document(json: &str) -> Result<Vec<Node>> {
    let value: Value = serde_json::from_str(json)?;
    parse_value(&value)
}

/// Validate an already parsed hierarchy document.
pub fn parse_value(value: &Value) -> Result<Vec<Node>> {
    let roots = match value {
        Value::Array(items) => parse_list(items, "")?,
        Value::Object(map) => match map.get(NodeKey::Children.as_str()) {
            Some(Value::Array(items)) => parse_list(items, "")?,
            Some(_) => return Err(HierarchyError::malformed("$", "'children' must be an array")),
            None => return Err(HierarchyError::malformed("$", "missing 'children'")),
        },
        _ => {
            return Err(HierarchyError::malformed(
                "$",
                "document must be an array or an object",
            ));
        }
    };
    debug!("Parsed hierarchy document with {} root nodes", roots.len());
    Ok(roots)
}

fn parse_list(items: &[Value], parent: &str) -> Result<Vec<Node>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_node(item, &format!("{parent}[{i}]")))
        .collect()
}

fn parse_node(value: &Value, path: &str) -> Result<Node> {
    let Value::Object(map) = value else {
        return Err(HierarchyError::malformed(path, "node must be an object"));
    };

    if let Some(unknown) = map.keys().find(|k| NodeKey::parse(k).is_none()) {
        return Err(HierarchyError::malformed(
            path,
            format!("unknown key '{unknown}'"),
        ));
    }

    let name = match field(map, NodeKey::Name) {
        Some(Value::String(name)) => name.clone(),
        Some(_) => return Err(HierarchyError::malformed(path, "'name' must be a string")),
        None => return Err(HierarchyError::malformed(path, "missing 'name'")),
    };

    let kind = match field(map, NodeKey::Type) {
        Some(Value::String(value)) => {
            NodeKind::parse(value).ok_or_else(|| HierarchyError::UnknownNodeType {
                path: path.to_string(),
                value: value.clone(),
            })?
        }
        Some(_) => return Err(HierarchyError::malformed(path, "'type' must be a string")),
        None => NodeKind::default(),
    };

    let editable = match field(map, NodeKey::Editable) {
        Some(Value::Bool(editable)) => *editable,
        Some(_) => return Err(HierarchyError::malformed(path, "'editable' must be a boolean")),
        None => false,
    };

    let children = match field(map, NodeKey::Children) {
        Some(Value::Array(items)) => parse_list(items, &format!("{path}.children"))?,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(HierarchyError::malformed(path, "'children' must be an array")),
    };

    Ok(Node {
        name,
        kind,
        editable,
        children,
    })
}

fn field(map: &Map<String, Value>, key: NodeKey) -> Option<&Value> {
    map.get(key.as_str())
}
