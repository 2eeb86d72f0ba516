// src/utils/html/dom.rs

//! Thin adapter over `html5ever` and `markup5ever_rcdom`.
//!
//! Parses a fragment in `<body>` context into an `RcDom`, and exposes the
//! handful of tree edits the engine needs: taking and reinstalling child
//! lists, attribute filtering and serialization of the fragment root's
//! children.

use std::rc::Rc;

use html5ever::driver::{ParseOpts, parse_fragment};
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::error::AppError;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A parsed fragment. Owns the whole tree; dropping it frees every node.
pub struct Fragment {
    _dom: RcDom,
    root: Handle,
}

impl Fragment {
    /// Parses `html` as the content of a `<body>` element.
    pub fn parse(html: &str) -> Result<Self, AppError> {
        let context = QualName::new(
            None,
            Namespace::from(HTML_NAMESPACE),
            LocalName::from("body"),
        );
        let dom =
            parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new()).one(html);

        // Fragment parsing puts a synthetic <html> root under the document.
        let root = dom
            .document
            .children
            .borrow()
            .iter()
            .find(|child| matches!(child.data, NodeData::Element { .. }))
            .cloned()
            .ok_or_else(|| {
                AppError::InternalServerError("fragment parse produced no root".to_string())
            })?;

        Ok(Self { _dom: dom, root })
    }

    pub fn root(&self) -> &Handle {
        &self.root
    }

    /// Serializes the children of the fragment root.
    pub fn to_html(&self) -> Result<String, AppError> {
        let mut bytes = Vec::new();
        let root: SerializableHandle = self.root.clone().into();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };

        serialize(&mut bytes, &root, opts)?;

        Ok(String::from_utf8(bytes)?)
    }
}

/// Detaches every child of `node` and returns them in order.
///
/// The detached nodes keep their own subtrees; their `parent` links are left
/// stale until they are handed to [`set_children`] or dropped.
pub fn take_children(node: &Handle) -> Vec<Handle> {
    node.children.take()
}

/// Installs `children` as the child list of `parent` in one assignment and
/// re-points each child's `parent` link.
pub fn set_children(parent: &Handle, children: Vec<Handle>) {
    for child in &children {
        child.parent.set(Some(Rc::downgrade(parent)));
    }
    *parent.children.borrow_mut() = children;
}

/// Lower-case local name of an HTML-namespace element.
///
/// Elements from foreign namespaces (SVG, MathML) return `None`.
pub fn html_tag_name(node: &Handle) -> Option<&str> {
    match node.data {
        NodeData::Element { ref name, .. } if &*name.ns == HTML_NAMESPACE => {
            Some(&*name.local)
        }
        _ => None,
    }
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

pub fn is_text(node: &Handle) -> bool {
    matches!(node.data, NodeData::Text { .. })
}

/// Keeps only un-namespaced attributes whose name is in `allowed`.
pub fn retain_attributes(node: &Handle, allowed: &[&str]) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        attrs.borrow_mut().retain(|attr| {
            attr.name.ns.is_empty() && allowed.iter().any(|name| *name == &*attr.name.local)
        });
    }
}

pub fn get_attribute(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

pub fn remove_attribute(node: &Handle, name: &str) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        attrs
            .borrow_mut()
            .retain(|attr| &*attr.name.local != name);
    }
}

/// Sets `name` to `value`, moving it to the end of the attribute list.
pub fn set_attribute(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        let mut attrs = attrs.borrow_mut();
        attrs.retain(|attr| &*attr.name.local != name);
        attrs.push(Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
            value: value.into(),
        });
    }
}
