//! Mutable DOM helpers over `markup5ever_rcdom`.
//!
//! Handles are `Rc`-based and therefore `!Send`: parse, mutate and serialize inside
//! one synchronous call and only hand `String`s across `.await` points.

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::{
    LocalName, Namespace, QualName, parse_document,
    serialize::{SerializeOpts, TraversalScope, serialize},
    tendril::{StrTendril, TendrilSink},
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::errors::Result;

/// Parses `content` as a full HTML5 document. Missing `html`/`head`/`body` are synthesized.
pub fn parse(content: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(content)
}

/// Serializes the children of `node`, but not `node` itself.
pub fn inner_html(node: &Handle) -> Result<String> {
    serialize_with(node, TraversalScope::ChildrenOnly(None))
}

/// Serializes `node` including its own tag.
pub fn outer_html(node: &Handle) -> Result<String> {
    serialize_with(node, TraversalScope::IncludeNode)
}

fn serialize_with(node: &Handle, traversal_scope: TraversalScope) -> Result<String> {
    let handle: SerializableHandle = node.clone().into();
    let mut output: Vec<u8> = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    serialize(&mut output, &handle, opts)?;
    Ok(String::from_utf8(output)?)
}

pub fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn is_element(node: &Handle, tag: &str) -> bool {
    tag_name(node).is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Sets (or adds) an attribute on an element. No-op for non-elements.
pub fn set_attr(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|a| &*a.name.local == name) {
            Some(existing) => existing.value = StrTendril::from(value),
            None => attrs.push(html5ever::Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                value: StrTendril::from(value),
            }),
        }
    }
}

pub fn remove_attr(node: &Handle, name: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        attrs.borrow_mut().retain(|a| &*a.name.local != name);
    }
}

pub fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class").is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

/// Drops `class` from the element's class list, removing the attribute once it is empty.
pub fn remove_class(node: &Handle, class: &str) {
    let Some(classes) = attr(node, "class") else {
        return;
    };
    let remaining: Vec<&str> = classes.split_whitespace().filter(|c| *c != class).collect();
    if remaining.is_empty() {
        remove_attr(node, "class");
    } else {
        set_attr(node, "class", &remaining.join(" "));
    }
}

/// All nodes below `root` in document order, `root` excluded.
pub fn descendants(root: &Handle) -> Vec<Handle> {
    let mut found = Vec::new();
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().rev().cloned());
        found.push(node);
    }
    found
}

pub fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

pub fn elements_by_tag(root: &Handle, tag: &str) -> Vec<Handle> {
    descendants(root).into_iter().filter(|n| is_element(n, tag)).collect()
}

pub fn elements_by_class(root: &Handle, class: &str) -> Vec<Handle> {
    descendants(root).into_iter().filter(|n| has_class(n, class)).collect()
}

/// Depth-first search including `root` itself.
pub fn first_by_class(root: &Handle, class: &str) -> Option<Handle> {
    if has_class(root, class) {
        return Some(root.clone());
    }
    descendants(root).into_iter().find(|n| has_class(n, class))
}

pub fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

/// Closest ancestor with the given tag, not looking past `boundary`.
pub fn ancestor_by_tag(node: &Handle, tag: &str, boundary: &Handle) -> Option<Handle> {
    let mut current = parent(node);
    while let Some(candidate) = current {
        if is_element(&candidate, tag) {
            return Some(candidate);
        }
        if Rc::ptr_eq(&candidate, boundary) {
            return None;
        }
        current = parent(&candidate);
    }
    None
}

/// Detaches `node` from its parent. Detached nodes are left alone.
pub fn remove(node: &Handle) {
    if let Some(weak) = node.parent.take()
        && let Some(parent) = weak.upgrade()
    {
        parent.children.borrow_mut().retain(|child| !Rc::ptr_eq(child, node));
    }
}

/// Concatenated text of every text node below `node`.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    for descendant in descendants(node) {
        if let NodeData::Text { contents } = &descendant.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}

/// Replaces every child of `node` with the single text `value` (reusing the first text child).
pub fn set_text(node: &Handle, value: &str) {
    let children = node.children.borrow().clone();
    let text_child = children.iter().find(|c| matches!(c.data, NodeData::Text { .. })).cloned();
    for child in children.iter() {
        if text_child.as_ref().is_none_or(|t| !Rc::ptr_eq(t, child)) {
            remove(child);
        }
    }
    match text_child {
        Some(text_child) => {
            if let NodeData::Text { contents } = &text_child.data {
                *contents.borrow_mut() = StrTendril::from(value);
            }
        }
        None => {
            let text = Node::new(NodeData::Text {
                contents: RefCell::new(StrTendril::from(value)),
            });
            text.parent.set(Some(Rc::downgrade(node)));
            node.children.borrow_mut().push(text);
        }
    }
}

pub fn remove_comments(root: &Handle) {
    for node in descendants(root) {
        if matches!(node.data, NodeData::Comment { .. }) {
            remove(&node);
        }
    }
}
