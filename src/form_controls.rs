//! Tag-identity predicates for form controls and the form control scanner.
//!
//! Every check looks at the element's tag name and `type` attribute only, never
//! at how the element was created.

use crate::dom::{Dom, NodeId, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Text,
    Number,
    Checkbox,
    Radio,
    File,
    Select,
    SelectMultiple,
    TextArea,
}

fn has_tag(dom: &Dom, node_id: NodeId, tag: &str) -> bool {
    dom.tag_name(node_id)
        .map(|name| name.eq_ignore_ascii_case(tag))
        .unwrap_or(false)
}

fn has_input_type(dom: &Dom, node_id: NodeId, kind: &str) -> bool {
    dom.input_type(node_id).as_deref() == Some(kind)
}

pub fn is_fieldset_element(dom: &Dom, node_id: NodeId) -> bool {
    has_tag(dom, node_id, "fieldset")
}

pub fn is_input_element(dom: &Dom, node_id: NodeId) -> bool {
    has_tag(dom, node_id, "input")
}

pub fn is_select_element(dom: &Dom, node_id: NodeId) -> bool {
    has_tag(dom, node_id, "select")
}

pub fn is_textarea_element(dom: &Dom, node_id: NodeId) -> bool {
    has_tag(dom, node_id, "textarea")
}

/// `input`, `select` or `textarea`.
pub fn is_form_control(dom: &Dom, node_id: NodeId) -> bool {
    is_input_element(dom, node_id)
        || is_select_element(dom, node_id)
        || is_textarea_element(dom, node_id)
}

/// An element node (not text, comment or document) that is a form control.
pub fn is_element(dom: &Dom, node_id: NodeId) -> bool {
    dom.kind(node_id) == Some(NodeKind::Element) && is_form_control(dom, node_id)
}

pub fn is_checkbox_input(dom: &Dom, node_id: NodeId) -> bool {
    has_input_type(dom, node_id, "checkbox")
}

pub fn is_radio_input(dom: &Dom, node_id: NodeId) -> bool {
    has_input_type(dom, node_id, "radio")
}

pub fn is_file_input(dom: &Dom, node_id: NodeId) -> bool {
    has_input_type(dom, node_id, "file")
}

/// Submit, reset and plain buttons, whether `<input>` or `<button>`.
pub fn is_action_control(dom: &Dom, node_id: NodeId) -> bool {
    if has_tag(dom, node_id, "button") {
        return true;
    }
    matches!(
        dom.input_type(node_id).as_deref(),
        Some("submit") | Some("button") | Some("reset")
    )
}

pub fn control_kind(dom: &Dom, node_id: NodeId) -> Option<ControlKind> {
    if is_select_element(dom, node_id) {
        return Some(if dom.multiple(node_id) {
            ControlKind::SelectMultiple
        } else {
            ControlKind::Select
        });
    }
    if is_textarea_element(dom, node_id) {
        return Some(ControlKind::TextArea);
    }
    let kind = match dom.input_type(node_id)?.as_str() {
        "checkbox" => ControlKind::Checkbox,
        "radio" => ControlKind::Radio,
        "file" => ControlKind::File,
        "number" | "range" => ControlKind::Number,
        _ => ControlKind::Text,
    };
    Some(kind)
}

/// Data-bearing controls under `form`, in document order.
pub fn get_form_controls(dom: &Dom, form: NodeId) -> Vec<NodeId> {
    dom.descendant_elements(form)
        .into_iter()
        .filter(|node| is_form_control(dom, *node) && !is_action_control(dom, *node))
        .collect()
}
