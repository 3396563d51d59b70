//! Data paths for controls nested in named fieldsets.
//!
//! A fieldset's resolved path is cached on its descendants as a marker
//! attribute so that [`get_path`] never walks ancestors. [`annotate_form`]
//! rebuilds every marker under a form; the snapshot reader and writer call it
//! before each scan, so controls moved between fieldsets pick up their new
//! path on the next read or write.

use log::{debug, trace};

use crate::dom::{Dom, NodeId};
use crate::form_controls::{is_fieldset_element, is_form_control};
use crate::{Error, Result};

/// Resolved path of the nearest named fieldset ancestor.
pub const FIELDSET_ATTR: &str = "data-felte-fieldset";
/// `"true"` when removing the control should delete its data entry.
pub const UNSET_ON_REMOVE_ATTR: &str = "data-felte-unset-on-remove";
/// Present when [`UNSET_ON_REMOVE_ATTR`] was copied down from a fieldset
/// rather than written on the element itself.
pub const INHERITED_UNSET_ATTR: &str = "data-felte-unset-on-remove-inherited";

/// The control's `name`, prefixed by its fieldset marker when one is set.
pub fn get_path(dom: &Dom, control: NodeId) -> String {
    let name = dom.name(control);
    let path = match dom.attr(control, FIELDSET_ATTR) {
        Some(fieldset) if !fieldset.is_empty() => format!("{fieldset}.{name}"),
        _ => name,
    };
    trace!("resolved control path {path:?}");
    path
}

/// The fieldset's own marker joined with its `name`; `None` when it has
/// neither.
pub fn fieldset_path(dom: &Dom, fieldset: NodeId) -> Option<String> {
    let inherited = dom
        .attr(fieldset, FIELDSET_ATTR)
        .filter(|path| !path.is_empty());
    let name = Some(dom.name(fieldset)).filter(|name| !name.is_empty());
    match (inherited, name) {
        (Some(inherited), Some(name)) => Some(format!("{inherited}.{name}")),
        (Some(path), None) | (None, Some(path)) => Some(path),
        (None, None) => None,
    }
}

pub fn is_unset_on_remove(dom: &Dom, control: NodeId) -> bool {
    dom.attr(control, UNSET_ON_REMOVE_ATTR).as_deref() == Some("true")
}

/// Writes the fieldset's resolved path, and its unset-on-remove flag when
/// set, onto every descendant control and fieldset.
pub fn add_attrs_from_fieldset(dom: &mut Dom, fieldset: NodeId) -> Result<()> {
    if !is_fieldset_element(dom, fieldset) {
        return Err(Error::TypeMismatch {
            expected: "fieldset".into(),
            actual: dom.tag_name(fieldset).unwrap_or("#node").to_string(),
        });
    }

    let path = fieldset_path(dom, fieldset);
    let unset_on_remove = is_unset_on_remove(dom, fieldset);
    let targets = dom
        .descendant_elements(fieldset)
        .into_iter()
        .filter(|node| is_form_control(dom, *node) || is_fieldset_element(dom, *node))
        .collect::<Vec<_>>();

    for node in &targets {
        if let Some(path) = &path {
            dom.set_attr(*node, FIELDSET_ATTR, path)?;
        }
        if unset_on_remove && !dom.has_attr(*node, UNSET_ON_REMOVE_ATTR) {
            dom.set_attr(*node, UNSET_ON_REMOVE_ATTR, "true")?;
            dom.set_attr(*node, INHERITED_UNSET_ATTR, "")?;
        }
    }
    debug!(
        "fieldset {:?} annotated {} descendants",
        path.as_deref().unwrap_or(""),
        targets.len()
    );
    Ok(())
}

/// Clears every fieldset marker and inherited unset flag under `form`, then
/// re-annotates its fieldsets outer to inner. Flags written on an element
/// itself are kept.
pub fn annotate_form(dom: &mut Dom, form: NodeId) -> Result<()> {
    let elements = dom.descendant_elements(form);
    for node in &elements {
        if !(is_form_control(dom, *node) || is_fieldset_element(dom, *node)) {
            continue;
        }
        if dom.has_attr(*node, FIELDSET_ATTR) {
            dom.remove_attr(*node, FIELDSET_ATTR)?;
        }
        if dom.has_attr(*node, INHERITED_UNSET_ATTR) {
            dom.remove_attr(*node, UNSET_ON_REMOVE_ATTR)?;
            dom.remove_attr(*node, INHERITED_UNSET_ATTR)?;
        }
    }
    for node in elements {
        if is_fieldset_element(dom, node) {
            add_attrs_from_fieldset(dom, node)?;
        }
    }
    Ok(())
}
