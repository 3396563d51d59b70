//! Reading a data snapshot out of a form and writing one back.

use std::collections::HashSet;

use log::{debug, trace};

use crate::deep::deep_set;
use crate::dom::{Dom, NodeId};
use crate::fieldset::{annotate_form, get_path, is_unset_on_remove};
use crate::form_controls::{ControlKind, control_kind, get_form_controls};
use crate::path::{get, set};
use crate::value::Value;
use crate::Result;

/// Result of [`get_form_default_values`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormDefaults {
    /// Nested field values keyed by control path.
    pub default_data: Value,
    /// Same shape as `default_data` with every leaf `false`.
    pub default_touched: Value,
    /// Paths of controls flagged unset-on-remove, in document order.
    pub unset_on_remove: Vec<String>,
}

fn number_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Undefined;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Value::Number(number),
        _ => Value::Undefined,
    }
}

/// Typed value of a single control, ignoring any group it belongs to.
pub fn get_control_value(dom: &Dom, control: NodeId) -> Result<Value> {
    let Some(kind) = control_kind(dom, control) else {
        return Ok(Value::Undefined);
    };
    let value = match kind {
        ControlKind::Checkbox => Value::Bool(dom.checked(control)?),
        ControlKind::Radio => {
            if dom.checked(control)? {
                Value::String(dom.value(control)?)
            } else {
                Value::Undefined
            }
        }
        ControlKind::File => {
            let files = dom.files(control)?;
            if dom.multiple(control) {
                Value::array(files.into_iter().map(Value::File).collect())
            } else {
                files.into_iter().next().map(Value::File).unwrap_or_default()
            }
        }
        ControlKind::SelectMultiple => Value::array(
            dom.selected_values(control)?
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
        ControlKind::Number => number_value(&dom.value(control)?),
        ControlKind::Text | ControlKind::Select | ControlKind::TextArea => {
            Value::String(dom.value(control)?)
        }
    };
    Ok(value)
}

fn group_members(
    dom: &Dom,
    controls: &[NodeId],
    kind: ControlKind,
    path: &str,
) -> Vec<NodeId> {
    controls
        .iter()
        .copied()
        .filter(|node| control_kind(dom, *node) == Some(kind) && get_path(dom, *node) == path)
        .collect()
}

/// Reads the current state of every named control under `form` into a
/// nested mapping.
pub fn get_form_default_values(dom: &mut Dom, form: NodeId) -> Result<FormDefaults> {
    annotate_form(dom, form)?;
    let dom = &*dom;
    let controls = get_form_controls(dom, form);

    let default_data = Value::object();
    let mut grouped = HashSet::new();
    let mut unset_on_remove = Vec::new();

    for control in &controls {
        if dom.name(*control).is_empty() {
            continue;
        }
        let Some(kind) = control_kind(dom, *control) else {
            continue;
        };
        let path = get_path(dom, *control);
        if is_unset_on_remove(dom, *control) && !unset_on_remove.contains(&path) {
            unset_on_remove.push(path.clone());
        }

        let value = match kind {
            ControlKind::Checkbox | ControlKind::Radio => {
                if !grouped.insert((kind, path.clone())) {
                    continue;
                }
                let members = group_members(dom, &controls, kind, &path);
                group_value(dom, kind, &members, *control)?
            }
            _ => get_control_value(dom, *control)?,
        };
        trace!("read {path:?} as {}", value.type_name());
        set(&default_data, &path, value);
    }

    debug!(
        "read {} controls into form snapshot ({} grouped fields)",
        controls.len(),
        grouped.len()
    );
    let default_touched = deep_set(&default_data, &Value::Bool(false));
    Ok(FormDefaults {
        default_data,
        default_touched,
        unset_on_remove,
    })
}

fn group_value(
    dom: &Dom,
    kind: ControlKind,
    members: &[NodeId],
    control: NodeId,
) -> Result<Value> {
    if kind == ControlKind::Radio {
        for member in members {
            if dom.checked(*member)? {
                return Ok(Value::String(dom.value(*member)?));
            }
        }
        return Ok(Value::Undefined);
    }

    if members.len() <= 1 {
        return get_control_value(dom, control);
    }
    let mut checked = Vec::new();
    for member in members {
        if dom.checked(*member)? {
            checked.push(Value::String(dom.value(*member)?));
        }
    }
    Ok(Value::array(checked))
}

/// Applies `value` to a single control according to its kind.
pub fn set_control_value(dom: &mut Dom, control: NodeId, value: &Value) -> Result<()> {
    let Some(kind) = control_kind(dom, control) else {
        return Ok(());
    };
    match kind {
        ControlKind::Checkbox => match value {
            Value::Undefined | Value::Bool(_) => dom.set_checked(control, value.truthy()),
            Value::Array(elements) => {
                let own = dom.value(control)?;
                let checked = elements
                    .borrow()
                    .iter()
                    .any(|element| element.as_form_string() == own);
                dom.set_checked(control, checked)
            }
            _ => Ok(()),
        },
        ControlKind::Radio => {
            let checked = !value.is_nullish() && value.as_form_string() == dom.value(control)?;
            dom.set_checked(control, checked)
        }
        ControlKind::File => {
            let clears = match value {
                Value::Undefined | Value::Null => true,
                Value::Array(elements) => elements.borrow().is_empty(),
                _ => false,
            };
            if clears {
                dom.clear_files(control)?;
            }
            Ok(())
        }
        ControlKind::SelectMultiple => {
            let Some(wanted) = value.array_elements() else {
                return Ok(());
            };
            let wanted = wanted
                .iter()
                .map(Value::as_form_string)
                .collect::<Vec<_>>();
            for option in dom.select_options(control) {
                let selected = wanted.contains(&dom.option_value(option)?);
                dom.set_option_selected(option, selected)?;
            }
            Ok(())
        }
        ControlKind::Text | ControlKind::Number | ControlKind::Select | ControlKind::TextArea => {
            dom.set_value(control, &value.as_form_string())
        }
    }
}

/// Writes `data` onto every named control under `form`.
pub fn set_form(dom: &mut Dom, form: NodeId, data: &Value) -> Result<()> {
    annotate_form(dom, form)?;
    let controls = get_form_controls(dom, form);
    let mut written = 0usize;
    for control in controls {
        if dom.name(control).is_empty() {
            continue;
        }
        let path = get_path(dom, control);
        let value = get(data, &path);
        trace!("write {path:?} from {}", value.type_name());
        set_control_value(dom, control, &value)?;
        written += 1;
    }
    debug!("wrote form snapshot onto {written} controls");
    Ok(())
}
