//! Form state helpers for DOM forms.
//!
//! Two halves live here. The data half addresses a nested [`Value`] tree with
//! dotted path strings ([`get`], [`set`], [`unset`], [`update`]) and maps or
//! queries every leaf of it ([`deep_set`], [`deep_some`]). The DOM half works on
//! an in-memory [`Dom`]: it discovers the form controls of a form, resolves each
//! control's data path through its enclosing named fieldsets, reads a default
//! value snapshot out of the form and writes a data snapshot back onto it.
//!
//! ```
//! use form_state_dom::{Dom, Value, get, get_form_default_values, set_form};
//!
//! let mut dom = Dom::parse_html(
//!     r#"<form id='signup'>
//!          <fieldset name='account'>
//!            <input name='email' type='email'>
//!            <input name='newsletter' type='checkbox'>
//!          </fieldset>
//!        </form>"#,
//! )?;
//! let form = dom.by_id("signup").expect("form");
//!
//! let data = Value::from_entries([(
//!     "account",
//!     Value::from_entries([
//!         ("email", Value::from("ada@example.com")),
//!         ("newsletter", Value::from(true)),
//!     ]),
//! )]);
//! set_form(&mut dom, form, &data)?;
//!
//! let snapshot = get_form_default_values(&mut dom, form)?;
//! assert_eq!(snapshot.default_data, data);
//! assert_eq!(get(&snapshot.default_touched, "account.email"), Value::Bool(false));
//! # Ok::<(), form_state_dom::Error>(())
//! ```

use std::error::Error as StdError;
use std::fmt;

mod deep;
mod dom;
mod fieldset;
mod form_controls;
mod path;
mod snapshot;
mod value;

pub use deep::{deep_set, deep_some, is_plain_object, map_values, some};
pub use dom::{Dom, NodeId, NodeKind};
pub use fieldset::{
    FIELDSET_ATTR, INHERITED_UNSET_ATTR, UNSET_ON_REMOVE_ATTR, add_attrs_from_fieldset,
    annotate_form, fieldset_path, get_path, is_unset_on_remove,
};
pub use form_controls::{
    ControlKind, control_kind, get_form_controls, is_action_control, is_checkbox_input,
    is_element, is_fieldset_element, is_file_input, is_form_control, is_input_element,
    is_radio_input, is_select_element, is_textarea_element,
};
pub use path::{PathSegment, get, get_or, parse_path, set, unset, update};
pub use snapshot::{
    FormDefaults, get_control_value, get_form_default_values, set_control_value, set_form,
};
pub use value::{FileHandle, ObjectValue, Value};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    InvalidNode(String),
    DomMutation(String),
    TypeMismatch { expected: String, actual: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::InvalidNode(msg) => write!(f, "invalid node: {msg}"),
            Self::DomMutation(msg) => write!(f, "dom mutation error: {msg}"),
            Self::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {expected}, actual {actual}")
            }
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests;
