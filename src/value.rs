use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A file attached to a `<input type="file">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// A node of the nested form data tree.
///
/// `Array` and `Object` are shared containers: cloning a `Value` clones the
/// handle, not the contents, so writes through one clone are visible through
/// every other. Use [`Value::deep_clone`] for an independent copy.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    File(FileHandle),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<ObjectValue>>),
}

#[derive(Debug, Clone, Default)]
pub struct ObjectValue {
    entries: Vec<(String, Value)>,
    index_by_key: HashMap<String, usize>,
}

impl ObjectValue {
    pub fn new(entries: Vec<(String, Value)>) -> Self {
        let mut value = Self::default();
        for (key, entry_value) in entries {
            value.set_entry(key, entry_value);
        }
        value
    }

    pub fn set_entry(&mut self, key: String, value: Value) {
        if let Some(index) = self.index_by_key.get(&key).copied() {
            if let Some((_, existing)) = self.entries.get_mut(index) {
                *existing = value;
                return;
            }
        }
        let index = self.entries.len();
        self.entries.push((key.clone(), value));
        self.index_by_key.insert(key, index);
    }

    pub fn get_entry(&self, key: &str) -> Option<Value> {
        self.index_by_key
            .get(key)
            .and_then(|index| self.entries.get(*index))
            .map(|(_, value)| value.clone())
    }

    pub fn remove_entry(&mut self, key: &str) -> Option<Value> {
        let index = self.index_by_key.remove(key)?;
        let (_, removed) = self.entries.remove(index);
        for slot in self.index_by_key.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index_by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

// Keys holding `Undefined` count as absent and key order is ignored.
impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        let defined = |object: &ObjectValue| {
            object
                .entries
                .iter()
                .filter(|(_, value)| !value.is_undefined())
                .count()
        };
        if defined(self) != defined(other) {
            return false;
        }
        self.entries
            .iter()
            .filter(|(_, value)| !value.is_undefined())
            .all(|(key, value)| other.get_entry(key).is_some_and(|theirs| theirs == *value))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::File(a), Self::File(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => false,
        }
    }
}

impl Value {
    pub fn object() -> Self {
        Self::Object(Rc::new(RefCell::new(ObjectValue::default())))
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self::Object(Rc::new(RefCell::new(ObjectValue::new(entries))))
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Self::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Elements of an array value, cloned out of the shared container.
    pub fn array_elements(&self) -> Option<Vec<Value>> {
        match self {
            Self::Array(elements) => Some(elements.borrow().clone()),
            _ => None,
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::String(value) => !value.is_empty(),
            Self::File(_) | Self::Array(_) | Self::Object(_) => true,
        }
    }

    /// True when both values are the same shared container.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Copies the whole tree so that no container is shared with `self`.
    pub fn deep_clone(&self) -> Value {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || match self {
            Self::Array(elements) => Self::array(
                elements
                    .borrow()
                    .iter()
                    .map(Value::deep_clone)
                    .collect(),
            ),
            Self::Object(object) => Self::from_entries(
                object
                    .borrow()
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.deep_clone())),
            ),
            other => other.clone(),
        })
    }

    /// String form used when a value is written into a text-like control.
    pub fn as_form_string(&self) -> String {
        match self {
            Self::Undefined | Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::String(value) => value.clone(),
            Self::File(file) => file.name.clone(),
            Self::Array(elements) => elements
                .borrow()
                .iter()
                .map(Value::as_form_string)
                .collect::<Vec<_>>()
                .join(","),
            Self::Object(_) => "[object Object]".to_string(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::File(_) => "file",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    value.to_string()
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<FileHandle> for Value {
    fn from(value: FileHandle) -> Self {
        Self::File(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::array(value)
    }
}
