//! Path-addressed reads and in-place writes on a [`Value`] tree.
//!
//! All writers mutate the containers reachable from `root` and hand back the
//! same root (a fresh object only when `root` was not a container), so callers
//! that need an untouched original must [`Value::deep_clone`] it first.

use std::sync::LazyLock;

use fancy_regex::Regex;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    fn array_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(key) => key.parse::<usize>().ok(),
        }
    }

    fn object_key(&self) -> String {
        match self {
            Self::Key(key) => key.clone(),
            Self::Index(index) => index.to_string(),
        }
    }
}

static SEGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]|[^.\[\]]+").expect("static regex"));

/// Splits `"a.b[0].c"` into `[Key(a), Key(b), Index(0), Key(c)]`.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    // the pattern has no backtracking constructs, so matching cannot fail
    for captures in SEGMENT_PATTERN.captures_iter(path).flatten() {
        let segment = match captures.get(1) {
            Some(index) => match index.as_str().parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Key(index.as_str().to_string()),
            },
            None => match captures.get(0) {
                Some(key) => PathSegment::Key(key.as_str().to_string()),
                None => continue,
            },
        };
        segments.push(segment);
    }
    segments
}

fn child(container: &Value, segment: &PathSegment) -> Value {
    match container {
        Value::Object(object) => object
            .borrow()
            .get_entry(&segment.object_key())
            .unwrap_or_default(),
        Value::Array(elements) => segment
            .array_index()
            .and_then(|index| elements.borrow().get(index).cloned())
            .unwrap_or_default(),
        _ => Value::Undefined,
    }
}

fn assign_child(container: &Value, segment: &PathSegment, value: Value) {
    match container {
        Value::Object(object) => object
            .borrow_mut()
            .set_entry(segment.object_key(), value),
        Value::Array(elements) => {
            let Some(index) = segment.array_index() else {
                return;
            };
            let mut elements = elements.borrow_mut();
            while elements.len() <= index {
                elements.push(Value::Undefined);
            }
            elements[index] = value;
        }
        _ => {}
    }
}

fn fits_segment(value: &Value, segment: &PathSegment) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(_) => segment.array_index().is_some(),
        _ => false,
    }
}

fn container_for(segment: &PathSegment) -> Value {
    match segment {
        PathSegment::Index(_) => Value::array(Vec::new()),
        PathSegment::Key(_) => Value::object(),
    }
}

/// Value at `path`, or `Undefined` when any segment is missing.
pub fn get(root: &Value, path: &str) -> Value {
    get_or(root, path, Value::Undefined)
}

/// Value at `path`, or `default` when any segment is missing or the value is
/// `Undefined`.
pub fn get_or(root: &Value, path: &str, default: Value) -> Value {
    let segments = parse_path(path);
    if segments.is_empty() {
        return default;
    }
    let mut current = root.clone();
    for segment in &segments {
        current = child(&current, segment);
        if current.is_undefined() {
            return default;
        }
    }
    current
}

/// Places `value` at `path`, creating intermediate containers and replacing
/// intermediate values that cannot hold the next segment.
pub fn set(root: &Value, path: &str, value: Value) -> Value {
    let segments = parse_path(path);
    let Some((last, parents)) = segments.split_last() else {
        return root.clone();
    };
    let root = match (root, segments.first()) {
        (Value::Object(_), _) => root.clone(),
        (Value::Array(_), Some(first)) if first.array_index().is_some() => root.clone(),
        _ => Value::object(),
    };

    let mut cursor = root.clone();
    for (position, segment) in parents.iter().enumerate() {
        let next_segment = parents.get(position + 1).unwrap_or(last);
        let existing = child(&cursor, segment);
        let next = if fits_segment(&existing, next_segment) {
            existing
        } else {
            let fresh = container_for(next_segment);
            assign_child(&cursor, segment, fresh.clone());
            fresh
        };
        cursor = next;
    }

    if fits_segment(&cursor, last) {
        assign_child(&cursor, last, value);
    }
    root
}

/// Removes the leaf at `path`; a no-op when its parent does not exist.
pub fn unset(root: &Value, path: &str) -> Value {
    let segments = parse_path(path);
    let Some((last, parents)) = segments.split_last() else {
        return root.clone();
    };

    let mut parent = root.clone();
    for segment in parents {
        parent = child(&parent, segment);
    }

    match &parent {
        Value::Object(object) => {
            object.borrow_mut().remove_entry(&last.object_key());
        }
        Value::Array(elements) => {
            if let Some(index) = last.array_index() {
                let mut elements = elements.borrow_mut();
                if index < elements.len() {
                    elements.remove(index);
                }
            }
        }
        _ => {}
    }
    root.clone()
}

/// `set(root, path, updater(get(root, path)))`.
pub fn update<F>(root: &Value, path: &str, updater: F) -> Value
where
    F: FnOnce(Value) -> Value,
{
    let current = get(root, path);
    set(root, path, updater(current))
}
