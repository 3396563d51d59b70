use crate::value::Value;

/// True only for key-value mappings; arrays, files and scalars are leaves.
pub fn is_plain_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// True when any top-level value of `object` satisfies `predicate`.
pub fn some<P>(object: &Value, mut predicate: P) -> bool
where
    P: FnMut(&Value) -> bool,
{
    let Value::Object(object) = object else {
        return false;
    };
    object.borrow().iter().any(|(_, value)| predicate(value))
}

/// A new mapping with `mapper` applied to every top-level value.
pub fn map_values<F>(object: &Value, mut mapper: F) -> Value
where
    F: FnMut(&Value) -> Value,
{
    let Value::Object(object) = object else {
        return Value::object();
    };
    let mapped = object
        .borrow()
        .iter()
        .map(|(key, value)| (key.to_string(), mapper(value)))
        .collect::<Vec<_>>();
    Value::from_entries(mapped)
}

/// A new tree shaped like `root` with every leaf replaced by a copy of `value`.
pub fn deep_set(root: &Value, value: &Value) -> Value {
    stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
        if !is_plain_object(root) {
            return value.deep_clone();
        }
        map_values(root, |child| deep_set(child, value))
    })
}

/// True as soon as any leaf of `root` satisfies `predicate`, depth first.
pub fn deep_some<P>(root: &Value, mut predicate: P) -> bool
where
    P: FnMut(&Value) -> bool,
{
    deep_some_with(root, &mut predicate)
}

fn deep_some_with(root: &Value, predicate: &mut dyn FnMut(&Value) -> bool) -> bool {
    stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
        let Value::Object(object) = root else {
            return false;
        };
        let children = object
            .borrow()
            .iter()
            .map(|(_, value)| value.clone())
            .collect::<Vec<_>>();
        children.iter().any(|child| {
            if is_plain_object(child) {
                deep_some_with(child, predicate)
            } else {
                predicate(child)
            }
        })
    })
}
