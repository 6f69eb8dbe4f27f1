//! Deep merge of configuration layers.
//!
//! Layers apply left to right, later layers override earlier ones. Nested
//! objects merge key by key; arrays and scalars replace wholesale. No input
//! layer is ever mutated; the result is a freshly built tree.

use serde_json::map::Entry;
use serde_json::{Map, Value};

/// Merge configuration layers into a single new value.
///
/// An empty slice yields an empty object.
pub fn merge(layers: &[&Value]) -> Value {
    let mut result = Value::Object(Map::new());
    for layer in layers {
        merge_into(&mut result, layer);
    }
    result
}

/// Merge two layers. Equivalent to `merge(&[base, over])`.
pub fn merge2(base: &Value, over: &Value) -> Value {
    merge(&[base, over])
}

fn merge_into(base: &mut Value, layer: &Value) {
    match (base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (key, incoming) in layer_map {
                match base_map.entry(key.clone()) {
                    Entry::Occupied(mut entry)
                        if entry.get().is_object() && incoming.is_object() =>
                    {
                        merge_into(entry.get_mut(), incoming);
                    }
                    // Arrays and scalars replace, never element-merge.
                    Entry::Occupied(mut entry) => {
                        *entry.get_mut() = incoming.clone();
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(incoming.clone());
                    }
                }
            }
        }
        (base, layer) => *base = layer.clone(),
    }
}
