//! Abstract data-structure models
//!
//! This module provides the state that operations mutate:
//! - [`value`]: element representation with numeric coercion
//! - [`ModelState`]: the structure itself, one shape per family
//!
//! # Shapes
//!
//! - stack, queue, array, linked list: an ordered sequence
//! - heap: a binary min-heap stored in level order
//! - hashmap: insertion-ordered entries with unique keys
//! - hashset: insertion-ordered unique members
//!
//! Every shape owns its elements, so `clone()` is a full structural copy and a
//! clone can never observe later mutation of the original.

pub mod value;

use crate::parser::DsaKind;
use serde::{Deserialize, Serialize};
use value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "items", rename_all = "snake_case")]
pub enum ModelState {
    Sequence(Vec<Value>),
    Heap(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
}

impl ModelState {
    /// Canonical empty model for a kind
    pub fn empty(kind: DsaKind) -> Self {
        match kind {
            DsaKind::Stack | DsaKind::Queue | DsaKind::Array | DsaKind::LinkedList => {
                ModelState::Sequence(Vec::new())
            }
            DsaKind::Heap => ModelState::Heap(Vec::new()),
            DsaKind::HashMap => ModelState::Map(Vec::new()),
            DsaKind::HashSet => ModelState::Set(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ModelState::Sequence(items) | ModelState::Heap(items) | ModelState::Set(items) => {
                items.len()
            }
            ModelState::Map(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements of a sequence-like model in storage order
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            ModelState::Sequence(items) | ModelState::Heap(items) | ModelState::Set(items) => {
                Some(items)
            }
            ModelState::Map(_) => None,
        }
    }

    pub fn entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            ModelState::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Clamp an insertion position into `[0, len]`
pub fn clamp_insert_index(index: i64, len: usize) -> usize {
    index.clamp(0, len as i64) as usize
}

/// Clamp an element position into `[0, len - 1]`; `None` for an empty model
pub fn clamp_element_index(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(index.clamp(0, len as i64 - 1) as usize)
}

/// Push onto a level-order min-heap
pub fn heap_push(heap: &mut Vec<Value>, value: Value) {
    heap.push(value);
    let mut child = heap.len() - 1;
    while child > 0 {
        let parent = (child - 1) / 2;
        if heap[child].total_cmp(&heap[parent]).is_lt() {
            heap.swap(child, parent);
            child = parent;
        } else {
            break;
        }
    }
}

/// Remove the minimum of a level-order min-heap
pub fn heap_pop(heap: &mut Vec<Value>) -> Option<Value> {
    if heap.is_empty() {
        return None;
    }
    let last = heap.len() - 1;
    heap.swap(0, last);
    let min = heap.pop();

    let len = heap.len();
    let mut parent = 0;
    loop {
        let left = 2 * parent + 1;
        let right = left + 1;
        let mut smallest = parent;
        if left < len && heap[left].total_cmp(&heap[smallest]).is_lt() {
            smallest = left;
        }
        if right < len && heap[right].total_cmp(&heap[smallest]).is_lt() {
            smallest = right;
        }
        if smallest == parent {
            break;
        }
        heap.swap(parent, smallest);
        parent = smallest;
    }

    min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&n| Value::Int(n)).collect()
    }

    #[test]
    fn test_empty_shapes() {
        assert_eq!(ModelState::empty(DsaKind::Stack), ModelState::Sequence(vec![]));
        assert_eq!(ModelState::empty(DsaKind::Heap), ModelState::Heap(vec![]));
        assert_eq!(ModelState::empty(DsaKind::HashMap), ModelState::Map(vec![]));
        assert_eq!(ModelState::empty(DsaKind::HashSet), ModelState::Set(vec![]));
        for kind in DsaKind::ALL {
            assert!(ModelState::empty(kind).is_empty());
        }
    }

    #[test]
    fn test_index_clamping() {
        assert_eq!(clamp_insert_index(-5, 3), 0);
        assert_eq!(clamp_insert_index(2, 3), 2);
        assert_eq!(clamp_insert_index(99, 3), 3);
        assert_eq!(clamp_element_index(99, 3), Some(2));
        assert_eq!(clamp_element_index(-1, 3), Some(0));
        assert_eq!(clamp_element_index(0, 0), None);
    }

    #[test]
    fn test_heap_orders_minimum_first() {
        let mut heap = Vec::new();
        for n in [5, 3, 8, 1, 9, 2] {
            heap_push(&mut heap, Value::Int(n));
        }
        assert_eq!(heap[0], Value::Int(1));

        let mut drained = Vec::new();
        while let Some(v) = heap_pop(&mut heap) {
            drained.push(v);
        }
        assert_eq!(drained, ints(&[1, 2, 3, 5, 8, 9]));
        assert_eq!(heap_pop(&mut heap), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = ModelState::Sequence(ints(&[1, 2]));
        let mut copy = original.clone();
        if let ModelState::Sequence(items) = &mut copy {
            items.push(Value::Int(3));
        }
        assert_eq!(original.len(), 2);
        assert_eq!(copy.len(), 3);
    }
}
