// Replay engine: operations in, snapshots out

use crate::model::value::Value;
use crate::model::{clamp_element_index, clamp_insert_index, heap_pop, heap_push, ModelState};
use crate::parser::{DsaKind, OpKind, Operation};
use crate::snapshot::{Snapshot, Timeline};
use tracing::{debug, info, warn};

/// Replays operations against a live model, one snapshot per operation
pub struct Simulator {
    kind: DsaKind,

    /// The live model; snapshots hold clones of it
    model: ModelState,

    /// Snapshots taken so far
    snapshots: Vec<Snapshot>,
}

impl Simulator {
    pub fn new(kind: DsaKind) -> Self {
        Simulator {
            kind,
            model: ModelState::empty(kind),
            snapshots: Vec::new(),
        }
    }

    /// Apply one operation and record the resulting snapshot
    pub fn step(&mut self, operation: &Operation) -> &Snapshot {
        let effect = self.apply(operation);
        debug!(
            index = self.snapshots.len(),
            %operation,
            effect = effect.as_str(),
            "applied operation"
        );
        self.take_snapshot(operation, effect);
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Apply every operation in order
    pub fn run(mut self, operations: &[Operation]) -> Timeline {
        for operation in operations {
            self.step(operation);
        }
        info!(kind = %self.kind, snapshots = self.snapshots.len(), "simulation finished");
        Timeline::new(self.snapshots)
    }

    /// Current live model
    pub fn model(&self) -> &ModelState {
        &self.model
    }

    fn take_snapshot(&mut self, operation: &Operation, effect: String) {
        let snapshot = Snapshot::new(
            self.snapshots.len(),
            operation.clone(),
            self.model.clone(),
            effect,
        );
        self.snapshots.push(snapshot);
    }

    /// Mutate the live model and describe what happened.
    ///
    /// Never fails: empty-model removals and out-of-vocabulary operations
    /// leave the model unchanged.
    fn apply(&mut self, operation: &Operation) -> String {
        let kind = self.kind;
        if !kind.allows(operation.kind) {
            warn!(%kind, op = %operation.kind, "operation outside vocabulary ignored");
            return format!("{} is not a {} operation (no-op)", operation.kind, kind);
        }

        let operand = |i: usize| operation.operands.get(i).map(|s| Value::from_literal(s));

        match (&mut self.model, operation.kind) {
            (
                ModelState::Sequence(items),
                OpKind::Push | OpKind::Append | OpKind::Enqueue | OpKind::AddLast,
            ) => match operand(0) {
                Some(value) => {
                    let effect = format!("{} {}", past_tense(operation.kind), value);
                    items.push(value);
                    effect
                }
                None => missing_operand(operation),
            },
            (ModelState::Sequence(items), OpKind::AddFirst) => match operand(0) {
                Some(value) => {
                    let effect = format!("added {} at the front", value);
                    items.insert(0, value);
                    effect
                }
                None => missing_operand(operation),
            },
            (ModelState::Sequence(items), OpKind::Pop | OpKind::RemoveLast) => {
                match items.pop() {
                    Some(value) => format!("removed {} from the end", value),
                    None => empty_model(operation, kind),
                }
            }
            (ModelState::Sequence(items), OpKind::Dequeue | OpKind::RemoveFirst) => {
                if items.is_empty() {
                    empty_model(operation, kind)
                } else {
                    let value = items.remove(0);
                    format!("removed {} from the front", value)
                }
            }
            (ModelState::Sequence(items), OpKind::Insert) => {
                match (operand(0).and_then(|v| v.as_int()), operand(1)) {
                    (Some(index), Some(value)) => {
                        let at = clamp_insert_index(index, items.len());
                        let effect = format!("inserted {} at index {}", value, at);
                        items.insert(at, value);
                        effect
                    }
                    _ => bad_index(operation),
                }
            }
            (ModelState::Sequence(items), OpKind::RemoveAt) => {
                match operand(0).and_then(|v| v.as_int()) {
                    Some(index) => match clamp_element_index(index, items.len()) {
                        Some(at) => {
                            let value = items.remove(at);
                            format!("removed {} at index {}", value, at)
                        }
                        None => empty_model(operation, kind),
                    },
                    None => bad_index(operation),
                }
            }
            (ModelState::Heap(heap), OpKind::Push) => match operand(0) {
                Some(value) => {
                    let effect = format!("pushed {}", value);
                    heap_push(heap, value);
                    effect
                }
                None => missing_operand(operation),
            },
            (ModelState::Heap(heap), OpKind::Pop) => match heap_pop(heap) {
                Some(min) => format!("popped minimum {}", min),
                None => empty_model(operation, kind),
            },
            (ModelState::Map(entries), OpKind::Put) => match (operand(0), operand(1)) {
                (Some(key), Some(value)) => {
                    match entries.iter_mut().find(|(k, _)| *k == key) {
                        Some(entry) => {
                            let effect = format!("updated {} -> {}", key, value);
                            entry.1 = value;
                            effect
                        }
                        None => {
                            let effect = format!("put {} -> {}", key, value);
                            entries.push((key, value));
                            effect
                        }
                    }
                }
                _ => missing_operand(operation),
            },
            (ModelState::Map(entries), OpKind::Remove) => match operand(0) {
                Some(key) => match entries.iter().position(|(k, _)| *k == key) {
                    Some(at) => {
                        entries.remove(at);
                        format!("removed key {}", key)
                    }
                    None => format!("key {} not present (no-op)", key),
                },
                None => missing_operand(operation),
            },
            (ModelState::Set(members), OpKind::Add) => match operand(0) {
                Some(value) if members.contains(&value) => {
                    format!("{} already present (no-op)", value)
                }
                Some(value) => {
                    let effect = format!("added {}", value);
                    members.push(value);
                    effect
                }
                None => missing_operand(operation),
            },
            (ModelState::Set(members), OpKind::Remove) => match operand(0) {
                Some(value) => match members.iter().position(|m| *m == value) {
                    Some(at) => {
                        members.remove(at);
                        format!("removed {}", value)
                    }
                    None => format!("{} not present (no-op)", value),
                },
                None => missing_operand(operation),
            },
            _ => {
                warn!(%kind, op = %operation.kind, "operation does not fit model shape");
                format!("{} does not apply to this model (no-op)", operation.kind)
            }
        }
    }
}

/// Replay `operations` from an empty model of `kind`
pub fn simulate(kind: DsaKind, operations: &[Operation]) -> Timeline {
    Simulator::new(kind).run(operations)
}

fn past_tense(op: OpKind) -> &'static str {
    match op {
        OpKind::Push => "pushed",
        OpKind::Enqueue => "enqueued",
        OpKind::Append => "appended",
        _ => "added",
    }
}

fn empty_model(operation: &Operation, kind: DsaKind) -> String {
    debug!(op = %operation.kind, %kind, "operation on empty model");
    format!("{} on empty {} (no-op)", operation.kind, kind)
}

fn bad_index(operation: &Operation) -> String {
    warn!(%operation, "index operand is not an integer");
    format!("{}: index is not an integer (no-op)", operation)
}

fn missing_operand(operation: &Operation) -> String {
    warn!(%operation, "operation is missing an operand");
    format!("{}: missing operand (no-op)", operation)
}
