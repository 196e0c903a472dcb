//! Pattern tables, one per supported (language, data structure) pair
//!
//! A grammar is an ordered list of [`CallPattern`]s. Order is priority: the
//! first pattern that matches a line wins, which is how `add(i, v)` beats
//! `add(v)` for Java lists.

use super::language::{DsaKind, Language, OpKind};

/// One recognizable call shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPattern {
    pub method: &'static str,
    /// Exact number of arguments the call must have
    pub arity: usize,
    /// Argument positions that become operands, in order
    pub keep: &'static [usize],
    /// An argument that must have this exact literal text
    pub require: Option<(usize, &'static str)>,
    pub op: OpKind,
}

const fn call(method: &'static str, arity: usize, op: OpKind) -> CallPattern {
    let keep: &'static [usize] = match arity {
        0 => &[],
        1 => &[0],
        _ => &[0, 1],
    };
    CallPattern {
        method,
        arity,
        keep,
        require: None,
        op,
    }
}

const fn call_keeping(
    method: &'static str,
    arity: usize,
    keep: &'static [usize],
    op: OpKind,
) -> CallPattern {
    CallPattern {
        method,
        arity,
        keep,
        require: None,
        op,
    }
}

const fn call_requiring(
    method: &'static str,
    arity: usize,
    keep: &'static [usize],
    require: (usize, &'static str),
    op: OpKind,
) -> CallPattern {
    CallPattern {
        method,
        arity,
        keep,
        require: Some(require),
        op,
    }
}

use OpKind::*;

const JAVA_STACK: &[CallPattern] = &[call("push", 1, Push), call("pop", 0, Pop)];
const JAVA_QUEUE: &[CallPattern] = &[
    call("offer", 1, Enqueue),
    call("add", 1, Enqueue),
    call("poll", 0, Dequeue),
    call("remove", 0, Dequeue),
];
const JAVA_ARRAY: &[CallPattern] = &[
    call("add", 2, Insert),
    call("add", 1, Append),
    call("remove", 1, RemoveAt),
];
const JAVA_LINKED_LIST: &[CallPattern] = &[
    call("addFirst", 1, AddFirst),
    call("addLast", 1, AddLast),
    call("push", 1, AddFirst),
    call("offer", 1, AddLast),
    call("add", 1, AddLast),
    call("removeFirst", 0, RemoveFirst),
    call("removeLast", 0, RemoveLast),
    call("pop", 0, RemoveFirst),
    call("poll", 0, RemoveFirst),
];
const JAVA_HASH_MAP: &[CallPattern] = &[call("put", 2, Put), call("remove", 1, Remove)];
const JAVA_HASH_SET: &[CallPattern] = &[call("add", 1, Add), call("remove", 1, Remove)];
const JAVA_HEAP: &[CallPattern] = &[
    call("offer", 1, Push),
    call("add", 1, Push),
    call("poll", 0, Pop),
    call("remove", 0, Pop),
];

const PYTHON_STACK: &[CallPattern] = &[call("append", 1, Push), call("pop", 0, Pop)];
const PYTHON_QUEUE: &[CallPattern] = &[
    call("append", 1, Enqueue),
    call("popleft", 0, Dequeue),
    call_requiring("pop", 1, &[], (0, "0"), Dequeue),
];
const PYTHON_ARRAY: &[CallPattern] = &[
    call("insert", 2, Insert),
    call("append", 1, Append),
    call("pop", 1, RemoveAt),
    call("pop", 0, RemoveLast),
];
const PYTHON_HASH_SET: &[CallPattern] = &[
    call("add", 1, Add),
    call("remove", 1, Remove),
    call("discard", 1, Remove),
];
const PYTHON_HEAP: &[CallPattern] = &[
    call_keeping("heappush", 2, &[1], Push),
    call_keeping("heappop", 1, &[], Pop),
];

const JS_STACK: &[CallPattern] = &[call("push", 1, Push), call("pop", 0, Pop)];
const JS_QUEUE: &[CallPattern] = &[
    call("enqueue", 1, Enqueue),
    call("push", 1, Enqueue),
    call("dequeue", 0, Dequeue),
    call("shift", 0, Dequeue),
];
const JS_ARRAY: &[CallPattern] = &[
    call_requiring("splice", 3, &[0, 2], (1, "0"), Insert),
    call_requiring("splice", 2, &[0], (1, "1"), RemoveAt),
    call("push", 1, Append),
    call("pop", 0, RemoveLast),
];
const JS_HASH_MAP: &[CallPattern] = &[call("set", 2, Put), call("delete", 1, Remove)];
const JS_HASH_SET: &[CallPattern] = &[call("add", 1, Add), call("delete", 1, Remove)];

const CPP_STACK: &[CallPattern] = &[call("push", 1, Push), call("pop", 0, Pop)];
const CPP_QUEUE: &[CallPattern] = &[call("push", 1, Enqueue), call("pop", 0, Dequeue)];
const CPP_ARRAY: &[CallPattern] = &[
    call("push_back", 1, Append),
    call("insert", 2, Insert),
    call("erase", 1, RemoveAt),
    call("pop_back", 0, RemoveLast),
];
const CPP_LINKED_LIST: &[CallPattern] = &[
    call("push_front", 1, AddFirst),
    call("push_back", 1, AddLast),
    call("pop_front", 0, RemoveFirst),
    call("pop_back", 0, RemoveLast),
];
const CPP_HASH_MAP: &[CallPattern] = &[call("insert", 2, Put), call("erase", 1, Remove)];
const CPP_HASH_SET: &[CallPattern] = &[call("insert", 1, Add), call("erase", 1, Remove)];
const CPP_HEAP: &[CallPattern] = &[call("push", 1, Push), call("pop", 0, Pop)];

/// Look up the grammar for a language and data structure.
///
/// `None` means the pair is unsupported, which is different from a grammar
/// that simply matches nothing in a given snippet.
pub fn grammar_for(language: Language, kind: DsaKind) -> Option<&'static [CallPattern]> {
    let table = match (language, kind) {
        (Language::Java, DsaKind::Stack) => JAVA_STACK,
        (Language::Java, DsaKind::Queue) => JAVA_QUEUE,
        (Language::Java, DsaKind::Array) => JAVA_ARRAY,
        (Language::Java, DsaKind::LinkedList) => JAVA_LINKED_LIST,
        (Language::Java, DsaKind::HashMap) => JAVA_HASH_MAP,
        (Language::Java, DsaKind::HashSet) => JAVA_HASH_SET,
        (Language::Java, DsaKind::Heap) => JAVA_HEAP,

        (Language::Python, DsaKind::Stack) => PYTHON_STACK,
        (Language::Python, DsaKind::Queue) => PYTHON_QUEUE,
        (Language::Python, DsaKind::Array) => PYTHON_ARRAY,
        (Language::Python, DsaKind::HashSet) => PYTHON_HASH_SET,
        (Language::Python, DsaKind::Heap) => PYTHON_HEAP,
        (Language::Python, DsaKind::LinkedList | DsaKind::HashMap) => return None,

        (Language::JavaScript, DsaKind::Stack) => JS_STACK,
        (Language::JavaScript, DsaKind::Queue) => JS_QUEUE,
        (Language::JavaScript, DsaKind::Array) => JS_ARRAY,
        (Language::JavaScript, DsaKind::HashMap) => JS_HASH_MAP,
        (Language::JavaScript, DsaKind::HashSet) => JS_HASH_SET,
        (Language::JavaScript, DsaKind::LinkedList | DsaKind::Heap) => return None,

        (Language::Cpp, DsaKind::Stack) => CPP_STACK,
        (Language::Cpp, DsaKind::Queue) => CPP_QUEUE,
        (Language::Cpp, DsaKind::Array) => CPP_ARRAY,
        (Language::Cpp, DsaKind::LinkedList) => CPP_LINKED_LIST,
        (Language::Cpp, DsaKind::HashMap) => CPP_HASH_MAP,
        (Language::Cpp, DsaKind::HashSet) => CPP_HASH_SET,
        (Language::Cpp, DsaKind::Heap) => CPP_HEAP,
    };
    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_stays_in_vocabulary() {
        for language in Language::ALL {
            for kind in DsaKind::ALL {
                if let Some(patterns) = grammar_for(language, kind) {
                    for pattern in patterns {
                        assert!(
                            kind.allows(pattern.op),
                            "{} {} pattern {} emits {}",
                            language,
                            kind,
                            pattern.method,
                            pattern.op
                        );
                        assert!(pattern.keep.iter().all(|&i| i < pattern.arity));
                    }
                }
            }
        }
    }

    #[test]
    fn test_unsupported_pairs() {
        assert!(grammar_for(Language::Python, DsaKind::HashMap).is_none());
        assert!(grammar_for(Language::Python, DsaKind::LinkedList).is_none());
        assert!(grammar_for(Language::JavaScript, DsaKind::Heap).is_none());
        assert!(grammar_for(Language::Java, DsaKind::Heap).is_some());
    }

    #[test]
    fn test_two_argument_add_has_priority() {
        let patterns = grammar_for(Language::Java, DsaKind::Array).unwrap();
        assert_eq!(patterns[0].method, "add");
        assert_eq!(patterns[0].arity, 2);
        assert_eq!(patterns[0].op, OpKind::Insert);
    }
}
