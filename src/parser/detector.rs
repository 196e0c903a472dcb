//! Data-structure detection
//!
//! Classifies a snippet by looking for signature words in priority order. The
//! first signature present in the source decides the kind; a snippet with no
//! signature at all is treated as an array.

use super::language::DsaKind;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Kind returned when no signature is found
pub const DEFAULT_KIND: DsaKind = DsaKind::Array;

/// Signature words in priority order.
///
/// Kinds whose type names commonly appear inside other declarations come
/// later (`Queue<Integer> q = new LinkedList<>()` is a queue), and the very
/// generic `push`/`pop` names are checked last.
const SIGNATURES: &[(&str, DsaKind)] = &[
    ("PriorityQueue", DsaKind::Heap),
    ("priority_queue", DsaKind::Heap),
    ("heapq", DsaKind::Heap),
    ("heappush", DsaKind::Heap),
    ("heappop", DsaKind::Heap),
    ("HashMap", DsaKind::HashMap),
    ("TreeMap", DsaKind::HashMap),
    ("Map", DsaKind::HashMap),
    ("map", DsaKind::HashMap),
    ("unordered_map", DsaKind::HashMap),
    ("dict", DsaKind::HashMap),
    ("HashSet", DsaKind::HashSet),
    ("TreeSet", DsaKind::HashSet),
    ("Set", DsaKind::HashSet),
    ("set", DsaKind::HashSet),
    ("unordered_set", DsaKind::HashSet),
    ("addFirst", DsaKind::LinkedList),
    ("addLast", DsaKind::LinkedList),
    ("removeFirst", DsaKind::LinkedList),
    ("removeLast", DsaKind::LinkedList),
    ("push_front", DsaKind::LinkedList),
    ("pop_front", DsaKind::LinkedList),
    ("forward_list", DsaKind::LinkedList),
    ("Queue", DsaKind::Queue),
    ("queue", DsaKind::Queue),
    ("ArrayDeque", DsaKind::Queue),
    ("deque", DsaKind::Queue),
    ("enqueue", DsaKind::Queue),
    ("dequeue", DsaKind::Queue),
    ("offer", DsaKind::Queue),
    ("poll", DsaKind::Queue),
    ("popleft", DsaKind::Queue),
    ("shift", DsaKind::Queue),
    ("LinkedList", DsaKind::LinkedList),
    ("ArrayList", DsaKind::Array),
    ("vector", DsaKind::Array),
    ("splice", DsaKind::Array),
    ("insert", DsaKind::Array),
    ("push_back", DsaKind::Array),
    ("Stack", DsaKind::Stack),
    ("stack", DsaKind::Stack),
    ("push", DsaKind::Stack),
    ("pop", DsaKind::Stack),
];

/// Signatures that name a type but are also common function names
/// (`arr.map(f)` in JS, `map(f, xs)` in Python). A call does not count.
const NOT_WHEN_CALLED: &[&str] = &["map"];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lines the extractor never reads: comments and preprocessor directives
fn is_ignored_line(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("//") || line.starts_with('#')
}

/// Split source text into the set of whole words it contains
fn words(source: &str) -> FxHashSet<&str> {
    let mut words = FxHashSet::default();
    for line in source.lines().filter(|line| !is_ignored_line(line)) {
        let mut rest = line;
        while let Some(start) = rest.find(is_word_char) {
            let tail = &rest[start..];
            let end = tail.find(|c: char| !is_word_char(c)).unwrap_or(tail.len());
            let word = &tail[..end];
            rest = &tail[end..];

            if NOT_WHEN_CALLED.contains(&word) && rest.trim_start().starts_with('(') {
                continue;
            }
            words.insert(word);
        }
    }
    words
}

/// Classify `source` into one [`DsaKind`]. Never fails.
pub fn detect(source: &str) -> DsaKind {
    let words = words(source);
    let found = SIGNATURES
        .iter()
        .find(|(signature, _)| words.contains(signature));

    match found {
        Some((signature, kind)) => {
            debug!(signature, %kind, "detected data structure");
            *kind
        }
        None => {
            debug!(kind = %DEFAULT_KIND, "no signature found, using default");
            DEFAULT_KIND
        }
    }
}
