//! Operation extraction
//!
//! Turns source text into an ordered list of [`Operation`]s by matching each
//! line against the grammar for the declared language and detected kind.
//! Lines that match nothing are skipped without complaint: a snippet usually
//! contains declarations, prints and other noise around the calls we care
//! about.

use super::grammar::{grammar_for, CallPattern};
use super::language::{DsaKind, Language, OpKind};
use super::lexer::{scan_calls, CallSite};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// One recognized mutation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OpKind,
    /// Literal operand text, string quotes removed
    pub operands: Vec<String>,
    /// 1-based line the call was found on
    pub source_line: usize,
}

impl Operation {
    pub fn new(kind: OpKind, operands: Vec<String>, source_line: usize) -> Self {
        Operation {
            kind,
            operands,
            source_line,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.operands.join(", "))
    }
}

/// Extract the operations of `source` for a language and data structure.
///
/// # Errors
///
/// Returns [`Error::UnsupportedLanguage`] when there is no grammar for the pair.
pub fn extract(source: &str, language: Language, kind: DsaKind) -> Result<Vec<Operation>> {
    let patterns =
        grammar_for(language, kind).ok_or(Error::UnsupportedLanguage { language, kind })?;

    let mut operations = Vec::new();
    let mut skipped = 0usize;

    for (idx, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || language.is_comment_line(line) {
            continue;
        }

        let calls = scan_calls(line, language.line_comment());
        match match_line(patterns, &calls) {
            Some((pattern, call)) => {
                let operation = Operation::new(pattern.op, operands(pattern, call), idx + 1);
                debug!(line = idx + 1, %operation, "extracted operation");
                operations.push(operation);
            }
            None => skipped += 1,
        }
    }

    info!(
        %language,
        %kind,
        operations = operations.len(),
        skipped,
        "extraction finished"
    );
    Ok(operations)
}

/// First pattern (in priority order) that matches any call on the line
fn match_line<'p, 'c>(
    patterns: &'p [CallPattern],
    calls: &'c [CallSite],
) -> Option<(&'p CallPattern, &'c CallSite)> {
    patterns.iter().find_map(|pattern| {
        calls
            .iter()
            .find(|call| matches(pattern, call))
            .map(|call| (pattern, call))
    })
}

fn matches(pattern: &CallPattern, call: &CallSite) -> bool {
    if call.method != pattern.method || call.args.len() != pattern.arity {
        return false;
    }
    match pattern.require {
        Some((position, literal)) => call.args[position] == literal,
        None => true,
    }
}

fn operands(pattern: &CallPattern, call: &CallSite) -> Vec<String> {
    pattern
        .keep
        .iter()
        .map(|&position| clean_operand(&call.args[position]))
        .collect()
}

/// Normalize one argument into a literal operand.
///
/// Quoted strings lose their quotes and iterator arithmetic such as
/// `v.begin() + 2` becomes the plain index `2`.
fn clean_operand(arg: &str) -> String {
    let arg = arg.trim();

    if let Some(pos) = arg.find("begin()") {
        let rest = arg[pos + "begin()".len()..].trim();
        return match rest.strip_prefix('+') {
            Some(offset) => offset.trim().to_string(),
            None => "0".to_string(),
        };
    }

    for quote in ['"', '\'', '`'] {
        if arg.len() >= 2 && arg.starts_with(quote) && arg.ends_with(quote) {
            return arg[1..arg.len() - 1].to_string();
        }
    }

    arg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(source: &str, language: Language, kind: DsaKind) -> Vec<String> {
        extract(source, language, kind)
            .unwrap()
            .iter()
            .map(|op| format!("{}@{}", op, op.source_line))
            .collect()
    }

    #[test]
    fn test_bare_stack_calls() {
        let got = ops("push(10)\npush(20)\npop()", Language::Java, DsaKind::Stack);
        assert_eq!(got, vec!["push(10)@1", "push(20)@2", "pop()@3"]);
    }

    #[test]
    fn test_arity_distinguishes_insert() {
        let got = ops("add(1)\nadd(2)\nadd(1,99)", Language::Java, DsaKind::Array);
        assert_eq!(got, vec!["append(1)@1", "append(2)@2", "insert(1, 99)@3"]);
    }

    #[test]
    fn test_skips_blank_comment_and_unrecognized_lines() {
        let source = "\
Stack<Integer> s = new Stack<>();

// s.push(99);
s.push(1);
int x = 5;
System.out.println(s.pop());
";
        let got = ops(source, Language::Java, DsaKind::Stack);
        assert_eq!(got, vec!["push(1)@4", "pop()@6"]);
    }

    #[test]
    fn test_one_operation_per_line() {
        let got = ops("s.push(1); s.push(2);", Language::Java, DsaKind::Stack);
        assert_eq!(got, vec!["push(1)@1"]);
    }

    #[test]
    fn test_string_operands_lose_quotes() {
        let got = ops(
            "m.put(\"apple\", 3);\nm.remove('apple');",
            Language::Java,
            DsaKind::HashMap,
        );
        assert_eq!(got, vec!["put(apple, 3)@1", "remove(apple)@2"]);
    }

    #[test]
    fn test_python_heap_drops_heap_argument() {
        let source = "import heapq\nh = []\nheapq.heappush(h, 5)\nheapq.heappop(h)";
        let got = ops(source, Language::Python, DsaKind::Heap);
        assert_eq!(got, vec!["push(5)@3", "pop()@4"]);
    }

    #[test]
    fn test_python_queue_pop_zero() {
        let source = "q = []\nq.append(1)\nq.pop(0)\nq.pop(2)";
        let got = ops(source, Language::Python, DsaKind::Queue);
        assert_eq!(got, vec!["enqueue(1)@2", "dequeue()@3"]);
    }

    #[test]
    fn test_js_splice_shapes() {
        let source = "a.push(1);\na.splice(0, 0, 7);\na.splice(1, 1);\na.splice(0, 2);";
        let got = ops(source, Language::JavaScript, DsaKind::Array);
        assert_eq!(got, vec!["append(1)@1", "insert(0, 7)@2", "removeAt(1)@3"]);
    }

    #[test]
    fn test_cpp_iterator_offsets() {
        let source = "v.push_back(1);\nv.insert(v.begin() + 1, 99);\nv.erase(v.begin());";
        let got = ops(source, Language::Cpp, DsaKind::Array);
        assert_eq!(got, vec!["append(1)@1", "insert(1, 99)@2", "removeAt(0)@3"]);
    }

    #[test]
    fn test_cpp_include_is_skipped() {
        let source = "#include <stack>\nstd::stack<int> s;\ns.push(4);";
        let got = ops(source, Language::Cpp, DsaKind::Stack);
        assert_eq!(got, vec!["push(4)@3"]);
    }

    #[test]
    fn test_unsupported_pair_is_an_error() {
        let result = extract("d = {}\nd.pop('a')", Language::Python, DsaKind::HashMap);
        assert!(matches!(
            result,
            Err(Error::UnsupportedLanguage {
                language: Language::Python,
                kind: DsaKind::HashMap
            })
        ));
    }

    #[test]
    fn test_no_matches_is_not_an_error() {
        let result = extract("int x = 1;", Language::Java, DsaKind::Stack).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_clean_operand() {
        assert_eq!(clean_operand("  42 "), "42");
        assert_eq!(clean_operand("\"hi\""), "hi");
        assert_eq!(clean_operand("'"), "'");
        assert_eq!(clean_operand("v.begin()+3"), "3");
        assert_eq!(clean_operand("x + 1"), "x + 1");
    }
}
