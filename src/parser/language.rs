//! Languages, data-structure kinds and the operation vocabulary
//!
//! These three closed enums are the shared vocabulary between the detector,
//! the extractor and the simulator.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Declared language of a snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    JavaScript,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Java,
        Language::Python,
        Language::JavaScript,
        Language::Cpp,
    ];

    /// Infer the language from a file extension (`snippet.py` -> Python)
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "java" => Some(Language::Java),
            "py" => Some(Language::Python),
            "js" | "mjs" => Some(Language::JavaScript),
            "cpp" | "cc" | "cxx" | "hpp" => Some(Language::Cpp),
            _ => None,
        }
    }

    /// Prefix that starts a single-line comment
    pub fn line_comment(self) -> &'static str {
        match self {
            Language::Python => "#",
            Language::Java | Language::JavaScript | Language::Cpp => "//",
        }
    }

    /// Whether a trimmed line carries no code for this language
    pub fn is_comment_line(self, line: &str) -> bool {
        if line.starts_with(self.line_comment()) {
            return true;
        }
        // Preprocessor directives carry no operations either
        self == Language::Cpp && line.starts_with('#')
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Java => "Java",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Cpp => "C++",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            other => Err(Error::UnknownLanguage(other.to_string())),
        }
    }
}

/// Abstract data structure a snippet manipulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DsaKind {
    Stack,
    Queue,
    Array,
    LinkedList,
    HashMap,
    HashSet,
    Heap,
}

impl DsaKind {
    pub const ALL: [DsaKind; 7] = [
        DsaKind::Stack,
        DsaKind::Queue,
        DsaKind::Array,
        DsaKind::LinkedList,
        DsaKind::HashMap,
        DsaKind::HashSet,
        DsaKind::Heap,
    ];

    /// Operations that are meaningful for this kind
    pub fn vocabulary(self) -> &'static [OpKind] {
        match self {
            DsaKind::Stack | DsaKind::Heap => &[OpKind::Push, OpKind::Pop],
            DsaKind::Queue => &[OpKind::Enqueue, OpKind::Dequeue],
            DsaKind::Array => &[
                OpKind::Append,
                OpKind::Insert,
                OpKind::RemoveAt,
                OpKind::RemoveLast,
            ],
            DsaKind::LinkedList => &[
                OpKind::AddFirst,
                OpKind::AddLast,
                OpKind::RemoveFirst,
                OpKind::RemoveLast,
            ],
            DsaKind::HashMap => &[OpKind::Put, OpKind::Remove],
            DsaKind::HashSet => &[OpKind::Add, OpKind::Remove],
        }
    }

    pub fn allows(self, op: OpKind) -> bool {
        self.vocabulary().contains(&op)
    }
}

impl fmt::Display for DsaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DsaKind::Stack => "stack",
            DsaKind::Queue => "queue",
            DsaKind::Array => "array",
            DsaKind::LinkedList => "linked list",
            DsaKind::HashMap => "hashmap",
            DsaKind::HashSet => "hashset",
            DsaKind::Heap => "heap",
        };
        write!(f, "{}", name)
    }
}

/// Closed vocabulary of abstract mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Push,
    Pop,
    Enqueue,
    Dequeue,
    Append,
    Insert,
    RemoveAt,
    RemoveLast,
    AddFirst,
    AddLast,
    RemoveFirst,
    Put,
    Remove,
    Add,
}

impl OpKind {
    /// Name shown to the user, e.g. in the status bar and the log
    pub fn name(self) -> &'static str {
        match self {
            OpKind::Push => "push",
            OpKind::Pop => "pop",
            OpKind::Enqueue => "enqueue",
            OpKind::Dequeue => "dequeue",
            OpKind::Append => "append",
            OpKind::Insert => "insert",
            OpKind::RemoveAt => "removeAt",
            OpKind::RemoveLast => "removeLast",
            OpKind::AddFirst => "addFirst",
            OpKind::AddLast => "addLast",
            OpKind::RemoveFirst => "removeFirst",
            OpKind::Put => "put",
            OpKind::Remove => "remove",
            OpKind::Add => "add",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags() {
        assert_eq!("java".parse::<Language>().unwrap(), Language::Java);
        assert_eq!("PY".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("js".parse::<Language>().unwrap(), Language::JavaScript);
        assert_eq!("c++".parse::<Language>().unwrap(), Language::Cpp);
        assert!(matches!(
            "rust".parse::<Language>(),
            Err(Error::UnknownLanguage(ref s)) if s == "rust"
        ));
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(
            Language::from_path(Path::new("demo/stack.java")),
            Some(Language::Java)
        );
        assert_eq!(Language::from_path(Path::new("q.cc")), Some(Language::Cpp));
        assert_eq!(Language::from_path(Path::new("notes.txt")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_comment_lines() {
        assert!(Language::Python.is_comment_line("# push(1)"));
        assert!(!Language::Python.is_comment_line("// not a comment in python"));
        assert!(Language::Java.is_comment_line("// s.push(1);"));
        assert!(Language::Cpp.is_comment_line("#include <stack>"));
        assert!(!Language::JavaScript.is_comment_line("#private"));
    }

    #[test]
    fn test_vocabulary_is_closed() {
        assert!(DsaKind::Stack.allows(OpKind::Push));
        assert!(!DsaKind::Stack.allows(OpKind::Enqueue));
        assert!(DsaKind::HashSet.allows(OpKind::Remove));
        assert!(DsaKind::HashMap.allows(OpKind::Remove));
        for kind in DsaKind::ALL {
            assert!(!kind.vocabulary().is_empty());
        }
    }
}
