//! Call-site scanner
//!
//! Finds method-call shapes (`name(arg, arg)`) on a single source line. This is
//! deliberately not a tokenizer for any real language: it only knows about
//! identifiers, balanced brackets, quoted strings and the line-comment marker,
//! which is enough to pull calls like `stack.push(10);` or
//! `print(q.popleft())` apart.

/// One `name(args)` occurrence on a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub method: String,
    /// Raw argument text, trimmed, split on top-level commas
    pub args: Vec<String>,
    /// 1-based column of the method name
    pub column: usize,
}

/// Scans one line for call sites, outermost first in order of appearance.
///
/// Nested calls are reported too: `print(s.pop())` yields `print` then `pop`.
pub struct CallScanner<'a> {
    chars: Vec<char>,
    position: usize,
    comment: &'a str,
}

impl<'a> CallScanner<'a> {
    pub fn new(line: &str, comment: &'a str) -> Self {
        CallScanner {
            chars: line.chars().collect(),
            position: 0,
            comment,
        }
    }

    /// Scan the whole line
    pub fn scan(mut self) -> Vec<CallSite> {
        let mut calls = Vec::new();

        while let Some(ch) = self.peek() {
            if self.at_comment() {
                break;
            }

            match ch {
                '"' | '\'' | '`' => self.skip_string(ch),
                '0'..='9' => self.skip_word(),
                c if is_ident_start(c) => {
                    let column = self.position + 1;
                    let name = self.identifier();
                    let after_name = self.position;
                    self.skip_whitespace();
                    if self.peek() == Some('(') {
                        if let Some(args) = self.arguments() {
                            calls.push(CallSite {
                                method: name,
                                args,
                                column,
                            });
                        }
                        // Rescan inside the parentheses for nested calls
                        self.position = after_name;
                    }
                }
                _ => self.position += 1,
            }
        }

        calls
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn at_comment(&self) -> bool {
        let mut marker = self.comment.chars();
        let mut offset = 0;
        loop {
            match marker.next() {
                None => return offset > 0,
                Some(m) => {
                    if self.chars.get(self.position + offset) != Some(&m) {
                        return false;
                    }
                    offset += 1;
                }
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    fn skip_word(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            self.position += 1;
        }
    }

    /// Skip a quoted string starting at the current position
    fn skip_string(&mut self, quote: char) {
        self.position += 1;
        while let Some(c) = self.peek() {
            self.position += 1;
            if c == '\\' {
                self.position += 1;
            } else if c == quote {
                return;
            }
        }
    }

    fn identifier(&mut self) -> String {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.position += 1;
        }
        self.chars[start..self.position].iter().collect()
    }

    /// Read a balanced `( ... )` argument list starting at `(`.
    ///
    /// Returns `None` when the parentheses are not closed on this line.
    fn arguments(&mut self) -> Option<Vec<String>> {
        self.position += 1; // '('
        let mut args = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;

        while let Some(c) = self.peek() {
            match c {
                '"' | '\'' | '`' => {
                    let start = self.position;
                    self.skip_string(c);
                    let end = self.position.min(self.chars.len());
                    current.extend(&self.chars[start..end]);
                    continue;
                }
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' if depth > 0 => depth -= 1,
                ')' => {
                    self.position += 1;
                    let last = current.trim();
                    if !last.is_empty() || !args.is_empty() {
                        args.push(last.to_string());
                    }
                    return Some(args);
                }
                ',' if depth == 0 => {
                    args.push(current.trim().to_string());
                    current.clear();
                    self.position += 1;
                    continue;
                }
                _ => {}
            }
            current.push(c);
            self.position += 1;
        }

        None
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Convenience wrapper around [`CallScanner`]
pub fn scan_calls(line: &str, comment: &str) -> Vec<CallSite> {
    CallScanner::new(line, comment).scan()
}
