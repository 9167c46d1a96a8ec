//! Append-only text builder for line-oriented documents.
//!
//! Every line is written at a nesting depth; each level indents by two
//! spaces. Nothing already written is ever revisited.

use std::borrow::Cow;
use std::fmt::{self, Write};

/// Indentation for one nesting level.
const INDENT: &str = "  ";

/// Line terminating each document.
pub const SEPARATOR: &str = "---";

/// Append-only buffer of rendered lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuilder {
    buf: String,
}

impl TextBuilder {
    /// Create an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Create an empty builder with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Write `key: value`.
    pub fn field(&mut self, depth: usize, key: &str, value: impl fmt::Display) {
        self.indent(depth);
        // Writing into a String cannot fail.
        let _ = writeln!(self.buf, "{key}: {value}");
    }

    /// Write `key:` opening a nested block.
    pub fn header(&mut self, depth: usize, key: &str) {
        self.indent(depth);
        self.buf.push_str(key);
        self.buf.push_str(":\n");
    }

    /// Write `# key: detail` on a single line.
    pub fn comment(&mut self, depth: usize, key: &str, detail: impl fmt::Display) {
        let detail = detail.to_string();
        self.indent(depth);
        let _ = writeln!(self.buf, "# {key}: {}", detail.replace(['\r', '\n'], " "));
    }

    /// Write `key: |` followed by `text` as a block literal one level deeper.
    ///
    /// Surrounding whitespace of `text` is trimmed first; inner lines are kept
    /// as they are.
    pub fn literal_block(&mut self, depth: usize, key: &str, text: &str) {
        self.indent(depth);
        self.buf.push_str(key);
        self.buf.push_str(": |\n");
        for line in text.trim().split('\n') {
            self.indent(depth + 1);
            self.buf.push_str(line);
            self.buf.push('\n');
        }
    }

    /// Write the document separator.
    pub fn separator(&mut self) {
        self.buf.push_str(SEPARATOR);
        self.buf.push('\n');
    }

    /// Rendered text so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Length of the rendered text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the builder, returning the rendered text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }

    /// Consume the builder, returning the rendered bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.buf.push_str(INDENT);
        }
    }
}

/// Double-quote `bytes` as a single-line string literal.
///
/// `"` and `\` are escaped, common control characters use their short
/// escapes, other control characters and bytes that are not UTF-8 are
/// written as hex escapes.
#[must_use]
pub fn quote(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            escape_char(c, &mut out);
        }
        for b in chunk.invalid() {
            let _ = write!(out, "\\x{b:02x}");
        }
    }
    out.push('"');
    out
}

/// Raw, unquoted form of `bytes`; invalid UTF-8 is replaced.
#[must_use]
pub fn raw(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn escape_char(c: char, out: &mut String) {
    match c {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\x07' => out.push_str("\\a"),
        '\x08' => out.push_str("\\b"),
        '\x0c' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\x0b' => out.push_str("\\v"),
        c if c.is_ascii_control() => {
            let _ = write!(out, "\\x{:02x}", u32::from(c));
        }
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04x}", u32::from(c));
        }
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_and_header() {
        let mut out = TextBuilder::new();
        out.field(0, "type", "MESSAGE");
        out.header(0, "message");
        out.field(1, "query_port", 53);
        assert_eq!(out.as_str(), "type: MESSAGE\nmessage:\n  query_port: 53\n");
    }

    #[test]
    fn test_comment_stays_on_one_line() {
        let mut out = TextBuilder::new();
        out.comment(1, "query_zone", "parse failed: bad\nlabel");
        assert_eq!(out.as_str(), "  # query_zone: parse failed: bad label\n");
    }

    #[test]
    fn test_literal_block() {
        let mut out = TextBuilder::new();
        out.literal_block(1, "query_message", "\n;; one\n;; two\n\n");
        assert_eq!(
            out.as_str(),
            "  query_message: |\n    ;; one\n    ;; two\n"
        );
    }

    #[test]
    fn test_literal_block_keeps_inner_lines() {
        let mut out = TextBuilder::new();
        out.literal_block(0, "text", "a\n\n  b");
        assert_eq!(out.as_str(), "text: |\n  a\n  \n    b\n");
    }

    #[test]
    fn test_separator() {
        let mut out = TextBuilder::with_capacity(16);
        assert!(out.is_empty());
        out.separator();
        assert_eq!(out.len(), 4);
        assert_eq!(out.into_string(), "---\n");
    }

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote(b"ns1.example"), "\"ns1.example\"");
        assert_eq!(quote(b""), "\"\"");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(b"a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quote(b"line\nnext\t"), r#""line\nnext\t""#);
        assert_eq!(quote(b"\x00\x7f"), r#""\x00\x7f""#);
        assert_eq!(quote("caf\u{e9}".as_bytes()), "\"caf\u{e9}\"");
        assert_eq!(quote("\u{85}".as_bytes()), r#""\u0085""#);
    }

    #[test]
    fn test_quote_invalid_utf8() {
        assert_eq!(quote(b"ok\xff\xfe!"), r#""ok\xff\xfe!""#);
    }

    #[test]
    fn test_raw() {
        assert_eq!(raw(b"subscriber-7"), "subscriber-7");
        assert_eq!(raw(b"a\xffb"), "a\u{fffd}b");
    }
}
