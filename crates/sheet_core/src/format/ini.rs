//! Line-level reader and writer for the `[Section]` / `key = value` layout.
//!
//! The reader never fails: lines it cannot place are collected in
//! [`IniDocument::rejected`] for the caller to report.

const KEY_SEPARATORS: [char; 2] = ['=', ':'];
const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniEntry {
    pub line: usize,
    pub key: String,
    /// Trimmed but still escaped.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    pub line: usize,
    pub name: String,
    pub entries: Vec<IniEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoSeparator,
    EmptyKey,
    OutsideSection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub line: usize,
    pub reason: RejectReason,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    pub sections: Vec<IniSection>,
    pub rejected: Vec<RejectedLine>,
}

impl IniDocument {
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let mut doc = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = trim_blanks(raw);
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                doc.sections.push(IniSection {
                    line: line_no,
                    name: trim_blanks(inner).to_string(),
                    entries: Vec::new(),
                });
                continue;
            }

            let Some(split) = line.find(KEY_SEPARATORS) else {
                doc.reject(line_no, RejectReason::NoSeparator, line);
                continue;
            };
            let key = trim_blanks(&line[..split]);
            let value = trim_blanks(&line[split + 1..]);
            if key.is_empty() {
                doc.reject(line_no, RejectReason::EmptyKey, line);
                continue;
            }

            let Some(section) = doc.sections.last_mut() else {
                doc.reject(line_no, RejectReason::OutsideSection, line);
                continue;
            };
            section.entries.push(IniEntry {
                line: line_no,
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        doc
    }

    fn reject(&mut self, line: usize, reason: RejectReason, text: &str) {
        self.rejected.push(RejectedLine {
            line,
            reason,
            text: text.to_string(),
        });
    }
}

// Only ASCII blanks are stripped; the escaper guarantees those are the
// only characters a value can lose at its edges.
fn trim_blanks(text: &str) -> &str {
    text.trim_matches(|c| c == ' ' || c == '\t')
}

#[derive(Debug, Default)]
pub struct IniWriter {
    out: String,
}

impl IniWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&mut self, name: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push('[');
        self.out.push_str(name);
        self.out.push_str("]\n");
    }

    /// `value` must already be escaped.
    pub fn entry(&mut self, key: &str, value: &str) {
        self.out.push_str(key);
        if value.is_empty() {
            self.out.push_str(" =\n");
            return;
        }
        self.out.push_str(" = ");
        self.out.push_str(value);
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }
}
