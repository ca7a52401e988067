//! Backslash escaping for values written to a sheet file.
//!
//! A value must survive being placed on one line after `key = `, which
//! strips surrounding whitespace on read. Weapon sub-fields additionally
//! must not contain a bare field delimiter.

pub const FIELD_DELIMITER: char = '|';

pub fn escape_value(text: &str) -> String {
    escape(text, false)
}

pub fn escape_field(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, delimiter: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let last = text.chars().count().saturating_sub(1);
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if i == 0 || i == last => out.push_str("\\s"),
            FIELD_DELIMITER if delimiter => {
                out.push('\\');
                out.push(FIELD_DELIMITER);
            }
            other => out.push(other),
        }
    }
    out
}

/// Reverses both escape flavours. Unknown sequences are kept verbatim so
/// hand-typed backslashes are not eaten.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('s') => out.push(' '),
            Some(FIELD_DELIMITER) => out.push(FIELD_DELIMITER),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Splits on delimiters not preceded by an escaping backslash. Pieces are
/// returned still escaped.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            FIELD_DELIMITER => {
                fields.push(&line[start..i]);
                start = i + FIELD_DELIMITER.len_utf8();
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_escape_protects_newlines_and_edge_spaces() {
        let raw = " line one\nline\\two ";
        let escaped = escape_value(raw);
        assert_eq!(escaped, "\\sline one\\nline\\\\two\\s");
        assert!(!escaped.contains('\n'));
        assert_eq!(unescape(&escaped), raw);
    }

    #[test]
    fn single_space_value_survives() {
        assert_eq!(escape_value(" "), "\\s");
        assert_eq!(unescape("\\s"), " ");
    }

    #[test]
    fn value_escape_leaves_delimiter_alone() {
        assert_eq!(escape_value("a|b"), "a|b");
        assert_eq!(escape_field("a|b"), "a\\|b");
    }

    #[test]
    fn split_ignores_escaped_delimiters() {
        let line = format!("{}|{}|", escape_field("Tearing | Proven"), escape_field("x\\"));
        let fields = split_fields(&line);
        assert_eq!(fields.len(), 3);
        assert_eq!(unescape(fields[0]), "Tearing | Proven");
        assert_eq!(unescape(fields[1]), "x\\");
        assert_eq!(fields[2], "");
    }

    #[test]
    fn unknown_sequences_are_kept() {
        assert_eq!(unescape("C:\\Users"), "C:\\Users");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }
}
