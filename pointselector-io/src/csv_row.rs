//! Minimal CSV row encoding for the manifest and landmark log
//!
//! Fields containing the delimiter, a quote or a line break are wrapped in
//! double quotes with embedded quotes doubled.

use pointselector_core::{Error, Result};
use std::borrow::Cow;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Quote a field if needed
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([DELIMITER, QUOTE, '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Encode a row of fields, without the line terminator
pub fn join_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a single row into its unescaped fields
pub fn split_row(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes => {
                if chars.peek() == Some(&QUOTE) {
                    current.push(QUOTE);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            QUOTE if current.is_empty() => in_quotes = true,
            DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(Error::InvalidData(format!("Unterminated quoted field in row: {}", line)));
    }

    fields.push(current);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("femur.ply"), "femur.ply");
        assert_eq!(escape_field("[1.0, 2.0, 3.0]"), "\"[1.0, 2.0, 3.0]\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_join_row() {
        let header = ["FileName", "Index_no", "Position/Location-x,y,z"];
        assert_eq!(join_row(&header), "FileName,Index_no,\"Position/Location-x,y,z\"");
    }

    #[test]
    fn test_split_row() {
        let fields = split_row("tibia.ply,3,\"[0.5, -1.0, 2.0]\"\n").unwrap();
        assert_eq!(fields, vec!["tibia.ply", "3", "[0.5, -1.0, 2.0]"]);

        let fields = split_row(",FileNames").unwrap();
        assert_eq!(fields, vec!["", "FileNames"]);

        let fields = split_row("\"a \"\"quoted\"\" name\",1").unwrap();
        assert_eq!(fields, vec!["a \"quoted\" name", "1"]);
    }

    #[test]
    fn test_split_row_unterminated_quote() {
        assert!(split_row("a,\"[1.0, 2.0").is_err());
    }
}
