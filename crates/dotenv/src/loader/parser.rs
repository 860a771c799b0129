//! Line parsing and merging of `.env` content.
//!
//! Responsibilities:
//! - Interpret a single line as blank, comment, or `KEY=VALUE` assignment.
//! - Stream a reader line by line and write each assignment into an [`EnvStore`].
//!
//! Invariants:
//! - Lines, keys and values are whitespace-trimmed before interpretation.
//! - At most one matching outer quote pair is stripped; no escapes are processed.
//! - Assignments are applied as they are read; an error leaves earlier ones in place.

use std::io::BufRead;

use super::error::DotenvError;
use crate::env::EnvStore;

/// Parse one line of a `.env` file.
///
/// Returns `None` for blank lines, `#` comments, lines without `=`, and lines
/// whose key is empty.
///
/// ```
/// use dotenv_loader::parse_line;
///
/// assert_eq!(parse_line(r#"  NAME = "John Doe" "#), Some(("NAME", "John Doe")));
/// assert_eq!(parse_line("KEY=# not a comment"), Some(("KEY", "# not a comment")));
/// assert_eq!(parse_line("# comment"), None);
/// assert_eq!(parse_line("=value"), None);
/// ```
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let eq = line.find('=')?;
    if eq == 0 {
        return None;
    }

    let key = line[..eq].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, unquote(line[eq + 1..].trim())))
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Apply every assignment read from `reader` to `store`, returning how many
/// were written.
pub(crate) fn apply<R, E>(reader: R, path: &str, store: &mut E) -> Result<usize, DotenvError>
where
    R: BufRead,
    E: EnvStore + ?Sized,
{
    let mut applied = 0;
    for line in reader.lines() {
        let line = line.map_err(|source| DotenvError::Read {
            path: path.to_string(),
            source,
        })?;
        let Some((key, value)) = parse_line(&line) else {
            continue;
        };
        store
            .set(key, value)
            .map_err(|source| DotenvError::SetVar {
                key: key.to_string(),
                source,
            })?;
        applied += 1;
    }
    Ok(applied)
}
