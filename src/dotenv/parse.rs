//! Dotenv syntax parsing.
//!
//! Each non-blank, non-comment line is a `KEY=VALUE` assignment, optionally
//! prefixed with `export`. Values may be unquoted, single-quoted (literal) or
//! double-quoted (with escape sequences). Quoted values may span lines.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use super::error::{EnvError, SyntaxError, SyntaxErrorKind};
use super::options::{Encoding, ReadOptions};

/// Variables parsed from one or more env files.
pub type EnvMap = BTreeMap<String, String>;

/// Parses every file in order and merges the results.
///
/// Later files override earlier ones key by key, so `files` must be ordered
/// from lowest to highest priority.
pub fn parse<I>(files: I, options: &ReadOptions) -> Result<EnvMap, EnvError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut merged = EnvMap::new();

    for path in files {
        let vars = parse_file(path.as_ref(), options.encoding)?;
        merge(&mut merged, vars);
    }

    Ok(merged)
}

/// Reads and parses a single env file.
pub fn parse_file(path: &Path, encoding: Encoding) -> Result<EnvMap, EnvError> {
    let bytes = std::fs::read(path).map_err(|e| EnvError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let contents = encoding
        .decode(bytes)
        .ok_or_else(|| EnvError::InvalidEncoding {
            path: path.to_path_buf(),
            encoding,
        })?;

    let vars = parse_str(&contents).map_err(|e| EnvError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), count = vars.len(), "parsed env file");
    Ok(vars)
}

fn merge(base: &mut EnvMap, overlay: EnvMap) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}

/// Parses dotenv content. Duplicate keys resolve to the last assignment.
pub fn parse_str(input: &str) -> Result<EnvMap, SyntaxError> {
    let mut vars = EnvMap::new();
    let mut lines = input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, line)| (index + 1, line));

    while let Some((line_no, line)) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, rest) = strip_export(trimmed).split_once('=').ok_or(SyntaxError {
            line: line_no,
            kind: SyntaxErrorKind::MissingSeparator,
        })?;

        let key = key.trim();
        if !is_valid_key(key) {
            return Err(SyntaxError {
                line: line_no,
                kind: SyntaxErrorKind::InvalidKey(key.to_string()),
            });
        }

        let rest = rest.trim_start();
        let value = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => parse_quoted(quote, &rest[1..], line_no, &mut lines)?,
            _ => parse_unquoted(rest),
        };

        vars.insert(key.to_string(), value);
    }

    Ok(vars)
}

fn strip_export(statement: &str) -> &str {
    statement
        .strip_prefix("export")
        .filter(|rest| rest.starts_with([' ', '\t']))
        .map(str::trim_start)
        .unwrap_or(statement)
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Strips an inline ` # comment` and surrounding whitespace.
fn parse_unquoted(raw: &str) -> String {
    let end = raw
        .char_indices()
        .find(|&(i, ch)| ch == '#' && raw[..i].ends_with([' ', '\t']))
        .map_or(raw.len(), |(i, _)| i);
    raw[..end].trim().to_string()
}

/// Consumes a quoted value starting right after the opening quote.
///
/// Pulls further lines from `lines` until the closing quote is found; the
/// line breaks are kept in the value.
fn parse_quoted<'a, I>(
    quote: char,
    first: &'a str,
    start_line: usize,
    lines: &mut I,
) -> Result<String, SyntaxError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut value = String::new();
    let mut segment = first;
    let mut line_no = start_line;

    loop {
        let mut chars = segment.char_indices();
        while let Some((i, ch)) = chars.next() {
            if ch == quote {
                let tail = segment[i + ch.len_utf8()..].trim_start();
                if !tail.is_empty() && !tail.starts_with('#') {
                    return Err(SyntaxError {
                        line: line_no,
                        kind: SyntaxErrorKind::TrailingCharacters,
                    });
                }
                return Ok(value);
            }

            if ch == '\\' && quote == '"' {
                match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, escaped @ ('\\' | '"' | '\'' | '$'))) => value.push(escaped),
                    Some((_, other)) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => value.push('\\'),
                }
                continue;
            }

            value.push(ch);
        }

        match lines.next() {
            Some((next_no, next)) => {
                value.push('\n');
                segment = next;
                line_no = next_no;
            }
            None => {
                return Err(SyntaxError {
                    line: start_line,
                    kind: SyntaxErrorKind::UnterminatedQuote(quote),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn vars(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_assignments() {
        let parsed = parse_str("A=1\n  B = two  \n\n# comment\nC=\n").unwrap();
        assert_eq!(parsed, vars(&[("A", "1"), ("B", "two"), ("C", "")]));
    }

    #[test]
    fn test_export_prefix_and_crlf() {
        let parsed = parse_str("export A=1\r\nexport\tB=2\r\nexporter=3\r\n").unwrap();
        assert_eq!(parsed, vars(&[("A", "1"), ("B", "2"), ("exporter", "3")]));
    }

    #[test]
    fn test_inline_comments() {
        let parsed = parse_str("A=value # note\nB=pass#word\nC='quoted # kept' # dropped\n").unwrap();
        assert_eq!(parsed["A"], "value");
        assert_eq!(parsed["B"], "pass#word");
        assert_eq!(parsed["C"], "quoted # kept");
    }

    #[test]
    fn test_double_quoted_escapes() {
        let parsed = parse_str(r#"A="line1\nline2\t\"q\" \\ \$HOME \x""#).unwrap();
        assert_eq!(parsed["A"], "line1\nline2\t\"q\" \\ $HOME \\x");
    }

    #[test]
    fn test_single_quoted_is_literal() {
        let parsed = parse_str(r"A='no\nescape'").unwrap();
        assert_eq!(parsed["A"], r"no\nescape");
    }

    #[test]
    fn test_multiline_quoted_value() {
        let input = "KEY=\"-----BEGIN-----\nabc\n-----END-----\"\nNEXT=1\n";
        let parsed = parse_str(input).unwrap();
        assert_eq!(parsed["KEY"], "-----BEGIN-----\nabc\n-----END-----");
        assert_eq!(parsed["NEXT"], "1");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        assert_eq!(parse_str("A=1\nA=2").unwrap()["A"], "2");
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_str("A=1\n\nKEY\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, SyntaxErrorKind::MissingSeparator);
    }

    #[test]
    fn test_invalid_key() {
        let err = parse_str("BAD KEY=1").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::InvalidKey("BAD KEY".into()));

        let err = parse_str("=1").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::InvalidKey(String::new()));
    }

    #[test]
    fn test_unterminated_quote_reports_opening_line() {
        let err = parse_str("A=1\nB=\"open\nstill open\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, SyntaxErrorKind::UnterminatedQuote('"'));
    }

    #[test]
    fn test_trailing_characters_after_quote() {
        let err = parse_str("A='x' y").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, SyntaxErrorKind::TrailingCharacters);
    }

    #[test]
    fn test_parse_file_is_idempotent() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "A=1\nB=\"two\"").unwrap();

        let first = parse_file(file.path(), Encoding::Utf8).unwrap();
        let second = parse_file(file.path(), Encoding::Utf8).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vars(&[("A", "1"), ("B", "two")]));
    }

    #[test]
    fn test_parse_merges_with_overwrite() {
        let dir = TempDir::new().unwrap();
        let low = dir.path().join(".env");
        let high = dir.path().join(".env.local");
        std::fs::write(&low, "A=1\nKEEP=low\n").unwrap();
        std::fs::write(&high, "A=2\nB=3\n").unwrap();

        let parsed = parse([&low, &high], &ReadOptions::default()).unwrap();
        assert_eq!(parsed, vars(&[("A", "2"), ("B", "3"), ("KEEP", "low")]));
    }

    #[test]
    fn test_parse_error_names_file_and_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "A=1\nKEY\n").unwrap();

        let err = parse([&path], &ReadOptions::default()).unwrap_err();
        match &err {
            EnvError::Parse { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse(["/nonexistent/path/.env"], &ReadOptions::default());
        assert!(matches!(result, Err(EnvError::ReadError { .. })));
    }

    #[test]
    fn test_parse_invalid_encoding() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"A=caf\xe9\n").unwrap();

        let result = parse_file(file.path(), Encoding::Utf8);
        assert!(matches!(result, Err(EnvError::InvalidEncoding { .. })));

        let parsed = parse_file(file.path(), Encoding::Latin1).unwrap();
        assert_eq!(parsed["A"], "café");
    }
}
