use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::compiler::config::LexerConfig;
use crate::compiler::token::{Cursor, Token, TokenKind};
use crate::types::{SqlError, SqlResult};

/// Token produced by a successful scan (none for skipped input) and the cursor after it
type Scanned = (Option<Token>, Cursor);

/// Token categories the lexer can try at a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScannerKind {
    Keyword,
    Symbol,
    String,
    Numeric,
    Identifier,
}

pub struct Scanner<'a> {
    source: &'a str,
    scanners: Vec<ScannerKind>,
    keywords: Vec<&'static str>,
    symbols: Vec<&'static str>,
}

impl<'a> Scanner<'a> {

    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, &LexerConfig::default())
    }

    pub fn with_config(source: &'a str, config: &LexerConfig) -> Self {
        Self {
            source,
            scanners: config.scanners.clone(),
            keywords: config.keyword_options(),
            symbols: config.symbol_options(),
        }
    }

    /// Scan the whole source. Fails on the first position no scanner accepts,
    /// without returning the tokens produced so far.
    pub fn scan(&self) -> SqlResult<Vec<Token>> {
        let mut tokens: Vec<Token> = vec![];
        let mut cursor = Cursor::default();

        'lex: while cursor.offset < self.source.len() {
            for kind in &self.scanners {
                if let Some((token, next)) = self.scan_with(*kind, cursor) {
                    cursor = next;
                    if let Some(token) = token {
                        tokens.push(token);
                    }
                    continue 'lex;
                }
            }

            let hint = tokens.last().map(|token| token.value.clone());
            debug!(location = %cursor.location, ?hint, "unable to lex token");
            return Err(SqlError::Lex { location: cursor.location, hint });
        }

        Ok(tokens)
    }

    fn scan_with(&self, kind: ScannerKind, cursor: Cursor) -> Option<Scanned> {
        match kind {
            ScannerKind::Keyword => scan_keyword(self.source, cursor, &self.keywords),
            ScannerKind::Symbol => scan_symbol(self.source, cursor, &self.symbols),
            ScannerKind::String => scan_string(self.source, cursor),
            ScannerKind::Numeric => scan_numeric(self.source, cursor),
            ScannerKind::Identifier => scan_identifier(self.source, cursor),
        }
    }
}

/// Lex source with the default keyword, symbol and scanner tables
pub fn lex(source: &str) -> SqlResult<Vec<Token>> {
    Scanner::new(source).scan()
}

pub fn lex_with_config(source: &str, config: &LexerConfig) -> SqlResult<Vec<Token>> {
    Scanner::with_config(source, config).scan()
}

fn is_identifier_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

/// Pick the longest option matching the source at `ic`, case-insensitively.
///
/// Options drop out once the consumed text stops being a prefix of them. An
/// exact hit only replaces the current best when it is strictly longer, so
/// `int` and `into` both resolve correctly and equal-length ties keep the
/// option listed first.
fn longest_match(source: &str, ic: Cursor, options: &[&'static str]) -> Option<&'static str> {
    let bytes = source.as_bytes();
    let mut value: Vec<u8> = Vec::new();
    let mut skip = vec![false; options.len()];
    let mut matched: Option<&'static str> = None;
    let mut offset = ic.offset;

    while offset < bytes.len() {
        value.push(bytes[offset].to_ascii_lowercase());
        offset += 1;

        for (i, option) in options.iter().enumerate() {
            if skip[i] {
                continue;
            }

            if option.as_bytes() == value.as_slice() {
                skip[i] = true;
                if matched.map_or(true, |m| option.len() > m.len()) {
                    matched = Some(*option);
                }
                continue;
            }

            let too_long = value.len() > option.len();
            if too_long || !option.as_bytes().starts_with(&value) {
                skip[i] = true;
            }
        }

        if skip.iter().all(|s| *s) {
            break;
        }
    }

    matched
}

fn scan_keyword(source: &str, ic: Cursor, keywords: &[&'static str]) -> Option<Scanned> {
    let matched = longest_match(source, ic, keywords)?;

    // `intox` is an identifier, not INT followed by `ox`
    let end = ic.offset + matched.len();
    if source.as_bytes().get(end).is_some_and(|c| is_identifier_char(*c)) {
        return None;
    }

    let token = Token::new(matched, TokenKind::Keyword, ic.location);
    Some((Some(token), ic.advance_by(matched.len())))
}

fn scan_symbol(source: &str, ic: Cursor, symbols: &[&'static str]) -> Option<Scanned> {
    let bytes = source.as_bytes();
    let c = *bytes.get(ic.offset)?;

    match c {
        // whitespace is consumed without a token
        b' ' | b'\t' | b'\r' | b'\n' => return Some((None, ic.advance(c))),
        b'-' if bytes.get(ic.offset + 1) == Some(&b'-') => {
            // SQL comment: -- until end of line
            let mut cur = ic;
            while let Some(&c) = bytes.get(cur.offset) {
                if c == b'\n' {
                    break;
                }
                cur = cur.advance(c);
            }
            return Some((None, cur));
        }
        _ => {}
    }

    let matched = longest_match(source, ic, symbols)?;
    let token = Token::new(matched, TokenKind::Symbol, ic.location);
    Some((Some(token), ic.advance_by(matched.len())))
}

/// Scan text enclosed by `delimiter`, where a doubled delimiter stands for
/// one literal delimiter ('It''s'). Unterminated text is not a match.
fn scan_delimited(source: &str, ic: Cursor, delimiter: u8) -> Option<(String, Cursor)> {
    let bytes = source.as_bytes();
    if bytes.get(ic.offset) != Some(&delimiter) {
        return None;
    }

    let mut cur = ic.advance(delimiter);
    let mut value = String::new();
    let mut segment = cur.offset;

    while let Some(&c) = bytes.get(cur.offset) {
        let at = cur.offset;
        cur = cur.advance(c);

        if c == delimiter {
            value.push_str(&source[segment..at]);
            if bytes.get(cur.offset) != Some(&delimiter) {
                return Some((value, cur));
            }

            // doubled delimiter, keep one
            value.push(char::from(delimiter));
            cur = cur.advance(delimiter);
            segment = cur.offset;
        }
    }

    None
}

fn scan_string(source: &str, ic: Cursor) -> Option<Scanned> {
    let (value, cur) = scan_delimited(source, ic, b'\'')?;
    Some((Some(Token::new(value, TokenKind::String, ic.location)), cur))
}

/// Scan a numeric literal such as `12`, `.5`, `1.5e-3`
fn scan_numeric(source: &str, ic: Cursor) -> Option<Scanned> {
    let bytes = source.as_bytes();
    let mut cur = ic;

    let mut period_found = false;
    let mut exp_marker_found = false;
    let mut mantissa_digit = false;

    while let Some(&c) = bytes.get(cur.offset) {
        let is_digit = c.is_ascii_digit();
        let is_period = c == b'.';
        let is_exp_marker = c == b'e' || c == b'E';

        if cur.offset == ic.offset {
            if !is_digit && !is_period {
                return None;
            }

            period_found = is_period;
            mantissa_digit = is_digit;
            cur = cur.advance(c);
            continue;
        }

        if is_period {
            if period_found {
                return None;
            }

            period_found = true;
            cur = cur.advance(c);
            continue;
        }

        if is_exp_marker {
            if exp_marker_found {
                return None;
            }

            // no period allowed after the exponent marker
            period_found = true;
            exp_marker_found = true;
            cur = cur.advance(c);

            if let Some(&sign @ (b'+' | b'-')) = bytes.get(cur.offset) {
                cur = cur.advance(sign);
            }

            if !bytes.get(cur.offset).is_some_and(u8::is_ascii_digit) {
                return None;
            }

            continue;
        }

        if !is_digit {
            break;
        }

        if !exp_marker_found {
            mantissa_digit = true;
        }
        cur = cur.advance(c);
    }

    if !mantissa_digit {
        return None;
    }

    let token = Token::new(&source[ic.offset..cur.offset], TokenKind::Numeric, ic.location);
    Some((Some(token), cur))
}

fn scan_identifier(source: &str, ic: Cursor) -> Option<Scanned> {
    // double-quoted identifiers keep their case
    if let Some((value, cur)) = scan_delimited(source, ic, b'"') {
        return Some((Some(Token::new(value, TokenKind::Identifier, ic.location)), cur));
    }

    let bytes = source.as_bytes();
    let first = *bytes.get(ic.offset)?;
    if !first.is_ascii_alphabetic() {
        return None;
    }

    let mut cur = ic.advance(first);
    while let Some(&c) = bytes.get(cur.offset) {
        if !is_identifier_char(c) {
            break;
        }
        cur = cur.advance(c);
    }

    let value = source[ic.offset..cur.offset].to_ascii_lowercase();
    Some((Some(Token::new(value, TokenKind::Identifier, ic.location)), cur))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::token::Location;

    const KEYWORDS: [&str; 3] = ["int", "into", "insert"];

    fn numeric(source: &str) -> Option<String> {
        scan_numeric(source, Cursor::default())
            .and_then(|(token, _)| token)
            .map(|token| token.value)
    }

    #[test]
    fn longest_match_prefers_longer_option() {
        assert_eq!(longest_match("into", Cursor::default(), &KEYWORDS), Some("into"));
        assert_eq!(longest_match("int", Cursor::default(), &KEYWORDS), Some("int"));
        assert_eq!(longest_match("INTO x", Cursor::default(), &KEYWORDS), Some("into"));
    }

    #[test]
    fn longest_match_falls_back_to_shorter_option() {
        // `inte` rules out `into` but `int` already matched
        assert_eq!(longest_match("integer", Cursor::default(), &KEYWORDS), Some("int"));
        assert_eq!(longest_match("in", Cursor::default(), &KEYWORDS), None);
        assert_eq!(longest_match("", Cursor::default(), &KEYWORDS), None);
    }

    #[test]
    fn longest_match_starts_at_cursor() {
        let cursor = Cursor::default().advance_by(4);
        assert_eq!(longest_match("abc insert", cursor, &KEYWORDS), Some("insert"));
    }

    #[test]
    fn longest_match_keeps_first_of_equal_length() {
        let options = ["ab", "ab"];
        assert_eq!(longest_match("ab", Cursor::default(), &options), Some("ab"));
    }

    #[test]
    fn numeric_stops_at_first_disallowed_character() {
        assert_eq!(numeric("123;"), Some("123".to_string()));
        assert_eq!(numeric("1.5)"), Some("1.5".to_string()));
        assert_eq!(numeric("1e10,"), Some("1e10".to_string()));
        assert_eq!(numeric("1.5e-3 "), Some("1.5e-3".to_string()));
        assert_eq!(numeric(".5"), Some(".5".to_string()));
    }

    #[test]
    fn numeric_rejects_malformed_literals() {
        assert_eq!(numeric("1.2.3"), None);
        assert_eq!(numeric("1ee2"), None);
        assert_eq!(numeric("1e"), None);
        assert_eq!(numeric("1e+"), None);
        assert_eq!(numeric("1e5.2"), None);
        assert_eq!(numeric("."), None);
        assert_eq!(numeric("abc"), None);
    }

    #[test]
    fn numeric_cursor_spans_literal() {
        let (_, cur) = scan_numeric("42 ", Cursor::default()).unwrap();
        assert_eq!(cur.offset, 2);
        assert_eq!(cur.location, Location { line: 0, column: 2 });
    }

    #[test]
    fn delimited_collapses_doubled_delimiter() {
        let (value, cur) = scan_delimited("'a''b' rest", Cursor::default(), b'\'').unwrap();
        assert_eq!(value, "a'b");
        assert_eq!(cur.offset, 6);
    }

    #[test]
    fn delimited_keeps_multibyte_text() {
        let (value, cur) = scan_delimited("'héllo''s' x", Cursor::default(), b'\'').unwrap();
        assert_eq!(value, "héllo's");
        assert_eq!(cur.offset, 11);
        assert_eq!(cur.location, Location { line: 0, column: 10 });
    }

    #[test]
    fn delimited_requires_closing_delimiter() {
        assert!(scan_delimited("'open", Cursor::default(), b'\'').is_none());
        assert!(scan_delimited("'a''", Cursor::default(), b'\'').is_none());
        assert!(scan_delimited("x'a'", Cursor::default(), b'\'').is_none());
    }

    #[test]
    fn symbol_skips_whitespace_and_comments() {
        let symbols = ["(", ")"];
        let (token, cur) = scan_symbol("\nx", Cursor::default(), &symbols).unwrap();
        assert!(token.is_none());
        assert_eq!(cur.location, Location { line: 1, column: 0 });

        let (token, cur) = scan_symbol("-- note\n(", Cursor::default(), &symbols).unwrap();
        assert!(token.is_none());
        assert_eq!(cur.offset, 7);

        assert!(scan_symbol("-1", Cursor::default(), &symbols).is_none());
    }

    #[test]
    fn keyword_requires_word_boundary() {
        let keywords = ["int", "into"];
        assert!(scan_keyword("intox", Cursor::default(), &keywords).is_none());
        let (token, _) = scan_keyword("int,", Cursor::default(), &keywords).unwrap();
        assert_eq!(token.unwrap().value, "int");
    }
}
