//! Tokenizer for DDF text.
//!
//! DDF is line oriented: a `<TAG>` names the kind, `[NAME]` opens an entry,
//! and `KEY = VALUE, VALUE...;` statements fill it in. Statements run until
//! the next `;` outside quotes, so they may span lines or share one.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `<THINGS>`
    Tag(String),
    /// `[NAME]` or `[NAME] extend`
    Header { name: String, extend: bool },
    /// `KEY = V1, V2;` with quotes removed from each value.
    Field { key: String, values: Vec<String> },
    /// `#CLEARALL`
    ClearAll,
    /// `#VERSION n`
    Version(String),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Tag(t) => write!(f, "<{t}>"),
            Statement::Header { name, extend: false } => write!(f, "[{name}]"),
            Statement::Header { name, extend: true } => write!(f, "[{name}] extend"),
            Statement::Field { key, values } => write!(f, "{key} = {};", values.join(", ")),
            Statement::ClearAll => write!(f, "#CLEARALL"),
            Statement::Version(v) => write!(f, "#VERSION {v}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Located<T> {
    pub value: T,
    pub line: usize,
    /// Raw source line the statement starts on.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("{msg}")]
    Error {
        line: usize,
        text: String,
        msg: String,
    },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::Error { line, .. } => *line,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            LexError::Error { text, .. } => text,
        }
    }
}

fn err(line: usize, text: &str, msg: impl Into<String>) -> LexError {
    LexError::Error {
        line,
        text: text.trim().to_string(),
        msg: msg.into(),
    }
}

/// A statement still waiting for its `;`.
struct Pending {
    line: usize,
    text: String,
    buf: String,
}

pub fn lex(input: &str) -> Result<Vec<Located<Statement>>, LexError> {
    let mut out = Vec::new();
    let mut pending: Option<Pending> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let code = strip_comment(raw).ok_or_else(|| err(line, raw, "unterminated string"))?;
        let code = code.trim();
        if code.is_empty() {
            continue;
        }

        if starts_block(code, pending.is_some()) {
            if let Some(p) = &pending {
                return Err(err(p.line, &p.text, "unterminated statement (missing ';')"));
            }
            let value = match code.as_bytes()[0] {
                b'<' => parse_tag(code, line, raw)?,
                b'[' => parse_header(code, line, raw)?,
                _ => parse_directive(code, line, raw)?,
            };
            out.push(Located {
                value,
                line,
                text: raw.trim().to_string(),
            });
            continue;
        }

        let p = pending.get_or_insert_with(|| Pending {
            line,
            text: raw.trim().to_string(),
            buf: String::new(),
        });
        if !p.buf.is_empty() {
            p.buf.push('\n');
        }
        p.buf.push_str(code);

        while let Some(end) = find_terminator(&p.buf) {
            let value = parse_field(&p.buf[..end], p.line, &p.text)?;
            out.push(Located {
                value,
                line: p.line,
                text: p.text.clone(),
            });
            p.buf = p.buf[end + 1..].trim_start().to_string();
            p.line = line;
            p.text = raw.trim().to_string();
        }
        let finished = p.buf.is_empty();
        if finished {
            pending = None;
        }
    }

    if let Some(p) = pending {
        return Err(err(p.line, &p.text, "unterminated statement (missing ';')"));
    }
    Ok(out)
}

/// Headers, tags and directives stand alone. Inside an open statement a
/// `#` line is only a directive if it names one, so `#RRGGBB` values may
/// start a continuation line.
fn starts_block(code: &str, in_statement: bool) -> bool {
    match code.as_bytes()[0] {
        b'[' | b'<' => true,
        b'#' => !in_statement || is_directive(code),
        _ => false,
    }
}

fn is_directive(code: &str) -> bool {
    let word = code[1..].split_whitespace().next().unwrap_or_default();
    ["CLEARALL", "VERSION"]
        .iter()
        .any(|d| word.eq_ignore_ascii_case(d))
}

/// Drop a trailing `//` comment. Returns `None` if a string is left open.
fn strip_comment(raw: &str) -> Option<&str> {
    let mut in_quote = false;
    let mut escaped = false;
    let mut prev_slash = false;
    for (i, c) in raw.char_indices() {
        if in_quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quote = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quote = true,
            '/' if prev_slash => return Some(&raw[..i - 1]),
            _ => {}
        }
        prev_slash = c == '/';
    }
    (!in_quote).then_some(raw)
}

/// Byte offset of the first `;` outside quotes and parentheses.
fn find_terminator(buf: &str) -> Option<usize> {
    let mut in_quote = false;
    let mut escaped = false;
    let mut depth = 0usize;
    for (i, c) in buf.char_indices() {
        if in_quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quote = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quote = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_tag(code: &str, line: usize, raw: &str) -> Result<Statement, LexError> {
    let inner = code
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.contains(['<', '>']))
        .ok_or_else(|| err(line, raw, "malformed kind tag"))?;
    Ok(Statement::Tag(inner.to_string()))
}

fn parse_header(code: &str, line: usize, raw: &str) -> Result<Statement, LexError> {
    let close = code
        .find(']')
        .ok_or_else(|| err(line, raw, "missing ']' in entry header"))?;
    let name = unquote(code[1..close].trim());
    if name.is_empty() {
        return Err(err(line, raw, "empty entry name"));
    }
    if name.contains('[') {
        return Err(err(line, raw, "malformed entry header"));
    }
    let extend = match code[close + 1..].trim() {
        "" => false,
        rest if rest.eq_ignore_ascii_case("extend") => true,
        rest => {
            return Err(err(
                line,
                raw,
                format!("unexpected '{rest}' after entry header"),
            ));
        }
    };
    Ok(Statement::Header { name, extend })
}

fn parse_directive(code: &str, line: usize, raw: &str) -> Result<Statement, LexError> {
    let mut words = code[1..].split_whitespace();
    let word = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();
    if word.eq_ignore_ascii_case("CLEARALL") && rest.is_empty() {
        Ok(Statement::ClearAll)
    } else if word.eq_ignore_ascii_case("VERSION") {
        Ok(Statement::Version(rest.join(" ")))
    } else {
        Err(err(line, raw, format!("unknown directive '#{word}'")))
    }
}

fn parse_field(stmt: &str, line: usize, raw: &str) -> Result<Statement, LexError> {
    let eq = find_outside_quotes(stmt, '=')
        .ok_or_else(|| err(line, raw, "expected KEY = VALUE"))?;
    let key = stmt[..eq].trim();
    if key.is_empty() {
        return Err(err(line, raw, "missing field name"));
    }
    if key.contains('"') {
        return Err(err(line, raw, format!("malformed field name '{key}'")));
    }
    let values = split_values(&stmt[eq + 1..]).map_err(|msg| err(line, raw, msg))?;
    Ok(Statement::Field {
        key: key.to_string(),
        values,
    })
}

fn find_outside_quotes(s: &str, target: char) -> Option<usize> {
    let mut in_quote = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            c if c == target && !in_quote => return Some(i),
            _ => {}
        }
    }
    None
}

/// Split a value list on commas outside quotes and parentheses.
fn split_values(s: &str) -> Result<Vec<String>, String> {
    let mut values = Vec::new();
    let mut in_quote = false;
    let mut escaped = false;
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if in_quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quote = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quote = true,
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced ')' in value".to_string())?;
            }
            ',' if depth == 0 => {
                values.push(unquote(s[start..i].trim()));
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err("unbalanced '(' in value".into());
    }
    values.push(unquote(s[start..].trim()));
    Ok(values)
}

fn unquote(s: &str) -> String {
    let Some(inner) = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|_| s.len() >= 2)
    else {
        return s.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(input: &str) -> Vec<Statement> {
        lex(input)
            .expect("lex")
            .into_iter()
            .map(|l| l.value)
            .collect()
    }

    fn field(key: &str, vals: &[&str]) -> Statement {
        Statement::Field {
            key: key.into(),
            values: vals.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn lex_simple_entry() {
        let stmts = values("<THINGS>\n[IMP:3001]\nSPAWNHEALTH = 60;\n");
        assert_eq!(
            stmts,
            vec![
                Statement::Tag("THINGS".into()),
                Statement::Header {
                    name: "IMP:3001".into(),
                    extend: false
                },
                field("SPAWNHEALTH", &["60"]),
            ]
        );
    }

    #[test]
    fn lex_extend_header() {
        let stmts = values("[IMP] EXTEND\n[DEMON]   extend  \n");
        assert!(matches!(&stmts[0], Statement::Header { name, extend: true } if name == "IMP"));
        assert!(matches!(&stmts[1], Statement::Header { name, extend: true } if name == "DEMON"));
    }

    #[test]
    fn lex_comma_list_and_calls() {
        let stmts = values("PICKUP_BENEFIT = HEALTH(10:100), BULLETS(10) , KEY_BLUECARD;");
        assert_eq!(
            stmts,
            vec![field(
                "PICKUP_BENEFIT",
                &["HEALTH(10:100)", "BULLETS(10)", "KEY_BLUECARD"]
            )]
        );
    }

    #[test]
    fn semicolon_inside_call_does_not_end_statement() {
        let stmts = values("A = F(1;2), G; B = 3;");
        assert_eq!(stmts, vec![field("A", &["F(1;2)", "G"]), field("B", &["3"])]);
    }

    #[test]
    fn lex_sub_block_key() {
        let stmts = values("DAMAGE.VAL = 5;\nDAMAGE.OBITUARY = \"%o was hit\";");
        assert_eq!(stmts[0], field("DAMAGE.VAL", &["5"]));
        assert_eq!(stmts[1], field("DAMAGE.OBITUARY", &["%o was hit"]));
    }

    #[test]
    fn quotes_protect_separators_and_comments() {
        let stmts = values(r#"NAME = "a, b; // c" ; // trailing"#);
        assert_eq!(stmts, vec![field("NAME", &["a, b; // c"])]);
    }

    #[test]
    fn escapes_in_strings() {
        let stmts = values(r#"TEXT = "say \"hi\"\nbye";"#);
        assert_eq!(stmts, vec![field("TEXT", &["say \"hi\"\nbye"])]);
    }

    #[test]
    fn statements_span_and_share_lines() {
        let lexed = lex("A = 1; B = 2;\nSEQUENCE = X1,\n  X2,\n  X3;\n").expect("lex");
        assert_eq!(lexed.len(), 3);
        assert_eq!(lexed[1].value, field("B", &["2"]));
        assert_eq!(lexed[2].value, field("SEQUENCE", &["X1", "X2", "X3"]));
        assert_eq!(lexed[2].line, 2);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let lexed = lex("// header comment\n\n[A] // trailing\n  SPEED = 4; // x\n").expect("lex");
        assert_eq!(lexed.len(), 2);
        assert_eq!(lexed[1].line, 4);
        assert_eq!(lexed[1].text, "SPEED = 4; // x");
    }

    #[test]
    fn directives() {
        let stmts = values("#CLEARALL\n#clearall\n#VERSION 1.35\n");
        assert_eq!(
            stmts,
            vec![
                Statement::ClearAll,
                Statement::ClearAll,
                Statement::Version("1.35".into())
            ]
        );
        assert!(lex("#INCLUDE foo").is_err());
    }

    #[test]
    fn empty_value_is_one_empty_element() {
        assert_eq!(values("OBITUARY = ;"), vec![field("OBITUARY", &[""])]);
    }

    #[test]
    fn malformed_header_is_an_error() {
        let e = lex("[IMP\nSPEED = 1;").unwrap_err();
        assert_eq!(e.line(), 1);
        assert_eq!(e.text(), "[IMP");
        assert!(lex("[]").is_err());
        assert!(lex("[IMP] SPEED = 1;").is_err());
    }

    #[test]
    fn unterminated_statement_is_an_error() {
        let e = lex("[IMP]\nSPEED = 1\n[DEMON]\n").unwrap_err();
        assert_eq!(e.line(), 2);
        assert!(e.to_string().contains("unterminated"));
        let e = lex("[IMP]\nSPEED = 1").unwrap_err();
        assert_eq!(e.line(), 2);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let e = lex("[IMP]\nNAME = \"open;\n").unwrap_err();
        assert_eq!(e.line(), 2);
    }

    #[test]
    fn missing_equals_is_an_error() {
        assert!(lex("SPEED 4;").is_err());
        assert!(lex("= 4;").is_err());
    }

    #[test]
    fn unbalanced_parens_are_an_error() {
        assert!(lex("A = FOO(1;").is_err());
        assert!(lex("A = FOO)1;").is_err());
    }

    #[test]
    fn malformed_tag_is_an_error() {
        assert!(lex("<THINGS").is_err());
        assert!(lex("<>").is_err());
    }

    #[test]
    fn directive_inside_statement_is_an_error() {
        let e = lex("[IMP]\nSPEED = 1\n#CLEARALL\n").unwrap_err();
        assert_eq!(e.line(), 2);
    }

    #[test]
    fn colour_value_on_continuation_line() {
        let stmts = values("GL_COLOUR =\n  #FF0000;");
        assert_eq!(stmts, vec![field("GL_COLOUR", &["#FF0000"])]);
    }
}
