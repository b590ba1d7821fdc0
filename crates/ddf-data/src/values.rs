//! Parsers for individual field values.

use std::str::FromStr;

use ddf_types::Rgb;
use winnow::ascii::{Caseless, dec_int, float, space0};
use winnow::combinator::{alt, delimited, opt, preceded, terminated};
use winnow::prelude::*;
use winnow::token::{literal, one_of, take_while};

use crate::diag::Severity;
use crate::name;

/// Game tics per second.
pub const TICRATE: i32 = 35;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("bad integer '{0}'")]
    Integer(String),
    #[error("bad number '{0}'")]
    Float(String),
    #[error("bad boolean '{0}'")]
    Boolean(String),
    #[error("bad percentage '{0}' (expected e.g. 50%)")]
    Percent(String),
    #[error("bad time '{0}' (expected tics like 35T, seconds, or MAXT)")]
    Time(String),
    #[error("bad colour '{0}' (expected #RRGGBB)")]
    Colour(String),
    #[error("malformed call '{0}' (expected NAME, NAME(ARG) or NAME(ARG1:ARG2))")]
    Call(String),
    #[error("bad lump name '{0}'")]
    LumpName(String),
    #[error("unknown {what} '{value}'")]
    Keyword { what: &'static str, value: String },
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),
    #[error("{0}")]
    Invalid(String),
}

impl ValueError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnknownFlag(_) => Severity::WarnError,
            _ => Severity::Fatal,
        }
    }
}

/// A function-call style value: `NAME`, `NAME(ARG)` or `NAME(ARG1:ARG2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call<'a> {
    pub name: &'a str,
    pub arg: Option<&'a str>,
    pub arg2: Option<&'a str>,
}

fn integer(input: &mut &str) -> ModalResult<i32> {
    dec_int.parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<f32> {
    float.parse_next(input)
}

fn boolean_expr(input: &mut &str) -> ModalResult<bool> {
    alt((
        literal(Caseless("TRUE")).value(true),
        literal(Caseless("FALSE")).value(false),
        '1'.value(true),
        '0'.value(false),
    ))
    .parse_next(input)
}

fn percentage(input: &mut &str) -> ModalResult<f32> {
    terminated(number, preceded(space0, '%'))
        .map(|p| p / 100.0)
        .parse_next(input)
}

fn time_expr(input: &mut &str) -> ModalResult<i32> {
    alt((
        literal(Caseless("MAXT")).value(-1),
        terminated(integer, one_of(['T', 't'])),
        number.map(|secs| (secs * TICRATE as f32).round() as i32),
    ))
    .parse_next(input)
}

fn colour_expr(input: &mut &str) -> ModalResult<Rgb> {
    preceded('#', take_while(6, ('0'..='9', 'a'..='f', 'A'..='F')))
        .try_map(|hex: &str| u32::from_str_radix(hex, 16).map(Rgb::from_packed))
        .parse_next(input)
}

fn ident<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn call_expr<'s>(input: &mut &'s str) -> ModalResult<Call<'s>> {
    let name = ident.parse_next(input)?;
    let args = opt(delimited(
        (space0, '('),
        (
            take_while(0.., |c: char| c != ':' && c != ')'),
            opt(preceded(':', take_while(0.., |c: char| c != ')'))),
        ),
        ')',
    ))
    .parse_next(input)?;
    let (arg, arg2) = match args {
        Some((arg, arg2)) => (Some(arg.trim()), arg2.map(str::trim)),
        None => (None, None),
    };
    Ok(Call { name, arg, arg2 })
}

pub fn int(text: &str) -> Result<i32, ValueError> {
    let text = text.trim();
    integer
        .parse(text)
        .map_err(|_| ValueError::Integer(text.to_string()))
}

pub fn real(text: &str) -> Result<f32, ValueError> {
    let text = text.trim();
    number
        .parse(text)
        .map_err(|_| ValueError::Float(text.to_string()))
}

pub fn boolean(text: &str) -> Result<bool, ValueError> {
    let text = text.trim();
    boolean_expr
        .parse(text)
        .map_err(|_| ValueError::Boolean(text.to_string()))
}

/// `50%` → `0.5`. The percent sign is required.
pub fn percent(text: &str) -> Result<f32, ValueError> {
    let text = text.trim();
    percentage
        .parse(text)
        .map_err(|_| ValueError::Percent(text.to_string()))
}

/// A duration in tics: `35T`, a bare number of seconds, or `MAXT` (-1).
pub fn tics(text: &str) -> Result<i32, ValueError> {
    let text = text.trim();
    time_expr
        .parse(text)
        .map_err(|_| ValueError::Time(text.to_string()))
}

pub fn colour(text: &str) -> Result<Rgb, ValueError> {
    let text = text.trim();
    colour_expr
        .parse(text)
        .map_err(|_| ValueError::Colour(text.to_string()))
}

pub fn call(text: &str) -> Result<Call<'_>, ValueError> {
    let text = text.trim();
    call_expr
        .parse(text)
        .map_err(|_| ValueError::Call(text.to_string()))
}

/// A WAD lump name: 1 to 8 characters without whitespace, stored uppercase.
pub fn lump_name(text: &str) -> Result<String, ValueError> {
    let text = text.trim();
    if text.is_empty() || text.len() > 8 || text.chars().any(|c| c.is_whitespace()) {
        return Err(ValueError::LumpName(text.to_string()));
    }
    Ok(text.to_ascii_uppercase())
}

/// Match an enum keyword by canonical name, so `CLOSE_COMBAT` selects
/// `CloseCombat`.
pub fn keyword<E: FromStr>(text: &str, what: &'static str) -> Result<E, ValueError> {
    E::from_str(&name::normalize(text)).map_err(|_| ValueError::Keyword {
        what,
        value: text.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(int("42"), Ok(42));
        assert_eq!(int(" -7 "), Ok(-7));
        assert_eq!(int("+3"), Ok(3));
        assert!(int("4x").is_err());
        assert!(int("").is_err());
    }

    #[test]
    fn reals() {
        assert_eq!(real("1.5"), Ok(1.5));
        assert_eq!(real("-2"), Ok(-2.0));
        assert!(real("fast").is_err());
    }

    #[test]
    fn booleans() {
        assert_eq!(boolean("true"), Ok(true));
        assert_eq!(boolean("FALSE"), Ok(false));
        assert_eq!(boolean("1"), Ok(true));
        assert!(boolean("yes").is_err());
    }

    #[test]
    fn percentages_require_sign() {
        assert_eq!(percent("50%"), Ok(0.5));
        assert_eq!(percent("12.5 %"), Ok(0.125));
        assert!(matches!(percent("50"), Err(ValueError::Percent(_))));
    }

    #[test]
    fn times() {
        assert_eq!(tics("35T"), Ok(35));
        assert_eq!(tics("8t"), Ok(8));
        assert_eq!(tics("2"), Ok(70));
        assert_eq!(tics("0.5"), Ok(18));
        assert_eq!(tics("MAXT"), Ok(-1));
        assert_eq!(tics("maxt"), Ok(-1));
        assert!(tics("soon").is_err());
    }

    #[test]
    fn colours() {
        assert_eq!(colour("#FF8000"), Ok(Rgb::new(0xFF, 0x80, 0x00)));
        assert_eq!(colour(" #00ff00 "), Ok(Rgb::new(0, 0xFF, 0)));
        assert!(colour("FF8000").is_err());
        assert!(colour("#FFF").is_err());
    }

    #[test]
    fn calls() {
        assert_eq!(
            call("HEALTH(10:100)"),
            Ok(Call {
                name: "HEALTH",
                arg: Some("10"),
                arg2: Some("100"),
            })
        );
        let c = call("BULLETS( 10 )").expect("one arg");
        assert_eq!((c.name, c.arg, c.arg2), ("BULLETS", Some("10"), None));
        let c = call("KEY_BLUECARD").expect("bare");
        assert_eq!((c.arg, c.arg2), (None, None));
        assert!(call("FOO(").is_err());
        assert!(call("(1)").is_err());
    }

    #[test]
    fn lump_names() {
        assert_eq!(lump_name("nukage1"), Ok("NUKAGE1".to_string()));
        assert!(lump_name("TOOLONGNAME").is_err());
        assert!(lump_name("A B").is_err());
        assert!(lump_name("").is_err());
    }

    #[test]
    fn unknown_flags_are_recoverable() {
        assert_eq!(ValueError::UnknownFlag("X".into()).severity(), Severity::WarnError);
        assert_eq!(ValueError::Integer("X".into()).severity(), Severity::Fatal);
    }
}
