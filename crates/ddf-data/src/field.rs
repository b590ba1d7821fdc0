//! Per-kind field dispatch tables and the writer that applies one parsed
//! field to an entry.

use crate::name;
use crate::values::ValueError;

/// One element of a field statement. List statements deliver each element
/// in turn; `index` counts from 0 and `is_last` marks the final one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValue<'a> {
    pub text: &'a str,
    pub index: usize,
    pub is_last: bool,
}

impl<'a> FieldValue<'a> {
    pub fn single(text: &'a str) -> Self {
        Self {
            text,
            index: 0,
            is_last: true,
        }
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}

pub type ValueSetter<T> = fn(&mut T, &FieldValue<'_>) -> Result<(), ValueError>;

/// Dispatch `SUB.KEY` into a sub-record: receives the entry, the remaining
/// key after the `.`, and the value. Returns whether the key was known.
pub type SubSetter<T> = fn(&mut T, &str, &FieldValue<'_>) -> Result<bool, ValueError>;

#[derive(Clone, Copy)]
pub enum Setter<T> {
    Value(ValueSetter<T>),
    Sub(SubSetter<T>),
}

#[derive(Clone, Copy)]
pub struct FieldDef<T> {
    pub name: &'static str,
    pub setter: Setter<T>,
}

impl<T> FieldDef<T> {
    pub const fn value(name: &'static str, set: ValueSetter<T>) -> Self {
        Self {
            name,
            setter: Setter::Value(set),
        }
    }

    pub const fn sub(name: &'static str, set: SubSetter<T>) -> Self {
        Self {
            name,
            setter: Setter::Sub(set),
        }
    }
}

/// Apply `field = value` to `target` using `table`.
///
/// Keywords compare with [`name::matches`]; the first matching row wins.
/// `Ok(false)` means no row matched, which the caller reports according to
/// its own policy.
pub fn apply<T>(
    table: &[FieldDef<T>],
    field: &str,
    value: &FieldValue<'_>,
    target: &mut T,
) -> Result<bool, ValueError> {
    let field = field.trim();
    let split = field.split_once('.');
    for def in table {
        match def.setter {
            Setter::Value(set) if name::matches(def.name, field) => {
                set(target, value)?;
                return Ok(true);
            }
            Setter::Sub(set) => {
                if let Some((head, rest)) = split {
                    if name::matches(def.name, head) {
                        return set(target, rest, value);
                    }
                }
            }
            Setter::Value(_) => {}
        }
    }
    Ok(false)
}
