//! Special-flag classification shared by every bitset-valued field.

use bitflags::Flags;

use crate::name;
use crate::values::ValueError;

/// One named contribution to a bitset. `negate` inverts its meaning, so
/// `GRAVITY` can be written as the negation of `NOGRAVITY`.
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec<V> {
    pub name: &'static str,
    pub value: V,
    pub negate: bool,
}

impl<V> FlagSpec<V> {
    pub const fn new(name: &'static str, value: V) -> Self {
        Self {
            name,
            value,
            negate: false,
        }
    }

    pub const fn negated(name: &'static str, value: V) -> Self {
        Self {
            name,
            value,
            negate: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagCheck<V> {
    Positive(V),
    Negative(V),
    /// Not in the table, but the field accepts user-defined names.
    User,
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagRules {
    /// Accept `NO`, `!` and `-` prefixes as negation.
    pub allow_prefixes: bool,
    pub allow_user: bool,
}

impl FlagRules {
    pub const PLAIN: Self = Self {
        allow_prefixes: false,
        allow_user: false,
    };
    pub const PREFIXED: Self = Self {
        allow_prefixes: true,
        allow_user: false,
    };
    pub const USER: Self = Self {
        allow_prefixes: true,
        allow_user: true,
    };
}

fn lookup<'t, V>(table: &'t [FlagSpec<V>], token: &str) -> Option<&'t FlagSpec<V>> {
    table.iter().find(|spec| name::matches(spec.name, token))
}

fn strip_negation(token: &str) -> Option<&str> {
    if let Some(rest) = token.strip_prefix(['!', '-']) {
        return Some(rest);
    }
    match token.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("NO") => Some(&token[2..]),
        _ => None,
    }
}

/// Classify `token` against `table`.
///
/// An exact table match always wins, so entries whose own name starts with
/// `NO` are never mistaken for a negated prefix.
pub fn classify<V: Copy>(table: &[FlagSpec<V>], token: &str, rules: FlagRules) -> FlagCheck<V> {
    let token = token.trim();
    let polarity = |spec: &FlagSpec<V>, negate: bool| {
        if spec.negate ^ negate {
            FlagCheck::Negative(spec.value)
        } else {
            FlagCheck::Positive(spec.value)
        }
    };

    if let Some(spec) = lookup(table, token) {
        return polarity(spec, false);
    }
    if rules.allow_prefixes {
        if let Some(spec) = strip_negation(token).and_then(|rest| lookup(table, rest)) {
            return polarity(spec, true);
        }
    }
    if rules.allow_user && !name::normalize(token).is_empty() {
        FlagCheck::User
    } else {
        FlagCheck::Unknown
    }
}

/// Apply one flag token to a bitflags value.
pub fn apply_flag<F: Flags + Copy>(
    table: &[FlagSpec<F>],
    token: &str,
    rules: FlagRules,
    target: &mut F,
) -> Result<(), ValueError> {
    match classify(table, token, rules) {
        FlagCheck::Positive(v) => target.insert(v),
        FlagCheck::Negative(v) => target.remove(v),
        FlagCheck::User | FlagCheck::Unknown => {
            return Err(ValueError::UnknownFlag(token.trim().to_string()));
        }
    }
    Ok(())
}

/// Bit assigned to a user-defined flag name: a stable hash of the canonical
/// name folded into `bits` bits starting at `first_bit`.
pub fn user_bit(token: &str, first_bit: u32, bits: u32) -> u32 {
    // FNV-1a
    let hash = name::normalize(token)
        .bytes()
        .fold(0x811c_9dc5u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193));
    1 << (first_bit + hash % bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitflags::bitflags;

    bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Test: u8 {
            const SOLID     = 0x01;
            const NOGRAVITY = 0x02;
            const FLOAT     = 0x04;
        }
    }

    const TABLE: &[FlagSpec<Test>] = &[
        FlagSpec::new("SOLID", Test::SOLID),
        FlagSpec::new("NOGRAVITY", Test::NOGRAVITY),
        FlagSpec::negated("GRAVITY", Test::NOGRAVITY),
        FlagSpec::new("FLOAT", Test::FLOAT),
    ];

    #[test]
    fn plain_match_is_positive() {
        assert_eq!(
            classify(TABLE, "solid", FlagRules::PLAIN),
            FlagCheck::Positive(Test::SOLID)
        );
    }

    #[test]
    fn table_negate_bit_flips() {
        assert_eq!(
            classify(TABLE, "GRAVITY", FlagRules::PLAIN),
            FlagCheck::Negative(Test::NOGRAVITY)
        );
    }

    #[test]
    fn exact_no_name_beats_prefix() {
        assert_eq!(
            classify(TABLE, "NOGRAVITY", FlagRules::PREFIXED),
            FlagCheck::Positive(Test::NOGRAVITY)
        );
    }

    #[test]
    fn prefixes_negate_when_allowed() {
        for token in ["NOSOLID", "NO_SOLID", "!SOLID", "-solid"] {
            assert_eq!(
                classify(TABLE, token, FlagRules::PREFIXED),
                FlagCheck::Negative(Test::SOLID),
                "{token}"
            );
        }
        assert_eq!(classify(TABLE, "NOSOLID", FlagRules::PLAIN), FlagCheck::Unknown);
    }

    #[test]
    fn double_negation_is_positive() {
        assert_eq!(
            classify(TABLE, "-GRAVITY", FlagRules::PREFIXED),
            FlagCheck::Positive(Test::NOGRAVITY)
        );
        assert_eq!(
            classify(TABLE, "NO_GRAVITY", FlagRules::PREFIXED),
            FlagCheck::Positive(Test::NOGRAVITY)
        );
    }

    #[test]
    fn unknown_and_user() {
        assert_eq!(classify(TABLE, "WOBBLY", FlagRules::PREFIXED), FlagCheck::Unknown);
        assert_eq!(classify(TABLE, "WOBBLY", FlagRules::USER), FlagCheck::User);
        assert_eq!(classify(TABLE, "  ", FlagRules::USER), FlagCheck::Unknown);
    }

    #[test]
    fn every_token_gets_exactly_one_class() {
        let tokens = ["SOLID", "GRAVITY", "NOFLOAT", "!", "NO", "", "X", "NOGRAVITY", "-GRAVITY"];
        let rules = [FlagRules::PLAIN, FlagRules::PREFIXED, FlagRules::USER];
        for token in tokens {
            for r in rules {
                match classify(TABLE, token, r) {
                    FlagCheck::Positive(v) | FlagCheck::Negative(v) => {
                        assert!(TABLE.iter().any(|s| s.value == v), "{token}")
                    }
                    FlagCheck::User => assert!(r.allow_user),
                    FlagCheck::Unknown => {}
                }
            }
        }
    }

    #[test]
    fn apply_inserts_and_removes() {
        let mut f = Test::NOGRAVITY;
        apply_flag(TABLE, "SOLID", FlagRules::PREFIXED, &mut f).expect("solid");
        apply_flag(TABLE, "GRAVITY", FlagRules::PREFIXED, &mut f).expect("gravity");
        assert_eq!(f, Test::SOLID);
        assert!(apply_flag(TABLE, "BOUNCY", FlagRules::PREFIXED, &mut f).is_err());
    }

    #[test]
    fn user_bits_are_stable_and_in_range() {
        let a = user_bit("Frost", 16, 16);
        assert_eq!(a, user_bit("FROST", 16, 16));
        assert_eq!(a.count_ones(), 1);
        assert!(a >= 1 << 16);
    }
}
