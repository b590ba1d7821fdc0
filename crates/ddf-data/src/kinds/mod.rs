//! Field tables and lifecycle hooks for each content kind.

pub mod anims;
pub mod attacks;
pub mod colourmaps;
pub mod fonts;
pub mod games;
pub mod levels;
pub mod sounds;
pub mod styles;
pub mod switches;
pub mod things;
pub mod weapons;

use ddf_types::{AttackClass, DamageDef, Ref};

use crate::field::{FieldDef, FieldValue};
use crate::flags::{self, FlagCheck, FlagRules, FlagSpec};
use crate::values::{self, ValueError};

pub use anims::Animations;
pub use attacks::Attacks;
pub use colourmaps::Colourmaps;
pub use fonts::Fonts;
pub use games::Games;
pub use levels::Levels;
pub use sounds::Sounds;
pub use styles::Styles;
pub use switches::Switches;
pub use things::Things;
pub use weapons::Weapons;

/// Implements [`crate::container::Definition`] for records identified by
/// name alone.
macro_rules! named_definition {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::container::Definition for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn set_name(&mut self, name: &str) {
                    self.name = name.to_string();
                }
            }
        )+
    };
}

named_definition!(
    ddf_types::AnimDef,
    ddf_types::AttackDef,
    ddf_types::ColourmapDef,
    ddf_types::FontDef,
    ddf_types::GameDef,
    ddf_types::LevelDef,
    ddf_types::SoundDef,
    ddf_types::StyleDef,
    ddf_types::SwitchDef,
    ddf_types::WeaponDef,
);

pub(crate) fn set_ref<T>(r: &mut Ref<T>, v: &FieldValue<'_>) -> Result<(), ValueError> {
    r.set_name(v.text);
    Ok(())
}

/// List fields are replaced by each new statement rather than appended to.
pub(crate) fn push_list(list: &mut Vec<String>, item: String, v: &FieldValue<'_>) {
    if v.is_first() {
        list.clear();
    }
    list.push(item);
}

const CLASS_FLAGS: &[FlagSpec<AttackClass>] = &[
    FlagSpec::new("BULLET", AttackClass::BULLET),
    FlagSpec::new("MISSILE", AttackClass::MISSILE),
    FlagSpec::new("MELEE", AttackClass::MELEE),
    FlagSpec::new("FIRE", AttackClass::FIRE),
    FlagSpec::new("ICE", AttackClass::ICE),
    FlagSpec::new("POISON", AttackClass::POISON),
    FlagSpec::new("PLASMA", AttackClass::PLASMA),
    FlagSpec::new("EXPLOSION", AttackClass::EXPLOSION),
    FlagSpec::new("CRUSH", AttackClass::CRUSH),
    FlagSpec::new("TELEFRAG", AttackClass::TELEFRAG),
];

/// One element of an attack class list. Names outside the built-in table
/// become user classes with a stable bit of their own.
pub(crate) fn class_list(target: &mut AttackClass, v: &FieldValue<'_>) -> Result<(), ValueError> {
    if v.is_first() {
        *target = AttackClass::empty();
    }
    match flags::classify(CLASS_FLAGS, v.text, FlagRules::USER) {
        FlagCheck::Positive(c) => target.insert(c),
        FlagCheck::Negative(c) => target.remove(c),
        FlagCheck::User => {
            let bit = flags::user_bit(v.text, AttackClass::USER_FIRST_BIT, AttackClass::USER_BITS);
            target.insert(AttackClass::from_bits_retain(bit));
        }
        FlagCheck::Unknown => return Err(ValueError::UnknownFlag(v.text.trim().to_string())),
    }
    Ok(())
}

/// `DAMAGE.*` and `EXPLODE_DAMAGE.*`.
pub(crate) static DAMAGE_FIELDS: &[FieldDef<DamageDef>] = &[
    FieldDef::value("VAL", |d, v| {
        d.nominal = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("MAX", |d, v| {
        d.linear_max = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("ERROR", |d, v| {
        d.error = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("DELAY", |d, v| {
        d.delay = values::tics(v.text)?;
        Ok(())
    }),
    FieldDef::value("OBITUARY", |d, v| {
        d.obituary = v.text.to_string();
        Ok(())
    }),
];

/// Load `text` (without its kind tag) into a fresh container.
#[cfg(test)]
pub(crate) fn load_test<K: crate::session::Kind>(
    text: &str,
    options: crate::diag::LoadOptions,
) -> Result<(crate::container::DefContainer<K::Def>, crate::diag::LoadContext), crate::diag::DdfError>
{
    use crate::session::{KindLoader, LoadSession};

    let mut ctx = crate::diag::LoadContext::new(options);
    ctx.begin_file("test.ddf");
    let stmts = crate::lexer::lex(text).map_err(|e| ctx.syntax(e))?;
    let mut defs = crate::container::DefContainer::new();
    LoadSession::new(&mut KindLoader::<K>::new(&mut defs)).run(&stmts, &mut ctx)?;
    Ok((defs, ctx))
}
