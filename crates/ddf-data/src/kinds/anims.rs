//! `<ANIMATIONS>`: animated textures, flats and graphics.

use ddf_types::{AnimDef, KindTag};

use super::push_list;
use crate::diag::{DdfError, LoadContext, Severity};
use crate::field::FieldDef;
use crate::session::{ClearPolicy, Kind};
use crate::values;

pub struct Animations;

static FIELDS: &[FieldDef<AnimDef>] = &[
    FieldDef::value("TYPE", |a, v| {
        a.kind = values::keyword(v.text, "animation type")?;
        Ok(())
    }),
    FieldDef::value("SEQUENCE", |a, v| {
        push_list(&mut a.pics, values::lump_name(v.text)?, v);
        Ok(())
    }),
    FieldDef::value("FIRST", |a, v| {
        a.first = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("LAST", |a, v| {
        a.last = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("SPEED", |a, v| {
        a.speed = values::tics(v.text)?;
        Ok(())
    }),
];

impl Kind for Animations {
    type Def = AnimDef;
    const TAG: KindTag = KindTag::Animations;
    const CLEAR_ALL: ClearPolicy = ClearPolicy::Reset;
    const UNKNOWN_FIELD: Severity = Severity::Fatal;

    fn fields() -> &'static [FieldDef<AnimDef>] {
        FIELDS
    }

    fn finish(a: &mut AnimDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if a.speed <= 0 {
            ctx.warn_error(format!("bad SPEED {}, using 1 tic", a.speed))?;
            a.speed = 1;
        }
        if a.pics.is_empty() && (a.first.is_empty() || a.last.is_empty()) {
            return Err(ctx.fatal("animation needs SEQUENCE or FIRST and LAST"));
        }
        Ok(())
    }
}
