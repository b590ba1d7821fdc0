//! `<SWITCHES>`: wall switch texture pairs.

use ddf_types::{BUTTON_TIME, KindTag, SoundDef, SwitchDef};

use super::set_ref;
use crate::container::DefContainer;
use crate::diag::{DdfError, LoadContext, Severity};
use crate::field::FieldDef;
use crate::linker::{self, RefPolicy};
use crate::session::{ClearPolicy, Kind};
use crate::values;

pub struct Switches;

static FIELDS: &[FieldDef<SwitchDef>] = &[
    FieldDef::value("ON_TEXTURE", |s, v| {
        s.on_texture = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("OFF_TEXTURE", |s, v| {
        s.off_texture = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("ON_SOUND", |s, v| set_ref(&mut s.on_sound, v)),
    FieldDef::value("OFF_SOUND", |s, v| set_ref(&mut s.off_sound, v)),
    FieldDef::value("TIME", |s, v| {
        s.time = values::tics(v.text)?;
        Ok(())
    }),
];

impl Kind for Switches {
    type Def = SwitchDef;
    const TAG: KindTag = KindTag::Switches;
    const CLEAR_ALL: ClearPolicy = ClearPolicy::Reset;
    const UNKNOWN_FIELD: Severity = Severity::Fatal;

    fn fields() -> &'static [FieldDef<SwitchDef>] {
        FIELDS
    }

    fn finish(s: &mut SwitchDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if s.on_texture.is_empty() || s.off_texture.is_empty() {
            return Err(ctx.fatal("switch needs ON_TEXTURE and OFF_TEXTURE"));
        }
        if s.time <= 0 {
            ctx.warn_error(format!("bad TIME {}, using {BUTTON_TIME} tics", s.time))?;
            s.time = BUTTON_TIME;
        }
        Ok(())
    }
}

pub fn link(
    switches: &mut DefContainer<SwitchDef>,
    sounds: &DefContainer<SoundDef>,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    for (_, s) in switches.entries_mut() {
        ctx.set_entry(Some(&s.name));
        linker::resolve(&mut s.on_sound, sounds, RefPolicy::Optional, "sound", ctx)?;
        linker::resolve(&mut s.off_sound, sounds, RefPolicy::Optional, "sound", ctx)?;
    }
    ctx.set_entry(None);
    Ok(())
}
