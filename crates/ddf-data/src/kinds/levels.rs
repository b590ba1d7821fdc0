//! `<LEVELS>`: maps and their metadata.

use ddf_types::{GameDef, KindTag, LevelDef, LevelFlags};

use super::set_ref;
use crate::container::DefContainer;
use crate::diag::{DdfError, LoadContext};
use crate::field::FieldDef;
use crate::flags::{self, FlagRules, FlagSpec};
use crate::linker::{self, RefPolicy};
use crate::session::{ClearPolicy, Kind};
use crate::values;

pub struct Levels;

const SPECIALS: &[FlagSpec<LevelFlags>] = &[
    FlagSpec::new("JUMPING", LevelFlags::JUMPING),
    FlagSpec::new("CROUCHING", LevelFlags::CROUCHING),
    FlagSpec::new("MLOOK", LevelFlags::MLOOK),
    FlagSpec::new("CHEATS", LevelFlags::CHEATS),
    FlagSpec::new("ITEM_RESPAWN", LevelFlags::ITEM_RESPAWN),
    FlagSpec::new("FAST_MONSTERS", LevelFlags::FAST_MONSTERS),
    FlagSpec::new("RESURRECT_RESPAWN", LevelFlags::RESURRECT_RESPAWN),
    FlagSpec::negated("TELEPORT_RESPAWN", LevelFlags::RESURRECT_RESPAWN),
    FlagSpec::new("STRETCH_SKY", LevelFlags::STRETCH_SKY),
    FlagSpec::negated("NORMAL_SKY", LevelFlags::STRETCH_SKY),
    FlagSpec::new("TRUE3D", LevelFlags::TRUE3D),
    FlagSpec::new("STOMP", LevelFlags::STOMP),
    FlagSpec::new("MORE_BLOOD", LevelFlags::MORE_BLOOD),
    FlagSpec::new("AUTOAIM", LevelFlags::AUTOAIM),
];

static FIELDS: &[FieldDef<LevelDef>] = &[
    FieldDef::value("DESCRIPTION", |l, v| {
        l.description = v.text.to_string();
        Ok(())
    }),
    FieldDef::value("LUMPNAME", |l, v| {
        l.lump = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("EPISODE", |l, v| set_ref(&mut l.episode, v)),
    FieldDef::value("NEXT_MAP", |l, v| set_ref(&mut l.next_map, v)),
    FieldDef::value("SECRET_MAP", |l, v| set_ref(&mut l.secret_map, v)),
    FieldDef::value("SKY_TEXTURE", |l, v| {
        l.sky = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("MUSIC_ENTRY", |l, v| {
        l.music = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("PARTIME", |l, v| {
        l.par_time = values::tics(v.text)?;
        Ok(())
    }),
    FieldDef::value("SPECIAL", |l, v| {
        flags::apply_flag(SPECIALS, v.text, FlagRules::PREFIXED, &mut l.flags)
    }),
];

impl Kind for Levels {
    type Def = LevelDef;
    const TAG: KindTag = KindTag::Levels;
    const CLEAR_ALL: ClearPolicy = ClearPolicy::Reset;

    fn fields() -> &'static [FieldDef<LevelDef>] {
        FIELDS
    }

    fn finish(l: &mut LevelDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if l.lump.is_empty() {
            l.lump = values::lump_name(&l.name).map_err(|e| ctx.bad_value(e))?;
        }
        if l.par_time < 0 {
            ctx.warn_error(format!("bad PARTIME {}, using 0", l.par_time))?;
            l.par_time = 0;
        }
        Ok(())
    }
}

pub fn link(
    levels: &mut DefContainer<LevelDef>,
    games: &DefContainer<GameDef>,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    use RefPolicy::Optional;

    for (_, l) in levels.entries_mut() {
        ctx.set_entry(Some(&l.name));
        linker::resolve(&mut l.episode, games, Optional, "episode", ctx)?;
    }
    linker::resolve_within(levels, |l| &mut l.next_map, Optional, "level", ctx)?;
    linker::resolve_within(levels, |l| &mut l.secret_map, Optional, "level", ctx)
}
