//! `<GAMES>`: episodes.

use ddf_types::{GameDef, KindTag, LevelDef};

use super::{push_list, set_ref};
use crate::container::DefContainer;
use crate::diag::{DdfError, LoadContext};
use crate::field::FieldDef;
use crate::linker::{self, RefPolicy};
use crate::session::{ClearPolicy, Kind};
use crate::values;

pub struct Games;

static FIELDS: &[FieldDef<GameDef>] = &[
    FieldDef::value("FIRSTMAP", |g, v| set_ref(&mut g.first_map, v)),
    FieldDef::value("TITLE_MUSIC", |g, v| {
        g.title_music = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("TITLE_GRAPHIC", |g, v| {
        push_list(&mut g.title_graphics, values::lump_name(v.text)?, v);
        Ok(())
    }),
    FieldDef::value("TITLE_TIME", |g, v| {
        g.title_time = values::tics(v.text)?;
        Ok(())
    }),
    FieldDef::value("NAME_GRAPHIC", |g, v| {
        g.name_graphic = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("BACKGROUND", |g, v| {
        g.background = values::lump_name(v.text)?;
        Ok(())
    }),
];

impl Kind for Games {
    type Def = GameDef;
    const TAG: KindTag = KindTag::Games;
    const CLEAR_ALL: ClearPolicy = ClearPolicy::Reset;

    fn fields() -> &'static [FieldDef<GameDef>] {
        FIELDS
    }

    fn finish(g: &mut GameDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if !g.first_map.is_set() {
            ctx.warn_error("episode has no FIRSTMAP")?;
        }
        Ok(())
    }
}

pub fn link(
    games: &mut DefContainer<GameDef>,
    levels: &DefContainer<LevelDef>,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    for (_, g) in games.entries_mut() {
        ctx.set_entry(Some(&g.name));
        linker::resolve(&mut g.first_map, levels, RefPolicy::Required, "level", ctx)?;
    }
    ctx.set_entry(None);
    Ok(())
}
