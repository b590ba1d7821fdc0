use bitflags::bitflags;
use serde::Serialize;

use crate::game::GameDef;
use crate::reference::Ref;

/// A map/level from `<LEVELS>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelDef {
    pub name: String,
    pub description: String,
    /// Map lump; defaults to the entry name.
    pub lump: String,
    pub episode: Ref<GameDef>,
    pub next_map: Ref<LevelDef>,
    pub secret_map: Ref<LevelDef>,
    pub sky: String,
    pub music: i32,
    /// Tics.
    pub par_time: i32,
    pub flags: LevelFlags,
}

impl Default for LevelDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            lump: String::new(),
            episode: Ref::default(),
            next_map: Ref::default(),
            secret_map: Ref::default(),
            sky: String::new(),
            music: 0,
            par_time: 0,
            flags: LevelFlags::empty(),
        }
    }
}

bitflags! {
    /// Level `SPECIAL` flags. Each can be negated with a `NO` prefix.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct LevelFlags: u32 {
        const JUMPING           = 0x0001;
        const CROUCHING         = 0x0002;
        const MLOOK             = 0x0004;
        const CHEATS            = 0x0008;
        const ITEM_RESPAWN      = 0x0010;
        const FAST_MONSTERS     = 0x0020;
        const RESURRECT_RESPAWN = 0x0040;
        const STRETCH_SKY       = 0x0080;
        const TRUE3D            = 0x0100;
        const STOMP             = 0x0200;
        const MORE_BLOOD        = 0x0400;
        const AUTOAIM           = 0x0800;
    }
}
