use serde::Serialize;

use crate::level::LevelDef;
use crate::reference::Ref;

/// An episode from `<GAMES>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameDef {
    pub name: String,
    pub first_map: Ref<LevelDef>,
    pub title_music: i32,
    pub title_graphics: Vec<String>,
    /// Tics each title graphic is shown.
    pub title_time: i32,
    pub name_graphic: String,
    pub background: String,
}
