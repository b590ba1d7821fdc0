use serde::Serialize;

use crate::reference::Ref;
use crate::sound::SoundDef;

/// Tics a pressed button stays in its "on" state.
pub const BUTTON_TIME: i32 = 35;

/// A wall switch texture pair from `<SWITCHES>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchDef {
    pub name: String,
    pub on_texture: String,
    pub off_texture: String,
    pub on_sound: Ref<SoundDef>,
    pub off_sound: Ref<SoundDef>,
    pub time: i32,
}

impl Default for SwitchDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            on_texture: String::new(),
            off_texture: String::new(),
            on_sound: Ref::default(),
            off_sound: Ref::default(),
            time: BUTTON_TIME,
        }
    }
}
