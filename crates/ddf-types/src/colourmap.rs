use bitflags::bitflags;
use serde::Serialize;

use crate::colour::Rgb;

/// A colour remapping table from `<COLOURMAPS>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColourmapDef {
    pub name: String,
    pub lump: String,
    pub start: i32,
    pub length: i32,
    pub flags: ColourmapFlags,
    pub gl_colour: Option<Rgb>,
}

impl Default for ColourmapDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            lump: String::new(),
            start: 0,
            length: 1,
            flags: ColourmapFlags::empty(),
            gl_colour: None,
        }
    }
}

bitflags! {
    /// Colourmap `SPECIAL` flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct ColourmapFlags: u8 {
        const FOG      = 0x01;
        const SKY      = 0x02;
        const NO_FLASH = 0x04;
        const WHITEN   = 0x08;
    }
}
