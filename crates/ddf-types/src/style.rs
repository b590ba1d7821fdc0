use bitflags::bitflags;
use serde::Serialize;

use crate::colour::Rgb;
use crate::colourmap::ColourmapDef;
use crate::font::FontDef;
use crate::reference::Ref;

/// A menu/HUD style from `<STYLES>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDef {
    pub name: String,
    pub bg: BackgroundStyle,
    pub text: TextStyle,
    pub title: TextStyle,
    pub flags: StyleFlags,
}

impl Default for StyleDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            bg: BackgroundStyle::default(),
            text: TextStyle::default(),
            title: TextStyle::default(),
            flags: StyleFlags::empty(),
        }
    }
}

/// `BG.*` sub-block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundStyle {
    pub colour: Rgb,
    pub translucency: f32,
    pub image: String,
    pub scale: f32,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            colour: Rgb::BLACK,
            translucency: 1.0,
            image: String::new(),
            scale: 1.0,
        }
    }
}

/// `TEXT.*` / `TITLE.*` sub-block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub font: Ref<FontDef>,
    pub colourmap: Ref<ColourmapDef>,
    pub scale: f32,
    pub translucency: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: Ref::default(),
            colourmap: Ref::default(),
            scale: 1.0,
            translucency: 1.0,
        }
    }
}

bitflags! {
    /// Style `SPECIAL` flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct StyleFlags: u8 {
        const TILED         = 0x01;
        const TILED_NOSCALE = 0x02;
        const STRETCH       = 0x04;
        const CENTERED      = 0x08;
    }
}
