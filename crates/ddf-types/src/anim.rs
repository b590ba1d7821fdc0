use serde::Serialize;
use strum::{EnumCount, EnumIter, EnumString};

/// An animated texture/flat/graphic from `<ANIMATIONS>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimDef {
    pub name: String,
    pub kind: AnimKind,
    /// Explicit frame list (`SEQUENCE`); takes precedence over first/last.
    pub pics: Vec<String>,
    pub first: String,
    pub last: String,
    /// Tics per frame.
    pub speed: i32,
}

impl Default for AnimDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: AnimKind::Texture,
            pics: Vec::new(),
            first: String::new(),
            last: String::new(),
            speed: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, EnumIter, EnumCount)]
#[strum(ascii_case_insensitive)]
pub enum AnimKind {
    Texture,
    Flat,
    Graphic,
}
