use serde::Serialize;
use strum::{EnumCount, EnumIter, EnumString};

/// A font from `<FONTS>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontDef {
    pub name: String,
    pub kind: FontKind,
    pub patches: Vec<PatchRange>,
    pub missing_patch: String,
    pub image: String,
    pub spacing: f32,
    pub default_size: f32,
}

impl Default for FontDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: FontKind::Patch,
            patches: Vec::new(),
            missing_patch: String::new(),
            image: String::new(),
            spacing: 0.0,
            default_size: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, EnumIter, EnumCount)]
#[strum(ascii_case_insensitive)]
pub enum FontKind {
    Patch,
    Image,
    TrueType,
}

/// A run of per-character patches: `PATCHES = STCFN(33:95);` names
/// `STCFN033` through `STCFN095`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchRange {
    pub prefix: String,
    pub first: u32,
    pub last: u32,
}

impl PatchRange {
    pub fn len(&self) -> usize {
        (self.last + 1).saturating_sub(self.first) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    pub fn contains(&self, ch: u32) -> bool {
        (self.first..=self.last).contains(&ch)
    }

    /// Lump name of the patch for `ch`, e.g. `STCFN065` for `A`.
    pub fn lump_for(&self, ch: u32) -> Option<String> {
        self.contains(ch).then(|| format!("{}{:03}", self.prefix, ch))
    }
}
