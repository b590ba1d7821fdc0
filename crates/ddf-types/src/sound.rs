use serde::Serialize;

/// A sound effect from `<SOUNDS>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundDef {
    pub name: String,
    pub lump_name: String,
    pub pc_speaker: String,
    /// Non-zero: only one instance with this value plays at a time.
    pub singular: i32,
    pub priority: i32,
    /// Fraction in `0.0..=1.0`.
    pub volume: f32,
    pub looping: bool,
    pub precious: bool,
    pub max_distance: f32,
}

impl Default for SoundDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            lump_name: String::new(),
            pc_speaker: String::new(),
            singular: 0,
            priority: 64,
            volume: 1.0,
            looping: false,
            precious: false,
            max_distance: 4000.0,
        }
    }
}
