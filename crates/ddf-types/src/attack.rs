use bitflags::bitflags;
use serde::Serialize;
use strum::{EnumCount, EnumIter, EnumString};

use crate::damage::{AttackClass, DamageDef};
use crate::reference::Ref;
use crate::sound::SoundDef;
use crate::thing::ThingDef;

/// An attack definition from `<ATTACKS>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackDef {
    pub name: String,
    pub style: AttackStyle,
    pub damage: DamageDef,
    pub height: f32,
    pub range: f32,
    pub speed: f32,
    pub too_close: i32,
    pub flags: AttackFlags,
    pub class: AttackClass,

    pub spawned_object: Ref<ThingDef>,
    pub puff: Ref<ThingDef>,
    pub sound: Ref<SoundDef>,
    pub dual_attack1: Ref<AttackDef>,
    pub dual_attack2: Ref<AttackDef>,
}

impl Default for AttackDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            style: AttackStyle::None,
            damage: DamageDef::default(),
            height: 0.0,
            range: 2048.0,
            speed: 0.0,
            too_close: 0,
            flags: AttackFlags::empty(),
            class: AttackClass::empty(),
            spawned_object: Ref::default(),
            puff: Ref::default(),
            sound: Ref::default(),
            dual_attack1: Ref::default(),
            dual_attack2: Ref::default(),
        }
    }
}

/// `ATTACKTYPE` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, EnumIter, EnumCount)]
#[strum(ascii_case_insensitive)]
pub enum AttackStyle {
    None,
    Projectile,
    Spawner,
    TripleSpawner,
    Spreader,
    RandomSpread,
    Shot,
    Tracker,
    CloseCombat,
    ShootToSpot,
    SkullFly,
    SmartProjectile,
    Spray,
    DualAttack,
}

impl AttackStyle {
    /// Styles that create a new map object when fired.
    pub fn spawns_object(self) -> bool {
        matches!(
            self,
            Self::Projectile
                | Self::Spawner
                | Self::TripleSpawner
                | Self::Tracker
                | Self::SmartProjectile
                | Self::ShootToSpot
        )
    }
}

bitflags! {
    /// `ATTACK_SPECIAL` flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct AttackFlags: u32 {
        const FACE_TARGET       = 0x0001;
        const NEED_SIGHT        = 0x0002;
        const KILL_FAILED_SPAWN = 0x0004;
        const PRESTEP_SPAWN     = 0x0008;
        const SPAWN_TELEFRAGS   = 0x0010;
        const NO_TRIGGER_LINES  = 0x0020;
        const SILENT_TO_MONSTERS = 0x0040;
        const PLAYER_ATTACK     = 0x0080;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn style_names() {
        assert_eq!(AttackStyle::from_str("CLOSECOMBAT").ok(), Some(AttackStyle::CloseCombat));
        assert_eq!(AttackStyle::from_str("dualattack").ok(), Some(AttackStyle::DualAttack));
        assert!(AttackStyle::from_str("LASER").is_err());
    }

    #[test]
    fn spawning_styles() {
        assert!(AttackStyle::Projectile.spawns_object());
        assert!(!AttackStyle::Shot.spawns_object());
        assert!(!AttackStyle::DualAttack.spawns_object());
    }
}
