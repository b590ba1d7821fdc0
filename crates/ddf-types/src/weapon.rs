use bitflags::bitflags;
use serde::Serialize;
use strum::{EnumCount, EnumIter, EnumString, FromRepr};

use crate::attack::AttackDef;
use crate::reference::Ref;
use crate::sound::SoundDef;

/// A player weapon from `<WEAPONS>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponDef {
    pub name: String,
    pub attack: Ref<AttackDef>,
    pub second_attack: Ref<AttackDef>,
    pub ammo: AmmoType,
    pub ammo_per_shot: i32,
    pub clip_size: i32,
    /// Number key 0..=9, or -1 for none.
    pub bind_key: i32,
    pub priority: i32,
    pub kick: f32,
    pub flags: WeaponFlags,
    pub start_sound: Ref<SoundDef>,
    pub engaged_sound: Ref<SoundDef>,
    pub hit_sound: Ref<SoundDef>,
    pub idle_sound: Ref<SoundDef>,
    pub upgrades: Ref<WeaponDef>,
}

impl Default for WeaponDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            attack: Ref::default(),
            second_attack: Ref::default(),
            ammo: AmmoType::NoAmmo,
            ammo_per_shot: 1,
            clip_size: 0,
            bind_key: -1,
            priority: 0,
            kick: 0.0,
            flags: WeaponFlags::empty(),
            start_sound: Ref::default(),
            engaged_sound: Ref::default(),
            hit_sound: Ref::default(),
            idle_sound: Ref::default(),
            upgrades: Ref::default(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, EnumIter, EnumCount, FromRepr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum AmmoType {
    NoAmmo = 0,
    Bullets = 1,
    Shells = 2,
    Rockets = 3,
    Cells = 4,
    Pellets = 5,
    Nails = 6,
    Grenades = 7,
    Gas = 8,
}

bitflags! {
    /// Weapon `SPECIAL` flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct WeaponFlags: u32 {
        const SILENT_TO_MONSTERS = 0x0001;
        const ANIMATED           = 0x0002;
        const SWITCH_AWAY        = 0x0004;
        const TRIGGER            = 0x0008;
        const FRESH              = 0x0010;
        const MANUAL_RELOAD      = 0x0020;
        const NO_AUTO_FIRE       = 0x0040;
        const DANGEROUS          = 0x0080;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults() {
        let w = WeaponDef::default();
        assert_eq!(w.ammo, AmmoType::NoAmmo);
        assert_eq!(w.ammo_per_shot, 1);
        assert_eq!(w.bind_key, -1);
    }

    #[test]
    fn ammo_names() {
        assert_eq!(AmmoType::from_str("NOAMMO").ok(), Some(AmmoType::NoAmmo));
        assert_eq!(AmmoType::from_str("rockets").ok(), Some(AmmoType::Rockets));
        assert_eq!(AmmoType::from_repr(4), Some(AmmoType::Cells));
    }
}
