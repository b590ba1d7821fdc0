use bitflags::bitflags;
use serde::Serialize;
use strum::{EnumCount, EnumIter, EnumString};

use crate::attack::AttackDef;
use crate::colourmap::ColourmapDef;
use crate::damage::{AttackClass, DamageDef};
use crate::reference::Ref;
use crate::sound::SoundDef;

/// A map object ("thing") definition from `<THINGS>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThingDef {
    pub name: String,
    /// Editor number from the `[NAME:NUMBER]` header, 0 when absent.
    pub number: i32,
    pub spawn_health: f32,
    pub speed: f32,
    pub mass: f32,
    pub radius: f32,
    pub height: f32,
    /// Tics.
    pub reaction_time: i32,
    /// Fraction in `0.0..=1.0`.
    pub pain_chance: f32,
    pub translucency: f32,
    pub flags: ThingFlags,
    pub immunity: AttackClass,
    pub pickup_benefits: Vec<Benefit>,
    pub explode_damage: DamageDef,

    pub close_attack: Ref<AttackDef>,
    pub range_attack: Ref<AttackDef>,
    pub spare_attack: Ref<AttackDef>,
    pub drop_item: Ref<ThingDef>,
    pub blood: Ref<ThingDef>,
    pub active_sound: Ref<SoundDef>,
    pub death_sound: Ref<SoundDef>,
    pub pain_sound: Ref<SoundDef>,
    pub sight_sound: Ref<SoundDef>,
    pub palette_remap: Ref<ColourmapDef>,
}

impl Default for ThingDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            number: 0,
            spawn_health: 1000.0,
            speed: 0.0,
            mass: 100.0,
            radius: 0.0,
            height: 0.0,
            reaction_time: 0,
            pain_chance: 0.0,
            translucency: 1.0,
            flags: ThingFlags::empty(),
            immunity: AttackClass::empty(),
            pickup_benefits: Vec::new(),
            explode_damage: DamageDef::default(),
            close_attack: Ref::default(),
            range_attack: Ref::default(),
            spare_attack: Ref::default(),
            drop_item: Ref::default(),
            blood: Ref::default(),
            active_sound: Ref::default(),
            death_sound: Ref::default(),
            pain_sound: Ref::default(),
            sight_sound: Ref::default(),
            palette_remap: Ref::default(),
        }
    }
}

bitflags! {
    /// Thing `SPECIAL` flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct ThingFlags: u32 {
        const SOLID         = 0x0000_0001;
        const SHOOTABLE     = 0x0000_0002;
        const NOGRAVITY     = 0x0000_0004;
        const FLOAT         = 0x0000_0008;
        const MISSILE       = 0x0000_0010;
        const PICKUP        = 0x0000_0020;
        const COUNT_AS_KILL = 0x0000_0040;
        const COUNT_AS_ITEM = 0x0000_0080;
        const DROPPED       = 0x0000_0100;
        const CORPSE        = 0x0000_0200;
        const NOBLOCKMAP    = 0x0000_0400;
        const AMBUSH        = 0x0000_0800;
        const DROPOFF       = 0x0000_1000;
        const FUZZY         = 0x0000_2000;
        const NOCLIP        = 0x0000_4000;
        const TELEPORT      = 0x0000_8000;
    }
}

/// What a pickup gives: `PICKUP_BENEFIT = HEALTH(10:100);`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Benefit {
    pub kind: BenefitKind,
    pub amount: f32,
    pub limit: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, EnumIter, EnumCount)]
#[strum(ascii_case_insensitive)]
pub enum BenefitKind {
    Health,
    GreenArmour,
    BlueArmour,
    Bullets,
    Shells,
    Rockets,
    Cells,
    KeyBlueCard,
    KeyYellowCard,
    KeyRedCard,
    PowerupInvulnerable,
    PowerupBerserk,
    PowerupPartInvis,
    PowerupAcidSuit,
    PowerupAutomap,
    PowerupLightGoggles,
}

impl BenefitKind {
    /// Limit used when a benefit is written without one.
    pub fn default_limit(self) -> f32 {
        match self {
            Self::Health => 100.0,
            Self::GreenArmour => 100.0,
            Self::BlueArmour => 200.0,
            Self::Bullets => 200.0,
            Self::Shells => 50.0,
            Self::Rockets => 50.0,
            Self::Cells => 300.0,
            _ => 1.0,
        }
    }
}
