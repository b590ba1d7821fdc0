//! `<WEAPONS>`: player weapons.

use ddf_types::{AttackDef, KindTag, SoundDef, WeaponDef, WeaponFlags};

use super::set_ref;
use crate::container::DefContainer;
use crate::diag::{DdfError, LoadContext};
use crate::field::FieldDef;
use crate::flags::{self, FlagRules, FlagSpec};
use crate::linker::{self, RefPolicy};
use crate::session::Kind;
use crate::values;

pub struct Weapons;

const SPECIALS: &[FlagSpec<WeaponFlags>] = &[
    FlagSpec::new("SILENT_TO_MONSTERS", WeaponFlags::SILENT_TO_MONSTERS),
    FlagSpec::new("ANIMATED", WeaponFlags::ANIMATED),
    FlagSpec::new("SWITCH", WeaponFlags::SWITCH_AWAY),
    FlagSpec::new("TRIGGER", WeaponFlags::TRIGGER),
    FlagSpec::new("FRESH", WeaponFlags::FRESH),
    FlagSpec::new("MANUAL", WeaponFlags::MANUAL_RELOAD),
    FlagSpec::new("NOAUTOFIRE", WeaponFlags::NO_AUTO_FIRE),
    FlagSpec::new("DANGEROUS", WeaponFlags::DANGEROUS),
];

static FIELDS: &[FieldDef<WeaponDef>] = &[
    FieldDef::value("ATTACK", |w, v| set_ref(&mut w.attack, v)),
    FieldDef::value("SEC_ATTACK", |w, v| set_ref(&mut w.second_attack, v)),
    FieldDef::value("AMMOTYPE", |w, v| {
        w.ammo = values::keyword(v.text, "ammo type")?;
        Ok(())
    }),
    FieldDef::value("AMMOPERSHOT", |w, v| {
        w.ammo_per_shot = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("CLIP_SIZE", |w, v| {
        w.clip_size = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("BINDKEY", |w, v| {
        w.bind_key = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("PRIORITY", |w, v| {
        w.priority = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("KICK", |w, v| {
        w.kick = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("SPECIAL", |w, v| {
        flags::apply_flag(SPECIALS, v.text, FlagRules::PREFIXED, &mut w.flags)
    }),
    FieldDef::value("START_SOUND", |w, v| set_ref(&mut w.start_sound, v)),
    FieldDef::value("ENGAGED_SOUND", |w, v| set_ref(&mut w.engaged_sound, v)),
    FieldDef::value("HIT_SOUND", |w, v| set_ref(&mut w.hit_sound, v)),
    FieldDef::value("IDLE_SOUND", |w, v| set_ref(&mut w.idle_sound, v)),
    FieldDef::value("UPGRADES", |w, v| set_ref(&mut w.upgrades, v)),
];

impl Kind for Weapons {
    type Def = WeaponDef;
    const TAG: KindTag = KindTag::Weapons;

    fn fields() -> &'static [FieldDef<WeaponDef>] {
        FIELDS
    }

    fn finish(w: &mut WeaponDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if w.ammo_per_shot < 0 {
            ctx.warn_error(format!("bad AMMOPERSHOT {}, using 0", w.ammo_per_shot))?;
            w.ammo_per_shot = 0;
        }
        if !(-1..=9).contains(&w.bind_key) {
            ctx.warn_error(format!("bad BINDKEY {}, using none", w.bind_key))?;
            w.bind_key = -1;
        }
        if !w.attack.is_set() {
            ctx.warn_error("weapon has no ATTACK")?;
        }
        Ok(())
    }
}

pub fn link(
    weapons: &mut DefContainer<WeaponDef>,
    attacks: &DefContainer<AttackDef>,
    sounds: &DefContainer<SoundDef>,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    use RefPolicy::{Optional, Required};

    for (_, w) in weapons.entries_mut() {
        ctx.set_entry(Some(&w.name));
        linker::resolve(&mut w.attack, attacks, Required, "attack", ctx)?;
        linker::resolve(&mut w.second_attack, attacks, Required, "attack", ctx)?;
        linker::resolve(&mut w.start_sound, sounds, Optional, "sound", ctx)?;
        linker::resolve(&mut w.engaged_sound, sounds, Optional, "sound", ctx)?;
        linker::resolve(&mut w.hit_sound, sounds, Optional, "sound", ctx)?;
        linker::resolve(&mut w.idle_sound, sounds, Optional, "sound", ctx)?;
    }
    linker::resolve_within(weapons, |w| &mut w.upgrades, Optional, "weapon", ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::LoadOptions;
    use crate::kinds::load_test;
    use ddf_types::AmmoType;

    #[test]
    fn parses_a_weapon() {
        let text = "[SHOTGUN]\nATTACK = PLAYER_SHOTGUN;\nAMMOTYPE = SHELLS;\n\
                    BINDKEY = 3;\nSPECIAL = SWITCH, NOAUTOFIRE;\nUPGRADES = PISTOL;\n";
        let (weapons, ctx) = load_test::<Weapons>(text, LoadOptions::default()).expect("load");
        let w = weapons.find("shotgun").expect("SHOTGUN");
        assert_eq!(w.ammo, AmmoType::Shells);
        assert_eq!(w.ammo_per_shot, 1);
        assert_eq!(w.bind_key, 3);
        assert_eq!(w.flags, WeaponFlags::SWITCH_AWAY | WeaponFlags::NO_AUTO_FIRE);
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn finish_substitutes_defaults() {
        let text = "[BAD]\nAMMOPERSHOT = -2;\nBINDKEY = 12;\n";
        let (weapons, ctx) = load_test::<Weapons>(text, LoadOptions::default()).expect("load");
        let w = weapons.find("BAD").expect("BAD");
        assert_eq!((w.ammo_per_shot, w.bind_key), (0, -1));
        assert_eq!(ctx.warning_count(), 3);
    }

    #[test]
    fn missing_attack_is_fatal_to_link_unless_lax() {
        let text = "[GUN]\nATTACK = NOWHERE;\n";
        let (mut weapons, mut ctx) =
            load_test::<Weapons>(text, LoadOptions::default()).expect("load");
        let attacks = DefContainer::new();
        let sounds = DefContainer::new();
        assert!(link(&mut weapons, &attacks, &sounds, &mut ctx).is_err());

        let lax = LoadOptions {
            strict: false,
            lax: true,
        };
        let (mut weapons, mut ctx) = load_test::<Weapons>(text, lax).expect("load");
        link(&mut weapons, &attacks, &sounds, &mut ctx).expect("lax link");
        assert_eq!(ctx.warning_count(), 1);
    }
}
