//! `<ATTACKS>`: attack definitions shared by monsters and weapons.

use ddf_types::{AttackDef, AttackFlags, AttackStyle, KindTag, SoundDef, ThingDef};

use super::{DAMAGE_FIELDS, class_list, set_ref};
use crate::container::DefContainer;
use crate::diag::{DdfError, LoadContext};
use crate::field::{self, FieldDef};
use crate::flags::{self, FlagRules, FlagSpec};
use crate::linker::{self, RefPolicy};
use crate::session::Kind;
use crate::values;

pub struct Attacks;

const SPECIALS: &[FlagSpec<AttackFlags>] = &[
    FlagSpec::new("FACE_TARGET", AttackFlags::FACE_TARGET),
    FlagSpec::new("NEED_SIGHT", AttackFlags::NEED_SIGHT),
    FlagSpec::new("KILL_FAILED_SPAWN", AttackFlags::KILL_FAILED_SPAWN),
    FlagSpec::new("PRESTEP_SPAWN", AttackFlags::PRESTEP_SPAWN),
    FlagSpec::new("SPAWN_TELEFRAGS", AttackFlags::SPAWN_TELEFRAGS),
    FlagSpec::new("NO_TRIGGER_LINES", AttackFlags::NO_TRIGGER_LINES),
    FlagSpec::new("SILENT_TO_MONSTERS", AttackFlags::SILENT_TO_MONSTERS),
    FlagSpec::new("PLAYER_ATTACK", AttackFlags::PLAYER_ATTACK),
];

static FIELDS: &[FieldDef<AttackDef>] = &[
    FieldDef::value("ATTACKTYPE", |a, v| {
        a.style = values::keyword(v.text, "attack type")?;
        Ok(())
    }),
    FieldDef::sub("DAMAGE", |a, key, v| {
        field::apply(DAMAGE_FIELDS, key, v, &mut a.damage)
    }),
    FieldDef::value("ATTACK_HEIGHT", |a, v| {
        a.height = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("RANGE", |a, v| {
        a.range = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("SPEED", |a, v| {
        a.speed = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("TOO_CLOSE_RANGE", |a, v| {
        a.too_close = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("ATTACK_SPECIAL", |a, v| {
        flags::apply_flag(SPECIALS, v.text, FlagRules::PREFIXED, &mut a.flags)
    }),
    FieldDef::value("ATTACK_CLASS", |a, v| class_list(&mut a.class, v)),
    FieldDef::value("SPAWNED_OBJECT", |a, v| set_ref(&mut a.spawned_object, v)),
    FieldDef::value("PUFF", |a, v| set_ref(&mut a.puff, v)),
    FieldDef::value("ATTACK_SOUND", |a, v| set_ref(&mut a.sound, v)),
    FieldDef::value("DUAL_ATTACK1", |a, v| set_ref(&mut a.dual_attack1, v)),
    FieldDef::value("DUAL_ATTACK2", |a, v| set_ref(&mut a.dual_attack2, v)),
];

impl Kind for Attacks {
    type Def = AttackDef;
    const TAG: KindTag = KindTag::Attacks;

    fn fields() -> &'static [FieldDef<AttackDef>] {
        FIELDS
    }

    fn finish(a: &mut AttackDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if a.style == AttackStyle::None {
            return Err(ctx.fatal("no ATTACKTYPE given"));
        }
        if a.style == AttackStyle::DualAttack && !a.dual_attack1.is_set() {
            return Err(ctx.fatal("DUALATTACK needs DUAL_ATTACK1"));
        }
        if a.damage.linear_max >= 0.0 && a.damage.linear_max < a.damage.nominal {
            ctx.warn_error(format!(
                "DAMAGE.MAX {} is below DAMAGE.VAL {}",
                a.damage.linear_max, a.damage.nominal
            ))?;
            a.damage.linear_max = a.damage.nominal;
        }
        Ok(())
    }
}

pub fn link(
    attacks: &mut DefContainer<AttackDef>,
    things: &DefContainer<ThingDef>,
    sounds: &DefContainer<SoundDef>,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    use RefPolicy::{Optional, Required};

    for (_, a) in attacks.entries_mut() {
        ctx.set_entry(Some(&a.name));
        linker::resolve(&mut a.spawned_object, things, Required, "thing", ctx)?;
        linker::resolve(&mut a.puff, things, Optional, "thing", ctx)?;
        linker::resolve(&mut a.sound, sounds, Optional, "sound", ctx)?;
    }
    linker::resolve_within(attacks, |a| &mut a.dual_attack1, Required, "attack", ctx)?;
    linker::resolve_within(attacks, |a| &mut a.dual_attack2, Required, "attack", ctx)?;

    // Two attacks may name each other; an attack may not name itself.
    for h in attacks.handles() {
        let Some(a) = attacks.get(h) else {
            continue;
        };
        if a.dual_attack1.handle() == Some(h) || a.dual_attack2.handle() == Some(h) {
            ctx.set_entry(Some(&a.name));
            return Err(ctx.fatal("dual attack refers to itself"));
        }
    }
    ctx.set_entry(None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::LoadOptions;
    use crate::kinds::load_test;
    use ddf_types::AttackClass;

    #[test]
    fn parses_an_attack() {
        let text = r#"
[IMP_FIREBALL]
ATTACKTYPE = PROJECTILE;
DAMAGE.VAL = 3; DAMAGE.MAX = 24;
DAMAGE.OBITUARY = "OB_IMP";
SPEED = 10;
ATTACK_SPECIAL = FACE_TARGET, NO_NEED_SIGHT;
ATTACK_CLASS = MISSILE, FIRE;
SPAWNED_OBJECT = IMP_FIREBALL;
"#;
        let (attacks, ctx) = load_test::<Attacks>(text, LoadOptions::default()).expect("load");
        let a = attacks.find("IMP_FIREBALL").expect("attack");
        assert_eq!(a.style, AttackStyle::Projectile);
        assert_eq!((a.damage.nominal, a.damage.linear_max), (3.0, 24.0));
        assert_eq!(a.damage.obituary, "OB_IMP");
        assert_eq!(a.flags, AttackFlags::FACE_TARGET);
        assert_eq!(a.class, AttackClass::MISSILE | AttackClass::FIRE);
        assert!(a.style.spawns_object());
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn attack_type_is_required() {
        assert!(load_test::<Attacks>("[X]\nRANGE = 64;\n", LoadOptions::default()).is_err());
        let text = "[X]\nATTACKTYPE = WOBBLE;\n";
        assert!(matches!(
            load_test::<Attacks>(text, LoadOptions::default()),
            Err(DdfError::Value { .. })
        ));
    }

    #[test]
    fn dual_attack_needs_first_half() {
        let text = "[X]\nATTACKTYPE = DUALATTACK;\nDUAL_ATTACK2 = Y;\n";
        assert!(load_test::<Attacks>(text, LoadOptions::default()).is_err());
    }

    #[test]
    fn damage_max_is_raised_to_val() {
        let text = "[X]\nATTACKTYPE = SHOT;\nDAMAGE.VAL = 10;\nDAMAGE.MAX = 5;\n";
        let (attacks, ctx) = load_test::<Attacks>(text, LoadOptions::default()).expect("load");
        assert_eq!(attacks.find("X").expect("X").damage.linear_max, 10.0);
        assert_eq!(ctx.warning_count(), 1);
    }

    #[test]
    fn mutual_dual_attacks_link_but_self_reference_is_fatal() {
        let text = "[A]\nATTACKTYPE = DUALATTACK;\nDUAL_ATTACK1 = B;\n\
                    [B]\nATTACKTYPE = DUALATTACK;\nDUAL_ATTACK1 = A;\n";
        let (mut attacks, mut ctx) =
            load_test::<Attacks>(text, LoadOptions::default()).expect("load");
        let things = DefContainer::new();
        let sounds = DefContainer::new();
        link(&mut attacks, &things, &sounds, &mut ctx).expect("cycle links");
        let a = attacks.find("A").expect("A");
        assert_eq!(attacks.resolve(&a.dual_attack1).map(|b| b.name.as_str()), Some("B"));

        let text = "[SELF]\nATTACKTYPE = DUALATTACK;\nDUAL_ATTACK1 = SELF;\n";
        let (mut attacks, mut ctx) =
            load_test::<Attacks>(text, LoadOptions::default()).expect("load");
        let err = link(&mut attacks, &things, &sounds, &mut ctx).unwrap_err();
        assert!(err.to_string().contains("itself"), "{err}");
    }
}
