//! `<THINGS>`: map objects.

use ddf_types::{
    AttackDef, Benefit, BenefitKind, ColourmapDef, KindTag, SoundDef, ThingDef, ThingFlags,
};

use super::{DAMAGE_FIELDS, class_list, set_ref};
use crate::container::{DefContainer, Definition};
use crate::diag::{DdfError, LoadContext};
use crate::field::{self, FieldDef, FieldValue};
use crate::flags::{self, FlagRules, FlagSpec};
use crate::linker::{self, RefPolicy};
use crate::session::Kind;
use crate::values::{self, ValueError};

pub struct Things;

impl Definition for ThingDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn number(&self) -> Option<i32> {
        (self.number != 0).then_some(self.number)
    }

    fn set_number(&mut self, number: Option<i32>) {
        self.number = number.unwrap_or(0);
    }
}

const SPECIALS: &[FlagSpec<ThingFlags>] = &[
    FlagSpec::new("SOLID", ThingFlags::SOLID),
    FlagSpec::new("SHOOTABLE", ThingFlags::SHOOTABLE),
    FlagSpec::new("NOGRAVITY", ThingFlags::NOGRAVITY),
    FlagSpec::negated("GRAVITY", ThingFlags::NOGRAVITY),
    FlagSpec::new("FLOAT", ThingFlags::FLOAT),
    FlagSpec::new("MISSILE", ThingFlags::MISSILE),
    FlagSpec::new("PICKUP", ThingFlags::PICKUP),
    FlagSpec::new("COUNT_AS_KILL", ThingFlags::COUNT_AS_KILL),
    FlagSpec::new("COUNT_AS_ITEM", ThingFlags::COUNT_AS_ITEM),
    FlagSpec::new("DROPPED", ThingFlags::DROPPED),
    FlagSpec::new("CORPSE", ThingFlags::CORPSE),
    FlagSpec::new("NOBLOCKMAP", ThingFlags::NOBLOCKMAP),
    FlagSpec::new("AMBUSH", ThingFlags::AMBUSH),
    FlagSpec::new("DROPOFF", ThingFlags::DROPOFF),
    FlagSpec::new("FUZZY", ThingFlags::FUZZY),
    FlagSpec::new("NOCLIP", ThingFlags::NOCLIP),
    FlagSpec::negated("CLIP", ThingFlags::NOCLIP),
    FlagSpec::new("TELEPORT", ThingFlags::TELEPORT),
];

/// `HEALTH(10:100)`: amount and optional limit.
fn benefit(v: &FieldValue<'_>) -> Result<Benefit, ValueError> {
    let call = values::call(v.text)?;
    let kind: BenefitKind = values::keyword(call.name, "benefit")?;
    let amount = match call.arg {
        Some(a) => values::real(a)?,
        None => 1.0,
    };
    let limit = match call.arg2 {
        Some(l) => values::real(l)?,
        None => kind.default_limit(),
    };
    Ok(Benefit {
        kind,
        amount,
        limit,
    })
}

static FIELDS: &[FieldDef<ThingDef>] = &[
    FieldDef::value("SPAWNHEALTH", |t, v| {
        t.spawn_health = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("SPEED", |t, v| {
        t.speed = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("MASS", |t, v| {
        t.mass = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("RADIUS", |t, v| {
        t.radius = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("HEIGHT", |t, v| {
        t.height = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("REACTION_TIME", |t, v| {
        t.reaction_time = values::tics(v.text)?;
        Ok(())
    }),
    FieldDef::value("PAINCHANCE", |t, v| {
        t.pain_chance = values::percent(v.text)?;
        Ok(())
    }),
    FieldDef::value("TRANSLUCENCY", |t, v| {
        t.translucency = values::percent(v.text)?;
        Ok(())
    }),
    FieldDef::value("SPECIAL", |t, v| {
        flags::apply_flag(SPECIALS, v.text, FlagRules::PREFIXED, &mut t.flags)
    }),
    FieldDef::value("IMMUNITY_CLASS", |t, v| class_list(&mut t.immunity, v)),
    FieldDef::value("PICKUP_BENEFIT", |t, v| {
        if v.is_first() {
            t.pickup_benefits.clear();
        }
        t.pickup_benefits.push(benefit(v)?);
        Ok(())
    }),
    FieldDef::sub("EXPLODE_DAMAGE", |t, key, v| {
        field::apply(DAMAGE_FIELDS, key, v, &mut t.explode_damage)
    }),
    FieldDef::value("CLOSE_ATTACK", |t, v| set_ref(&mut t.close_attack, v)),
    FieldDef::value("RANGE_ATTACK", |t, v| set_ref(&mut t.range_attack, v)),
    FieldDef::value("SPARE_ATTACK", |t, v| set_ref(&mut t.spare_attack, v)),
    FieldDef::value("DROPITEM", |t, v| set_ref(&mut t.drop_item, v)),
    FieldDef::value("BLOOD", |t, v| set_ref(&mut t.blood, v)),
    FieldDef::value("ACTIVE_SOUND", |t, v| set_ref(&mut t.active_sound, v)),
    FieldDef::value("DEATH_SOUND", |t, v| set_ref(&mut t.death_sound, v)),
    FieldDef::value("PAIN_SOUND", |t, v| set_ref(&mut t.pain_sound, v)),
    FieldDef::value("SIGHTING_SOUND", |t, v| set_ref(&mut t.sight_sound, v)),
    FieldDef::value("PALETTE_REMAP", |t, v| set_ref(&mut t.palette_remap, v)),
];

impl Kind for Things {
    type Def = ThingDef;
    const TAG: KindTag = KindTag::Things;

    fn fields() -> &'static [FieldDef<ThingDef>] {
        FIELDS
    }

    /// `[IMP:3001]` carries the editor number after the colon.
    fn identity(header: &str) -> Result<(String, Option<i32>), String> {
        let Some((name, number)) = header.rsplit_once(':') else {
            return Ok((header.trim().to_string(), None));
        };
        let number = values::int(number).map_err(|_| format!("bad thing number '{}'", number.trim()))?;
        Ok((name.trim().to_string(), Some(number)))
    }

    fn finish(t: &mut ThingDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if t.spawn_health <= 0.0 {
            ctx.warn_error(format!("bad SPAWNHEALTH {}, using 1", t.spawn_health))?;
            t.spawn_health = 1.0;
        }
        if t.radius < 0.0 {
            ctx.warn_error(format!("bad RADIUS {}, using 0", t.radius))?;
            t.radius = 0.0;
        }
        if t.height < 0.0 {
            ctx.warn_error(format!("bad HEIGHT {}, using 0", t.height))?;
            t.height = 0.0;
        }
        Ok(())
    }
}

pub fn link(
    things: &mut DefContainer<ThingDef>,
    attacks: &DefContainer<AttackDef>,
    sounds: &DefContainer<SoundDef>,
    colourmaps: &DefContainer<ColourmapDef>,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    use RefPolicy::Optional;

    for (_, t) in things.entries_mut() {
        ctx.set_entry(Some(&t.name));
        linker::resolve(&mut t.close_attack, attacks, Optional, "attack", ctx)?;
        linker::resolve(&mut t.range_attack, attacks, Optional, "attack", ctx)?;
        linker::resolve(&mut t.spare_attack, attacks, Optional, "attack", ctx)?;
        linker::resolve(&mut t.active_sound, sounds, Optional, "sound", ctx)?;
        linker::resolve(&mut t.death_sound, sounds, Optional, "sound", ctx)?;
        linker::resolve(&mut t.pain_sound, sounds, Optional, "sound", ctx)?;
        linker::resolve(&mut t.sight_sound, sounds, Optional, "sound", ctx)?;
        linker::resolve(&mut t.palette_remap, colourmaps, Optional, "colourmap", ctx)?;
    }
    linker::resolve_within(things, |t| &mut t.drop_item, Optional, "thing", ctx)?;
    linker::resolve_within(things, |t| &mut t.blood, Optional, "thing", ctx)
}
