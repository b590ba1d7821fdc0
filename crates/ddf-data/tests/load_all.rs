use ddf_data::{Database, LoadContext, LoadOptions, Phase, Source};
use ddf_types::{AttackStyle, BenefitKind, KindTag, LevelFlags, ThingFlags, WeaponFlags};
use std::path::Path;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

/// Deliberately out of kind order. `mod_things.ddf` must stay after
/// `things.ddf` since both are `<THINGS>`.
const FILES: &[&str] = &[
    "levels.ddf",
    "things.ddf",
    "weapons.ddf",
    "styles.ddf",
    "sounds.ddf",
    "mod_things.ddf",
    "games.ddf",
    "attacks.ddf",
    "anims.ddf",
    "fonts.ddf",
    "switches.ddf",
    "colourmaps.ddf",
];

fn read(file: &str) -> Source {
    let path = Path::new(FIXTURES).join(file);
    let text = std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("read {}", path.display()));
    Source::Text {
        name: file.to_string(),
        text,
    }
}

fn load(extra: Vec<Source>) -> (Database, LoadContext) {
    let mut sources: Vec<Source> = FILES.iter().map(|f| read(f)).collect();
    sources.extend(extra);
    let mut db = Database::new();
    let mut ctx = LoadContext::new(LoadOptions::default());
    db.load_all(&sources, &mut ctx)
        .unwrap_or_else(|e| panic!("load: {e}"));
    db.link(&mut ctx).unwrap_or_else(|e| panic!("link: {e}"));
    (db, ctx)
}

#[test]
fn fixtures_load_and_link_cleanly() {
    let (db, ctx) = load(Vec::new());
    assert_eq!(db.phase(), Phase::Linked);
    assert!(ctx.diagnostics().is_empty(), "{:?}", ctx.diagnostics());

    assert_eq!(db.count(KindTag::Sounds), 9);
    assert_eq!(db.count(KindTag::Attacks), 6);
    assert_eq!(db.count(KindTag::Things), 6);
    assert_eq!(db.count(KindTag::Weapons), 2);
    assert_eq!(db.count(KindTag::Levels), 3);
    assert_eq!(db.count(KindTag::Games), 1);
}

#[test]
fn thing_and_attack_refer_to_each_other() {
    let (db, _) = load(Vec::new());
    let imp = db.things().find("IMP").expect("IMP");
    let fireball = db.attacks().resolve(&imp.range_attack).expect("range attack bound");
    assert_eq!(fireball.name, "IMP_FIREBALL");
    assert_eq!(fireball.style, AttackStyle::Projectile);

    let missile = db.things().resolve(&fireball.spawned_object).expect("spawned object bound");
    assert_eq!(missile.name, "IMP_FIREBALL");
    assert!(missile.flags.contains(ThingFlags::MISSILE | ThingFlags::NOGRAVITY));
    let boom = db.sounds().resolve(&missile.death_sound).expect("death sound bound");
    assert_eq!(boom.lump_name, "DSFIRXPL");
}

#[test]
fn dual_attacks_may_form_a_cycle() {
    let (db, _) = load(Vec::new());
    let a = db.attacks().find("COMBO_A").expect("COMBO_A");
    let b = db.attacks().resolve(&a.dual_attack2).expect("COMBO_B bound");
    assert_eq!(b.name, "COMBO_B");
    let back = db.attacks().resolve(&b.dual_attack1).expect("cycle bound");
    assert_eq!(back.name, "COMBO_A");
    assert!(!b.dual_attack2.is_set());
}

#[test]
fn later_files_override_earlier_ones() {
    let (db, _) = load(Vec::new());

    // Replaced: only what the mod restates survives.
    let imp = db.things().find("IMP").expect("IMP");
    assert_eq!(imp.spawn_health, 120.0);
    assert!(!imp.close_attack.is_set());
    assert!(imp.range_attack.is_bound());
    assert!(imp.flags.is_empty());

    // Extended: the number and flags carry over, the benefit list restarts.
    let medikit = db.things().find("MEDIKIT").expect("MEDIKIT");
    assert_eq!(medikit.number, 2012);
    assert_eq!(medikit.flags, ThingFlags::PICKUP);
    assert_eq!(medikit.pickup_benefits.len(), 1);
    assert_eq!(medikit.pickup_benefits[0].kind, BenefitKind::Health);
    assert_eq!(medikit.pickup_benefits[0].amount, 50.0);
    assert_eq!(medikit.pickup_benefits[0].limit, 200.0);
}

#[test]
fn things_are_found_by_number() {
    let (db, _) = load(Vec::new());
    let by_number = |n| db.things().find_number(n).map(|t| t.name.as_str());
    assert_eq!(by_number(3001), Some("IMP"));
    assert_eq!(by_number(2012), Some("MEDIKIT"));
    assert_eq!(by_number(5), Some("BLUE_KEY"));
    assert_eq!(by_number(9999), None);
    // Mentioning a number again still finds the current IMP.
    assert_eq!(by_number(3001), Some("IMP"));
}

#[test]
fn weapons_styles_and_levels_link_across_kinds() {
    let (db, _) = load(Vec::new());

    let shotgun = db.weapons().find("SHOTGUN").expect("SHOTGUN");
    assert!(shotgun.flags.contains(WeaponFlags::SWITCH_AWAY));
    let attack = db.attacks().resolve(&shotgun.attack).expect("attack bound");
    assert_eq!(attack.damage.obituary, "OB_SHOTGUN");
    assert_eq!(attack.damage.nominal, 5.0);
    let pistol = db.weapons().resolve(&shotgun.upgrades).expect("upgrade bound");
    assert_eq!(pistol.name, "PISTOL");

    let menu = db.styles().find("MENU").expect("MENU");
    assert_eq!(db.fonts().resolve(&menu.text.font).map(|f| f.name.as_str()), Some("DOOM"));
    assert_eq!(db.fonts().resolve(&menu.title.font).map(|f| f.name.as_str()), Some("BIG"));
    assert!(db.colourmaps().resolve(&menu.text.colourmap).is_some());

    let e1m1 = db.levels().find("E1M1").expect("E1M1");
    assert_eq!(e1m1.lump, "E1M1");
    assert!(e1m1.flags.contains(LevelFlags::JUMPING));
    assert!(!e1m1.flags.contains(LevelFlags::CHEATS));
    let secret = db.levels().resolve(&e1m1.secret_map).expect("secret bound");
    assert_eq!(secret.description, "Military Base");
    let doom1 = db.games().resolve(&e1m1.episode).expect("episode bound");
    assert_eq!(db.levels().resolve(&doom1.first_map).map(|l| l.name.as_str()), Some("E1M1"));
}

#[test]
fn legacy_lumps_join_the_text_definitions() {
    // One ANIMATED record: texture flag, last name, first name, speed.
    let mut animated = vec![1u8];
    animated.extend_from_slice(b"BLODGR4\0\0");
    animated.extend_from_slice(b"BLODGR1\0\0");
    animated.extend_from_slice(&8i32.to_le_bytes());
    animated.push(0xFF);

    let (db, ctx) = load(vec![Source::Lump {
        name: "ANIMATED.lmp".into(),
        data: animated,
    }]);
    assert!(ctx.diagnostics().is_empty(), "{:?}", ctx.diagnostics());
    assert_eq!(db.count(KindTag::Animations), 3);
    let blood = db.anims().find("BLODGR1").expect("converted entry");
    assert_eq!((blood.first.as_str(), blood.last.as_str()), ("BLODGR1", "BLODGR4"));
    assert_eq!(blood.speed, 8);
    assert!(db.anims().find("NUKAGE").is_some());
}

#[test]
fn missing_required_reference_is_fatal_unless_lax() {
    let broken = Source::Text {
        name: "broken.ddf".into(),
        text: "<WEAPONS>\n[BFG]\nATTACK = BFG_BLAST;\n".into(),
    };
    let mut sources: Vec<Source> = FILES.iter().map(|f| read(f)).collect();
    sources.push(broken);

    let mut db = Database::new();
    let mut ctx = LoadContext::new(LoadOptions::default());
    db.load_all(&sources, &mut ctx).expect("load");
    let err = db.link(&mut ctx).expect_err("unresolved ATTACK");
    assert!(err.to_string().contains("BFG_BLAST"), "{err}");

    let mut db = Database::new();
    let mut ctx = LoadContext::new(LoadOptions {
        strict: false,
        lax: true,
    });
    db.load_all(&sources, &mut ctx).expect("load");
    db.link(&mut ctx).expect("lax link");
    assert_eq!(ctx.warning_count(), 1);
    assert!(!db.weapons().find("BFG").expect("BFG").attack.is_bound());
}
