//! `<SOUNDS>`: sound effects.

use ddf_types::{KindTag, SoundDef};

use crate::diag::{DdfError, LoadContext};
use crate::field::FieldDef;
use crate::session::Kind;
use crate::values;

pub struct Sounds;

static FIELDS: &[FieldDef<SoundDef>] = &[
    FieldDef::value("LUMP_NAME", |s, v| {
        s.lump_name = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("PC_SPEAKER_SOUND", |s, v| {
        s.pc_speaker = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("SINGULAR", |s, v| {
        s.singular = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("PRIORITY", |s, v| {
        s.priority = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("VOLUME", |s, v| {
        s.volume = values::percent(v.text)?;
        Ok(())
    }),
    FieldDef::value("LOOP", |s, v| {
        s.looping = values::boolean(v.text)?;
        Ok(())
    }),
    FieldDef::value("PRECIOUS", |s, v| {
        s.precious = values::boolean(v.text)?;
        Ok(())
    }),
    FieldDef::value("MAX_DISTANCE", |s, v| {
        s.max_distance = values::real(v.text)?;
        Ok(())
    }),
];

impl Kind for Sounds {
    type Def = SoundDef;
    const TAG: KindTag = KindTag::Sounds;

    fn fields() -> &'static [FieldDef<SoundDef>] {
        FIELDS
    }

    fn finish(s: &mut SoundDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if s.lump_name.is_empty() && s.pc_speaker.is_empty() {
            return Err(ctx.fatal("no LUMP_NAME or PC_SPEAKER_SOUND given"));
        }
        if !(0.0..=1.0).contains(&s.volume) {
            ctx.warn_error(format!("VOLUME {}% out of range", s.volume * 100.0))?;
            s.volume = s.volume.clamp(0.0, 1.0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::LoadOptions;
    use crate::kinds::load_test;

    #[test]
    fn parses_a_sound() {
        let text = "[PISTOL]\nLUMP_NAME = \"dspistol\";\nPRIORITY = 64;\nLOOP = TRUE;\nVOLUME = 50%;\n";
        let (sounds, ctx) = load_test::<Sounds>(text, LoadOptions::default()).expect("load");
        let s = sounds.find("PISTOL").expect("PISTOL");
        assert_eq!(s.lump_name, "DSPISTOL");
        assert!(s.looping);
        assert_eq!(s.volume, 0.5);
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn needs_a_lump() {
        assert!(load_test::<Sounds>("[SILENT]\nPRIORITY = 1;\n", LoadOptions::default()).is_err());
        let text = "[BEEP]\nPC_SPEAKER_SOUND = DPPISTOL;\n";
        assert!(load_test::<Sounds>(text, LoadOptions::default()).is_ok());
    }

    #[test]
    fn volume_is_clamped() {
        let text = "[LOUD]\nLUMP_NAME = DSBFG;\nVOLUME = 150%;\n";
        let (sounds, ctx) = load_test::<Sounds>(text, LoadOptions::default()).expect("load");
        assert_eq!(sounds.find("LOUD").expect("LOUD").volume, 1.0);
        assert_eq!(ctx.warning_count(), 1);
    }
}
