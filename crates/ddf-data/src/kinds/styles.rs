//! `<STYLES>`: menu and HUD styles.

use ddf_types::{
    BackgroundStyle, ColourmapDef, FontDef, KindTag, StyleDef, StyleFlags, TextStyle,
};

use super::set_ref;
use crate::container::DefContainer;
use crate::diag::{DdfError, LoadContext};
use crate::field::{self, FieldDef};
use crate::flags::{self, FlagRules, FlagSpec};
use crate::linker::{self, RefPolicy};
use crate::session::Kind;
use crate::values;

pub struct Styles;

const SPECIALS: &[FlagSpec<StyleFlags>] = &[
    FlagSpec::new("TILED", StyleFlags::TILED),
    FlagSpec::new("TILED_NOSCALE", StyleFlags::TILED_NOSCALE),
    FlagSpec::new("STRETCH", StyleFlags::STRETCH),
    FlagSpec::new("CENTERED", StyleFlags::CENTERED),
];

static BG_FIELDS: &[FieldDef<BackgroundStyle>] = &[
    FieldDef::value("COLOUR", |b, v| {
        b.colour = values::colour(v.text)?;
        Ok(())
    }),
    FieldDef::value("TRANSLUCENCY", |b, v| {
        b.translucency = values::percent(v.text)?;
        Ok(())
    }),
    FieldDef::value("IMAGE", |b, v| {
        b.image = v.text.to_string();
        Ok(())
    }),
    FieldDef::value("SCALE", |b, v| {
        b.scale = values::real(v.text)?;
        Ok(())
    }),
];

static TEXT_FIELDS: &[FieldDef<TextStyle>] = &[
    FieldDef::value("FONT", |t, v| set_ref(&mut t.font, v)),
    FieldDef::value("COLOURMAP", |t, v| set_ref(&mut t.colourmap, v)),
    FieldDef::value("SCALE", |t, v| {
        t.scale = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("TRANSLUCENCY", |t, v| {
        t.translucency = values::percent(v.text)?;
        Ok(())
    }),
];

static FIELDS: &[FieldDef<StyleDef>] = &[
    FieldDef::sub("BG", |s, key, v| field::apply(BG_FIELDS, key, v, &mut s.bg)),
    FieldDef::sub("TEXT", |s, key, v| field::apply(TEXT_FIELDS, key, v, &mut s.text)),
    FieldDef::sub("TITLE", |s, key, v| field::apply(TEXT_FIELDS, key, v, &mut s.title)),
    FieldDef::value("SPECIAL", |s, v| {
        flags::apply_flag(SPECIALS, v.text, FlagRules::PLAIN, &mut s.flags)
    }),
];

impl Kind for Styles {
    type Def = StyleDef;
    const TAG: KindTag = KindTag::Styles;

    fn fields() -> &'static [FieldDef<StyleDef>] {
        FIELDS
    }
}

fn link_text(
    t: &mut TextStyle,
    fonts: &DefContainer<FontDef>,
    colourmaps: &DefContainer<ColourmapDef>,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    linker::resolve(&mut t.font, fonts, RefPolicy::Required, "font", ctx)?;
    linker::resolve(&mut t.colourmap, colourmaps, RefPolicy::Optional, "colourmap", ctx)
}

pub fn link(
    styles: &mut DefContainer<StyleDef>,
    fonts: &DefContainer<FontDef>,
    colourmaps: &DefContainer<ColourmapDef>,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    for (_, s) in styles.entries_mut() {
        ctx.set_entry(Some(&s.name));
        link_text(&mut s.text, fonts, colourmaps, ctx)?;
        link_text(&mut s.title, fonts, colourmaps, ctx)?;
    }
    ctx.set_entry(None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::LoadOptions;
    use crate::kinds::load_test;
    use ddf_types::Rgb;

    #[test]
    fn nested_blocks() {
        let text = "[MENU]\nBG.COLOUR = #102030;\nBG.TRANSLUCENCY = 50%;\n\
                    TEXT.FONT = DOOM;\nTITLE.FONT = BIG;\nTITLE.SCALE = 2;\nSPECIAL = TILED;\n";
        let (styles, ctx) = load_test::<Styles>(text, LoadOptions::default()).expect("load");
        let s = styles.find("MENU").expect("MENU");
        assert_eq!(s.bg.colour, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(s.bg.translucency, 0.5);
        assert_eq!(s.text.font.name(), Some("DOOM"));
        assert_eq!(s.title.font.name(), Some("BIG"));
        assert_eq!((s.text.scale, s.title.scale), (1.0, 2.0));
        assert_eq!(s.flags, StyleFlags::TILED);
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn unknown_sub_field_warns() {
        let text = "[MENU]\nBG.SPARKLE = 1;\nFOO.BAR = 2;\n";
        let (_, ctx) = load_test::<Styles>(text, LoadOptions::default()).expect("load");
        assert_eq!(ctx.warning_count(), 2);
    }

    #[test]
    fn text_font_is_required() {
        let text = "[MENU]\nTEXT.FONT = MISSING;\n";
        let (mut styles, mut ctx) =
            load_test::<Styles>(text, LoadOptions::default()).expect("load");
        let fonts = DefContainer::new();
        let maps = DefContainer::new();
        let err = link(&mut styles, &fonts, &maps, &mut ctx).unwrap_err();
        assert_eq!(err.location().entry.as_deref(), Some("MENU"));
    }
}
