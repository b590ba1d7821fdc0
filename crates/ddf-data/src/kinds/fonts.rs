//! `<FONTS>`: patch, image and TrueType fonts.

use ddf_types::{FontDef, FontKind, KindTag, PatchRange};

use crate::diag::{DdfError, LoadContext};
use crate::field::{FieldDef, FieldValue};
use crate::session::Kind;
use crate::values::{self, ValueError};

pub struct Fonts;

/// `STCFN(33:95)`; a lone `PREFIX(65)` covers one character.
fn patch_range(v: &FieldValue<'_>) -> Result<PatchRange, ValueError> {
    let call = values::call(v.text)?;
    let bound = |s: &str| -> Result<u32, ValueError> {
        u32::try_from(values::int(s)?)
            .map_err(|_| ValueError::Invalid(format!("bad character code '{s}'")))
    };
    let first = bound(call.arg.ok_or_else(|| ValueError::Call(v.text.to_string()))?)?;
    let last = match call.arg2 {
        Some(l) => bound(l)?,
        None => first,
    };
    if last < first {
        return Err(ValueError::Invalid(format!("empty patch range '{}'", v.text)));
    }
    Ok(PatchRange {
        prefix: call.name.to_ascii_uppercase(),
        first,
        last,
    })
}

static FIELDS: &[FieldDef<FontDef>] = &[
    FieldDef::value("TYPE", |f, v| {
        f.kind = values::keyword(v.text, "font type")?;
        Ok(())
    }),
    FieldDef::value("PATCHES", |f, v| {
        if v.is_first() {
            f.patches.clear();
        }
        f.patches.push(patch_range(v)?);
        Ok(())
    }),
    FieldDef::value("MISSING_PATCH", |f, v| {
        f.missing_patch = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("IMAGE", |f, v| {
        f.image = v.text.to_string();
        Ok(())
    }),
    FieldDef::value("SPACING", |f, v| {
        f.spacing = values::real(v.text)?;
        Ok(())
    }),
    FieldDef::value("DEFAULT_SIZE", |f, v| {
        f.default_size = values::real(v.text)?;
        Ok(())
    }),
];

impl Kind for Fonts {
    type Def = FontDef;
    const TAG: KindTag = KindTag::Fonts;

    fn fields() -> &'static [FieldDef<FontDef>] {
        FIELDS
    }

    fn finish(f: &mut FontDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        match f.kind {
            FontKind::Patch if f.patches.is_empty() => Err(ctx.fatal("PATCH font has no PATCHES")),
            FontKind::Image | FontKind::TrueType if f.image.is_empty() => {
                Err(ctx.fatal(format!("{:?} font has no IMAGE", f.kind)))
            }
            _ => Ok(()),
        }
    }
}
