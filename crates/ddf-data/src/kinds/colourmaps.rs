//! `<COLOURMAPS>`: colour remapping tables.

use ddf_types::{ColourmapDef, ColourmapFlags, KindTag};

use crate::diag::{DdfError, LoadContext};
use crate::field::FieldDef;
use crate::flags::{self, FlagRules, FlagSpec};
use crate::session::Kind;
use crate::values;

pub struct Colourmaps;

const SPECIALS: &[FlagSpec<ColourmapFlags>] = &[
    FlagSpec::new("FOG", ColourmapFlags::FOG),
    FlagSpec::new("SKY", ColourmapFlags::SKY),
    FlagSpec::new("NO_FLASH", ColourmapFlags::NO_FLASH),
    FlagSpec::new("WHITEN", ColourmapFlags::WHITEN),
];

static FIELDS: &[FieldDef<ColourmapDef>] = &[
    FieldDef::value("LUMP", |c, v| {
        c.lump = values::lump_name(v.text)?;
        Ok(())
    }),
    FieldDef::value("START", |c, v| {
        c.start = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("LENGTH", |c, v| {
        c.length = values::int(v.text)?;
        Ok(())
    }),
    FieldDef::value("SPECIAL", |c, v| {
        flags::apply_flag(SPECIALS, v.text, FlagRules::PLAIN, &mut c.flags)
    }),
    FieldDef::value("GL_COLOUR", |c, v| {
        c.gl_colour = Some(values::colour(v.text)?);
        Ok(())
    }),
];

impl Kind for Colourmaps {
    type Def = ColourmapDef;
    const TAG: KindTag = KindTag::Colourmaps;

    fn fields() -> &'static [FieldDef<ColourmapDef>] {
        FIELDS
    }

    fn finish(c: &mut ColourmapDef, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if c.length <= 0 {
            ctx.warn_error(format!("bad LENGTH {}, using 1", c.length))?;
            c.length = 1;
        }
        if c.start < 0 {
            ctx.warn_error(format!("bad START {}, using 0", c.start))?;
            c.start = 0;
        }
        Ok(())
    }
}
