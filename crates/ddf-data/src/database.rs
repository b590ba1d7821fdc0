//! Every kind's container, and the parse-all then link-all pipeline.

use ddf_types::{
    AnimDef, AttackDef, ColourmapDef, FontDef, GameDef, KindTag, LevelDef, SoundDef, StyleDef,
    SwitchDef, ThingDef, WeaponDef,
};

use crate::container::{DefContainer, Definition};
use crate::diag::{DdfError, LoadContext};
use crate::kinds::{
    self, Animations, Attacks, Colourmaps, Fonts, Games, Levels, Sounds, Styles, Switches,
    Things, Weapons,
};
use crate::legacy::{Converted, LegacyLump};
use crate::lexer::{self, Located, Statement};
use crate::session::{Kind, KindLoader, LoadSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting resources; references are unbound.
    Parsing,
    /// References are bound; loading is refused until [`Database::reset`].
    Linked,
}

/// One input to [`Database::load_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Text { name: String, text: String },
    /// A legacy binary lump, recognised by name.
    Lump { name: String, data: Vec<u8> },
}

impl Source {
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::Lump { name, .. } => name,
        }
    }
}

/// A lexed resource waiting for its turn in kind order.
struct Parsed {
    file: String,
    kind: KindTag,
    statements: Vec<Located<Statement>>,
}

#[derive(Debug)]
pub struct Database {
    phase: Phase,
    sounds: DefContainer<SoundDef>,
    colourmaps: DefContainer<ColourmapDef>,
    fonts: DefContainer<FontDef>,
    styles: DefContainer<StyleDef>,
    attacks: DefContainer<AttackDef>,
    weapons: DefContainer<WeaponDef>,
    things: DefContainer<ThingDef>,
    switches: DefContainer<SwitchDef>,
    anims: DefContainer<AnimDef>,
    games: DefContainer<GameDef>,
    levels: DefContainer<LevelDef>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

fn run<K: Kind>(
    defs: &mut DefContainer<K::Def>,
    statements: &[Located<Statement>],
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    let mut loader = KindLoader::<K>::new(defs);
    LoadSession::new(&mut loader).run(statements, ctx)
}

fn listing<T: Definition>(defs: &DefContainer<T>) -> Vec<(&str, Option<i32>)> {
    defs.iter().map(|d| (d.name(), d.number())).collect()
}

impl Database {
    pub fn new() -> Self {
        Self {
            phase: Phase::Parsing,
            sounds: DefContainer::new(),
            colourmaps: DefContainer::new(),
            fonts: DefContainer::new(),
            styles: DefContainer::new(),
            attacks: DefContainer::new(),
            weapons: DefContainer::new(),
            things: DefContainer::new(),
            switches: DefContainer::new(),
            anims: DefContainer::new(),
            games: DefContainer::new(),
            levels: DefContainer::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Load one DDF resource, dispatching on its kind tag.
    pub fn load_text(
        &mut self,
        file: &str,
        text: &str,
        ctx: &mut LoadContext,
    ) -> Result<KindTag, DdfError> {
        self.check_parsing(ctx)?;
        let parsed = Self::parse(file, text, ctx)?;
        self.load_parsed(&parsed, ctx)?;
        Ok(parsed.kind)
    }

    /// Convert an `ANIMATED` or `SWITCHES` lump and load the result.
    pub fn load_legacy(
        &mut self,
        lump: &str,
        data: &[u8],
        ctx: &mut LoadContext,
    ) -> Result<Converted, DdfError> {
        self.check_parsing(ctx)?;
        let converted = Self::convert(lump, data, ctx)?;
        self.load_text(lump, &converted.text, ctx)?;
        Ok(converted)
    }

    /// Load several resources. Each is lexed up front, then they are loaded
    /// kind by kind in registration order, keeping the given order within a
    /// kind.
    pub fn load_all(&mut self, sources: &[Source], ctx: &mut LoadContext) -> Result<(), DdfError> {
        self.check_parsing(ctx)?;
        let mut parsed = Vec::with_capacity(sources.len());
        for source in sources {
            let p = match source {
                Source::Text { name, text } => Self::parse(name, text, ctx)?,
                Source::Lump { name, data } => {
                    let converted = Self::convert(name, data, ctx)?;
                    Self::parse(name, &converted.text, ctx)?
                }
            };
            parsed.push(p);
        }
        parsed.sort_by_key(|p| p.kind);
        for p in &parsed {
            self.load_parsed(p, ctx)?;
        }
        Ok(())
    }

    /// Resolve every stored reference. Runs once, after all loading.
    pub fn link(&mut self, ctx: &mut LoadContext) -> Result<(), DdfError> {
        self.check_parsing(ctx)?;
        ctx.begin_file("(link)");
        kinds::styles::link(&mut self.styles, &self.fonts, &self.colourmaps, ctx)?;
        kinds::attacks::link(&mut self.attacks, &self.things, &self.sounds, ctx)?;
        kinds::weapons::link(&mut self.weapons, &self.attacks, &self.sounds, ctx)?;
        kinds::things::link(
            &mut self.things,
            &self.attacks,
            &self.sounds,
            &self.colourmaps,
            ctx,
        )?;
        kinds::switches::link(&mut self.switches, &self.sounds, ctx)?;
        kinds::games::link(&mut self.games, &self.levels, ctx)?;
        kinds::levels::link(&mut self.levels, &self.games, ctx)?;
        self.phase = Phase::Linked;
        log::debug!("link complete, {} warnings", ctx.warning_count());
        Ok(())
    }

    /// Drop every entry of every kind and accept loading again.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn sounds(&self) -> &DefContainer<SoundDef> {
        &self.sounds
    }

    pub fn colourmaps(&self) -> &DefContainer<ColourmapDef> {
        &self.colourmaps
    }

    pub fn fonts(&self) -> &DefContainer<FontDef> {
        &self.fonts
    }

    pub fn styles(&self) -> &DefContainer<StyleDef> {
        &self.styles
    }

    pub fn attacks(&self) -> &DefContainer<AttackDef> {
        &self.attacks
    }

    pub fn weapons(&self) -> &DefContainer<WeaponDef> {
        &self.weapons
    }

    pub fn things(&self) -> &DefContainer<ThingDef> {
        &self.things
    }

    pub fn switches(&self) -> &DefContainer<SwitchDef> {
        &self.switches
    }

    pub fn anims(&self) -> &DefContainer<AnimDef> {
        &self.anims
    }

    pub fn games(&self) -> &DefContainer<GameDef> {
        &self.games
    }

    pub fn levels(&self) -> &DefContainer<LevelDef> {
        &self.levels
    }

    pub fn count(&self, kind: KindTag) -> usize {
        match kind {
            KindTag::Sounds => self.sounds.len(),
            KindTag::Colourmaps => self.colourmaps.len(),
            KindTag::Fonts => self.fonts.len(),
            KindTag::Styles => self.styles.len(),
            KindTag::Attacks => self.attacks.len(),
            KindTag::Weapons => self.weapons.len(),
            KindTag::Things => self.things.len(),
            KindTag::Switches => self.switches.len(),
            KindTag::Animations => self.anims.len(),
            KindTag::Games => self.games.len(),
            KindTag::Levels => self.levels.len(),
        }
    }

    /// Name and number of every entry of `kind`, in container order.
    pub fn list(&self, kind: KindTag) -> Vec<(&str, Option<i32>)> {
        match kind {
            KindTag::Sounds => listing(&self.sounds),
            KindTag::Colourmaps => listing(&self.colourmaps),
            KindTag::Fonts => listing(&self.fonts),
            KindTag::Styles => listing(&self.styles),
            KindTag::Attacks => listing(&self.attacks),
            KindTag::Weapons => listing(&self.weapons),
            KindTag::Things => listing(&self.things),
            KindTag::Switches => listing(&self.switches),
            KindTag::Animations => listing(&self.anims),
            KindTag::Games => listing(&self.games),
            KindTag::Levels => listing(&self.levels),
        }
    }

    fn check_parsing(&self, ctx: &LoadContext) -> Result<(), DdfError> {
        match self.phase {
            Phase::Parsing => Ok(()),
            Phase::Linked => Err(ctx.fatal("definitions are already linked; reset before loading")),
        }
    }

    fn convert(lump: &str, data: &[u8], ctx: &mut LoadContext) -> Result<Converted, DdfError> {
        ctx.begin_file(lump);
        let kind = LegacyLump::from_lump_name(lump).map_err(|e| ctx.legacy(e))?;
        let converted = kind.convert(data);
        if let Some(offset) = converted.truncated_at {
            ctx.warning(format!("{kind}: partial record at offset {offset} ignored"));
        }
        log::debug!(
            "{kind}: {} entries, {} records skipped",
            converted.entries,
            converted.skipped
        );
        Ok(converted)
    }

    fn parse(file: &str, text: &str, ctx: &mut LoadContext) -> Result<Parsed, DdfError> {
        ctx.begin_file(file);
        let mut statements = lexer::lex(text).map_err(|e| ctx.syntax(e))?;
        if statements.is_empty() {
            return Err(ctx.fatal("empty resource (expected a <KIND> tag)"));
        }
        let first = statements.remove(0);
        ctx.set_line(first.line, &first.text);
        let Statement::Tag(tag) = &first.value else {
            return Err(ctx.fatal(format!("expected a <KIND> tag before '{}'", first.value)));
        };
        let kind = tag
            .parse::<KindTag>()
            .map_err(|_| ctx.fatal(format!("unknown kind tag <{tag}>")))?;
        Ok(Parsed {
            file: file.to_string(),
            kind,
            statements,
        })
    }

    fn load_parsed(&mut self, p: &Parsed, ctx: &mut LoadContext) -> Result<(), DdfError> {
        ctx.begin_file(&p.file);
        log::debug!("{}: loading <{}>", p.file, p.kind);
        let s = &p.statements;
        match p.kind {
            KindTag::Sounds => run::<Sounds>(&mut self.sounds, s, ctx),
            KindTag::Colourmaps => run::<Colourmaps>(&mut self.colourmaps, s, ctx),
            KindTag::Fonts => run::<Fonts>(&mut self.fonts, s, ctx),
            KindTag::Styles => run::<Styles>(&mut self.styles, s, ctx),
            KindTag::Attacks => run::<Attacks>(&mut self.attacks, s, ctx),
            KindTag::Weapons => run::<Weapons>(&mut self.weapons, s, ctx),
            KindTag::Things => run::<Things>(&mut self.things, s, ctx),
            KindTag::Switches => run::<Switches>(&mut self.switches, s, ctx),
            KindTag::Animations => run::<Animations>(&mut self.anims, s, ctx),
            KindTag::Games => run::<Games>(&mut self.games, s, ctx),
            KindTag::Levels => run::<Levels>(&mut self.levels, s, ctx),
        }
    }
}
