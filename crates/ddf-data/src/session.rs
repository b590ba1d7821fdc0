//! The per-resource parse pass: drives entry lifecycle callbacks from the
//! lexed statement stream.

use ddf_types::{Handle, KindTag};

use crate::container::{DefContainer, Definition};
use crate::diag::{DdfError, LoadContext, Severity};
use crate::field::{self, FieldDef, FieldValue};
use crate::lexer::{Located, Statement};
use crate::name;

/// What `#CLEARALL` does for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearPolicy {
    /// Log and ignore. For kinds other content may already reference.
    Refuse,
    /// Drop every entry.
    Reset,
}

/// Static description of one content kind.
pub trait Kind {
    type Def: Definition + 'static;

    const TAG: KindTag;
    const CLEAR_ALL: ClearPolicy = ClearPolicy::Refuse;
    const UNKNOWN_FIELD: Severity = Severity::WarnError;

    fn fields() -> &'static [FieldDef<Self::Def>];

    /// Split header text into a name and an optional number.
    fn identity(header: &str) -> Result<(String, Option<i32>), String> {
        Ok((header.trim().to_string(), None))
    }

    /// Validate and fix up a completed entry.
    fn finish(_def: &mut Self::Def, _ctx: &mut LoadContext) -> Result<(), DdfError> {
        Ok(())
    }
}

/// Callbacks a [`LoadSession`] drives.
pub trait EntryHandler {
    fn start_entry(&mut self, ctx: &mut LoadContext, header: &str, extend: bool)
    -> Result<(), DdfError>;

    fn parse_field(
        &mut self,
        ctx: &mut LoadContext,
        field: &str,
        value: &FieldValue<'_>,
    ) -> Result<(), DdfError>;

    fn finish_entry(&mut self, ctx: &mut LoadContext) -> Result<(), DdfError>;

    fn clear_all(&mut self, ctx: &mut LoadContext) -> Result<(), DdfError>;
}

/// The generic [`EntryHandler`] for a [`Kind`], writing into its container.
pub struct KindLoader<'a, K: Kind> {
    defs: &'a mut DefContainer<K::Def>,
    current: Option<Handle>,
}

impl<'a, K: Kind> KindLoader<'a, K> {
    pub fn new(defs: &'a mut DefContainer<K::Def>) -> Self {
        Self {
            defs,
            current: None,
        }
    }

    fn current_def(&mut self, ctx: &LoadContext) -> Result<(Handle, &mut K::Def), DdfError> {
        let h = self
            .current
            .ok_or_else(|| ctx.fatal("field outside of an entry"))?;
        let def = self
            .defs
            .get_mut(h)
            .ok_or_else(|| ctx.fatal("current entry vanished"))?;
        Ok((h, def))
    }

    /// `TEMPLATE = OTHER;` copies every field of `OTHER` except its identity.
    fn apply_template(&mut self, ctx: &mut LoadContext, source: &str) -> Result<(), DdfError> {
        let Some(src) = self.defs.lookup(source) else {
            return Err(ctx.fatal(format!("unknown template '{source}'")));
        };
        let (h, _) = self.current_def(ctx)?;
        if src == h {
            return Err(ctx.fatal("entry cannot use itself as a template"));
        }
        let copy = self
            .defs
            .get(src)
            .cloned()
            .ok_or_else(|| ctx.fatal(format!("unknown template '{source}'")))?;
        let (_, def) = self.current_def(ctx)?;
        let name = def.name().to_string();
        let number = def.number();
        *def = copy;
        def.set_name(&name);
        def.set_number(number);
        log::trace!("{name}: copied template {source}");
        Ok(())
    }
}

impl<K: Kind> EntryHandler for KindLoader<'_, K> {
    fn start_entry(
        &mut self,
        ctx: &mut LoadContext,
        header: &str,
        extend: bool,
    ) -> Result<(), DdfError> {
        let (name, number) = K::identity(header).map_err(|msg| ctx.fatal(msg))?;
        if name.is_empty() {
            return Err(ctx.fatal("empty entry name"));
        }
        ctx.set_entry(Some(&name));

        let handle = match (self.defs.lookup(&name), extend) {
            (Some(h), true) => {
                log::trace!("extending {name}");
                if let (Some(n), Some(def)) = (number, self.defs.get_mut(h)) {
                    def.set_number(Some(n));
                }
                h
            }
            (None, true) => {
                return Err(ctx.fatal(format!("cannot extend unknown entry '{name}'")));
            }
            (Some(h), false) => {
                log::debug!("replacing {name}");
                if let Some(def) = self.defs.get_mut(h) {
                    *def = K::Def::default();
                    def.set_name(&name);
                    def.set_number(number);
                }
                h
            }
            (None, false) => {
                log::trace!("new entry {name}");
                let mut def = K::Def::default();
                def.set_name(&name);
                def.set_number(number);
                self.defs.append(def)
            }
        };
        self.defs.move_to_end(handle);
        self.current = Some(handle);
        Ok(())
    }

    fn parse_field(
        &mut self,
        ctx: &mut LoadContext,
        field: &str,
        value: &FieldValue<'_>,
    ) -> Result<(), DdfError> {
        if name::matches(field, "TEMPLATE") {
            if !value.is_first() {
                return ctx.warn_error("TEMPLATE takes a single entry name");
            }
            return self.apply_template(ctx, value.text);
        }

        let (_, def) = self.current_def(ctx)?;
        match field::apply(K::fields(), field, value, def) {
            Ok(true) => Ok(()),
            Ok(false) => ctx.report(K::UNKNOWN_FIELD, format!("unknown field '{field}'")),
            Err(e) if e.severity() == Severity::Fatal => Err(ctx.bad_value(e)),
            Err(e) => ctx.report(e.severity(), format!("{field}: {e}")),
        }
    }

    fn finish_entry(&mut self, ctx: &mut LoadContext) -> Result<(), DdfError> {
        let (_, def) = self.current_def(ctx)?;
        K::finish(def, ctx)?;
        self.current = None;
        Ok(())
    }

    fn clear_all(&mut self, ctx: &mut LoadContext) -> Result<(), DdfError> {
        self.current = None;
        match K::CLEAR_ALL {
            ClearPolicy::Refuse => {
                ctx.warning(format!("#CLEARALL ignored for <{}>", K::TAG));
            }
            ClearPolicy::Reset => {
                log::debug!("#CLEARALL: dropping {} {} entries", self.defs.len(), K::TAG);
                self.defs.reset();
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    HeaderSeen,
    InEntry,
}

/// One pass over the statements that follow a resource's kind tag.
pub struct LoadSession<'h, H> {
    handler: &'h mut H,
    state: State,
}

impl<'h, H: EntryHandler> LoadSession<'h, H> {
    pub fn new(handler: &'h mut H) -> Self {
        Self {
            handler,
            state: State::Idle,
        }
    }

    pub fn run(
        mut self,
        statements: &[Located<Statement>],
        ctx: &mut LoadContext,
    ) -> Result<(), DdfError> {
        for stmt in statements {
            // Finish the open entry while the context still points at its
            // last statement.
            if matches!(stmt.value, Statement::Header { .. } | Statement::ClearAll) {
                self.close_entry(ctx)?;
            }
            ctx.set_line(stmt.line, &stmt.text);
            self.feed(&stmt.value, ctx)?;
        }
        self.close_entry(ctx)
    }

    fn feed(&mut self, stmt: &Statement, ctx: &mut LoadContext) -> Result<(), DdfError> {
        match stmt {
            Statement::Tag(tag) => Err(ctx.fatal(format!("unexpected kind tag <{tag}>"))),
            Statement::Version(v) => {
                log::trace!("ignoring #VERSION {v}");
                Ok(())
            }
            Statement::ClearAll => {
                self.close_entry(ctx)?;
                self.handler.clear_all(ctx)
            }
            Statement::Header { name, extend } => {
                self.close_entry(ctx)?;
                self.handler.start_entry(ctx, name, *extend)?;
                self.state = State::HeaderSeen;
                Ok(())
            }
            Statement::Field { key, values } => {
                if self.state == State::Idle {
                    return Err(ctx.fatal(format!("field '{key}' outside of an entry")));
                }
                self.state = State::InEntry;
                let last = values.len().saturating_sub(1);
                for (index, text) in values.iter().enumerate() {
                    let value = FieldValue {
                        text,
                        index,
                        is_last: index == last,
                    };
                    self.handler.parse_field(ctx, key, &value)?;
                }
                Ok(())
            }
        }
    }

    fn close_entry(&mut self, ctx: &mut LoadContext) -> Result<(), DdfError> {
        if self.state != State::Idle {
            self.handler.finish_entry(ctx)?;
            self.state = State::Idle;
        }
        ctx.set_entry(None);
        Ok(())
    }
}
