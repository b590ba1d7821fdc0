//! Binding stored reference names to container handles after every kind has
//! been parsed.

use ddf_types::{Handle, Ref};

use crate::container::{DefContainer, Definition};
use crate::diag::{DdfError, LoadContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefPolicy {
    /// Unresolved is fatal, or a warning in lax mode.
    Required,
    /// Unresolved is a warning; the reference stays unbound.
    Optional,
}

/// Bind `r` against `target`. An unset reference is left alone.
pub fn resolve<T: Definition>(
    r: &mut Ref<T>,
    target: &DefContainer<T>,
    policy: RefPolicy,
    what: &str,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    let Some(name) = r.name() else {
        return Ok(());
    };
    if let Some(h) = target.lookup(name) {
        log::trace!("{what} '{name}' -> {h}");
        r.bind(h);
        return Ok(());
    }

    let msg = format!("unknown {what} '{name}'");
    r.unbind();
    match policy {
        RefPolicy::Required if !ctx.options().lax => Err(ctx.fatal(msg)),
        _ => {
            ctx.warning(msg);
            Ok(())
        }
    }
}

/// Bind a reference that points into the same container as its owner.
pub fn resolve_within<T: Definition>(
    defs: &mut DefContainer<T>,
    field: fn(&mut T) -> &mut Ref<T>,
    policy: RefPolicy,
    what: &str,
    ctx: &mut LoadContext,
) -> Result<(), DdfError> {
    let handles: Vec<Handle> = defs.handles().collect();
    for h in handles {
        let Some(def) = defs.get_mut(h) else {
            continue;
        };
        let mut r = field(def).clone();
        if !r.is_set() {
            continue;
        }
        ctx.set_entry(Some(def.name()));
        resolve(&mut r, defs, policy, what, ctx)?;
        if let Some(def) = defs.get_mut(h) {
            *field(def) = r;
        }
    }
    ctx.set_entry(None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::LoadOptions;

    #[derive(Debug, Clone, Default)]
    struct Node {
        name: String,
        next: Ref<Node>,
    }

    impl Definition for Node {
        fn name(&self) -> &str {
            &self.name
        }
        fn set_name(&mut self, name: &str) {
            self.name = name.to_string();
        }
    }

    fn node(name: &str, next: &str) -> Node {
        Node {
            name: name.to_string(),
            next: Ref::named(next),
        }
    }

    fn next(n: &mut Node) -> &mut Ref<Node> {
        &mut n.next
    }

    #[test]
    fn forward_references_and_cycles_resolve() {
        let mut defs = DefContainer::new();
        let a = defs.append(node("A", "B"));
        let b = defs.append(node("B", "a"));
        defs.append(node("C", ""));
        let mut ctx = LoadContext::new(LoadOptions::default());
        resolve_within(&mut defs, next, RefPolicy::Required, "node", &mut ctx).expect("link");

        let na = defs.get(a).expect("A");
        let nb = defs.get(b).expect("B");
        assert_eq!(na.next.handle(), Some(b));
        assert_eq!(nb.next.handle(), Some(a));
        assert_eq!(defs.resolve(&nb.next).map(|n| n.name.as_str()), Some("A"));
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn required_reference_missing_is_fatal_unless_lax() {
        let mut defs = DefContainer::new();
        defs.append(node("A", "NOWHERE"));
        let mut ctx = LoadContext::new(LoadOptions::default());
        let err = resolve_within(&mut defs, next, RefPolicy::Required, "node", &mut ctx)
            .unwrap_err();
        assert!(err.to_string().contains("NOWHERE"));
        assert_eq!(err.location().entry.as_deref(), Some("A"));

        let mut ctx = LoadContext::new(LoadOptions {
            strict: false,
            lax: true,
        });
        resolve_within(&mut defs, next, RefPolicy::Required, "node", &mut ctx).expect("lax");
        assert_eq!(ctx.warning_count(), 1);
        assert!(!defs.find("A").expect("A").next.is_bound());
    }

    #[test]
    fn optional_reference_missing_warns() {
        let target: DefContainer<Node> = DefContainer::new();
        let mut r = Ref::named("GONE");
        let mut ctx = LoadContext::new(LoadOptions::default());
        resolve(&mut r, &target, RefPolicy::Optional, "node", &mut ctx).expect("optional");
        assert!(!r.is_bound());
        assert_eq!(r.name(), Some("GONE"));
        assert_eq!(ctx.warning_count(), 1);
    }
}
