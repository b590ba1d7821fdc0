pub mod container;
pub mod database;
pub mod diag;
pub mod field;
pub mod flags;
pub mod kinds;
pub mod legacy;
pub mod lexer;
pub mod linker;
pub mod name;
pub mod session;
pub mod values;

pub use container::{DefContainer, Definition, NUMBER_CACHE_SIZE};
pub use database::{Database, Phase, Source};
pub use diag::{DdfError, Diagnostic, LoadContext, LoadOptions, Location, Severity};
pub use legacy::{Converted, LegacyError, LegacyLump};

#[cfg(test)]
mod tests {
    use crate::diag::LoadOptions;
    use crate::{Database, LoadContext};
    use ddf_types::KindTag;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_starts_empty() {
        let db = Database::new();
        for kind in KindTag::iter() {
            assert_eq!(db.count(kind), 0, "{kind}");
            assert!(db.list(kind).is_empty());
        }
    }

    #[test]
    fn every_kind_tag_is_loadable() {
        let mut db = Database::new();
        let mut ctx = LoadContext::new(LoadOptions::default());
        for kind in KindTag::iter() {
            let text = format!("<{kind}>\n");
            assert_eq!(db.load_text("empty.ddf", &text, &mut ctx).ok(), Some(kind));
        }
    }
}
