use serde::Serialize;
use strum::{Display, EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Content kinds, declared in load registration order.
///
/// The textual form is the tag that opens a DDF resource, e.g. `<THINGS>`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    FromRepr,
    IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum KindTag {
    Sounds = 0,
    Colourmaps = 1,
    Fonts = 2,
    Styles = 3,
    Attacks = 4,
    Weapons = 5,
    Things = 6,
    Switches = 7,
    Animations = 8,
    Games = 9,
    Levels = 10,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn count() {
        assert_eq!(KindTag::COUNT, 11);
    }

    #[test]
    fn tag_text_round_trip() {
        for k in KindTag::iter() {
            assert_eq!(KindTag::from_str(&k.to_string()).ok(), Some(k));
        }
    }

    #[test]
    fn tags_are_case_insensitive() {
        assert_eq!(KindTag::from_str("things").ok(), Some(KindTag::Things));
        assert_eq!(KindTag::from_str("Animations").ok(), Some(KindTag::Animations));
        assert!(KindTag::from_str("THING").is_err());
    }

    #[test]
    fn registration_order() {
        let order: Vec<KindTag> = KindTag::iter().collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(order[0], KindTag::Sounds);
        assert_eq!(KindTag::Things.to_string(), "THINGS");
    }
}
