pub mod anim;
pub mod attack;
pub mod colour;
pub mod colourmap;
pub mod damage;
pub mod font;
pub mod game;
pub mod kind;
pub mod level;
pub mod reference;
pub mod sound;
pub mod style;
pub mod switch;
pub mod thing;
pub mod weapon;

pub use anim::{AnimDef, AnimKind};
pub use attack::{AttackDef, AttackFlags, AttackStyle};
pub use colour::Rgb;
pub use colourmap::{ColourmapDef, ColourmapFlags};
pub use damage::{AttackClass, DamageDef};
pub use font::{FontDef, FontKind, PatchRange};
pub use game::GameDef;
pub use kind::KindTag;
pub use level::{LevelDef, LevelFlags};
pub use reference::{Handle, Ref};
pub use sound::SoundDef;
pub use style::{BackgroundStyle, StyleDef, StyleFlags, TextStyle};
pub use switch::{BUTTON_TIME, SwitchDef};
pub use thing::{Benefit, BenefitKind, ThingDef, ThingFlags};
pub use weapon::{AmmoType, WeaponDef, WeaponFlags};
