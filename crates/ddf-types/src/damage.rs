use bitflags::bitflags;
use serde::Serialize;

/// Damage sub-block shared by attacks (`DAMAGE.*`) and things
/// (`EXPLODE_DAMAGE.*`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageDef {
    /// `VAL`: nominal damage.
    pub nominal: f32,
    /// `MAX`: upper bound of a linear random range, or -1 when unused.
    pub linear_max: f32,
    /// `ERROR`: random deviation around `nominal`, or -1 when unused.
    pub error: f32,
    /// `DELAY`: tics between repeated applications.
    pub delay: i32,
    pub obituary: String,
}

impl Default for DamageDef {
    fn default() -> Self {
        Self {
            nominal: 0.0,
            linear_max: -1.0,
            error: -1.0,
            delay: 0,
            obituary: String::new(),
        }
    }
}

bitflags! {
    /// Attack classes used by `ATTACK_CLASS` and `IMMUNITY_CLASS`.
    ///
    /// The low 16 bits are the built-in classes; user-defined class names
    /// map into the upper 16 bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct AttackClass: u32 {
        const BULLET    = 0x0000_0001;
        const MISSILE   = 0x0000_0002;
        const MELEE     = 0x0000_0004;
        const FIRE      = 0x0000_0008;
        const ICE       = 0x0000_0010;
        const POISON    = 0x0000_0020;
        const PLASMA    = 0x0000_0040;
        const EXPLOSION = 0x0000_0080;
        const CRUSH     = 0x0000_0100;
        const TELEFRAG  = 0x0000_0200;
    }
}

impl AttackClass {
    /// First bit available to user-defined classes.
    pub const USER_FIRST_BIT: u32 = 16;
    pub const USER_BITS: u32 = 16;
}
