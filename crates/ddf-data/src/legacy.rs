//! Conversion of Boom-format `ANIMATED` and `SWITCHES` lumps to DDF text.
//!
//! Both lumps are arrays of fixed-size little-endian records with NUL-padded
//! 9-byte names. The synthesized text is loaded like any other resource.

use ddf_types::KindTag;
use strum::{Display, EnumString};

/// Size of one `ANIMATED` record: type, last name, first name, speed.
pub const ANIMATED_RECORD_SIZE: usize = 23;
/// Size of one `SWITCHES` record: two names and an episode number.
pub const SWITCHES_RECORD_SIZE: usize = 20;

const NAME_SIZE: usize = 9;
const ANIMATED_END: u8 = 0xFF;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LegacyError {
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },
    #[error("unknown legacy lump '{0}' (expected ANIMATED or SWITCHES)")]
    UnknownLump(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LegacyLump {
    Animated,
    Switches,
}

impl LegacyLump {
    /// Recognise a lump by name, ignoring any file extension.
    pub fn from_lump_name(name: &str) -> Result<Self, LegacyError> {
        let stem = name.split('.').next().unwrap_or_default().trim();
        stem.parse()
            .map_err(|_| LegacyError::UnknownLump(name.to_string()))
    }

    pub fn kind(self) -> KindTag {
        match self {
            Self::Animated => KindTag::Animations,
            Self::Switches => KindTag::Switches,
        }
    }

    pub fn convert(self, data: &[u8]) -> Converted {
        match self {
            Self::Animated => convert_animated(data),
            Self::Switches => convert_switches(data),
        }
    }
}

/// Result of converting one lump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converted {
    /// DDF source, starting with the kind tag.
    pub text: String,
    /// Entries written to `text`.
    pub entries: usize,
    /// Records dropped for bad names.
    pub skipped: usize,
    /// Offset of a trailing partial record, if the data ended inside one.
    pub truncated_at: Option<usize>,
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], LegacyError> {
        if self.remaining() < n {
            return Err(LegacyError::UnexpectedEof { offset: self.pos });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, LegacyError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_i16(&mut self) -> Result<i16, LegacyError> {
        let b = self.read_bytes(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    fn read_i32(&mut self) -> Result<i32, LegacyError> {
        let b = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// A NUL-padded name, or `None` if it could not be used as an entry
    /// name: empty, longer than 8 characters, or containing bytes that are
    /// not printable or would break a header.
    fn read_name(&mut self) -> Result<Option<String>, LegacyError> {
        let raw = self.read_bytes(NAME_SIZE)?;
        let len = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let name = &raw[..len];
        let valid = (1..NAME_SIZE).contains(&len)
            && name
                .iter()
                .all(|&b| b.is_ascii_graphic() && !matches!(b, b'"' | b'\\' | b'[' | b']' | b'/'));
        Ok(valid.then(|| String::from_utf8_lossy(name).to_ascii_uppercase()))
    }
}

fn begin(kind: KindTag) -> Converted {
    Converted {
        text: format!("<{kind}>\n"),
        ..Converted::default()
    }
}

struct AnimRecord {
    texture: bool,
    first: Option<String>,
    last: Option<String>,
    speed: i32,
}

/// `None` at the end-of-table marker.
fn read_animated(r: &mut Reader<'_>) -> Result<Option<AnimRecord>, LegacyError> {
    let kind = r.read_u8()?;
    if kind == ANIMATED_END {
        return Ok(None);
    }
    let last = r.read_name()?;
    let first = r.read_name()?;
    let speed = r.read_i32()?;
    Ok(Some(AnimRecord {
        texture: kind & 1 != 0,
        first,
        last,
        speed,
    }))
}

struct SwitchRecord {
    name1: Option<String>,
    name2: Option<String>,
    episode: i16,
}

fn read_switch(r: &mut Reader<'_>) -> Result<SwitchRecord, LegacyError> {
    Ok(SwitchRecord {
        name1: r.read_name()?,
        name2: r.read_name()?,
        episode: r.read_i16()?,
    })
}

pub fn convert_animated(data: &[u8]) -> Converted {
    let mut out = begin(KindTag::Animations);
    let mut r = Reader::new(data);
    while r.remaining() > 0 {
        let start = r.pos;
        match read_animated(&mut r) {
            Ok(None) => break,
            Ok(Some(AnimRecord {
                texture,
                first: Some(first),
                last: Some(last),
                speed,
            })) => {
                let kind = if texture { "TEXTURE" } else { "FLAT" };
                out.text.push_str(&format!(
                    "[{first}]\nTYPE = {kind};\nFIRST = \"{first}\";\nLAST = \"{last}\";\nSPEED = {speed}T;\n"
                ));
                out.entries += 1;
            }
            Ok(Some(_)) => {
                log::debug!("ANIMATED: skipping record at offset {start}: bad name");
                out.skipped += 1;
            }
            Err(_) => {
                out.truncated_at = Some(start);
                break;
            }
        }
    }
    out
}

pub fn convert_switches(data: &[u8]) -> Converted {
    let mut out = begin(KindTag::Switches);
    let mut r = Reader::new(data);
    while r.remaining() > 0 {
        let start = r.pos;
        match read_switch(&mut r) {
            Ok(SwitchRecord { episode: 0, .. }) => break,
            Ok(SwitchRecord {
                name1: Some(on),
                name2: Some(off),
                ..
            }) => {
                out.text.push_str(&format!(
                    "[{on}]\nON_TEXTURE = \"{on}\";\nOFF_TEXTURE = \"{off}\";\n"
                ));
                out.entries += 1;
            }
            Ok(_) => {
                log::debug!("SWITCHES: skipping record at offset {start}: bad name");
                out.skipped += 1;
            }
            Err(_) => {
                out.truncated_at = Some(start);
                break;
            }
        }
    }
    out
}
