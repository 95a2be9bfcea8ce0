//! Sound effects attached to a Symbol Art.
//!
//! The header stores the effect as a single byte. Ids 1 through 11 name
//! the effects the game client plays; any other byte is kept verbatim as
//! [`SoundEffect::Other`] so files round-trip unchanged. `Other` can only
//! be built through [`SoundEffect::from_id`], so every byte has exactly
//! one representation.
//!
//! In JSON a named effect is written as its name (`"Joy"`) and an
//! unnamed id as a plain number. Either form is accepted on input.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Sound effect played when a Symbol Art is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoundEffect {
    /// No sound (id 1).
    #[default]
    None,
    /// Id 2.
    Normal,
    /// Id 3.
    Joy,
    /// Id 4.
    Anger,
    /// Id 5.
    Sorrow,
    /// Id 6.
    Anxiety,
    /// Id 7.
    Surprised,
    /// Id 8.
    Doubt,
    /// Id 9.
    Whistle,
    /// Id 10.
    Shy,
    /// Id 11.
    Success,
    /// An id outside the named range.
    Other(UnknownSound),
}

/// A sound id outside 1..=11, obtained from [`SoundEffect::from_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownSound(u8);

impl UnknownSound {
    /// The raw header byte.
    pub fn id(self) -> u8 {
        self.0
    }
}

impl SoundEffect {
    /// All named effects in id order.
    pub const ALL: [SoundEffect; 11] = [
        Self::None,
        Self::Normal,
        Self::Joy,
        Self::Anger,
        Self::Sorrow,
        Self::Anxiety,
        Self::Surprised,
        Self::Doubt,
        Self::Whistle,
        Self::Shy,
        Self::Success,
    ];

    /// Map a header byte to an effect.
    pub fn from_id(id: u8) -> Self {
        match id {
            1..=11 => Self::ALL[usize::from(id - 1)],
            other => Self::Other(UnknownSound(other)),
        }
    }

    /// The header byte for this effect.
    pub fn id(self) -> u8 {
        match self {
            Self::None => 1,
            Self::Normal => 2,
            Self::Joy => 3,
            Self::Anger => 4,
            Self::Sorrow => 5,
            Self::Anxiety => 6,
            Self::Surprised => 7,
            Self::Doubt => 8,
            Self::Whistle => 9,
            Self::Shy => 10,
            Self::Success => 11,
            Self::Other(unknown) => unknown.id(),
        }
    }

    /// The effect name, or `None` for [`SoundEffect::Other`].
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::None => "None",
            Self::Normal => "Normal",
            Self::Joy => "Joy",
            Self::Anger => "Anger",
            Self::Sorrow => "Sorrow",
            Self::Anxiety => "Anxiety",
            Self::Surprised => "Surprised",
            Self::Doubt => "Doubt",
            Self::Whistle => "Whistle",
            Self::Shy => "Shy",
            Self::Success => "Success",
            Self::Other(_) => return None,
        };
        Some(name)
    }

    /// Look an effect up by name. Unrecognized names map to
    /// [`SoundEffect::None`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|effect| effect.name() == Some(name))
            .unwrap_or(Self::None)
    }
}

impl fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown ({})", self.id()),
        }
    }
}

impl Serialize for SoundEffect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_u8(self.id()),
        }
    }
}

/// Either JSON form of a sound effect.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSound {
    Id(u64),
    Name(String),
}

impl<'de> Deserialize<'de> for SoundEffect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawSound::deserialize(deserializer)? {
            RawSound::Name(name) => Ok(Self::from_name(&name)),
            RawSound::Id(id) => u8::try_from(id)
                .map(Self::from_id)
                .map_err(|_| D::Error::custom(format!("sound id {id} out of range"))),
        }
    }
}
