use std::fmt;
use std::str::FromStr;

use crate::error::ArchiveError;

/// An `ExMy` map marker name: episode digit and map digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MapName {
    pub episode: u8,
    pub map: u8,
}

impl MapName {
    #[must_use]
    pub fn new(episode: u8, map: u8) -> Self {
        Self { episode, map }
    }

    /// Parses a directory entry name. Only the exact four-character
    /// `E<digit>M<digit>` form is accepted.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.as_bytes() {
            [b'E', e, b'M', m] if e.is_ascii_digit() && m.is_ascii_digit() => {
                Some(Self::new(e - b'0', m - b'0'))
            }
            _ => None,
        }
    }
}

impl fmt::Display for MapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}M{}", self.episode, self.map)
    }
}

impl FromStr for MapName {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&s.to_ascii_uppercase()).ok_or_else(|| ArchiveError::UnknownMap(s.to_owned()))
    }
}
