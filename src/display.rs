use crate::constants::GRAY_LEVELS;

/// Panel orientation. The e-paper driver only supports quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a rotation given in degrees. Anything other than a quarter
    /// turn is rejected.
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// Index into the panel's grayscale palette, 0 (white) to 15 (black).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Shade(u8);

impl Shade {
    pub fn new(level: u8) -> Option<Self> {
        if level < GRAY_LEVELS {
            Some(Shade(level))
        } else {
            None
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }
}
