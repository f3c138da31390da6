use std::fmt;

/// One of the two virtual eye cameras.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Render order within a frame: left first.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// `-1` for the left eye, `+1` for the right eye.
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Eye::Left => -1.0,
            Eye::Right => 1.0,
        }
    }

    /// Signed horizontal camera position for a given IPD.
    #[inline]
    pub fn offset(self, ipd: f32) -> f32 {
        self.sign() * ipd * 0.5
    }
}

impl fmt::Display for Eye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eye::Left => f.write_str("left"),
            Eye::Right => f.write_str("right"),
        }
    }
}
