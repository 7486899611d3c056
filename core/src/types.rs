use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the four colored blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorId {
    Green,
    Red,
    Yellow,
    Blue,
}

impl ColorId {
    /// Every color, in row-major screen order.
    pub const ALL: [ColorId; 4] = [Self::Green, Self::Red, Self::Yellow, Self::Blue];

    pub const fn name(self) -> &'static str {
        use ColorId::*;
        match self {
            Green => "green",
            Red => "red",
            Yellow => "yellow",
            Blue => "blue",
        }
    }

    pub const fn position(self) -> BlockPosition {
        use ColorId::*;
        match self {
            Green => BlockPosition::TopLeft,
            Red => BlockPosition::TopRight,
            Yellow => BlockPosition::BottomLeft,
            Blue => BlockPosition::BottomRight,
        }
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed screen slot of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl BlockPosition {
    pub const fn class_name(self) -> &'static str {
        use BlockPosition::*;
        match self {
            TopLeft => "top-left",
            TopRight => "top-right",
            BottomLeft => "bottom-left",
            BottomRight => "bottom-right",
        }
    }

    /// `(row, column)` in the two by two grid.
    pub const fn cell(self) -> (usize, usize) {
        use BlockPosition::*;
        match self {
            TopLeft => (0, 0),
            TopRight => (0, 1),
            BottomLeft => (1, 0),
            BottomRight => (1, 1),
        }
    }
}

/// Identifies one round, so that delayed callbacks scheduled for an older round can be told apart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundTag(pub u32);

impl RoundTag {
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
