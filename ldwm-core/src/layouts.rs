//! Arrangement strategies for the visible tiled clients.
mod monocle;
mod tile;

use crate::models::Handle;
use crate::state::State;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Index into the configured layout list.
pub type LayoutId = usize;

pub const TILE: &str = "tile";
pub const TILE_GAP: &str = "tilegap";
pub const FLOATING: &str = "floating";
pub const MONOCLE: &str = "monocle";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    /// Master column and stack column.
    Tile,
    /// [`Arrangement::Tile`] with every client inset by the configured padding.
    TileGap,
    /// Clients keep their own geometry.
    Floating,
    /// Every tiled client fills the usable area.
    Monocle,
}

impl Arrangement {
    /// Whether the layout assigns geometry at all.
    pub const fn arranges(self) -> bool {
        !matches!(self, Self::Floating)
    }
}

#[derive(Debug, Error)]
#[error("Could not parse layout: {0}")]
pub struct ParseLayoutError(String);

impl FromStr for Arrangement {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TILE => Ok(Self::Tile),
            TILE_GAP => Ok(Self::TileGap),
            FLOATING => Ok(Self::Floating),
            MONOCLE => Ok(Self::Monocle),
            _ => Err(ParseLayoutError(s.to_owned())),
        }
    }
}

/// A configured layout: the symbol shown in the bar and how it arranges.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub symbol: String,
    pub arrangement: Arrangement,
}

impl Layout {
    pub fn new(symbol: &str, arrangement: Arrangement) -> Self {
        Self {
            symbol: symbol.to_owned(),
            arrangement,
        }
    }

    /// The built-in layout list.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("[]=", Arrangement::Tile),
            Self::new("[]=", Arrangement::TileGap),
            Self::new("><>", Arrangement::Floating),
            Self::new("[M]", Arrangement::Monocle),
        ]
    }
}

impl Arrangement {
    /// Assigns geometry to the visible tiled clients of the monitor.
    pub(crate) fn apply<H: Handle>(self, state: &mut State<H>) {
        match self {
            Self::Tile => tile::update(state, 0),
            Self::TileGap => {
                let padding = state.padding;
                tile::update(state, padding);
            }
            Self::Floating => {}
            Self::Monocle => monocle::update(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_into_arrangements() {
        assert_eq!("tilegap".parse::<Arrangement>().ok(), Some(Arrangement::TileGap));
        assert!("spiral".parse::<Arrangement>().is_err());
    }

    #[test]
    fn only_floating_leaves_geometry_alone() {
        assert!(!Arrangement::Floating.arranges());
        assert!(Arrangement::Monocle.arranges());
        assert!(Arrangement::Tile.arranges());
    }
}
