//! Colour and piece definitions.
//!
//! A piece is one of the 27 sub-cubes. It carries one optional colour per
//! absolute direction; exactly the outward-facing directions are coloured.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Side;

/// Facelet colour.
///
/// Discriminants line up with [`Side`] so that `Colour::ALL[side as usize]`
/// is the colour a solved cube shows on that side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    White,
    Yellow,
    Red,
    Orange,
    Green,
    Blue,
}

impl Colour {
    pub const ALL: [Colour; 6] = [
        Colour::White,
        Colour::Yellow,
        Colour::Red,
        Colour::Orange,
        Colour::Green,
        Colour::Blue,
    ];

    /// The side whose solved colour this is.
    pub const fn home(self) -> Side {
        Side::ALL[self as usize]
    }

    /// Single-letter code used by the text renderer.
    pub const fn letter(self) -> char {
        match self {
            Colour::White => 'W',
            Colour::Yellow => 'Y',
            Colour::Red => 'R',
            Colour::Orange => 'O',
            Colour::Green => 'G',
            Colour::Blue => 'B',
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One sub-cube: a colour (or nothing) for each of the six absolute directions.
///
/// Indexed by `Side as usize`. Pieces are small and `Copy`, so face views hold
/// them by value rather than borrowing from the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Piece {
    pub attributes: [Option<Colour>; 6],
}

impl Piece {
    /// The hidden core, with no visible facelets.
    pub const HIDDEN: Self = Self {
        attributes: [None; 6],
    };

    /// Colour facing `side`, if that direction is visible.
    #[inline]
    pub fn colour(&self, side: Side) -> Option<Colour> {
        self.attributes[side as usize]
    }

    #[inline]
    pub fn set_colour(&mut self, side: Side, colour: Option<Colour>) {
        self.attributes[side as usize] = colour;
    }

    /// Number of visible facelets: 0 core, 1 centre, 2 edge, 3 corner.
    pub fn visible_count(&self) -> usize {
        self.attributes.iter().flatten().count()
    }

    /// Bitmask of the colours this piece carries, independent of orientation.
    pub fn colour_mask(&self) -> u8 {
        self.attributes
            .iter()
            .flatten()
            .fold(0, |mask, colour| mask | colour.bit())
    }

    /// True if the piece carries `colour` on any face.
    pub fn has_colour(&self, colour: Colour) -> bool {
        self.colour_mask() & colour.bit() != 0
    }

    /// The direction `colour` currently faces.
    pub fn side_of(&self, colour: Colour) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| self.colour(side) == Some(colour))
    }

    /// Bitmask of the sides this piece shows a colour on.
    pub fn side_mask(&self) -> u8 {
        Side::ALL
            .iter()
            .filter(|&&side| self.colour(side).is_some())
            .fold(0, |mask, &side| mask | side.bit())
    }
}

/// Bitmask for a set of colours, comparable with [`Piece::colour_mask`].
pub fn colour_mask(colours: &[Colour]) -> u8 {
    colours.iter().fold(0, |mask, colour| mask | colour.bit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_home_matches_solved_convention() {
        assert_eq!(Colour::White.home(), Side::Front);
        assert_eq!(Colour::Yellow.home(), Side::Back);
        assert_eq!(Colour::Red.home(), Side::Left);
        assert_eq!(Colour::Orange.home(), Side::Right);
        assert_eq!(Colour::Green.home(), Side::Top);
        assert_eq!(Colour::Blue.home(), Side::Bottom);
    }

    #[test]
    fn test_masks_ignore_orientation() {
        let mut corner = Piece::HIDDEN;
        corner.set_colour(Side::Front, Some(Colour::White));
        corner.set_colour(Side::Top, Some(Colour::Green));
        corner.set_colour(Side::Left, Some(Colour::Red));

        let mut twisted = Piece::HIDDEN;
        twisted.set_colour(Side::Front, Some(Colour::Red));
        twisted.set_colour(Side::Top, Some(Colour::White));
        twisted.set_colour(Side::Left, Some(Colour::Green));

        assert_eq!(corner.visible_count(), 3);
        assert_eq!(corner.colour_mask(), twisted.colour_mask());
        assert_eq!(
            corner.colour_mask(),
            colour_mask(&[Colour::Green, Colour::Red, Colour::White])
        );
        assert_eq!(corner.side_mask(), twisted.side_mask());
        assert_eq!(twisted.side_of(Colour::White), Some(Side::Top));
        assert!(!corner.has_colour(Colour::Blue));
    }
}
