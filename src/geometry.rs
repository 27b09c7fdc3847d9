//! Sides, rotations and the fixed axis conventions of the grid.
//!
//! The grid is addressed as `(layer, row, col)`: layer runs front to back,
//! row runs top to bottom, col runs left to right. Every face view is the
//! picture seen when looking at that face from outside the cube.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::pieces::Colour;

/// A grid coordinate `(layer, row, col)`, each in `0..3`.
pub type Coord = (usize, usize, usize);

/// One of the six fixed viewing directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

/// The four sides around the Front/Back axis, each followed by its clockwise
/// neighbour when the cube is held Back up, Front down.
pub const RING: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

/// Attribute cycles for a clockwise turn of each side, indexed by `Side`.
///
/// `[a, b, c, d]` means the colour facing `a` ends up facing `b`, `b` goes to
/// `c`, and so on. Must stay consistent with the position permutation in
/// `grid::Cube::rotate`, which turns the outside view clockwise.
const CLOCKWISE_CYCLES: [[Side; 4]; 6] = [
    // Front: about the front/back axis
    [Side::Top, Side::Right, Side::Bottom, Side::Left],
    // Back
    [Side::Top, Side::Left, Side::Bottom, Side::Right],
    // Left: about the left/right axis
    [Side::Top, Side::Front, Side::Bottom, Side::Back],
    // Right
    [Side::Front, Side::Top, Side::Back, Side::Bottom],
    // Top: about the top/bottom axis
    [Side::Front, Side::Left, Side::Back, Side::Right],
    // Bottom
    [Side::Front, Side::Right, Side::Back, Side::Left],
];

impl Side {
    pub const ALL: [Side; 6] = [
        Side::Front,
        Side::Back,
        Side::Left,
        Side::Right,
        Side::Top,
        Side::Bottom,
    ];

    /// Colour this side shows on a solved cube.
    pub const fn home_colour(self) -> Colour {
        Colour::ALL[self as usize]
    }

    pub const fn opposite(self) -> Side {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Next ring side clockwise, seen from the Back face.
    ///
    /// With Back held up and `self` facing the viewer, this is the side on
    /// the viewer's right. Front and Back have no ring neighbour.
    pub fn right_of(self) -> Result<Side, SolveError> {
        match self {
            Side::Top => Ok(Side::Right),
            Side::Right => Ok(Side::Bottom),
            Side::Bottom => Ok(Side::Left),
            Side::Left => Ok(Side::Top),
            Side::Front | Side::Back => Err(SolveError::InvalidInput(format!(
                "{self:?} is not a ring side"
            ))),
        }
    }

    /// Previous ring side, the mirror of [`Side::right_of`].
    pub fn left_of(self) -> Result<Side, SolveError> {
        Ok(self.right_of()?.opposite())
    }

    /// True if the slot at `coord` lies in this side's layer.
    pub const fn contains(self, coord: Coord) -> bool {
        let (layer, row, col) = coord;
        match self {
            Side::Front => layer == 0,
            Side::Back => layer == 2,
            Side::Top => row == 0,
            Side::Bottom => row == 2,
            Side::Left => col == 0,
            Side::Right => col == 2,
        }
    }

    /// Notation letter, with Top as `U` and Bottom as `D`.
    pub const fn letter(self) -> char {
        match self {
            Side::Front => 'F',
            Side::Back => 'B',
            Side::Left => 'L',
            Side::Right => 'R',
            Side::Top => 'U',
            Side::Bottom => 'D',
        }
    }

    #[inline]
    pub(crate) const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Grid coordinate shown at `(row, col)` of this side's outside view.
    ///
    /// Front and Bottom map directly, Right maps layer to column, Left
    /// reverses that, Top reverses layer into row and Back mirrors columns.
    pub const fn view_coord(self, row: usize, col: usize) -> Coord {
        match self {
            Side::Front => (0, row, col),
            Side::Back => (2, row, 2 - col),
            Side::Left => (2 - col, row, 0),
            Side::Right => (col, row, 2),
            Side::Top => (2 - row, 0, col),
            Side::Bottom => (row, 2, col),
        }
    }

    /// Where the colour facing `facing` ends up after turning this side.
    pub fn relabel(self, facing: Side, direction: Direction) -> Side {
        let cycle = &CLOCKWISE_CYCLES[self as usize];
        match cycle.iter().position(|&side| side == facing) {
            Some(i) => match direction {
                Direction::Clockwise => cycle[(i + 1) % 4],
                Direction::AntiClockwise => cycle[(i + 3) % 4],
            },
            // on the rotation axis
            None => facing,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Turn direction, as seen from outside the turned face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    AntiClockwise,
}

impl Direction {
    pub const fn inverse(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::AntiClockwise,
            Direction::AntiClockwise => Direction::Clockwise,
        }
    }

    /// Destination of view slot `(row, col)` under this turn.
    #[inline]
    pub const fn permute(self, row: usize, col: usize) -> (usize, usize) {
        match self {
            Direction::Clockwise => (col, 2 - row),
            Direction::AntiClockwise => (2 - col, row),
        }
    }
}

/// A quarter turn of one side: the only state-changing primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rotation {
    pub side: Side,
    pub direction: Direction,
}

impl Rotation {
    pub const fn clockwise(side: Side) -> Self {
        Self {
            side,
            direction: Direction::Clockwise,
        }
    }

    pub const fn anti_clockwise(side: Side) -> Self {
        Self {
            side,
            direction: Direction::AntiClockwise,
        }
    }

    pub const fn inverse(self) -> Self {
        Self {
            side: self.side,
            direction: self.direction.inverse(),
        }
    }

    /// All twelve quarter turns.
    pub fn all() -> impl Iterator<Item = Rotation> {
        Side::ALL
            .into_iter()
            .flat_map(|side| [Rotation::clockwise(side), Rotation::anti_clockwise(side)])
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Clockwise => write!(f, "{}", self.side.letter()),
            Direction::AntiClockwise => write!(f, "{}'", self.side.letter()),
        }
    }
}

/// Builds the slot coordinate for the intersection of `sides`.
///
/// Sides must be distinct and pairwise non-opposite.
fn slot(sides: &[Side]) -> Result<Coord, SolveError> {
    let mut seen = 0u8;
    for &side in sides {
        if seen & (side.bit() | side.opposite().bit()) != 0 {
            return Err(SolveError::InvalidInput(format!(
                "sides {sides:?} do not meet at a single slot"
            )));
        }
        seen |= side.bit();
    }

    let axis = |low: Side, high: Side| {
        if seen & low.bit() != 0 {
            0
        } else if seen & high.bit() != 0 {
            2
        } else {
            1
        }
    };

    Ok((
        axis(Side::Front, Side::Back),
        axis(Side::Top, Side::Bottom),
        axis(Side::Left, Side::Right),
    ))
}

/// Slot of the edge piece shared by two adjacent sides.
pub fn edge_slot(a: Side, b: Side) -> Result<Coord, SolveError> {
    slot(&[a, b])
}

/// Slot of the corner piece shared by three mutually adjacent sides.
pub fn corner_slot(a: Side, b: Side, c: Side) -> Result<Coord, SolveError> {
    slot(&[a, b, c])
}

/// The sides whose layers contain `coord`.
pub fn sides_of(coord: Coord) -> impl Iterator<Item = Side> {
    Side::ALL
        .into_iter()
        .filter(move |side| side.contains(coord))
}

/// The ring sides whose layers contain `coord`, in [`RING`] order.
pub fn ring_sides(coord: Coord) -> impl Iterator<Item = Side> {
    RING.into_iter().filter(move |side| side.contains(coord))
}
