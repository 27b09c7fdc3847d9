//! Move sequences in relative notation and the frame that resolves them.
//!
//! Every sequence is written in the usual `F R U L B D` notation for a cube
//! held with the far side (Back) up and the solving side (Front) down. A
//! [`Frame`] picks which ring side plays "front"; the other relative faces
//! follow from that choice.

use crate::error::SolveError;
use crate::geometry::{ring_sides, Coord, Direction, Rotation, Side};

/// A face named relative to a [`Frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relative {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

/// One quarter turn of a relative face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub face: Relative,
    pub direction: Direction,
}

const fn cw(face: Relative) -> Step {
    Step {
        face,
        direction: Direction::Clockwise,
    }
}

const fn acw(face: Relative) -> Step {
    Step {
        face,
        direction: Direction::AntiClockwise,
    }
}

const F: Step = cw(Relative::Front);
const F_: Step = acw(Relative::Front);
const R: Step = cw(Relative::Right);
const R_: Step = acw(Relative::Right);
const L: Step = cw(Relative::Left);
const L_: Step = acw(Relative::Left);
const U: Step = cw(Relative::Up);
const U_: Step = acw(Relative::Up);
const D: Step = cw(Relative::Down);
const D_: Step = acw(Relative::Down);

/// F2: drops the far-layer front edge straight down, or lifts the solving-layer
/// front edge straight up.
pub const DOUBLE_FRONT: &[Step] = &[F, F];
/// F' U F: lifts the front-right middle edge to the far layer, restoring the
/// front solving-layer edge.
pub const LIFT_MIDDLE_EDGE: &[Step] = &[F_, U, F];
/// F R' F': inserts the far-front edge into the right solving slot when its
/// solving colour faces front.
pub const FLIP_EDGE_IN: &[Step] = &[F, R_, F_];

/// R U R': inserts the far-front-right corner when its solving colour faces
/// right; the same turns lift a corner out of the front-right solving slot.
pub const CORNER_IN_RIGHT: &[Step] = &[R, U, R_];
/// F' U' F: inserts the far-front-right corner when its solving colour faces
/// front.
pub const CORNER_IN_FRONT: &[Step] = &[F_, U_, F];
/// R U2 R' U': turns a corner whose solving colour faces the far side into
/// the right-facing case.
pub const CORNER_TURN_DOWN: &[Step] = &[R, U, U, R_, U_];

/// Inserts the far-front edge into the front-right middle slot.
pub const RIGHT_SWITCH: &[Step] = &[U, R, U_, R_, U_, F_, U, F];
/// Inserts the far-front edge into the front-left middle slot.
pub const LEFT_SWITCH: &[Step] = &[U_, L_, U, L, U, F, U_, F_];

/// F R U R' U' F': flips the far-front and far-right edges.
pub const FAR_CROSS: &[Step] = &[F, R, U, R_, U_, F_];
/// R U R' U R U2 R' U: swaps the far-front and far-left edges.
///
/// The first seven moves (eight quarter turns) do the swap with the far layer
/// left one turn short; the closing U is an alignment turn.
pub const EDGE_SWAP: &[Step] = &[R, U, R_, U, R, U, U, R_, U];
/// U R U' L' U R' U' L: cycles three far corners, keeping far-front-right.
pub const CORNER_CYCLE: &[Step] = &[U, R, U_, L_, U, R_, U_, L];
/// R' D' R D: twists the far-front-right corner; six applications are the identity.
pub const CORNER_TWIST: &[Step] = &[R_, D_, R, D];

/// Maps relative faces onto absolute sides.
///
/// Up is always Back and Down is always Front; `front` is a ring side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    front: Side,
    right: Side,
}

impl Frame {
    pub fn new(front: Side) -> Result<Self, SolveError> {
        Ok(Self {
            front,
            right: front.right_of()?,
        })
    }

    /// The frame whose front and right sides are `a` and `b` in some order.
    pub fn spanning(a: Side, b: Side) -> Result<Self, SolveError> {
        if a.right_of()? == b {
            Self::new(a)
        } else if b.right_of()? == a {
            Self::new(b)
        } else {
            Err(SolveError::InvalidInput(format!(
                "{a:?} and {b:?} are not neighbouring ring sides"
            )))
        }
    }

    /// The frame whose front-right edge column holds `coord`.
    pub fn at_slot(coord: Coord) -> Result<Self, SolveError> {
        let mut sides = ring_sides(coord);
        match (sides.next(), sides.next()) {
            (Some(a), Some(b)) => Self::spanning(a, b),
            _ => Err(SolveError::InvalidInput(format!(
                "{coord:?} does not sit between two ring sides"
            ))),
        }
    }

    pub fn front(&self) -> Side {
        self.front
    }

    pub fn right(&self) -> Side {
        self.right
    }

    pub fn resolve(&self, face: Relative) -> Side {
        match face {
            Relative::Front => self.front,
            Relative::Back => self.front.opposite(),
            Relative::Right => self.right,
            Relative::Left => self.right.opposite(),
            Relative::Up => Side::Back,
            Relative::Down => Side::Front,
        }
    }

    #[inline]
    pub fn rotation(&self, step: Step) -> Rotation {
        Rotation {
            side: self.resolve(step.face),
            direction: step.direction,
        }
    }

    /// Absolute rotations for a whole sequence.
    pub fn rotations<'a>(&'a self, steps: &'a [Step]) -> impl Iterator<Item = Rotation> + 'a {
        steps.iter().map(move |&step| self.rotation(step))
    }
}
