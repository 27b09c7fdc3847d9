//! Middle layer: the four edges between the ring sides.
//!
//! Edges without the far colour are brought down from the far layer with a
//! left or right switch. When every such edge is stuck in a wrong middle
//! slot, one is ejected to the far layer first.

use log::{debug, trace};

use crate::algorithms::{self, Frame, Step};
use crate::error::SolveError;
use crate::geometry::{edge_slot, ring_sides, Coord, Side, RING};
use crate::predicates;
use crate::solver::{budget_exhausted, Solver, FAR_SIDE, PHASE_BUDGET};

/// Which neighbouring middle slot a far-layer edge drops into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Switch {
    Right,
    Left,
}

impl Switch {
    /// The switch that moves an edge above `front` into the slot it shares
    /// with `dest`.
    fn between(front: Side, dest: Side) -> Result<Self, SolveError> {
        if dest == front.right_of()? {
            Ok(Switch::Right)
        } else if dest == front.left_of()? {
            Ok(Switch::Left)
        } else {
            Err(SolveError::InvariantViolation(format!(
                "middle edge above {front} belongs next to {dest}, which is not a neighbour"
            )))
        }
    }

    fn algorithm(self) -> &'static [Step] {
        match self {
            Switch::Right => algorithms::RIGHT_SWITCH,
            Switch::Left => algorithms::LEFT_SWITCH,
        }
    }
}

/// Solves the middle layer; the solving layer must already be solved.
pub fn solve(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    for _ in 0..PHASE_BUDGET {
        if predicates::is_middle_layer_solved(solver.cube()) {
            debug!("Middle layer solved after {} turns", solver.log().issued());
            return Ok(());
        }

        match far_middle_edge(solver)? {
            Some(coord) => insert_edge(solver, coord)?,
            None => eject_edge(solver)?,
        }
    }
    Err(budget_exhausted("middle layer"))
}

/// A far-layer edge that belongs in the middle layer.
fn far_middle_edge(solver: &Solver<'_>) -> Result<Option<Coord>, SolveError> {
    let far_colour = FAR_SIDE.home_colour();
    for side in RING {
        let slot = edge_slot(FAR_SIDE, side)?;
        if !solver.cube().piece(slot).has_colour(far_colour) {
            return Ok(Some(slot));
        }
    }
    Ok(None)
}

fn insert_edge(solver: &mut Solver<'_>, coord: Coord) -> Result<(), SolveError> {
    let piece = *solver.cube().piece(coord);
    let side = ring_sides(coord).next().ok_or_else(|| {
        SolveError::InvariantViolation(format!("far edge at {coord:?} has no ring side"))
    })?;
    let (Some(side_colour), Some(up_colour)) = (piece.colour(side), piece.colour(FAR_SIDE)) else {
        return Err(SolveError::InvariantViolation(format!(
            "far edge at {coord:?} is missing a facelet"
        )));
    };

    let front = side_colour.home();
    if !RING.contains(&front) {
        return Err(SolveError::InvariantViolation(format!(
            "far edge at {coord:?} carries {side_colour}, which has no middle slot"
        )));
    }
    let switch = Switch::between(front, up_colour.home())?;

    let slot = edge_slot(FAR_SIDE, front)?;
    let colours = [side_colour, up_colour];
    solver.align_far_side("brings the middle edge above its centre", |cube| {
        cube.find(&colours) == Some(slot)
    })?;

    trace!("Middle edge {side_colour}/{up_colour}: {switch:?} switch from {front}");
    solver.run(Frame::new(front)?, switch.algorithm());
    Ok(())
}

/// Lifts the piece out of the first unsolved middle slot.
fn eject_edge(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    for side in RING {
        let slot = edge_slot(side, side.right_of()?)?;
        if !predicates::is_piece_solved(solver.cube(), slot) {
            trace!("Ejecting middle edge right of {side}");
            solver.run(Frame::new(side)?, algorithms::RIGHT_SWITCH);
            return Ok(());
        }
    }
    Err(SolveError::InvariantViolation(
        "middle layer unsolved but every middle slot is solved".to_string(),
    ))
}
