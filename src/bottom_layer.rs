//! Solving-side layer: the cross first, then the four corners.
//!
//! Each round finds the first unsolved piece in ring order, classifies where
//! it sits, turns the far side if the case needs the piece above a particular
//! slot, and runs the matching sequence. Pieces already home are never
//! disturbed by any of the sequences used here.

use log::{debug, trace};

use crate::algorithms::{self, Frame, Step};
use crate::error::SolveError;
use crate::geometry::{corner_slot, edge_slot, ring_sides, Coord, Side, RING};
use crate::pieces::Colour;
use crate::predicates;
use crate::solver::{budget_exhausted, locate, Solver, FAR_SIDE, PHASE_BUDGET, SOLVING_SIDE};

/// Where an unsolved cross edge sits, with the frame to work in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EdgeCase {
    /// In the solving layer but wrong: lifted out through the frame front.
    Misplaced(Frame),
    /// In the middle layer at the frame's front-right slot.
    Middle(Frame),
    /// Above its home slot with the solving colour facing the far side.
    Above(Frame),
    /// Above the slot left of home with the solving colour facing the frame front.
    Sideways(Frame),
}

impl EdgeCase {
    fn frame(self) -> Frame {
        match self {
            EdgeCase::Misplaced(frame)
            | EdgeCase::Middle(frame)
            | EdgeCase::Above(frame)
            | EdgeCase::Sideways(frame) => frame,
        }
    }

    fn algorithm(self) -> &'static [Step] {
        match self {
            EdgeCase::Misplaced(_) | EdgeCase::Above(_) => algorithms::DOUBLE_FRONT,
            EdgeCase::Middle(_) => algorithms::LIFT_MIDDLE_EDGE,
            EdgeCase::Sideways(_) => algorithms::FLIP_EDGE_IN,
        }
    }
}

/// Where an unsolved solving-layer corner sits, with the frame to work in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CornerCase {
    /// In the solving layer but wrong: lifted to the far layer.
    Misplaced(Frame),
    /// Above home, solving colour facing the frame right.
    FacingRight(Frame),
    /// Above home, solving colour facing the frame front.
    FacingFront(Frame),
    /// Above home, solving colour facing the far side.
    FacingUp(Frame),
}

impl CornerCase {
    fn frame(self) -> Frame {
        match self {
            CornerCase::Misplaced(frame)
            | CornerCase::FacingRight(frame)
            | CornerCase::FacingFront(frame)
            | CornerCase::FacingUp(frame) => frame,
        }
    }

    fn algorithm(self) -> &'static [Step] {
        match self {
            CornerCase::Misplaced(_) | CornerCase::FacingRight(_) => algorithms::CORNER_IN_RIGHT,
            CornerCase::FacingFront(_) => algorithms::CORNER_IN_FRONT,
            CornerCase::FacingUp(_) => algorithms::CORNER_TURN_DOWN,
        }
    }
}

/// Solves the whole solving-side layer.
pub fn solve(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    solve_cross(solver)?;
    solve_corners(solver)?;

    if !predicates::is_layer_solved(solver.cube(), SOLVING_SIDE) {
        return Err(SolveError::InvariantViolation(
            "solving layer incomplete after corners".to_string(),
        ));
    }
    Ok(())
}

/// Places and orients the four edges of the solving side.
pub fn solve_cross(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    for _ in 0..PHASE_BUDGET {
        let Some(target) = first_unsolved(solver, |side| edge_slot(SOLVING_SIDE, side))? else {
            debug!("Cross solved after {} turns", solver.log().issued());
            return Ok(());
        };

        let colours = [SOLVING_SIDE.home_colour(), target.home_colour()];
        let case = prepare_edge(solver, &colours, target)?;
        trace!("Cross edge for {target}: {case:?}");
        solver.run(case.frame(), case.algorithm());
    }
    Err(budget_exhausted("cross"))
}

/// Places and orients the four corners of the solving side.
///
/// Expects the cross to be solved already.
pub fn solve_corners(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    for _ in 0..PHASE_BUDGET {
        let Some(target) = first_unsolved(solver, |side| {
            corner_slot(SOLVING_SIDE, side, side.right_of()?)
        })?
        else {
            debug!("Solving corners done after {} turns", solver.log().issued());
            return Ok(());
        };

        let colours = [
            SOLVING_SIDE.home_colour(),
            target.home_colour(),
            target.right_of()?.home_colour(),
        ];
        let case = prepare_corner(solver, &colours, target)?;
        trace!("Solving corner right of {target}: {case:?}");
        solver.run(case.frame(), case.algorithm());
    }
    Err(budget_exhausted("solving corners"))
}

/// First ring side, in ring order, whose slot is not solved.
fn first_unsolved(
    solver: &Solver<'_>,
    slot_for: impl Fn(Side) -> Result<Coord, SolveError>,
) -> Result<Option<Side>, SolveError> {
    for side in RING {
        if !predicates::is_piece_solved(solver.cube(), slot_for(side)?) {
            return Ok(Some(side));
        }
    }
    Ok(None)
}

fn prepare_edge(
    solver: &mut Solver<'_>,
    colours: &[Colour; 2],
    target: Side,
) -> Result<EdgeCase, SolveError> {
    let coord = locate(solver.cube(), colours)?;

    if SOLVING_SIDE.contains(coord) {
        let side = ring_sides(coord).next().ok_or_else(|| {
            SolveError::InvariantViolation(format!("edge at {coord:?} has no ring side"))
        })?;
        return Ok(EdgeCase::Misplaced(Frame::new(side)?));
    }
    if !FAR_SIDE.contains(coord) {
        return Ok(EdgeCase::Middle(Frame::at_slot(coord)?));
    }

    let solving_colour_up = solver.cube().piece(coord).colour(FAR_SIDE) == Some(colours[0]);
    let front = if solving_colour_up {
        target
    } else {
        target.left_of()?
    };
    let slot = edge_slot(FAR_SIDE, front)?;
    solver.align_far_side("brings the cross edge into position", |cube| {
        cube.find(colours) == Some(slot)
    })?;

    let frame = Frame::new(front)?;
    Ok(if solving_colour_up {
        EdgeCase::Above(frame)
    } else {
        EdgeCase::Sideways(frame)
    })
}

fn prepare_corner(
    solver: &mut Solver<'_>,
    colours: &[Colour; 3],
    target: Side,
) -> Result<CornerCase, SolveError> {
    let coord = locate(solver.cube(), colours)?;

    if SOLVING_SIDE.contains(coord) {
        return Ok(CornerCase::Misplaced(Frame::at_slot(coord)?));
    }
    if !FAR_SIDE.contains(coord) {
        return Err(SolveError::InvariantViolation(format!(
            "corner {colours:?} found in the middle layer at {coord:?}"
        )));
    }

    let frame = Frame::new(target)?;
    let slot = corner_slot(FAR_SIDE, frame.front(), frame.right())?;
    solver.align_far_side("brings the corner above its slot", |cube| {
        cube.find(colours) == Some(slot)
    })?;

    match solver.cube().piece(slot).side_of(colours[0]) {
        Some(side) if side == frame.right() => Ok(CornerCase::FacingRight(frame)),
        Some(side) if side == frame.front() => Ok(CornerCase::FacingFront(frame)),
        Some(FAR_SIDE) => Ok(CornerCase::FacingUp(frame)),
        facing => Err(SolveError::InvariantViolation(format!(
            "corner above {target} shows its solving colour towards {facing:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::Rotation;
    use crate::grid::Cube;
    use crate::scramble::scramble;

    #[test]
    fn test_solved_layer_needs_no_moves() {
        let mut cube = Cube::solved();
        let mut solver = Solver::new(&mut cube);
        solve(&mut solver).unwrap();
        assert!(solver.log().is_empty());
    }

    #[test]
    fn test_far_turns_leave_nothing_to_do() {
        let mut cube = Cube::solved();
        cube.apply_all([
            Rotation::clockwise(Side::Back),
            Rotation::clockwise(Side::Back),
        ]);
        let mut solver = Solver::new(&mut cube);
        solve(&mut solver).unwrap();
        assert_eq!(solver.log().issued(), 0);
    }

    #[test_log::test]
    fn test_cross_from_each_ring_turn() {
        for side in RING {
            for rotation in [Rotation::clockwise(side), Rotation::anti_clockwise(side)] {
                let mut cube = Cube::solved();
                cube.apply(rotation);
                let mut solver = Solver::new(&mut cube);
                solve_cross(&mut solver).unwrap();
                assert!(
                    predicates::is_cross_solved(solver.cube(), SOLVING_SIDE),
                    "cross unsolved after {rotation}"
                );
            }
        }
    }

    #[test]
    fn test_edge_with_solving_colour_sideways() {
        // the white-green edge ends above the left middle slot, white facing left
        let mut cube = Cube::solved();
        cube.apply_all([
            Rotation::clockwise(Side::Top),
            Rotation::anti_clockwise(Side::Left),
        ]);
        let edge = cube.piece(edge_slot(FAR_SIDE, Side::Left).unwrap());
        assert_eq!(edge.colour(Side::Left), Some(Colour::White));

        let mut solver = Solver::new(&mut cube);
        solve_cross(&mut solver).unwrap();
        assert!(predicates::is_cross_solved(solver.cube(), SOLVING_SIDE));
    }

    #[test]
    fn test_layer_after_random_scrambles() {
        let mut rng = StdRng::seed_from_u64(7);
        for moves in [5, 12, 20, 40, 80] {
            let mut cube = Cube::solved();
            scramble(&mut cube, moves, &mut rng);
            let mut solver = Solver::new(&mut cube);
            solve(&mut solver).unwrap();

            let cube = solver.cube();
            assert!(predicates::is_layer_solved(cube, SOLVING_SIDE));
            assert!(predicates::centres_intact(cube));
        }
    }

    #[test]
    fn test_edge_cases_pick_their_sequences() {
        let frame = Frame::new(Side::Left).unwrap();
        assert_eq!(EdgeCase::Above(frame).algorithm(), algorithms::DOUBLE_FRONT);
        assert_eq!(EdgeCase::Sideways(frame).algorithm(), algorithms::FLIP_EDGE_IN);
        assert_eq!(CornerCase::Misplaced(frame).algorithm(), algorithms::CORNER_IN_RIGHT);
        assert_eq!(CornerCase::FacingUp(frame).frame(), frame);
    }
}
