//! Far-side layer, in four passes:
//!
//! - orient the far edges into a cross
//! - permute the far edges onto their ring sides
//! - cycle the far corners into their slots
//! - twist the far corners, restoring the solving layer as the last one lands
//!
//! Each pass only uses sequences that keep the two solved layers intact, with
//! the exception of the corner twist, which breaks the solving layer until
//! the total twist on the far corners cancels out.

use log::{debug, trace};

use crate::algorithms::{self, Frame};
use crate::error::SolveError;
use crate::geometry::{corner_slot, edge_slot, Rotation, Side, RING};
use crate::grid::Cube;
use crate::pieces::colour_mask;
use crate::predicates;
use crate::solver::{budget_exhausted, Solver, FAR_SIDE, PHASE_BUDGET};

/// Corner-twist applications that bring any corner back to its own slot.
const MAX_TWISTS: usize = 6;

/// Pattern of oriented far edges, read in ring order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CrossShape {
    Cross,
    Dot,
    /// Two opposite edges; the index is one of the unoriented ones.
    Line(usize),
    /// Two adjacent edges, behind and left of the indexed ring side.
    Corner(usize),
}

impl CrossShape {
    fn classify(oriented: [bool; 4]) -> Result<Self, SolveError> {
        match oriented.iter().filter(|&&up| up).count() {
            4 => Ok(CrossShape::Cross),
            0 => Ok(CrossShape::Dot),
            2 if oriented[0] == oriented[2] => {
                Ok(CrossShape::Line(if oriented[0] { 1 } else { 0 }))
            }
            2 => (0..4)
                .find(|&j| oriented[(j + 2) % 4] && oriented[(j + 3) % 4])
                .map(CrossShape::Corner)
                .ok_or_else(|| {
                    SolveError::InvariantViolation(format!("unreadable far cross {oriented:?}"))
                }),
            count => Err(SolveError::InvariantViolation(format!(
                "{count} far edges oriented, which no legal cube shows"
            ))),
        }
    }

    /// Ring side to use as the frame front, or `None` when already done.
    fn front(self) -> Option<Side> {
        match self {
            CrossShape::Cross => None,
            CrossShape::Dot => Some(RING[0]),
            CrossShape::Line(j) | CrossShape::Corner(j) => Some(RING[j]),
        }
    }
}

/// Solves the far layer; the other two layers must already be solved.
pub fn solve(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    form_cross(solver)?;
    permute_edges(solver)?;
    permute_corners(solver)?;
    orient_corners(solver)
}

/// Turns every far edge so the far colour faces the far side.
pub fn form_cross(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    for _ in 0..PHASE_BUDGET {
        if predicates::is_cross_oriented(solver.cube(), FAR_SIDE) {
            debug!("Far cross formed after {} turns", solver.log().issued());
            return Ok(());
        }

        let shape = CrossShape::classify(far_edges_oriented(solver.cube())?)?;
        let front = shape.front().ok_or_else(|| {
            SolveError::InvariantViolation(format!("far cross misread as {shape:?}"))
        })?;

        trace!("Far cross shape {shape:?}, working from {front}");
        solver.run(Frame::new(front)?, algorithms::FAR_CROSS);
    }
    Err(budget_exhausted("far cross"))
}

/// Moves each far edge onto its ring side, keeping the cross oriented.
pub fn permute_edges(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    for _ in 0..PHASE_BUDGET {
        for _ in 0..best_far_alignment(solver.cube())? {
            solver.turn(Rotation::clockwise(FAR_SIDE));
        }

        let wrong = far_edges_misplaced(solver.cube())?;
        let j = match wrong.iter().filter(|&&w| w).count() {
            0 => {
                debug!("Far edges placed after {} turns", solver.log().issued());
                return Ok(());
            }
            // adjacent pairs swap directly; an opposite pair becomes adjacent
            2 => (0..4)
                .find(|&j| wrong[j] && wrong[(j + 3) % 4])
                .unwrap_or_else(|| wrong.iter().position(|&w| w).unwrap_or(0)),
            count => {
                return Err(SolveError::InvariantViolation(format!(
                    "{count} far edges misplaced after the best alignment"
                )))
            }
        };

        trace!("Swapping far edges at {} and {}", RING[j], RING[(j + 3) % 4]);
        solver.run(Frame::new(RING[j])?, algorithms::EDGE_SWAP);
    }
    Err(budget_exhausted("far edge permutation"))
}

/// Cycles the far corners until each sits in its own slot, in any twist.
pub fn permute_corners(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    for _ in 0..PHASE_BUDGET {
        let in_place = far_corners_in_place(solver.cube())?;
        let front = match in_place.iter().filter(|&&placed| placed).count() {
            4 => {
                debug!("Far corners placed after {} turns", solver.log().issued());
                return Ok(());
            }
            // the cycle keeps the front-right corner, so hold the placed one there
            0 | 1 => RING[in_place.iter().position(|&placed| placed).unwrap_or(0)],
            count => {
                return Err(SolveError::InvariantViolation(format!(
                    "{count} far corners in place, which a three-cycle cannot fix"
                )))
            }
        };

        trace!("Cycling far corners around {front}");
        solver.run(Frame::new(front)?, algorithms::CORNER_CYCLE);
    }
    Err(budget_exhausted("far corner permutation"))
}

/// Twists every far corner so the far colour faces the far side.
///
/// Works through the corners at one reference slot, turning the far side to
/// bring each twisted corner there. The solving layer is broken while this
/// runs and comes back once the last corner is twisted, after which the far
/// side is aligned. A single twisted corner cannot come from legal turns and
/// is reported as an invariant violation.
pub fn orient_corners(solver: &mut Solver<'_>) -> Result<(), SolveError> {
    if misoriented_far_corners(solver.cube()) == 1 {
        return Err(SolveError::InvariantViolation(
            "exactly one far corner is twisted".to_string(),
        ));
    }

    let frame = Frame::new(RING[0])?;
    let reference = corner_slot(FAR_SIDE, frame.front(), frame.right())?;
    let far_colour = FAR_SIDE.home_colour();
    let oriented = |cube: &Cube| cube.piece(reference).colour(FAR_SIDE) == Some(far_colour);

    let mut rounds = 0;
    while misoriented_far_corners(solver.cube()) > 0 {
        rounds += 1;
        if rounds > PHASE_BUDGET {
            return Err(budget_exhausted("far corner orientation"));
        }

        solver.align_far_side("brings a twisted corner to the reference slot", |cube| {
            !oriented(cube)
        })?;

        let mut twists = 0;
        while !oriented(solver.cube()) {
            if twists == MAX_TWISTS {
                return Err(SolveError::InvariantViolation(format!(
                    "corner at {reference:?} still twisted after {MAX_TWISTS} twists"
                )));
            }
            solver.run(frame, algorithms::CORNER_TWIST);
            twists += 1;
        }
        trace!("Twisted far corner into place with {twists} twists");
    }

    solver.align_far_side("finishes the cube", predicates::is_solved)?;
    debug!("Far corners oriented after {} turns", solver.log().issued());
    Ok(())
}

fn far_edges_oriented(cube: &Cube) -> Result<[bool; 4], SolveError> {
    let mut oriented = [false; 4];
    for (up, side) in oriented.iter_mut().zip(RING) {
        *up = cube.piece(edge_slot(FAR_SIDE, side)?).colour(FAR_SIDE) == Some(FAR_SIDE.home_colour());
    }
    Ok(oriented)
}

fn far_edges_misplaced(cube: &Cube) -> Result<[bool; 4], SolveError> {
    let mut wrong = [false; 4];
    for (misplaced, side) in wrong.iter_mut().zip(RING) {
        *misplaced = cube.piece(edge_slot(FAR_SIDE, side)?).colour(side) != Some(side.home_colour());
    }
    Ok(wrong)
}

/// Clockwise far turns, `0..4`, that leave the most far edges on their side.
fn best_far_alignment(cube: &Cube) -> Result<usize, SolveError> {
    let mut probe = cube.clone();
    let mut best = (0, 0);
    for turns in 0..4 {
        let placed = far_edges_misplaced(&probe)?.iter().filter(|&&w| !w).count();
        if placed > best.1 {
            best = (turns, placed);
        }
        probe.apply(Rotation::clockwise(FAR_SIDE));
    }
    Ok(best.0)
}

fn far_corners_in_place(cube: &Cube) -> Result<[bool; 4], SolveError> {
    let mut in_place = [false; 4];
    for (placed, side) in in_place.iter_mut().zip(RING) {
        let right = side.right_of()?;
        let home = colour_mask(&[
            FAR_SIDE.home_colour(),
            side.home_colour(),
            right.home_colour(),
        ]);
        *placed = cube.piece(corner_slot(FAR_SIDE, side, right)?).colour_mask() == home;
    }
    Ok(in_place)
}

fn misoriented_far_corners(cube: &Cube) -> usize {
    let far_colour = FAR_SIDE.home_colour();
    predicates::corner_slots(FAR_SIDE)
        .into_iter()
        .filter(|&slot| cube.piece(slot).colour(FAR_SIDE) != Some(far_colour))
        .count()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::algorithms::Step;
    use crate::grid::coord_to_idx;
    use crate::pieces::Colour;
    use crate::scramble::scramble;
    use crate::solver::SOLVING_SIDE;
    use crate::{bottom_layer, middle_layer};

    fn unapplied(frame: Frame, steps: &[Step]) -> Cube {
        let mut cube = Cube::solved();
        let forward: Vec<Rotation> = frame.rotations(steps).collect();
        cube.apply_all(forward.into_iter().rev().map(Rotation::inverse));
        cube
    }

    #[test]
    fn test_cross_shapes() {
        assert_eq!(CrossShape::classify([true; 4]).unwrap(), CrossShape::Cross);
        assert_eq!(CrossShape::classify([false; 4]).unwrap(), CrossShape::Dot);
        assert_eq!(
            CrossShape::classify([false, true, false, true]).unwrap(),
            CrossShape::Line(0)
        );
        assert_eq!(
            CrossShape::classify([true, false, true, false]).unwrap(),
            CrossShape::Line(1)
        );
        // oriented behind (Bottom) and to the left (Left) of Top
        assert_eq!(
            CrossShape::classify([false, false, true, true]).unwrap(),
            CrossShape::Corner(0)
        );
        assert!(CrossShape::classify([true, false, false, false]).is_err());
    }

    #[test]
    fn test_each_last_layer_sequence_is_undone() {
        for front in RING {
            let frame = Frame::new(front).unwrap();
            for steps in [
                algorithms::FAR_CROSS,
                algorithms::EDGE_SWAP,
                algorithms::CORNER_CYCLE,
            ] {
                let mut cube = unapplied(frame, steps);
                let mut solver = Solver::new(&mut cube);
                solve(&mut solver).unwrap();
                assert!(solver.cube().is_solved(), "{steps:?} from {front}");
            }
        }
    }

    #[test]
    fn test_two_twisted_corners() {
        // twisting one corner forward and the next one back restores the
        // solving layer
        let frame = Frame::new(Side::Right).unwrap();
        let mut cube = Cube::solved();
        for _ in 0..2 {
            cube.apply_all(frame.rotations(algorithms::CORNER_TWIST));
        }
        cube.apply(Rotation::clockwise(FAR_SIDE));
        for _ in 0..4 {
            cube.apply_all(frame.rotations(algorithms::CORNER_TWIST));
        }
        assert!(predicates::is_layer_solved(&cube, SOLVING_SIDE));
        assert_eq!(misoriented_far_corners(&cube), 2);

        let mut solver = Solver::new(&mut cube);
        orient_corners(&mut solver).unwrap();
        assert!(solver.cube().is_solved());
    }

    #[test]
    fn test_single_twisted_corner_is_fatal() {
        let mut pieces = *Cube::solved().pieces();
        let corner = &mut pieces[coord_to_idx((2, 0, 2))];
        corner.set_colour(Side::Back, Some(Colour::Green));
        corner.set_colour(Side::Top, Some(Colour::Orange));
        corner.set_colour(Side::Right, Some(Colour::Yellow));
        let mut cube = Cube::from_pieces(pieces).unwrap();

        let mut solver = Solver::new(&mut cube);
        assert!(matches!(
            orient_corners(&mut solver),
            Err(SolveError::InvariantViolation(_))
        ));
        assert!(solver.log().is_empty());
    }

    #[test]
    fn test_misplaced_corner_pair_is_fatal() {
        // exchange the side colours of the two far corners next to Top
        let mut pieces = *Cube::solved().pieces();
        pieces[coord_to_idx((2, 0, 0))].set_colour(Side::Left, Some(Colour::Orange));
        pieces[coord_to_idx((2, 0, 2))].set_colour(Side::Right, Some(Colour::Red));
        let scrambled = Cube::from_pieces(pieces).unwrap();

        let mut cube = scrambled.clone();
        let mut solver = Solver::new(&mut cube);
        assert!(matches!(
            permute_corners(&mut solver),
            Err(SolveError::InvariantViolation(_))
        ));
        assert!(solver.log().is_empty());

        let mut cube = scrambled;
        assert!(matches!(
            cube.solve(),
            Err(SolveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_edge_swap_closes_with_alignment_turn() {
        let frame = Frame::new(Side::Top).unwrap();
        let (&last, swap) = algorithms::EDGE_SWAP.split_last().unwrap();
        assert_eq!(swap.len(), 8);
        assert_eq!(frame.rotation(last), Rotation::clockwise(FAR_SIDE));

        // without the closing turn only one far edge sits on its side
        let mut cube = Cube::solved();
        cube.apply_all(frame.rotations(swap));
        let wrong = far_edges_misplaced(&cube).unwrap();
        assert_eq!(wrong.iter().filter(|&&w| w).count(), 3);
        assert_eq!(best_far_alignment(&cube).unwrap(), 1);
    }

    #[test]
    fn test_turned_far_layer_keeps_its_cross() {
        let mut cube = Cube::solved();
        cube.apply(Rotation::clockwise(FAR_SIDE));
        assert!(predicates::is_cross_oriented(&cube, FAR_SIDE));

        let mut solver = Solver::new(&mut cube);
        form_cross(&mut solver).unwrap();
        assert!(solver.log().is_empty());
    }

    #[test]
    fn test_solved_far_layer_needs_no_moves() {
        let mut cube = Cube::solved();
        let mut solver = Solver::new(&mut cube);
        solve(&mut solver).unwrap();
        assert!(solver.log().is_empty());
    }

    #[test_log::test]
    fn test_far_layer_after_random_scrambles() {
        let mut rng = StdRng::seed_from_u64(23);
        for moves in [8, 25, 50, 100] {
            let mut cube = Cube::solved();
            scramble(&mut cube, moves, &mut rng);
            let mut solver = Solver::new(&mut cube);
            bottom_layer::solve(&mut solver).unwrap();
            middle_layer::solve(&mut solver).unwrap();
            solve(&mut solver).unwrap();
            assert!(solver.cube().is_solved());
        }
    }
}
