//! Layer-by-layer solver.
//!
//! Solving runs three layer solvers in order: the solving side (Front), the
//! middle layer, then the far side (Back). Each phase loops over
//! classify-then-apply until its predicate holds. Every turn goes through
//! [`Solver::turn`], so the returned [`MoveLog`] is the complete solution.

use log::info;

use crate::algorithms::{Frame, Step};
use crate::error::SolveError;
use crate::geometry::{Coord, Rotation, Side};
use crate::grid::Cube;
use crate::move_log::MoveLog;
use crate::pieces::Colour;
use crate::predicates;
use crate::{bottom_layer, middle_layer, top_layer};

/// Side whose layer is solved first.
pub const SOLVING_SIDE: Side = Side::Front;

/// Side whose layer is solved last.
pub const FAR_SIDE: Side = Side::Back;

/// Upper bound on classify-then-apply rounds in any single phase.
///
/// Every phase finishes well inside this on a legal cube; hitting it means
/// the classification stopped making progress.
pub(crate) const PHASE_BUDGET: usize = 64;

/// A solve in progress: the cube being solved and the turns issued so far.
pub struct Solver<'a> {
    cube: &'a mut Cube,
    log: MoveLog,
}

impl<'a> Solver<'a> {
    pub fn new(cube: &'a mut Cube) -> Self {
        Self {
            cube,
            log: MoveLog::new(),
        }
    }

    pub fn cube(&self) -> &Cube {
        self.cube
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// Applies and records one rotation.
    pub fn turn(&mut self, rotation: Rotation) {
        self.cube.apply(rotation);
        self.log.push(rotation);
    }

    /// Applies a relative move sequence in `frame`.
    pub fn run(&mut self, frame: Frame, steps: &[Step]) {
        for &step in steps {
            self.turn(frame.rotation(step));
        }
    }

    /// Turns the far side clockwise until `aligned` holds.
    pub fn align_far_side(
        &mut self,
        goal: &str,
        aligned: impl Fn(&Cube) -> bool,
    ) -> Result<(), SolveError> {
        for _ in 0..4 {
            if aligned(self.cube) {
                return Ok(());
            }
            self.turn(Rotation::clockwise(FAR_SIDE));
        }
        Err(SolveError::InvariantViolation(format!(
            "no turn of the far side {goal}"
        )))
    }

    /// Runs the three layer solvers and returns the collapsed move log.
    pub fn solve(mut self) -> Result<MoveLog, SolveError> {
        if !predicates::centres_intact(self.cube) {
            return Err(SolveError::InvariantViolation(
                "centre pieces do not show their home colours".to_string(),
            ));
        }

        info!("Solving cube");

        bottom_layer::solve(&mut self)?;
        info!("Bottom layer done after {} turns", self.log.issued());

        middle_layer::solve(&mut self)?;
        info!("Middle layer done after {} turns", self.log.issued());

        top_layer::solve(&mut self)?;
        info!("Top layer done after {} turns", self.log.issued());

        if !self.cube.is_solved() {
            return Err(SolveError::InvariantViolation(
                "all layers finished but the cube is not solved".to_string(),
            ));
        }

        info!(
            "Solved in {} moves ({} issued)",
            self.log.len(),
            self.log.issued()
        );
        Ok(self.log)
    }
}

/// Error for a phase that ran out of rounds.
pub(crate) fn budget_exhausted(phase: &str) -> SolveError {
    SolveError::InvariantViolation(format!(
        "{phase} made no progress within {PHASE_BUDGET} rounds"
    ))
}

/// Slot of the piece carrying `colours`, which a legal cube always has.
pub(crate) fn locate(cube: &Cube, colours: &[Colour]) -> Result<Coord, SolveError> {
    cube.find(colours).ok_or_else(|| {
        SolveError::InvariantViolation(format!("no piece carries exactly {colours:?}"))
    })
}

impl Cube {
    /// Solves the cube in place, returning the moves that were made.
    pub fn solve(&mut self) -> Result<MoveLog, SolveError> {
        Solver::new(self).solve()
    }
}
