//! Recording of issued rotations with same-side cancellation.
//!
//! The solver pushes every quarter turn it makes. Consecutive turns of one
//! side are folded together as they arrive: a turn and its inverse cancel,
//! three clockwise turns become one anti-clockwise turn, four vanish. The log
//! never influences solving; replaying it gives the same final state as the
//! raw sequence.

use std::fmt;

use crate::geometry::{Direction, Rotation};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveLog {
    moves: Vec<Rotation>,
    issued: usize,
}

/// Signed quarter-turn count of a rotation.
fn quarter_turns(rotation: &Rotation) -> i32 {
    match rotation.direction {
        Direction::Clockwise => 1,
        Direction::AntiClockwise => -1,
    }
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rotation, folding it into any trailing run on the same side.
    pub fn push(&mut self, rotation: Rotation) {
        self.issued += 1;

        let run_start = self
            .moves
            .iter()
            .rposition(|previous| previous.side != rotation.side)
            .map_or(0, |index| index + 1);

        let net = self.moves[run_start..]
            .iter()
            .chain(std::iter::once(&rotation))
            .map(quarter_turns)
            .sum::<i32>()
            .rem_euclid(4);

        self.moves.truncate(run_start);
        match net {
            1 => self.moves.push(Rotation::clockwise(rotation.side)),
            2 => {
                // half turns stay as two quarter turns
                self.moves.push(Rotation::clockwise(rotation.side));
                self.moves.push(Rotation::clockwise(rotation.side));
            }
            3 => self.moves.push(Rotation::anti_clockwise(rotation.side)),
            _ => {}
        }
    }

    /// The collapsed rotation sequence.
    pub fn moves(&self) -> &[Rotation] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of rotations pushed before collapsing.
    pub fn issued(&self) -> usize {
        self.issued
    }

    pub fn iter(&self) -> impl Iterator<Item = Rotation> + '_ {
        self.moves.iter().copied()
    }
}

impl Extend<Rotation> for MoveLog {
    fn extend<I: IntoIterator<Item = Rotation>>(&mut self, rotations: I) {
        for rotation in rotations {
            self.push(rotation);
        }
    }
}

impl FromIterator<Rotation> for MoveLog {
    fn from_iter<I: IntoIterator<Item = Rotation>>(rotations: I) -> Self {
        let mut log = MoveLog::new();
        log.extend(rotations);
        log
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notation: Vec<String> = self.moves.iter().map(Rotation::to_string).collect();
        write!(f, "{}", notation.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Side;
    use crate::grid::Cube;

    const F: Rotation = Rotation::clockwise(Side::Front);
    const F_: Rotation = Rotation::anti_clockwise(Side::Front);
    const U: Rotation = Rotation::clockwise(Side::Top);
    const R_: Rotation = Rotation::anti_clockwise(Side::Right);

    #[test]
    fn test_inverse_pair_cancels() {
        let log: MoveLog = [U, F, F_].into_iter().collect();
        assert_eq!(log.moves(), &[U]);
        assert_eq!(log.issued(), 3);
    }

    #[test]
    fn test_three_quarters_collapse_to_inverse() {
        let log: MoveLog = [F, F, F].into_iter().collect();
        assert_eq!(log.moves(), &[F_]);

        let log: MoveLog = [F, F, F, F].into_iter().collect();
        assert!(log.is_empty());

        let log: MoveLog = [F_, F_].into_iter().collect();
        assert_eq!(log.moves(), &[F, F]);
    }

    #[test]
    fn test_cancellation_exposes_earlier_run() {
        // U F F' U collapses through the emptied F run into U U
        let log: MoveLog = [U, F, F_, U].into_iter().collect();
        assert_eq!(log.moves(), &[U, U]);
        assert_eq!(log.to_string(), "U U");
    }

    #[test]
    fn test_collapsed_log_replays_to_same_state() {
        let raw = [F, F, F, U, R_, R_, R_, R_, U, F_, F, F];
        let log: MoveLog = raw.into_iter().collect();
        assert!(log.len() < raw.len());

        let mut expected = Cube::solved();
        expected.apply_all(raw);
        let mut replayed = Cube::solved();
        replayed.apply_all(log.iter());
        assert_eq!(replayed, expected);
    }
}
