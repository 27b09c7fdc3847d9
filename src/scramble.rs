//! Random scrambles built from legal quarter turns.

use rand::Rng;

use crate::geometry::Rotation;
use crate::grid::Cube;

/// Applies `moves` uniformly chosen quarter turns and returns them in order.
///
/// Only legal rotations are used, so the result is always solvable.
pub fn scramble<R: Rng + ?Sized>(cube: &mut Cube, moves: usize, rng: &mut R) -> Vec<Rotation> {
    let rotations: Vec<Rotation> = Rotation::all().collect();
    let issued: Vec<Rotation> = (0..moves)
        .map(|_| rotations[rng.gen_range(0..rotations.len())])
        .collect();
    cube.apply_all(issued.iter().copied());
    issued
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::predicates;

    #[test]
    fn test_same_seed_same_scramble() {
        let mut first = Cube::solved();
        let mut second = Cube::solved();
        let a = scramble(&mut first, 30, &mut StdRng::seed_from_u64(42));
        let b = scramble(&mut second, 30, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(first, second);
        assert_eq!(a.len(), 30);
    }

    #[test]
    fn test_scramble_keeps_cube_legal() {
        let mut cube = Cube::solved();
        let issued = scramble(&mut cube, 50, &mut StdRng::seed_from_u64(3));

        assert!(predicates::centres_intact(&cube));
        assert_eq!(Cube::from_pieces(*cube.pieces()), Ok(cube.clone()));

        // undoing the turns in reverse restores the solved cube
        cube.apply_all(issued.iter().rev().map(|rotation| rotation.inverse()));
        assert!(cube.is_solved());
    }

    #[test]
    fn test_zero_moves() {
        let mut cube = Cube::solved();
        assert!(scramble(&mut cube, 0, &mut StdRng::seed_from_u64(0)).is_empty());
        assert!(cube.is_solved());
    }
}
