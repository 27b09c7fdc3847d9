//! Read-only classification of cube states.
//!
//! Solvers never look at raw grid contents to decide whether they are done;
//! they ask these predicates. None of them mutate the cube.

use rustc_hash::FxHashMap;

use crate::geometry::{Coord, Side};
use crate::grid::Cube;
use crate::pieces::Colour;

/// View positions of the four edge pieces of a face.
const EDGE_VIEW_SLOTS: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 1), (1, 0)];

/// View positions of the four corner pieces of a face.
const CORNER_VIEW_SLOTS: [(usize, usize); 4] = [(0, 0), (0, 2), (2, 2), (2, 0)];

/// The four middle-layer edge slots, between pairs of ring sides.
pub const MIDDLE_EDGE_SLOTS: [Coord; 4] = [(1, 0, 0), (1, 0, 2), (1, 2, 2), (1, 2, 0)];

/// Grid slots of the edge pieces on `side`.
pub fn edge_slots(side: Side) -> [Coord; 4] {
    EDGE_VIEW_SLOTS.map(|(row, col)| side.view_coord(row, col))
}

/// Grid slots of the corner pieces on `side`.
pub fn corner_slots(side: Side) -> [Coord; 4] {
    CORNER_VIEW_SLOTS.map(|(row, col)| side.view_coord(row, col))
}

/// Number of facelets of each colour.
pub fn colour_counts(cube: &Cube) -> FxHashMap<Colour, usize> {
    let mut counts = FxHashMap::default();
    for colour in cube.pieces().iter().flat_map(|piece| piece.attributes.iter().flatten()) {
        *counts.entry(*colour).or_insert(0) += 1;
    }
    counts
}

/// True if all nine facelets of `side` show its home colour.
pub fn is_face_solved(cube: &Cube, side: Side) -> bool {
    (0..3).all(|row| (0..3).all(|col| cube.facelet(side, row, col) == Some(side.home_colour())))
}

/// True if every centre still shows its home colour.
///
/// Centres never move, so a failure here means the cube was built wrong.
pub fn centres_intact(cube: &Cube) -> bool {
    Side::ALL
        .into_iter()
        .all(|side| cube.facelet(side, 1, 1) == Some(side.home_colour()))
}

/// True if every visible attribute of the piece at `coord` faces its home side.
pub fn is_piece_solved(cube: &Cube, coord: Coord) -> bool {
    let piece = cube.piece(coord);
    Side::ALL
        .into_iter()
        .all(|side| piece.colour(side).map_or(true, |colour| colour.home() == side))
}

/// True if the four edges of `side` are in place and correctly oriented.
pub fn is_cross_solved(cube: &Cube, side: Side) -> bool {
    edge_slots(side)
        .into_iter()
        .all(|coord| is_piece_solved(cube, coord))
}

/// True if the four edges of `side` show the home colour on that side,
/// regardless of their other facelet.
pub fn is_cross_oriented(cube: &Cube, side: Side) -> bool {
    edge_slots(side)
        .into_iter()
        .all(|coord| cube.piece(coord).colour(side) == Some(side.home_colour()))
}

/// True if the four corners of `side` are in place and correctly oriented.
pub fn are_corners_solved(cube: &Cube, side: Side) -> bool {
    corner_slots(side)
        .into_iter()
        .all(|coord| is_piece_solved(cube, coord))
}

/// True if all nine pieces of the layer under `side` are solved.
pub fn is_layer_solved(cube: &Cube, side: Side) -> bool {
    is_cross_solved(cube, side) && are_corners_solved(cube, side)
}

/// True if the four middle-layer edges are solved.
pub fn is_middle_layer_solved(cube: &Cube) -> bool {
    MIDDLE_EDGE_SLOTS
        .into_iter()
        .all(|coord| is_piece_solved(cube, coord))
}

/// True if every side shows only its home colour.
pub fn is_solved(cube: &Cube) -> bool {
    Side::ALL.into_iter().all(|side| is_face_solved(cube, side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rotation;

    #[test]
    fn test_solved_cube_satisfies_every_predicate() {
        let cube = Cube::solved();
        assert!(centres_intact(&cube));
        assert!(is_middle_layer_solved(&cube));
        for side in Side::ALL {
            assert!(is_face_solved(&cube, side));
            assert!(is_cross_solved(&cube, side));
            assert!(is_cross_oriented(&cube, side));
            assert!(is_layer_solved(&cube, side));
        }
        assert!(is_solved(&cube));
    }

    #[test]
    fn test_single_rotation_unsolves() {
        for rotation in Rotation::all() {
            let mut cube = Cube::solved();
            cube.apply(rotation);
            assert!(!is_solved(&cube), "{rotation} left the cube solved");
            // centres never move
            assert!(centres_intact(&cube));
            // the turned face itself keeps its colour
            assert!(is_face_solved(&cube, rotation.side));
            let neighbour = Side::ALL
                .into_iter()
                .find(|&side| side != rotation.side && side != rotation.side.opposite())
                .unwrap();
            assert!(!is_face_solved(&cube, neighbour));
        }
    }

    #[test]
    fn test_colour_conservation() {
        let mut cube = Cube::solved();
        let sequence: Vec<Rotation> = Rotation::all().collect();
        for (step, rotation) in sequence.iter().cycle().take(50).enumerate() {
            cube.apply(*rotation);
            if step % 7 == 0 {
                cube.apply(rotation.inverse());
                cube.apply(Rotation::clockwise(Side::Bottom));
            }
            let counts = colour_counts(&cube);
            assert_eq!(counts.len(), 6);
            assert!(counts.values().all(|&count| count == 9), "{counts:?}");
        }
    }

    #[test]
    fn test_predicates_are_idempotent() {
        let mut cube = Cube::solved();
        cube.apply_all([
            Rotation::clockwise(Side::Right),
            Rotation::clockwise(Side::Back),
        ]);
        let before = cube.clone();
        for side in Side::ALL {
            assert_eq!(is_face_solved(&cube, side), is_face_solved(&cube, side));
            assert_eq!(is_cross_solved(&cube, side), is_cross_solved(&cube, side));
        }
        assert_eq!(is_middle_layer_solved(&cube), is_middle_layer_solved(&cube));
        assert_eq!(is_solved(&cube), is_solved(&cube));
        assert_eq!(cube, before);
    }

    #[test]
    fn test_back_turn_keeps_front_layer_and_middle() {
        let mut cube = Cube::solved();
        cube.apply(Rotation::clockwise(Side::Back));
        assert!(is_layer_solved(&cube, Side::Front));
        assert!(is_middle_layer_solved(&cube));
        assert!(is_cross_oriented(&cube, Side::Back));
        assert!(!is_cross_solved(&cube, Side::Back));
    }
}
