//! The cube state: 27 piece slots in a flat array.
//!
//! Slots are addressed by `(layer, row, col)` through a pure index function,
//! so face views are copies gathered from the array and written back with an
//! explicit scatter. Nothing ever holds a reference into the grid across a
//! rotation.

use crate::error::SolveError;
use crate::geometry::{sides_of, Coord, Direction, Rotation, Side};
use crate::pieces::{Colour, Piece};
use crate::predicates;

/// Number of slots in the 3x3x3 grid.
pub const GRID_SIZE: usize = 27;

/// A 3x3 projection of one side, as seen from outside the cube.
pub type FaceView = [[Piece; 3]; 3];

/// Converts `(layer, row, col)` to a linear slot index.
///
/// Index order is layer-major: `idx = layer * 9 + row * 3 + col`.
#[inline(always)]
pub const fn coord_to_idx(coord: Coord) -> usize {
    coord.0 * 9 + coord.1 * 3 + coord.2
}

/// Converts a linear slot index to `(layer, row, col)`.
#[inline(always)]
pub const fn idx_to_coord(slot_index: usize) -> Coord {
    (slot_index / 9, (slot_index / 3) % 3, slot_index % 3)
}

/// Bitmask of the outward directions at a slot.
fn outward_mask(coord: Coord) -> u8 {
    sides_of(coord).fold(0, |mask, side| mask | side.bit())
}

/// A 3x3x3 puzzle state that exclusively owns its pieces.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cube {
    pieces: [Piece; GRID_SIZE],
}

impl Default for Cube {
    fn default() -> Self {
        Self::solved()
    }
}

impl Cube {
    /// The canonical solved cube: every side shows its home colour.
    pub fn solved() -> Self {
        let mut pieces = [Piece::HIDDEN; GRID_SIZE];
        for (slot_index, piece) in pieces.iter_mut().enumerate() {
            for side in sides_of(idx_to_coord(slot_index)) {
                piece.set_colour(side, Some(side.home_colour()));
            }
        }
        Self { pieces }
    }

    /// Builds a cube from an explicit grid, checking its shape.
    ///
    /// Every piece must show colours on exactly the outward directions of its
    /// slot, no piece may repeat a colour, and each colour must appear on
    /// exactly 9 facelets. Solvability is not checked: a twisted corner is
    /// accepted here and reported later by the solver.
    pub fn from_pieces(pieces: [Piece; GRID_SIZE]) -> Result<Self, SolveError> {
        for (slot_index, piece) in pieces.iter().enumerate() {
            let coord = idx_to_coord(slot_index);
            if piece.side_mask() != outward_mask(coord) {
                return Err(SolveError::InvalidInput(format!(
                    "piece at {coord:?} does not match the outward faces of its slot"
                )));
            }
            if piece.colour_mask().count_ones() as usize != piece.visible_count() {
                return Err(SolveError::InvalidInput(format!(
                    "piece at {coord:?} repeats a colour"
                )));
            }
        }

        let cube = Self { pieces };
        let counts = predicates::colour_counts(&cube);
        for colour in Colour::ALL {
            let count = counts.get(&colour).copied().unwrap_or(0);
            if count != 9 {
                return Err(SolveError::InvalidInput(format!(
                    "{colour} appears on {count} facelets, expected 9"
                )));
            }
        }

        Ok(cube)
    }

    /// All 27 slots in index order.
    pub fn pieces(&self) -> &[Piece; GRID_SIZE] {
        &self.pieces
    }

    /// Piece at a coordinate produced by the geometry helpers.
    #[inline]
    pub(crate) fn piece(&self, coord: Coord) -> &Piece {
        &self.pieces[coord_to_idx(coord)]
    }

    /// Piece at a caller-supplied coordinate.
    pub fn piece_at(&self, layer: usize, row: usize, col: usize) -> Result<&Piece, SolveError> {
        if layer > 2 || row > 2 || col > 2 {
            return Err(SolveError::InvalidInput(format!(
                "coordinate ({layer}, {row}, {col}) is outside the 3x3x3 grid"
            )));
        }
        Ok(self.piece((layer, row, col)))
    }

    /// Reads the 3x3 view of `side`.
    pub fn face(&self, side: Side) -> FaceView {
        let mut view = [[Piece::HIDDEN; 3]; 3];
        for (row, pieces) in view.iter_mut().enumerate() {
            for (col, piece) in pieces.iter_mut().enumerate() {
                *piece = *self.piece(side.view_coord(row, col));
            }
        }
        view
    }

    /// Writes a view back into the grid; the exact inverse of [`Cube::face`].
    pub fn set_face(&mut self, view: &FaceView, side: Side) {
        for (row, pieces) in view.iter().enumerate() {
            for (col, piece) in pieces.iter().enumerate() {
                self.pieces[coord_to_idx(side.view_coord(row, col))] = *piece;
            }
        }
    }

    /// Facelet colour at `(row, col)` of the view of `side`.
    pub fn facelet(&self, side: Side, row: usize, col: usize) -> Option<Colour> {
        self.piece(side.view_coord(row, col)).colour(side)
    }

    /// Turns one side a quarter turn.
    ///
    /// Moves the nine pieces of the layer and relabels each piece's
    /// attributes about the turning axis; either half alone would leave the
    /// pieces facing the wrong way.
    pub fn rotate(&mut self, side: Side, direction: Direction) {
        let face = self.face(side);
        let mut turned = face;

        for (row, pieces) in face.iter().enumerate() {
            for (col, piece) in pieces.iter().enumerate() {
                let (dest_row, dest_col) = direction.permute(row, col);
                turned[dest_row][dest_col] = relabelled(piece, side, direction);
            }
        }

        self.set_face(&turned, side);
    }

    pub fn rotate_clockwise(&mut self, side: Side) {
        self.rotate(side, Direction::Clockwise);
    }

    pub fn rotate_anti_clockwise(&mut self, side: Side) {
        self.rotate(side, Direction::AntiClockwise);
    }

    #[inline]
    pub fn apply(&mut self, rotation: Rotation) {
        self.rotate(rotation.side, rotation.direction);
    }

    pub fn apply_all<I: IntoIterator<Item = Rotation>>(&mut self, rotations: I) {
        for rotation in rotations {
            self.apply(rotation);
        }
    }

    /// True iff every side shows only its home colour.
    pub fn is_solved(&self) -> bool {
        predicates::is_solved(self)
    }

    /// Slot of the piece carrying exactly `colours`, in any orientation.
    pub fn find(&self, colours: &[Colour]) -> Option<Coord> {
        let mask = crate::pieces::colour_mask(colours);
        self.pieces
            .iter()
            .position(|piece| piece.visible_count() == colours.len() && piece.colour_mask() == mask)
            .map(idx_to_coord)
    }
}

/// Copy of `piece` with every attribute moved to where the turn sends it.
fn relabelled(piece: &Piece, side: Side, direction: Direction) -> Piece {
    let mut turned = Piece::HIDDEN;
    for facing in Side::ALL {
        turned.set_colour(side.relabel(facing, direction), piece.colour(facing));
    }
    turned
}

/// Formats a cube as a human-readable string.
///
/// Each side is printed under its name as the 3x3 outside view, one colour
/// letter per facelet. Missing facelets show as '.'.
pub fn format_cube(cube: &Cube) -> String {
    let mut output = String::new();

    for side in Side::ALL {
        output.push_str(&format!("{side}:\n"));
        for row in 0..3 {
            let letters: Vec<String> = (0..3)
                .map(|col| {
                    cube.facelet(side, row, col)
                        .map_or('.', Colour::letter)
                        .to_string()
                })
                .collect();
            output.push_str(&letters.join(" "));
            output.push('\n');
        }
    }

    output
}
