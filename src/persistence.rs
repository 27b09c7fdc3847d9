//! Saving and loading cubes as JSON.
//!
//! A cube is stored as its six outside views, each a 3x3 grid of colour
//! names as seen looking at that face:
//!
//! ```json
//! { "front": [["White", ...], ...], "back": ..., "left": ..., "right": ...,
//!   "top": ..., "bottom": ... }
//! ```
//!
//! Loading rebuilds the grid through the face views and then runs the same
//! shape and colour-count validation as [`Cube::from_pieces`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SolveError;
use crate::geometry::Side;
use crate::grid::Cube;
use crate::pieces::Colour;

/// Facelet colours of one face, as seen from outside.
pub type FaceColours = [[Colour; 3]; 3];

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to access cube file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed cube JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cube file does not describe a valid cube: {0}")]
    Cube(#[from] SolveError),
}

/// The on-disk form of a cube.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeDescription {
    pub front: FaceColours,
    pub back: FaceColours,
    pub left: FaceColours,
    pub right: FaceColours,
    pub top: FaceColours,
    pub bottom: FaceColours,
}

impl CubeDescription {
    fn face_mut(&mut self, side: Side) -> &mut FaceColours {
        match side {
            Side::Front => &mut self.front,
            Side::Back => &mut self.back,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
        }
    }

    fn face(&self, side: Side) -> &FaceColours {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
            Side::Left => &self.left,
            Side::Right => &self.right,
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }

    /// Reads the six facelet grids of `cube`.
    pub fn from_cube(cube: &Cube) -> Result<Self, SolveError> {
        let blank = [[Colour::White; 3]; 3];
        let mut description = Self {
            front: blank,
            back: blank,
            left: blank,
            right: blank,
            top: blank,
            bottom: blank,
        };

        for side in Side::ALL {
            let face = description.face_mut(side);
            for (row, colours) in face.iter_mut().enumerate() {
                for (col, colour) in colours.iter_mut().enumerate() {
                    *colour = cube.facelet(side, row, col).ok_or_else(|| {
                        SolveError::InvalidInput(format!(
                            "{side} facelet ({row}, {col}) has no colour"
                        ))
                    })?;
                }
            }
        }

        Ok(description)
    }

    /// Builds and validates the cube these facelets describe.
    ///
    /// Every outward facelet lies in exactly one of the six views.
    pub fn to_cube(&self) -> Result<Cube, SolveError> {
        let mut cube = Cube::solved();
        for side in Side::ALL {
            let mut view = cube.face(side);
            for (pieces, colours) in view.iter_mut().zip(self.face(side)) {
                for (piece, &colour) in pieces.iter_mut().zip(colours) {
                    piece.set_colour(side, Some(colour));
                }
            }
            cube.set_face(&view, side);
        }

        Cube::from_pieces(*cube.pieces())
    }
}

/// Serialises `cube` as pretty-printed JSON.
pub fn to_json(cube: &Cube) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&CubeDescription::from_cube(cube)?)?)
}

/// Parses and validates a cube from JSON.
pub fn from_json(json: &str) -> Result<Cube, PersistenceError> {
    let description: CubeDescription = serde_json::from_str(json)?;
    Ok(description.to_cube()?)
}

/// Writes `cube` to `path` as JSON.
pub fn save(cube: &Cube, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
    fs::write(path, to_json(cube)?)?;
    Ok(())
}

/// Reads a cube from the JSON file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Cube, PersistenceError> {
    from_json(&fs::read_to_string(path)?)
}
