//! Layered 3x3x3 Cube Solver Library
//!
//! Models the cube as 27 pieces in a flat grid, turned only by quarter
//! rotations of its six sides, and solves it layer by layer: the Front
//! (white) layer, the middle layer, then the Back (yellow) layer. Every
//! rotation the solver makes is recorded in a [`MoveLog`].
//!
//! ```
//! use rubiks::{Cube, Rotation, Side};
//!
//! let mut cube = Cube::solved();
//! cube.apply(Rotation::clockwise(Side::Front));
//! cube.apply(Rotation::anti_clockwise(Side::Right));
//!
//! let log = cube.solve().unwrap();
//! assert!(cube.is_solved());
//! assert!(!log.is_empty());
//! ```

pub mod algorithms;
pub mod bottom_layer;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod middle_layer;
pub mod move_log;
pub mod persistence;
pub mod pieces;
pub mod predicates;
pub mod scramble;
pub mod solver;
pub mod top_layer;

pub use error::SolveError;
pub use geometry::{Coord, Direction, Rotation, Side};
pub use grid::{Cube, FaceView};
pub use move_log::MoveLog;
pub use pieces::{Colour, Piece};
