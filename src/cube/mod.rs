pub mod facecube;
pub mod grid;
pub mod rotation;
pub mod turn;

use strum::EnumCount;
use turn::*;

/// The dimension the move vocabulary was designed for
pub const CANONICAL_DIM: usize = 3;

/// The number of faces of a cube
pub const NUM_FACES: usize = Face::COUNT;

/// The value stored on a single facelet
pub type Symbol = u32;

/// The six faces, in the order they are scanned when labelling a cube.
///
/// ```text
///              +---+
///              | A |
///          +---+---+---+---+
///          | B | C | D | E |
///          +---+---+---+---+
///              | F |
///              +---+
/// ```
#[derive(
	Eq, PartialEq, PartialOrd, Ord, Copy, Clone, Hash, Debug, strum::EnumCount, strum::EnumIter, strum::FromRepr, strum::Display,
)]
#[repr(u8)]
pub enum Face {
	// It must only contain unit fields!
	Top,
	Left,
	Front,
	Right,
	Back,
	Bottom,
}

impl Face {
	/// The letter of the face in the unfolded drawing (A to F).
	pub const fn letter(self) -> char {
		(b'A' + self as u8) as char
	}
}

/// Returns the ANSI-colorcode for the given face.
pub fn get_ansii_color(face: Face) -> &'static str {
	match face {
		Face::Top => "\x1b[00m",    // White
		Face::Left => "\x1b[31m",   // Red
		Face::Front => "\x1b[34m",  // Blue
		Face::Right => "\x1b[33m",  // Orange
		Face::Back => "\x1b[32m",   // Green
		Face::Bottom => "\x1b[93m", // Yellow
	}
}

/// Everything that can go wrong when touching the cube directly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
	#[error("The move {kind}{n} is out of range, expected a count in 1..={max}")]
	InvalidMove { kind: MoveKind, n: usize, max: usize },
	#[error("Expected {expected} symbols but got {found}")]
	DimensionMismatch { expected: usize, found: usize },
	#[error("Line {index} does not exist on a face of size {size}")]
	LineOutOfRange { index: usize, size: usize },
	#[error("A cube must have a size of at least 1, and few enough facelets to label them all")]
	InvalidSize,
}

/// The RubiksCube trait.
pub trait RubiksCube {
	/// Apply a single move. An invalid move must leave the cube untouched.
	fn apply_move(&mut self, mv: Move) -> Result<(), CubeError>;

	/// Apply the given sequence of moves, stopping at the first invalid one.
	fn apply_moves<I>(&mut self, moves: I) -> Result<(), CubeError>
	where
		I: IntoIterator<Item = Move>,
	{
		for mv in moves {
			self.apply_move(mv)?;
		}
		Ok(())
	}
}
