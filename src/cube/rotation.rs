//! The three move families.
//!
//! Every family cycles one line of four faces (the ring) and turns one face in place (the cap).
//! An outer move (count 1..=N) cycles the boundary line and turns the cap next to it clockwise.
//! An inner move (count N+1..=2N) cycles every other line and turns the opposite cap counterclockwise.
//!
//! ```text
//!  R1: Left -> Front -> Right -> Back -> Left (last row), Bottom turns
//!  C1: Front -> Top -> Back -> Bottom -> Front (last column), Right turns
//!  L1: Right -> Top -> Left -> Bottom -> Right (first row of Top), Back turns
//! ```

use log::trace;

use super::{facecube::FaceCube, turn::*, CubeError, Face, Symbol};

/// A straight line of facelets on one face
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Line {
	Row(usize),
	Column(usize),
}

/// One position of a ring.
/// `reflect` is set when the values arriving from the next position must be reversed,
/// which happens where the axes of two neighbouring faces run in opposite directions.
#[derive(Clone, Copy, Debug)]
struct RingSlot {
	face: Face,
	line: Line,
	reflect: bool,
}

impl RingSlot {
	const fn new(face: Face, line: Line, reflect: bool) -> Self {
		Self { face, line, reflect }
	}

	fn read(&self, cube: &FaceCube) -> Vec<Symbol> {
		let grid = cube.face(self.face);
		match self.line {
			Line::Row(row) => grid.row(row).to_vec(),
			Line::Column(col) => grid.col(col),
		}
	}

	fn write(&self, cube: &mut FaceCube, mut values: Vec<Symbol>) -> Result<(), CubeError> {
		if self.reflect {
			values.reverse();
		}
		match self.line {
			Line::Row(row) => cube.set_row(self.face, row, &values),
			Line::Column(col) => cube.set_col(self.face, col, &values),
		}
	}
}

/// The ring of a family at the given depth (0 is the outer line).
///
/// Each slot is filled from the slot after it and the last slot from the first one.
fn ring(kind: MoveKind, size: usize, depth: usize) -> [RingSlot; 4] {
	use Face::*;
	use Line::*;

	let far = size - 1 - depth;
	match kind {
		MoveKind::Row => [
			RingSlot::new(Left, Row(far), false),
			RingSlot::new(Back, Row(far), false),
			RingSlot::new(Right, Row(far), false),
			RingSlot::new(Front, Row(far), false),
		],
		// Back is mirrored against the other three
		MoveKind::Column => [
			RingSlot::new(Top, Column(far), false),
			RingSlot::new(Front, Column(far), false),
			RingSlot::new(Bottom, Column(far), true),
			RingSlot::new(Back, Column(depth), true),
		],
		MoveKind::Level => [
			RingSlot::new(Top, Row(depth), false),
			RingSlot::new(Right, Column(far), true),
			RingSlot::new(Bottom, Row(far), false),
			RingSlot::new(Left, Column(depth), true),
		],
	}
}

/// The caps of a family: (turned by outer moves, turned by inner moves)
pub const fn cap_faces(kind: MoveKind) -> (Face, Face) {
	match kind {
		MoveKind::Row => (Face::Bottom, Face::Top),
		MoveKind::Column => (Face::Right, Face::Left),
		MoveKind::Level => (Face::Back, Face::Front),
	}
}

/// Cycle the ring by one quarter turn.
/// The first line is copied before anything is overwritten.
fn shift_ring(cube: &mut FaceCube, ring: &[RingSlot; 4]) -> Result<(), CubeError> {
	let saved = ring[0].read(cube);
	for pair in ring.windows(2) {
		let values = pair[1].read(cube);
		pair[0].write(cube, values)?;
	}
	ring[3].write(cube, saved)
}

/// Apply a move. A move with an invalid count is rejected before anything is changed.
pub fn rotate(cube: &mut FaceCube, mv: Move) -> Result<(), CubeError> {
	let size = cube.size();
	mv.validate(size)?;

	let (near, far) = cap_faces(mv.kind);
	// Four quarter turns bring every line back
	let quarters = mv.quarter_turns(size);

	if mv.is_outer(size) {
		let outer = ring(mv.kind, size, 0);
		for _ in 0..quarters % 4 {
			shift_ring(cube, &outer)?;
		}
		cube.face_mut(near).rotate_clockwise(quarters);
	} else {
		let inner: Vec<_> = (1..size).map(|depth| ring(mv.kind, size, depth)).collect();
		for _ in 0..quarters % 4 {
			for slots in inner.iter() {
				shift_ring(cube, slots)?;
			}
		}
		cube.face_mut(far).rotate_counterclockwise(quarters);
	}

	trace!("Applied {} on a cube of size {}", mv, size);
	Ok(())
}

impl FaceCube {
	/// Cycle the rows of Left, Front, Right and Back
	pub fn rotate_row(&mut self, n: usize) -> Result<(), CubeError> {
		rotate(self, Move::new(MoveKind::Row, n))
	}

	/// Cycle the columns of Top, Front, Bottom and Back
	pub fn rotate_column(&mut self, n: usize) -> Result<(), CubeError> {
		rotate(self, Move::new(MoveKind::Column, n))
	}

	/// Cycle the lines of Top, Right, Bottom and Left around the front
	pub fn rotate_level(&mut self, n: usize) -> Result<(), CubeError> {
		rotate(self, Move::new(MoveKind::Level, n))
	}
}

// ===== Tests =====

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cube::{RubiksCube, Symbol};
	use strum::IntoEnumIterator;

	fn labelled(size: usize) -> FaceCube {
		FaceCube::new(size).unwrap()
	}

	#[test]
	/// R1 on the labelled cube: bottom rows move one face to the right, Bottom turns clockwise
	fn row_outer() {
		let mut cube = labelled(3);
		cube.rotate_row(1).unwrap();

		assert_eq!(cube.face(Face::Left).row(2), &[42, 43, 44]);
		assert_eq!(cube.face(Face::Front).row(2), &[15, 16, 17]);
		assert_eq!(cube.face(Face::Right).row(2), &[24, 25, 26]);
		assert_eq!(cube.face(Face::Back).row(2), &[33, 34, 35]);
		assert_eq!(cube.face(Face::Bottom).cells(), &[51, 48, 45, 52, 49, 46, 53, 50, 47]);
		assert_eq!(cube.face(Face::Top), labelled(3).face(Face::Top));
	}

	#[test]
	/// C1 on the labelled cube: the Back column arrives upside down
	fn column_outer() {
		let mut cube = labelled(3);
		cube.rotate_column(1).unwrap();

		assert_eq!(cube.face(Face::Top).col(2), vec![20, 23, 26]);
		assert_eq!(cube.face(Face::Front).col(2), vec![47, 50, 53]);
		assert_eq!(cube.face(Face::Bottom).col(2), vec![42, 39, 36]);
		assert_eq!(cube.face(Face::Back).col(0), vec![8, 5, 2]);
		assert_eq!(cube.face(Face::Right).cells(), &[33, 30, 27, 34, 31, 28, 35, 32, 29]);
	}

	#[test]
	fn level_outer() {
		let mut cube = labelled(3);
		cube.rotate_level(1).unwrap();

		assert_eq!(cube.face(Face::Top).row(0), &[29, 32, 35]);
		assert_eq!(cube.face(Face::Right).col(2), vec![53, 52, 51]);
		assert_eq!(cube.face(Face::Bottom).row(2), &[9, 12, 15]);
		assert_eq!(cube.face(Face::Left).col(0), vec![2, 1, 0]);
		assert_eq!(cube.face(Face::Back).cells(), &[42, 39, 36, 43, 40, 37, 44, 41, 38]);
	}

	#[test]
	/// Inner moves leave the outer line and the near cap alone
	fn inner_moves_skip_outer_line() {
		for kind in MoveKind::iter() {
			let mut cube = labelled(4);
			cube.apply_move(Move::new(kind, 5)).unwrap();

			let (near, far) = cap_faces(kind);
			let bef = labelled(4);
			assert_eq!(cube.face(near), bef.face(near));
			assert_ne!(cube.face(far), bef.face(far));
			for slot in ring(kind, 4, 0) {
				assert_eq!(slot.read(&cube), slot.read(&bef), "{} moved the outer line", kind);
			}
		}
	}

	#[test]
	/// Invalid counts don't change a single symbol
	fn invalid_moves_are_rejected() {
		for kind in MoveKind::iter() {
			let mut cube = labelled(3);
			cube.rotate_row(2).unwrap();
			let bef = cube.clone();

			for n in [0, 7, 100] {
				let res = cube.apply_move(Move::new(kind, n));
				assert_eq!(res, Err(CubeError::InvalidMove { kind, n, max: 6 }));
				assert_eq!(cube, bef);
			}
		}
	}

	#[test]
	/// Every move is a permutation of the symbols
	fn moves_are_permutations() {
		for size in 1..=6 {
			for kind in MoveKind::iter() {
				for n in 1..=2 * size {
					let mut cube = labelled(size);
					cube.apply_move(Move::new(kind, n)).unwrap();
					assert!(cube.is_permutation_of_labels(), "{}{} on size {}", kind, n, size);
				}
			}
		}
	}

	#[test]
	/// Check that 4 quarters are the identity and that the inverse undoes every move
	fn full_turns_and_inverses() {
		for size in 1..=6 {
			for kind in MoveKind::iter() {
				for single in [1, size + 1] {
					let mut cube = labelled(size);
					for _ in 0..4 {
						cube.apply_move(Move::new(kind, single)).unwrap();
					}
					assert!(cube.is_solved());
				}

				for n in 1..=2 * size {
					let mv = Move::new(kind, n);
					let mut cube = labelled(size);
					cube.apply_move(mv).unwrap();
					cube.apply_moves(mv.inverse(size)).unwrap();
					assert!(cube.is_solved(), "{} on size {} isn't undone", mv, size);
				}
			}
		}
	}

	#[test]
	fn moves_do_not_commute() {
		let mut rc = labelled(3);
		rc.rotate_row(1).unwrap();
		rc.rotate_column(1).unwrap();

		let mut cr = labelled(3);
		cr.rotate_column(1).unwrap();
		cr.rotate_row(1).unwrap();

		assert_ne!(rc, cr);
	}

	#[test]
	/// Moves don't look at the symbols themselves, duplicates are carried along
	fn arbitrary_symbols() {
		let symbols: Vec<Symbol> = (0..54).map(|i| i % 7).collect();
		let mut cube = FaceCube::from_symbols(3, &symbols).unwrap();
		cube.rotate_level(5).unwrap();

		let mut bef = symbols.clone();
		let mut aft = cube.symbols();
		bef.sort();
		aft.sort();
		assert_eq!(bef, aft);
	}
}
