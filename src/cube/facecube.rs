use std::{fmt, str::FromStr};

use bit_set::BitSet;

use super::{get_ansii_color, grid::Grid, rotation, turn::Move, CubeError, Face, RubiksCube, Symbol, NUM_FACES};

/// The faces drawn in the middle band of the unfolded cube
const BAND: [Face; 4] = [Face::Left, Face::Front, Face::Right, Face::Back];

/// A cube made of six square faces of symbols.
/// Every move only permutes the symbols, so the multiset of symbols never changes.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FaceCube {
	size: usize,
	faces: [Grid; NUM_FACES],
}

/// The number of symbols on a cube of the given size.
/// Every label of the cube has to fit in a `Symbol`.
fn num_labels(size: usize) -> Result<usize, CubeError> {
	size.checked_mul(size)
		.and_then(|area| area.checked_mul(NUM_FACES))
		.filter(|&count| size != 0 && count - 1 <= Symbol::MAX as usize)
		.ok_or(CubeError::InvalidSize)
}

impl FaceCube {
	/// Creates a cube whose symbols are labelled 0, 1, 2, ...
	/// scanning Top, Left, Front, Right, Back and Bottom, each row by row.
	pub fn new(size: usize) -> Result<Self, CubeError> {
		num_labels(size)?;

		let mut cube = Self {
			size,
			faces: std::array::from_fn(|_| Grid::new(size)),
		};
		cube.init_arange();
		Ok(cube)
	}

	/// Creates a cube from its symbols, given in the same order as `symbols` returns them.
	pub fn from_symbols(size: usize, symbols: &[Symbol]) -> Result<Self, CubeError> {
		let expected = num_labels(size)?;
		if symbols.len() != expected {
			return Err(CubeError::DimensionMismatch {
				expected,
				found: symbols.len(),
			});
		}

		let faces = symbols
			.chunks(size * size)
			.map(|cells| Grid::from_cells(size, cells.to_vec()))
			.collect::<Result<Vec<_>, _>>()?;
		let faces = faces.try_into().map_err(|faces: Vec<Grid>| CubeError::DimensionMismatch {
			expected: NUM_FACES,
			found: faces.len(),
		})?;

		Ok(Self { size, faces })
	}

	/// Relabel every facelet with its position in the canonical scan order
	pub fn init_arange(&mut self) {
		let area = self.area();
		for (i, face) in self.faces.iter_mut().enumerate() {
			for row in 0..self.size {
				for col in 0..self.size {
					// Can't truncate, the size was checked on construction
					face.set(row, col, (i * area + row * self.size + col) as Symbol);
				}
			}
		}
	}

	/// The length of an edge of a face
	pub fn size(&self) -> usize {
		self.size
	}

	/// The number of symbols on a face
	pub fn area(&self) -> usize {
		self.size * self.size
	}

	/// The number of symbols on the whole cube
	pub fn num_symbols(&self) -> usize {
		NUM_FACES * self.area()
	}

	pub fn face(&self, face: Face) -> &Grid {
		&self.faces[face as usize]
	}

	/// The live grid of a face, for in-place changes
	pub fn face_mut(&mut self, face: Face) -> &mut Grid {
		&mut self.faces[face as usize]
	}

	pub fn set_row(&mut self, face: Face, index: usize, values: &[Symbol]) -> Result<(), CubeError> {
		self.face_mut(face).set_row(index, values)
	}

	pub fn set_col(&mut self, face: Face, index: usize, values: &[Symbol]) -> Result<(), CubeError> {
		self.face_mut(face).set_col(index, values)
	}

	/// All symbols, scanning Top, Left, Front, Right, Back and Bottom row by row
	pub fn symbols(&self) -> Vec<Symbol> {
		self.faces.iter().flat_map(|face| face.cells().iter().copied()).collect()
	}

	/// Whether the cube still holds the canonical labels, each exactly once.
	pub fn is_permutation_of_labels(&self) -> bool {
		let len = self.num_symbols();
		let mut seen = BitSet::with_capacity(len);

		self.faces
			.iter()
			.flat_map(|face| face.cells().iter())
			.all(|&symbol| (symbol as usize) < len && seen.insert(symbol as usize))
	}

	/// Whether every symbol sits at its canonical position
	pub fn is_solved(&self) -> bool {
		self.faces
			.iter()
			.flat_map(|face| face.cells().iter())
			.enumerate()
			.all(|(i, &symbol)| symbol as usize == i)
	}

	/// Returns a value which draws the unfolded cube with the given layout
	pub fn display(&self, layout: Layout) -> CubeDisplay<'_> {
		CubeDisplay { cube: self, layout }
	}
}

impl RubiksCube for FaceCube {
	fn apply_move(&mut self, mv: Move) -> Result<(), CubeError> {
		rotation::rotate(self, mv)
	}
}

impl From<FaceCube> for Vec<Symbol> {
	fn from(val: FaceCube) -> Self {
		val.symbols()
	}
}

// ===== Printing =====

/// How to draw the unfolded cube.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
	/// The width every symbol is right-aligned to
	pub cell_width: usize,
	/// Tint each symbol with the color of the face it was labelled on
	pub colored: bool,
}

impl Default for Layout {
	fn default() -> Self {
		Self {
			cell_width: 3,
			colored: false,
		}
	}
}

impl Layout {
	/// The default layout, widened if the largest symbol wouldn't fit
	pub fn for_cube(cube: &FaceCube) -> Self {
		let widest = cube.symbols().into_iter().max().unwrap_or(0).to_string().len();
		Self {
			cell_width: std::cmp::max(Self::default().cell_width, widest),
			..Self::default()
		}
	}
}

/// The unfolded cube: Top above the band Left-Front-Right-Back, Bottom below.
pub struct CubeDisplay<'a> {
	cube: &'a FaceCube,
	layout: Layout,
}

impl CubeDisplay<'_> {
	fn write_row(&self, f: &mut fmt::Formatter<'_>, row: &[Symbol]) -> fmt::Result {
		let width = self.layout.cell_width;
		let area = self.cube.area() as Symbol;

		write!(f, "[")?;
		for (i, symbol) in row.iter().enumerate() {
			if i != 0 {
				write!(f, " ")?;
			}
			if self.layout.colored {
				// Symbols which aren't canonical labels are left uncolored
				if let Some(face) = u8::try_from(symbol / area).ok().and_then(Face::from_repr) {
					write!(f, "{}", get_ansii_color(face))?;
				}
			}
			write!(f, "{:>width$}", symbol)?;
		}
		if self.layout.colored {
			// Reset ansii color
			write!(f, "\x1b[00m")?;
		}
		write!(f, "]")
	}

	fn write_cap(&self, f: &mut fmt::Formatter<'_>, face: Face, indent: &str) -> fmt::Result {
		for row in self.cube.face(face).rows() {
			write!(f, "{}", indent)?;
			self.write_row(f, row)?;
			writeln!(f)?;
		}
		Ok(())
	}
}

impl fmt::Display for CubeDisplay<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let size = self.cube.size();
		// One drawn row is as wide as the face next to the cap
		let indent = " ".repeat(1 + size * (self.layout.cell_width + 1));

		self.write_cap(f, Face::Top, &indent)?;
		for row in 0..size {
			for face in BAND {
				self.write_row(f, self.cube.face(face).row(row))?;
			}
			writeln!(f)?;
		}
		self.write_cap(f, Face::Bottom, &indent)
	}
}

impl fmt::Display for FaceCube {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.display(Layout::for_cube(self)), f)
	}
}

// ===== Parsing =====

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCubeError {
	#[error("\"{0}\" is not a symbol")]
	Symbol(String),
	#[error("{0} symbols can't be spread over six square faces")]
	Count(usize),
}

impl FromStr for FaceCube {
	type Err = ParseCubeError;

	/// Parses the symbols separated by whitespace, as `symbols` lists them.
	/// The size of the cube is derived from the number of symbols.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let symbols = s
			.split_whitespace()
			.map(|word| word.parse::<Symbol>().map_err(|_| ParseCubeError::Symbol(word.to_string())))
			.collect::<Result<Vec<_>, _>>()?;

		let count = symbols.len();
		let area = count / NUM_FACES;
		let size = (1..=area).find(|size| size * size >= area).unwrap_or(0);
		if size == 0 || size * size != area || area * NUM_FACES != count {
			return Err(ParseCubeError::Count(count));
		}

		Self::from_symbols(size, &symbols).map_err(|_| ParseCubeError::Count(count))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn labelled_cube() {
		let cube = FaceCube::new(3).unwrap();
		assert_eq!(cube.symbols(), (0..54).collect::<Vec<Symbol>>());
		assert_eq!(cube.face(Face::Front).row(0), &[18, 19, 20]);
		assert_eq!(cube.face(Face::Bottom).col(0), vec![45, 48, 51]);
		assert!(cube.is_solved());
		assert!(cube.is_permutation_of_labels());

		assert_eq!(FaceCube::new(0), Err(CubeError::InvalidSize));
	}

	#[test]
	/// Sizes whose labels don't fit in a symbol are rejected before anything is allocated
	fn labels_must_fit() {
		// 6 * 26755^2 - 1 is just above u32::MAX
		assert_eq!(num_labels(26754), Ok(4_294_659_096));
		assert_eq!(num_labels(26755), Err(CubeError::InvalidSize));
		assert_eq!(FaceCube::new(26755), Err(CubeError::InvalidSize));
		assert_eq!(FaceCube::new(usize::MAX), Err(CubeError::InvalidSize));
		assert_eq!(FaceCube::from_symbols(1 << 20, &[]), Err(CubeError::InvalidSize));
	}

	#[test]
	fn from_symbols() {
		let symbols: Vec<Symbol> = (0..24).rev().collect();
		let cube = FaceCube::from_symbols(2, &symbols).unwrap();
		assert_eq!(cube.size(), 2);
		assert_eq!(cube.face(Face::Top).cells(), &[23, 22, 21, 20]);
		assert_eq!(cube.symbols(), symbols);
		assert!(!cube.is_solved());
		assert!(cube.is_permutation_of_labels());

		assert_eq!(
			FaceCube::from_symbols(2, &symbols[1..]),
			Err(CubeError::DimensionMismatch { expected: 24, found: 23 })
		);
	}

	#[test]
	/// Duplicates or foreign symbols are no permutation of the labels
	fn permutation_check() {
		let mut cube = FaceCube::new(2).unwrap();
		cube.face_mut(Face::Left).set(0, 0, 0);
		assert!(!cube.is_permutation_of_labels());

		cube.face_mut(Face::Left).set(0, 0, 24);
		assert!(!cube.is_permutation_of_labels());

		cube.init_arange();
		assert!(cube.is_permutation_of_labels());
	}

	#[test]
	fn set_lines() {
		let mut cube = FaceCube::new(3).unwrap();
		cube.set_row(Face::Back, 2, &[1, 2, 3]).unwrap();
		cube.set_col(Face::Right, 0, &[4, 5, 6]).unwrap();
		assert_eq!(cube.face(Face::Back).row(2), &[1, 2, 3]);
		assert_eq!(cube.face(Face::Right).col(0), vec![4, 5, 6]);

		assert_eq!(
			cube.set_row(Face::Top, 0, &[1, 2, 3, 4]),
			Err(CubeError::DimensionMismatch { expected: 3, found: 4 })
		);
	}

	#[test]
	/// Check the conversion between FaceCube and Strings
	fn string_conversion() {
		let cube = FaceCube::new(2).unwrap();
		let s = cube
			.symbols()
			.iter()
			.map(|s| s.to_string())
			.collect::<Vec<_>>()
			.join(" ");

		assert_eq!(FaceCube::from_str(&s), Ok(cube));
		assert_eq!(FaceCube::from_str("1 2 x"), Err(ParseCubeError::Symbol("x".into())));
		assert_eq!(FaceCube::from_str("1 2 3"), Err(ParseCubeError::Count(3)));
		assert_eq!(FaceCube::from_str(""), Err(ParseCubeError::Count(0)));
		assert_eq!(
			FaceCube::from_str(&"0 ".repeat(12)),
			Err(ParseCubeError::Count(12))
		);
	}

	#[test]
	fn unfolded_drawing() {
		let cube = FaceCube::new(2).unwrap();
		let expected = concat!(
			"         [  0   1]\n",
			"         [  2   3]\n",
			"[  4   5][  8   9][ 12  13][ 16  17]\n",
			"[  6   7][ 10  11][ 14  15][ 18  19]\n",
			"         [ 20  21]\n",
			"         [ 22  23]\n",
		);
		assert_eq!(cube.to_string(), expected);
	}

	#[test]
	fn layout_widens() {
		let cube = FaceCube::new(13).unwrap();
		// 6 * 169 symbols, the largest one has 4 digits
		assert_eq!(Layout::for_cube(&cube).cell_width, 4);
		assert_eq!(Layout::for_cube(&FaceCube::new(3).unwrap()), Layout::default());
	}

	#[test]
	fn colored_drawing() {
		let cube = FaceCube::new(1).unwrap();
		let layout = Layout {
			cell_width: 1,
			colored: true,
		};
		let drawn = cube.display(layout).to_string();
		let lines: Vec<&str> = drawn.lines().collect();

		assert_eq!(lines.len(), 3);
		assert_eq!(lines[0], "   [\x1b[00m0\x1b[00m]");
		assert!(lines[1].starts_with("[\x1b[31m1\x1b[00m][\x1b[34m2\x1b[00m]"));
		assert_eq!(lines[2], "   [\x1b[93m5\x1b[00m]");
	}
}
