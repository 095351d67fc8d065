use super::{CubeError, Symbol};

/// One face of the cube: a square of symbols stored row-major.
/// The size is fixed when the grid is created.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Grid {
	size: usize,
	cells: Vec<Symbol>,
}

impl Grid {
	/// Creates a grid of the given size filled with zeros
	pub fn new(size: usize) -> Self {
		Self {
			size,
			cells: vec![0; size * size],
		}
	}

	/// Creates a grid from its cells, given row by row.
	pub fn from_cells(size: usize, cells: Vec<Symbol>) -> Result<Self, CubeError> {
		if cells.len() != size * size {
			return Err(CubeError::DimensionMismatch {
				expected: size * size,
				found: cells.len(),
			});
		}
		Ok(Self { size, cells })
	}

	pub fn size(&self) -> usize {
		self.size
	}

	/// All cells, row by row
	pub fn cells(&self) -> &[Symbol] {
		&self.cells
	}

	pub fn get(&self, row: usize, col: usize) -> Symbol {
		self.cells[row * self.size + col]
	}

	pub fn set(&mut self, row: usize, col: usize, value: Symbol) {
		self.cells[row * self.size + col] = value;
	}

	pub fn rows(&self) -> std::slice::Chunks<'_, Symbol> {
		self.cells.chunks(self.size)
	}

	pub fn row(&self, row: usize) -> &[Symbol] {
		&self.cells[row * self.size..(row + 1) * self.size]
	}

	pub fn col(&self, col: usize) -> Vec<Symbol> {
		(0..self.size).map(|row| self.get(row, col)).collect()
	}

	/// Replace a full row.
	pub fn set_row(&mut self, row: usize, values: &[Symbol]) -> Result<(), CubeError> {
		self.check_line(row, values)?;
		let start = row * self.size;
		self.cells[start..start + self.size].copy_from_slice(values);
		Ok(())
	}

	/// Replace a full column, top to bottom.
	pub fn set_col(&mut self, col: usize, values: &[Symbol]) -> Result<(), CubeError> {
		self.check_line(col, values)?;
		for (row, value) in values.iter().enumerate() {
			self.set(row, col, *value);
		}
		Ok(())
	}

	fn check_line(&self, index: usize, values: &[Symbol]) -> Result<(), CubeError> {
		if self.size <= index {
			return Err(CubeError::LineOutOfRange {
				index,
				size: self.size,
			});
		}
		if values.len() != self.size {
			return Err(CubeError::DimensionMismatch {
				expected: self.size,
				found: values.len(),
			});
		}
		Ok(())
	}

	/// Turn the grid by the given number of quarter turns clockwise
	pub fn rotate_clockwise(&mut self, quarters: usize) {
		let n = self.size;
		for _ in 0..quarters % 4 {
			let bef = self.cells.clone();
			for row in 0..n {
				for col in 0..n {
					self.cells[row * n + col] = bef[(n - 1 - col) * n + row];
				}
			}
		}
	}

	/// Turn the grid by the given number of quarter turns counterclockwise
	pub fn rotate_counterclockwise(&mut self, quarters: usize) {
		self.rotate_clockwise(4 - quarters % 4);
	}
}
