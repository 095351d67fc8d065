use super::CubeError;

/// Total number of move families
pub const NUM_MOVE_KINDS: usize = 3;

/// Every move family, in the order of their letters R, C, L
pub const MOVE_KINDS: [MoveKind; NUM_MOVE_KINDS] = [MoveKind::Row, MoveKind::Column, MoveKind::Level];

/// The three families of moves.
///
/// Row cycles Left, Front, Right and Back around the vertical axis,
/// Column cycles Top, Front, Bottom and Back,
/// Level cycles Top, Right, Bottom and Left around the front-back axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, strum::EnumIter, strum::EnumCount)]
#[repr(u8)]
pub enum MoveKind {
	Row,
	Column,
	Level,
}

impl MoveKind {
	pub const fn letter(self) -> char {
		match self {
			MoveKind::Row => 'R',
			MoveKind::Column => 'C',
			MoveKind::Level => 'L',
		}
	}

	pub const fn from_letter(letter: char) -> Option<Self> {
		match letter {
			'R' => Some(MoveKind::Row),
			'C' => Some(MoveKind::Column),
			'L' => Some(MoveKind::Level),
			_ => None,
		}
	}
}

impl std::fmt::Display for MoveKind {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.letter())
	}
}

/// An entire move
///
/// kind: The family of the move
/// n: The move count. On a cube of size N, 1..=N turns the outer slice n times,
///    N+1..=2N turns the inner slices n-N times.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
	pub kind: MoveKind,
	pub n: usize,
}

impl Move {
	pub const fn new(kind: MoveKind, n: usize) -> Self {
		Self { kind, n }
	}

	/// The largest valid move count on a cube of the given size
	pub const fn max_count(size: usize) -> usize {
		2 * size
	}

	/// Whether the move count is valid on a cube of the given size
	pub fn validate(&self, size: usize) -> Result<(), CubeError> {
		let max = Self::max_count(size);
		if self.n == 0 || max < self.n {
			return Err(CubeError::InvalidMove {
				kind: self.kind,
				n: self.n,
				max,
			});
		}
		Ok(())
	}

	/// Whether the move turns the outer slice (rather than the inner ones)
	pub const fn is_outer(&self, size: usize) -> bool {
		self.n <= size
	}

	/// The number of quarter turns the slices are cycled
	pub const fn quarter_turns(&self, size: usize) -> usize {
		if self.is_outer(size) {
			self.n
		} else {
			self.n - size
		}
	}

	/// The moves which negate this one.
	/// In terms of set theory, the inverse operation of the current one.
	///
	/// The inverse stays in the same family and half (outer or inner).
	/// If the needed count doesn't fit on the cube, it's spelled out in single quarter turns.
	pub fn inverse(&self, size: usize) -> Vec<Move> {
		let quarters = self.quarter_turns(size);
		let base = if self.is_outer(size) { 0 } else { size };

		match (4 - quarters % 4) % 4 {
			// Four quarter turns do nothing
			0 => vec![*self],
			rest if rest <= size => vec![Move::new(self.kind, base + rest)],
			rest => vec![Move::new(self.kind, base + 1); rest],
		}
	}
}

impl std::fmt::Display for Move {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}{}", self.kind, self.n)
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
	#[error("The move string is empty")]
	Empty,
	#[error("'{0}' is not a move letter")]
	UnknownLetter(char),
	#[error("\"{0}\" is not a move count")]
	Count(String),
}

impl std::str::FromStr for Move {
	type Err = ParseMoveError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut chars = s.chars();
		let letter = chars.next().ok_or(ParseMoveError::Empty)?;
		let kind = MoveKind::from_letter(letter).ok_or(ParseMoveError::UnknownLetter(letter))?;

		let count = chars.as_str();
		if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
			return Err(ParseMoveError::Count(count.to_string()));
		}
		let n = count.parse().map_err(|_| ParseMoveError::Count(count.to_string()))?;

		Ok(Self { kind, n })
	}
}
