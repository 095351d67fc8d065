//! Keys: sequences of moves written as `R3-L2-C4`.
//!
//! Every token is a move letter (R, C or L) followed by the move count.
//! Tokens with any other letter are skipped, they don't make the key invalid.

use std::str::FromStr;

use log::{debug, warn};
use rand::Rng;

use crate::cube::{turn::*, CubeError, RubiksCube};

/// Separates the tokens of a key
pub const KEY_SEPARATOR: char = '-';

/// The key the cipher was first demonstrated with
pub const EXAMPLE_KEY: &str = "R3-L2-C4-L6-R5-C1-R3-L4-R1";

/// Why a key couldn't be applied.
/// `position` is the index of the offending token in the key, starting at 0.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
	#[error("Token #{position} is empty")]
	EmptyToken { position: usize },
	#[error("Token #{position} (\"{token}\") has a malformed move count")]
	MalformedNumber { position: usize, token: String },
	#[error("Token #{position} (\"{token}\") can't be applied: {source}")]
	InvalidMove {
		position: usize,
		token: String,
		#[source]
		source: CubeError,
	},
}

/// Split a key into its tokens, together with their position
fn tokens(key: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
	let key = key.trim();
	// An empty key has no tokens at all (rather than one empty token)
	let count = if key.is_empty() { 0 } else { usize::MAX };
	key.split(KEY_SEPARATOR).map(str::trim).enumerate().take(count)
}

/// Parse a single token. Returns None if the token has to be skipped.
fn parse_token(position: usize, token: &str) -> Result<Option<Move>, KeyError> {
	match token.parse::<Move>() {
		Ok(mv) => Ok(Some(mv)),
		Err(ParseMoveError::UnknownLetter(letter)) => {
			warn!("Skipping token #{} (\"{}\"): '{}' is not a move letter", position, token, letter);
			Ok(None)
		}
		Err(ParseMoveError::Empty) => Err(KeyError::EmptyToken { position }),
		Err(ParseMoveError::Count(_)) => Err(KeyError::MalformedNumber {
			position,
			token: token.to_string(),
		}),
	}
}

/// Apply the key to the cube, token by token.
/// Returns the number of moves applied.
///
/// If a token is broken, every move before it stays applied and the broken one isn't applied at all.
pub fn apply_key<C: RubiksCube>(cube: &mut C, key: &str) -> Result<usize, KeyError> {
	let mut applied = 0;

	for (position, token) in tokens(key) {
		let Some(mv) = parse_token(position, token)? else {
			continue;
		};

		cube.apply_move(mv).map_err(|source| KeyError::InvalidMove {
			position,
			token: token.to_string(),
			source,
		})?;
		debug!("Token #{}: applied {}", position, mv);
		applied += 1;
	}

	Ok(applied)
}

/// A parsed key
#[derive(Clone, Debug, Default)]
pub struct Key {
	moves: Vec<Move>,
	/// The token every move was parsed from
	positions: Vec<usize>,
}

// Two keys are the same if they turn the cube the same way, no matter which tokens were skipped
impl PartialEq for Key {
	fn eq(&self, other: &Self) -> bool {
		self.moves == other.moves
	}
}

impl Eq for Key {}

impl std::hash::Hash for Key {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.moves.hash(state);
	}
}

impl Key {
	pub fn new(moves: Vec<Move>) -> Self {
		let positions = (0..moves.len()).collect();
		Self { moves, positions }
	}

	/// Wraps a move which couldn't be applied, with the token it came from
	fn move_error(&self, index: usize, source: CubeError) -> KeyError {
		KeyError::InvalidMove {
			position: self.positions[index],
			token: self.moves[index].to_string(),
			source,
		}
	}

	pub fn moves(&self) -> &[Move] {
		&self.moves
	}

	pub fn len(&self) -> usize {
		self.moves.len()
	}

	pub fn is_empty(&self) -> bool {
		self.moves.is_empty()
	}

	/// Check every move against the size of the cube before anything is applied.
	/// The position of an error is the token the move was parsed from (skipped tokens count too).
	pub fn validate(&self, size: usize) -> Result<(), KeyError> {
		for (i, mv) in self.moves.iter().enumerate() {
			mv.validate(size).map_err(|source| self.move_error(i, source))?;
		}
		Ok(())
	}

	/// Apply the moves in order. Returns the number of moves applied.
	pub fn apply<C: RubiksCube>(&self, cube: &mut C) -> Result<usize, KeyError> {
		for (i, mv) in self.moves.iter().enumerate() {
			cube.apply_move(*mv).map_err(|source| self.move_error(i, source))?;
		}
		debug!("Applied key {}", self);
		Ok(self.moves.len())
	}

	/// The key which undoes this one on a cube of the given size
	pub fn inverse(&self, size: usize) -> Key {
		self.moves
			.iter()
			.rev()
			.flat_map(|mv| mv.inverse(size))
			.collect()
	}

	/// Generate a random key with `len` moves, all valid on a cube of the given size
	pub fn random<R: Rng + ?Sized>(rng: &mut R, size: usize, len: usize) -> Result<Key, CubeError> {
		if size == 0 {
			return Err(CubeError::InvalidSize);
		}

		Ok((0..len)
			.map(|_| {
				let kind = MOVE_KINDS[rng.gen_range(0..NUM_MOVE_KINDS)];
				Move::new(kind, rng.gen_range(1..=Move::max_count(size)))
			})
			.collect())
	}
}

impl FromIterator<Move> for Key {
	fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl FromStr for Key {
	type Err = KeyError;

	/// Parse every token of the key. Tokens with unknown letters are dropped.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut moves = vec![];
		let mut positions = vec![];
		for (position, token) in tokens(s) {
			if let Some(mv) = parse_token(position, token)? {
				moves.push(mv);
				positions.push(position);
			}
		}
		Ok(Self { moves, positions })
	}
}

impl std::fmt::Display for Key {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		for (i, mv) in self.moves.iter().enumerate() {
			if i != 0 {
				write!(f, "{}", KEY_SEPARATOR)?;
			}
			write!(f, "{}", mv)?;
		}
		Ok(())
	}
}
