//! Turning a key into a reusable permutation, and using it on blocks of bytes.
//!
//! ```
//! use rubikcipher::prelude::*;
//!
//! let key: Key = EXAMPLE_KEY.parse().unwrap();
//! let cipher = BlockCipher::new(3, &key).unwrap();
//!
//! let sealed = cipher.encrypt(b"attack at dawn").unwrap();
//! assert_eq!(cipher.decrypt(&sealed).unwrap(), b"attack at dawn");
//! ```

use bit_set::BitSet;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
	cube::{facecube::FaceCube, CubeError},
	key::{Key, KeyError},
};

/// Data shorter than this (in bytes) is permuted on the current thread
const PARALLEL_THRESHOLD: usize = 1 << 16;

#[derive(thiserror::Error, Debug)]
pub enum CipherError {
	#[error(transparent)]
	Key(#[from] KeyError),
	#[error(transparent)]
	Cube(#[from] CubeError),
	#[error("The table is not a permutation")]
	NotAPermutation,
	#[error("A block must hold at least one byte")]
	EmptyBlock,
	#[error("Expected data of length {expected}, got {found}")]
	BlockLength { expected: usize, found: usize },
	#[error("Could not read the sealed data: {0}")]
	Envelope(#[from] bincode::Error),
}

/// A permutation of positions.
/// Let t be the table, s the old sequence and n the new one:
/// n[i] = s[ t[i] ] holds true
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Permutation {
	table: Vec<usize>,
}

impl Permutation {
	/// The permutation which leaves everything in place
	pub fn identity(len: usize) -> Self {
		Self {
			table: (0..len).collect(),
		}
	}

	/// Check that every position appears exactly once
	pub fn from_table(table: Vec<usize>) -> Result<Self, CipherError> {
		let mut seen = BitSet::with_capacity(table.len());
		if !table.iter().all(|&i| i < table.len() && seen.insert(i)) {
			return Err(CipherError::NotAPermutation);
		}
		Ok(Self { table })
	}

	/// The arrangement of a cube which started out labelled
	pub fn from_cube(cube: &FaceCube) -> Result<Self, CipherError> {
		Self::from_table(cube.symbols().into_iter().map(|s| s as usize).collect())
	}

	/// The permutation a key applies to a cube of the given size
	pub fn from_key(size: usize, key: &Key) -> Result<Self, CipherError> {
		key.validate(size)?;

		let mut cube = FaceCube::new(size)?;
		key.apply(&mut cube)?;
		debug!("Derived a permutation of {} symbols from key {}", cube.num_symbols(), key);

		Self::from_cube(&cube)
	}

	pub fn table(&self) -> &[usize] {
		&self.table
	}

	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Chain 2 permutations to one.
	/// It returns a new permutation, in which first self is applied, then other.
	pub fn chain(&self, other: &Permutation) -> Permutation {
		Self {
			table: other.table.iter().map(|&i| self.table[i]).collect(),
		}
	}

	/// The permutation which undoes this one
	pub fn inverse(&self) -> Permutation {
		let mut table = vec![0; self.table.len()];
		for (i, &t) in self.table.iter().enumerate() {
			table[t] = i;
		}
		Self { table }
	}

	/// Rearrange the data
	pub fn apply<T: Copy>(&self, data: &[T]) -> Result<Vec<T>, CipherError> {
		if data.len() != self.len() {
			return Err(CipherError::BlockLength {
				expected: self.len(),
				found: data.len(),
			});
		}
		Ok(self.table.iter().map(|&i| data[i]).collect())
	}

	fn apply_block(&self, block: &[u8], out: &mut [u8]) {
		for (o, &i) in out.iter_mut().zip(self.table.iter()) {
			*o = block[i];
		}
	}

	/// Rearrange every block of `src` into `dst`, in parallel once there is enough data
	fn apply_blocks(&self, src: &[u8], dst: &mut [u8]) {
		if src.len() < PARALLEL_THRESHOLD {
			for (out, block) in dst.chunks_mut(self.len()).zip(src.chunks(self.len())) {
				self.apply_block(block, out);
			}
		} else {
			dst.par_chunks_mut(self.len())
				.zip(src.par_chunks(self.len()))
				.for_each(|(out, block)| self.apply_block(block, out));
		}
	}
}

/// The sealed data, as written by `BlockCipher::encrypt`
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
struct Envelope {
	/// Length of the data before padding
	len: u64,
	blocks: Vec<u8>,
}

/// Permutes data in blocks of one byte per facelet (6·N² bytes).
#[derive(Clone, Debug)]
pub struct BlockCipher {
	forward: Permutation,
	backward: Permutation,
}

impl BlockCipher {
	pub fn new(size: usize, key: &Key) -> Result<Self, CipherError> {
		Self::from_permutation(Permutation::from_key(size, key)?)
	}

	pub fn from_permutation(forward: Permutation) -> Result<Self, CipherError> {
		if forward.is_empty() {
			return Err(CipherError::EmptyBlock);
		}
		let backward = forward.inverse();
		Ok(Self { forward, backward })
	}

	pub fn block_len(&self) -> usize {
		self.forward.len()
	}

	/// Pads the data with zeros to whole blocks and permutes every block.
	pub fn encrypt(&self, plain: &[u8]) -> Result<Vec<u8>, CipherError> {
		let block_len = self.block_len();
		let padded_len = plain.len().div_ceil(block_len) * block_len;

		let mut padded = plain.to_vec();
		padded.resize(padded_len, 0);

		let mut blocks = vec![0; padded_len];
		self.forward.apply_blocks(&padded, &mut blocks);
		debug!("Encrypted {} bytes in {} blocks", plain.len(), padded_len / block_len);

		let envelope = Envelope {
			len: plain.len() as u64,
			blocks,
		};
		Ok(bincode::serialize(&envelope)?)
	}

	pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError> {
		let envelope: Envelope = bincode::deserialize(sealed)?;
		let block_len = self.block_len();

		// The blocks must be exactly the recorded length, padded to whole blocks
		let found = envelope.blocks.len();
		let len = usize::try_from(envelope.len).unwrap_or(usize::MAX);
		let expected = len.div_ceil(block_len).checked_mul(block_len);
		if expected != Some(found) {
			return Err(CipherError::BlockLength {
				expected: expected.unwrap_or(usize::MAX),
				found,
			});
		}

		let mut plain = vec![0; found];
		self.backward.apply_blocks(&envelope.blocks, &mut plain);
		plain.truncate(len);
		debug!("Decrypted {} bytes", len);

		Ok(plain)
	}
}
