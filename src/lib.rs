//! This is a simple example how to scramble the cube with a key.
//!
//! ```
//! use rubikcipher::prelude::*;
//!
//! let mut cube = FaceCube::new(3).unwrap();
//!
//! let key: Key = EXAMPLE_KEY.parse().unwrap();
//! key.apply(&mut cube).unwrap();
//! assert!(!cube.is_solved());
//!
//! key.inverse(3).apply(&mut cube).unwrap();
//! assert!(cube.is_solved());
//! ```
//!
//! R, C and L are the row, column and level moves. A count of 1 to N turns the outer
//! slice, N+1 to 2N turns everything else.

pub mod cipher;
pub mod cube;
pub mod key;

pub mod prelude {
	pub use crate::cipher::{BlockCipher, CipherError, Permutation};
	pub use crate::cube::{facecube::*, grid::*, turn::*, *};
	pub use crate::key::*;
}
