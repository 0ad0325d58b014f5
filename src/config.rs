//! The crate's entire configuration surface.
//!
//! `Pool` has exactly one knob worth configuring: how big a region to
//! reserve. There is no file- or environment-based configuration layer
//! because there is nothing else to configure.

/// Configuration for [`crate::Pool::initialize_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
	pub capacity: usize,
}

impl PoolConfig {
	/// Builds a configuration requesting a region of `capacity` bytes.
	pub const fn new(capacity: usize) -> Self {
		Self { capacity }
	}
}
