//! Error types surfaced at initialization time.
//!
//! Runtime allocation failure is *not* represented here: `allocate` and
//! `resize` return `Option::None` on exhaustion, per the contract in
//! `SPEC_FULL.md` §7. Only the three hard failures that can occur in
//! `initialize` get a variant.

/// Failure surfaced by [`crate::Pool::initialize`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
	/// `initialize` was called while the pool already held a region.
	#[error("pool is already initialized")]
	AlreadyInitialized,

	/// The requested capacity cannot host even one block.
	#[error("capacity {capacity} is too small to host a single block")]
	CapacityTooSmall { capacity: usize },

	/// The host could not provide `capacity` contiguous bytes.
	#[error("host allocation of {capacity} bytes failed")]
	HostAllocationFailed { capacity: usize },
}
