//! # pool-alloc
//!
//! A first-fit, intrusive-header, splitting-and-coalescing region allocator
//! over a single, fixed-capacity byte pool reserved once from the host.
//!
//! ## Overview
//!
//! [`Pool`] owns one contiguous region, obtained by [`Pool::initialize`] and
//! released by [`Pool::teardown`]. Inside the region it maintains a single
//! intrusive chain of blocks walked in address order; [`Pool::allocate`]
//! picks the first free block large enough for a request and splits off any
//! usable remainder, [`Pool::release`] marks a block free and eagerly
//! coalesces with its free neighbors, and [`Pool::resize`] tries, in order,
//! to shrink in place, grow in place by absorbing a free successor, or
//! relocate.
//!
//! `Pool` is single-threaded and carries no interior synchronization. For a
//! single, lock-serialized, process-wide instance, use the free functions in
//! [`global`] instead of constructing a `Pool` directly.
//!
//! ```
//! use pool_alloc::Pool;
//!
//! let mut pool = Pool::new();
//! pool.initialize(1024).unwrap();
//!
//! let a = pool.allocate(100).expect("pool has room");
//! unsafe {
//!     a.as_ptr().write_bytes(0xAB, 100);
//!     pool.release(Some(a));
//! }
//! ```
//!
//! ## Crate layout
//!
//! ```text
//!   pool_alloc
//!   ├── header  - the intrusive block header and its offset arithmetic
//!   ├── pool    - the allocator core: initialize/allocate/release/resize/teardown
//!   ├── error   - PoolError, the three hard initialization-time failures
//!   ├── config  - PoolConfig, the crate's whole configuration surface
//!   └── global  - a Mutex-guarded process-wide Pool instance
//! ```

pub mod config;
pub mod error;
pub mod global;
mod header;
mod pool;

pub use config::PoolConfig;
pub use error::PoolError;
pub use pool::Pool;

#[cfg(test)]
mod tests;
