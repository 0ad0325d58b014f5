//! The process-wide pool instance.
//!
//! The distilled spec's data model describes "one process-wide instance."
//! This module makes that concrete the same way the teacher's `SyncStalloc`
//! wraps the single-threaded `Stalloc` core in a `Mutex`: the locking lives
//! here, not in [`crate::Pool`] itself, so the core stays the simple,
//! single-threaded allocator described in `SPEC_FULL.md` §5.

use core::ptr::NonNull;
use std::sync::{Mutex, OnceLock};

use crate::Pool;
use crate::config::PoolConfig;
use crate::error::PoolError;

fn pool() -> &'static Mutex<Pool> {
	static POOL: OnceLock<Mutex<Pool>> = OnceLock::new();
	POOL.get_or_init(|| Mutex::new(Pool::new()))
}

/// If this Mutex is poisoned, a prior call panicked inside the pool, which
/// is already undefined behavior per the pool's contract. There's nothing
/// sound left to recover, so we propagate the poison rather than pretend
/// the pool is still consistent.
fn lock() -> std::sync::MutexGuard<'static, Pool> {
	pool().lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// See [`Pool::initialize`].
pub fn initialize(capacity: usize) -> Result<(), PoolError> {
	lock().initialize(capacity)
}

/// See [`Pool::initialize_with`].
pub fn initialize_with(config: PoolConfig) -> Result<(), PoolError> {
	lock().initialize_with(config)
}

/// See [`Pool::allocate`].
pub fn allocate(request: usize) -> Option<NonNull<u8>> {
	lock().allocate(request)
}

/// See [`Pool::release`].
///
/// # Safety
/// Same contract as [`Pool::release`].
pub unsafe fn release(ptr: Option<NonNull<u8>>) {
	unsafe { lock().release(ptr) };
}

/// See [`Pool::resize`].
///
/// # Safety
/// Same contract as [`Pool::resize`].
pub unsafe fn resize(ptr: Option<NonNull<u8>>, new_request: usize) -> Option<NonNull<u8>> {
	unsafe { lock().resize(ptr, new_request) }
}

/// See [`Pool::teardown`].
pub fn teardown() {
	lock().teardown();
}

/// See [`Pool::is_initialized`].
pub fn is_initialized() -> bool {
	lock().is_initialized()
}
