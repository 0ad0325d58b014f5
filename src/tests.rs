//! End-to-end scenarios against the public `Pool` API.
//!
//! These mirror the walk-throughs worked out by hand for the allocator's
//! design: splitting, first-fit reuse, coalescing with either neighbor,
//! exhaustion, and both resize paths. Offsets and remnant sizes are derived
//! from `HEADER_SIZE`/`MIN_PAYLOAD` rather than hardcoded, since the header
//! layout here isn't the one the scenarios were originally sketched against.

use crate::Pool;
use crate::header::{HEADER_SIZE, MIN_PAYLOAD};

fn debug_string(pool: &Pool) -> String {
	format!("{pool:?}")
}

#[test]
fn split_and_refill() {
	let mut pool = Pool::new();
	pool.initialize(1024).unwrap();

	let a = pool.allocate(100).unwrap();
	assert!(debug_string(&pool).contains("used@0"));

	unsafe { pool.release(Some(a)) };
	// The whole region coalesces back into a single free block.
	let rendered = debug_string(&pool);
	assert_eq!(rendered.matches("free@").count(), 1);
	assert_eq!(rendered.matches("used@").count(), 0);
}

#[test]
fn first_fit_prefers_earliest_free_block() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();

	let a = pool.allocate(32).unwrap();
	let _b = pool.allocate(32).unwrap();
	let _c = pool.allocate(32).unwrap();

	unsafe { pool.release(Some(a)) };
	let d = pool.allocate(16).unwrap();

	assert_eq!(d, a, "first-fit should reuse A's offset before any later block");
}

#[test]
fn coalesces_with_predecessor() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();

	let a = pool.allocate(32).unwrap();
	let b = pool.allocate(32).unwrap();
	let _c = pool.allocate(32).unwrap();

	unsafe { pool.release(Some(a)) };
	let _d = pool.allocate(16).unwrap();
	unsafe { pool.release(Some(b)) };

	// The remnant left by splitting A's old block should have merged with
	// B's newly freed block into one run, leaving exactly one free block
	// between D and C.
	let rendered = debug_string(&pool);
	assert_eq!(rendered.matches("used@").count(), 2);
	assert_eq!(rendered.matches("free@").count(), 2);
}

#[test]
fn exhaustion_returns_none_without_poisoning_existing_allocations() {
	let mut pool = Pool::new();
	pool.initialize(64).unwrap();

	let a = pool.allocate(40);
	assert!(a.is_some());
	let b = pool.allocate(40);
	assert!(b.is_none());

	let a = a.unwrap();
	unsafe { a.as_ptr().write_bytes(0xAB, 40) };
	unsafe { pool.release(Some(a)) };
}

#[test]
fn resize_grows_in_place_by_absorbing_free_successor() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();

	let a = pool.allocate(32).unwrap();
	let b = pool.allocate(32).unwrap();
	unsafe { pool.release(Some(b)) };

	let c = unsafe { pool.resize(Some(a), 72) };
	assert_eq!(c, Some(a), "growing into a free successor must not move the block");
}

#[test]
fn resize_relocates_when_successor_is_allocated() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();

	let a = pool.allocate(32).unwrap();
	let _b = pool.allocate(32).unwrap();
	let _c = pool.allocate(32).unwrap();

	unsafe { a.as_ptr().write_bytes(0x5A, 32) };
	let d = unsafe { pool.resize(Some(a), 100) }.unwrap();
	assert_ne!(d, a, "growing past an allocated successor must relocate");

	let copied = unsafe { std::slice::from_raw_parts(d.as_ptr(), 32) };
	assert!(copied.iter().all(|&b| b == 0x5A));
}

#[test]
fn zero_request_resize_releases_and_returns_none() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();

	let a = pool.allocate(32).unwrap();
	let result = unsafe { pool.resize(Some(a), 0) };
	assert!(result.is_none());

	// The block should be back on the free list and reusable.
	let b = pool.allocate(32).unwrap();
	assert_eq!(b, a);
}

#[test]
fn none_pointer_resize_behaves_like_allocate() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();

	let a = unsafe { pool.resize(None, 16) };
	assert!(a.is_some());
}

#[test]
fn double_release_is_absorbed_not_corrupting() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();

	let a = pool.allocate(32).unwrap();
	unsafe { pool.release(Some(a)) };
	unsafe { pool.release(Some(a)) };

	// The pool must still be usable afterwards.
	let b = pool.allocate(16);
	assert!(b.is_some());
}

#[test]
fn capacity_too_small_is_rejected() {
	let mut pool = Pool::new();
	let err = pool.initialize(HEADER_SIZE).unwrap_err();
	assert_eq!(err, crate::PoolError::CapacityTooSmall { capacity: HEADER_SIZE });
}

#[test]
fn already_initialized_is_rejected() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();
	let err = pool.initialize(256).unwrap_err();
	assert_eq!(err, crate::PoolError::AlreadyInitialized);
}

#[test]
fn teardown_allows_reinitialization() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();
	pool.teardown();
	assert!(!pool.is_initialized());
	pool.initialize(512).unwrap();
	assert!(pool.is_initialized());
}

#[test]
fn allocate_on_uninitialized_pool_returns_none() {
	let mut pool = Pool::new();
	assert!(pool.allocate(16).is_none());
}

#[test]
fn minimum_payload_is_honored_for_tiny_requests() {
	let mut pool = Pool::new();
	pool.initialize(256).unwrap();
	let a = pool.allocate(1).unwrap();
	let b = pool.allocate(1).unwrap();
	assert_ne!(a, b);
	let distance = b.as_ptr() as usize - a.as_ptr() as usize;
	assert!(distance >= MIN_PAYLOAD);
}
