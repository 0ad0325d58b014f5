//! The pool allocator core: a first-fit, intrusive-header,
//! splitting-and-coalescing region allocator over one host-acquired byte
//! buffer.
//!
//! `Pool` is single-threaded and carries no interior synchronization, the
//! same way the teacher's `Stalloc` is the unsynchronized core that
//! `SyncStalloc` wraps. Reach for [`crate::global`] when one process-wide,
//! lock-serialized instance is what's wanted.

use core::fmt::{self, Debug, Formatter};
use core::ptr::{self, NonNull};

use crate::error::PoolError;
use crate::header::{self, HEADER_SIZE, MIN_PAYLOAD, NULL_OFFSET, RawHeader, read_header, write_header};

struct Region {
	buffer: Vec<u8>,
}

impl Region {
	fn header(&self, offset: usize) -> RawHeader {
		unsafe { read_header(self.buffer.as_ptr(), offset) }
	}

	fn set_header(&mut self, offset: usize, header: RawHeader) {
		unsafe { write_header(self.buffer.as_mut_ptr(), offset, header) };
	}

	fn payload_ptr(&mut self, offset: usize) -> NonNull<u8> {
		let ptr = unsafe { self.buffer.as_mut_ptr().add(offset + HEADER_SIZE) };
		// SAFETY: `offset` always names a live block inside `buffer`.
		unsafe { NonNull::new_unchecked(ptr) }
	}

	/// Recovers the block offset owning a payload pointer previously
	/// returned by this region, or `None` if it can't possibly be one.
	fn offset_of(&self, ptr: NonNull<u8>) -> Option<usize> {
		let base = self.buffer.as_ptr() as usize;
		let addr = ptr.as_ptr() as usize;
		let payload_addr = addr.checked_sub(base)?.checked_sub(HEADER_SIZE)?;
		if payload_addr + HEADER_SIZE > self.buffer.len() {
			return None;
		}
		Some(payload_addr)
	}

	/// Finds the block whose `next` points at `offset`, by a forward walk
	/// from the head. Returns `None` if `offset` is the head itself.
	fn predecessor_of(&self, offset: usize) -> Option<usize> {
		if offset == 0 {
			return None;
		}
		let mut current = 0usize;
		loop {
			let header = self.header(current);
			if header.next == offset {
				return Some(current);
			}
			if header.next == NULL_OFFSET {
				// `offset` isn't reachable; the caller passed a bogus offset.
				return None;
			}
			current = header.next;
		}
	}

	/// If the block at `offset` is free and its successor is also free,
	/// merges the successor into it. Returns `true` if a merge happened.
	fn merge_with_next_if_free(&mut self, offset: usize) -> bool {
		let mut header = self.header(offset);
		if !header.free || header.next == NULL_OFFSET {
			return false;
		}
		let next = self.header(header.next);
		if !next.free {
			return false;
		}
		header.size += HEADER_SIZE + next.size;
		header.next = next.next;
		self.set_header(offset, header);
		true
	}

	/// If the block at `offset` is free and its predecessor is also free,
	/// merges `offset` into the predecessor. Returns the surviving block's
	/// offset (the predecessor's, if merged; `offset` otherwise).
	fn merge_with_prev_if_free(&mut self, offset: usize) -> usize {
		let Some(pred_offset) = self.predecessor_of(offset) else {
			return offset;
		};
		let mut pred = self.header(pred_offset);
		if !pred.free {
			return offset;
		}
		let header = self.header(offset);
		pred.size += HEADER_SIZE + header.size;
		pred.next = header.next;
		self.set_header(pred_offset, pred);
		pred_offset
	}
}

/// A first-fit region allocator over a single, fixed-capacity, host-acquired
/// byte buffer.
///
/// `Pool` starts `Uninitialized`. [`Pool::initialize`] obtains the region and
/// moves it to `Initialized`; [`Pool::teardown`] releases the region and
/// moves it back. Every other operation is a no-op / returns `None` when
/// called on an uninitialized pool, never a panic.
#[derive(Default)]
pub struct Pool {
	region: Option<Region>,
}

impl Pool {
	/// Creates an uninitialized pool.
	pub const fn new() -> Self {
		Self { region: None }
	}

	/// Reports whether the pool currently holds a region.
	pub fn is_initialized(&self) -> bool {
		self.region.is_some()
	}

	/// Reserves a contiguous region of `capacity` bytes from the host and
	/// installs a single free block covering it.
	pub fn initialize(&mut self, capacity: usize) -> Result<(), PoolError> {
		if self.region.is_some() {
			log::warn!("initialize: pool is already initialized");
			return Err(PoolError::AlreadyInitialized);
		}
		if capacity <= HEADER_SIZE + MIN_PAYLOAD {
			log::warn!("initialize: capacity {capacity} too small");
			return Err(PoolError::CapacityTooSmall { capacity });
		}

		let mut buffer: Vec<u8> = Vec::new();
		if buffer.try_reserve_exact(capacity).is_err() {
			log::warn!("initialize: host allocation of {capacity} bytes failed");
			return Err(PoolError::HostAllocationFailed { capacity });
		}
		buffer.resize(capacity, 0);

		let mut region = Region { buffer };
		region.set_header(0, RawHeader { size: capacity - HEADER_SIZE, next: NULL_OFFSET, free: true });
		self.region = Some(region);

		log::debug!("initialize: reserved {capacity} bytes");
		Ok(())
	}

	/// Convenience wrapper over [`Pool::initialize`] taking a
	/// [`crate::config::PoolConfig`].
	pub fn initialize_with(&mut self, config: crate::config::PoolConfig) -> Result<(), PoolError> {
		self.initialize(config.capacity)
	}

	/// First-fit, address-ordered allocation. `request == 0` is treated as
	/// the minimum payload size. Returns `None` (not fatal) if no free block
	/// is large enough, or if the pool is uninitialized.
	pub fn allocate(&mut self, request: usize) -> Option<NonNull<u8>> {
		let region = self.region.as_mut()?;
		let request = header::align_up(request).max(MIN_PAYLOAD);

		let mut offset = 0usize;
		loop {
			let block = region.header(offset);
			if block.free && block.size >= request {
				let remainder = block.size - request;
				if remainder >= HEADER_SIZE + MIN_PAYLOAD {
					let new_offset = offset + HEADER_SIZE + request;
					region.set_header(new_offset, RawHeader { size: remainder - HEADER_SIZE, next: block.next, free: true });
					region.set_header(offset, RawHeader { size: request, next: new_offset, free: false });
				} else {
					region.set_header(offset, RawHeader { size: block.size, next: block.next, free: false });
				}
				log::trace!("allocate: request={request} -> block at offset {offset}");
				return Some(region.payload_ptr(offset));
			}
			if block.next == NULL_OFFSET {
				log::debug!("allocate: out of pool for request={request}");
				return None;
			}
			offset = block.next;
		}
	}

	/// Releases a pointer previously returned by [`Pool::allocate`] or
	/// [`Pool::resize`]. `None` is a no-op. A double release is silently
	/// absorbed rather than corrupting the chain.
	///
	/// # Safety
	/// `ptr`, if `Some`, must have been returned by this same `Pool` and not
	/// already released.
	pub unsafe fn release(&mut self, ptr: Option<NonNull<u8>>) {
		let Some(ptr) = ptr else { return };
		let Some(region) = self.region.as_mut() else { return };

		let Some(offset) = region.offset_of(ptr) else {
			debug_assert!(false, "release: pointer does not name a block in this pool");
			return;
		};

		let mut block = region.header(offset);
		if block.free {
			log::warn!("release: double release at offset {offset}");
			return;
		}
		block.free = true;
		region.set_header(offset, block);

		region.merge_with_next_if_free(offset);
		region.merge_with_prev_if_free(offset);
	}

	/// Resizes a previously allocated block, trying in order: shrink in
	/// place, grow in place by absorbing a free successor, relocate via a
	/// fresh allocation and copy, or fail. `None` behaves as `allocate`;
	/// `new_request == 0` releases and returns `None`.
	///
	/// # Safety
	/// `ptr`, if `Some`, must have been returned by this same `Pool` and not
	/// already released.
	pub unsafe fn resize(&mut self, ptr: Option<NonNull<u8>>, new_request: usize) -> Option<NonNull<u8>> {
		let Some(ptr) = ptr else { return self.allocate(new_request) };
		if new_request == 0 {
			unsafe { self.release(Some(ptr)) };
			return None;
		}

		let region = self.region.as_mut()?;
		let Some(offset) = region.offset_of(ptr) else {
			debug_assert!(false, "resize: pointer does not name a block in this pool");
			return None;
		};
		let new_request = header::align_up(new_request).max(MIN_PAYLOAD);
		let block = region.header(offset);

		// Case 1: shrink or equal.
		if new_request <= block.size {
			let remainder = block.size - new_request;
			if remainder >= HEADER_SIZE + MIN_PAYLOAD {
				let new_offset = offset + HEADER_SIZE + new_request;
				region.set_header(new_offset, RawHeader { size: remainder - HEADER_SIZE, next: block.next, free: true });
				region.set_header(offset, RawHeader { size: new_request, next: new_offset, free: false });
				region.merge_with_next_if_free(new_offset);
			}
			return Some(ptr);
		}

		// Case 2: grow in place by absorbing a free successor.
		if block.next != NULL_OFFSET {
			let next = region.header(block.next);
			if next.free && block.size + HEADER_SIZE + next.size >= new_request {
				let merged_size = block.size + HEADER_SIZE + next.size;
				let leftover = merged_size - new_request;
				if leftover >= HEADER_SIZE + MIN_PAYLOAD {
					let new_offset = offset + HEADER_SIZE + new_request;
					region.set_header(new_offset, RawHeader { size: leftover - HEADER_SIZE, next: next.next, free: true });
					region.set_header(offset, RawHeader { size: new_request, next: new_offset, free: false });
				} else {
					region.set_header(offset, RawHeader { size: merged_size, next: next.next, free: false });
				}
				log::trace!("resize: grew block at offset {offset} to {new_request}");
				return Some(ptr);
			}
		}

		// Case 3: relocate.
		log::trace!("resize: relocating block at offset {offset} to {new_request}");
		if let Some(new_ptr) = self.allocate(new_request) {
			// SAFETY: `ptr` and `new_ptr` both point inside the same
			// region's buffer and name non-overlapping blocks (the pool's
			// partition invariant guarantees this).
			let copy_len = block.size.min(new_request);
			unsafe { ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr(), copy_len) };
			unsafe { self.release(Some(ptr)) };
			return Some(new_ptr);
		}

		// Case 4: failure. Leave the original block untouched.
		log::debug!("resize: relocation failed for request={new_request}");
		None
	}

	/// Releases the region back to the host and resets to uninitialized.
	/// Outstanding pointers become dangling; detecting that is not a goal.
	pub fn teardown(&mut self) {
		if self.region.take().is_some() {
			log::debug!("teardown: region released");
		}
	}
}

impl Drop for Pool {
	fn drop(&mut self) {
		self.teardown();
	}
}

impl Debug for Pool {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Some(region) = &self.region else {
			return write!(f, "Pool (uninitialized)");
		};

		write!(f, "Pool {{")?;
		let mut offset = 0usize;
		loop {
			let block = region.header(offset);
			write!(f, " [{}@{} {}]", if block.free { "free" } else { "used" }, offset, block.size)?;
			if block.next == NULL_OFFSET {
				break;
			}
			offset = block.next;
		}
		write!(f, " }}")
	}
}
