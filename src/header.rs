//! The intrusive header written at the start of every block.
//!
//! Blocks are referenced by their byte offset from the region base rather
//! than by raw pointer, so that the region can be represented as a plain
//! owned byte buffer (`Vec<u8>`) and every header access is a bounds-checked
//! offset computation instead of a pointer cast into a statically-shaped
//! type.

use core::mem;

/// Sentinel `next` value meaning "no successor" (this is the last block).
pub const NULL_OFFSET: usize = usize::MAX;

/// The on-buffer representation of a block header.
///
/// `size` is the payload capacity in bytes, excluding the header itself.
/// `next` is the byte offset of the next block in address order, or
/// [`NULL_OFFSET`]. `free` is `true` when the payload is available for
/// allocation.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawHeader {
	pub size: usize,
	pub next: usize,
	pub free: bool,
}

/// Size of [`RawHeader`] in bytes, including trailing padding.
pub const HEADER_SIZE: usize = mem::size_of::<RawHeader>();

/// Alignment required by [`RawHeader`], and the alignment every returned
/// payload pointer is rounded up to.
pub const HEADER_ALIGN: usize = mem::align_of::<RawHeader>();

/// The smallest payload a block may have. Keeps split remnants addressable
/// and aligned; chosen as one alignment unit.
pub const MIN_PAYLOAD: usize = HEADER_ALIGN;

/// Rounds `size` up to [`HEADER_ALIGN`].
pub fn align_up(size: usize) -> usize {
	size.div_ceil(HEADER_ALIGN) * HEADER_ALIGN
}

/// Reads the header at `offset` within `buffer`.
///
/// # Safety
/// `offset + HEADER_SIZE` must be `<= buffer.len()`, and a valid header must
/// already have been written there.
pub unsafe fn read_header(buffer: *const u8, offset: usize) -> RawHeader {
	unsafe { buffer.add(offset).cast::<RawHeader>().read_unaligned() }
}

/// Writes `header` at `offset` within `buffer`.
///
/// # Safety
/// `offset + HEADER_SIZE` must be `<= buffer.len()`.
pub unsafe fn write_header(buffer: *mut u8, offset: usize, header: RawHeader) {
	unsafe { buffer.add(offset).cast::<RawHeader>().write_unaligned(header) };
}
