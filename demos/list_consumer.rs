//! A minimal singly-linked list of `u16` values that sources every node's
//! storage from `pool_alloc::global`, exercising the allocator the way a
//! real collaborator would: `allocate(node_size)` on push, `release` on pop.

use std::ptr::NonNull;

const DEFAULT_CAPACITY: usize = 4096;

struct Node {
	data: u16,
	next: Option<NonNull<Node>>,
}

struct List {
	head: Option<NonNull<Node>>,
}

impl List {
	fn new() -> Self {
		Self { head: None }
	}

	fn push_front(&mut self, data: u16) {
		let Some(raw) = pool_alloc::global::allocate(size_of::<Node>()) else {
			eprintln!("pool exhausted, dropping push of {data}");
			return;
		};
		let node_ptr = raw.cast::<Node>();
		unsafe { node_ptr.as_ptr().write(Node { data, next: self.head }) };
		self.head = Some(node_ptr);
	}

	fn pop_front(&mut self) -> Option<u16> {
		let node_ptr = self.head?;
		let node = unsafe { node_ptr.as_ptr().read() };
		self.head = node.next;
		unsafe { pool_alloc::global::release(Some(node_ptr.cast::<u8>())) };
		Some(node.data)
	}

	fn iter(&self) -> impl Iterator<Item = u16> + '_ {
		let mut current = self.head;
		std::iter::from_fn(move || {
			let node_ptr = current?;
			let node = unsafe { node_ptr.as_ref() };
			current = node.next;
			Some(node.data)
		})
	}
}

impl Drop for List {
	fn drop(&mut self) {
		while self.pop_front().is_some() {}
	}
}

fn main() {
	env_logger::init();

	let capacity = std::env::args().nth(1).and_then(|arg| arg.parse().ok()).unwrap_or(DEFAULT_CAPACITY);

	pool_alloc::global::initialize(capacity).expect("initializing the demo pool");

	let mut list = List::new();
	for value in [10u16, 9, 8, 7, 6, 5, 4, 3, 2, 1] {
		list.push_front(value);
	}

	print!("list:");
	for value in list.iter() {
		print!(" {value}");
	}
	println!();

	while let Some(value) = list.pop_front() {
		println!("popped {value}");
	}

	drop(list);
	pool_alloc::global::teardown();
}
