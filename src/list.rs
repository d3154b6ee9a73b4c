extern crate alloc;

use alloc::boxed::Box;
use core::fmt;
use core::mem;
use core::ptr::{self, NonNull};

/// A node in the doubly linked list.
///
/// Contains a value and pointers to the previous and next entries.
/// Trackers hold raw pointers to these nodes so that removal from the middle
/// of the list and moves between lists are O(1).
pub(crate) struct Entry<T> {
    /// The value stored in this entry. Uses MaybeUninit to allow for sigil nodes.
    val: mem::MaybeUninit<T>,
    prev: *mut Entry<T>,
    next: *mut Entry<T>,
}

impl<T> Entry<T> {
    fn new(val: T) -> Self {
        Entry {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Creates a sigil (sentinel) entry without initializing the value.
    fn new_sigil() -> Self {
        Entry {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Returns a reference to the value.
    ///
    /// # Safety
    ///
    /// Must only be called on non-sigil nodes.
    pub(crate) unsafe fn get_value(&self) -> &T {
        // SAFETY: caller guarantees this is not a sigil, so `val` is initialized
        unsafe { self.val.assume_init_ref() }
    }
}

/// An unbounded doubly linked list ordered from front (oldest) to back
/// (newest).
///
/// The list uses sigil nodes at the head and tail so that linking and
/// unlinking never branch on emptiness. Capacity is enforced by the cache
/// facade, not here.
pub(crate) struct List<T> {
    len: usize,
    head: *mut Entry<T>,
    tail: *mut Entry<T>,
}

// SAFETY: List exclusively owns every node reachable from `head`; sending the
// list sends the values it owns.
unsafe impl<T: Send> Send for List<T> {}

// SAFETY: Shared references only hand out `&T`.
unsafe impl<T: Sync> Sync for List<T> {}

impl<T> List<T> {
    pub(crate) fn new() -> List<T> {
        let head = Box::into_raw(Box::new(Entry::new_sigil()));
        let tail = Box::into_raw(Box::new(Entry::new_sigil()));

        // SAFETY: head and tail are newly allocated and valid pointers
        unsafe {
            (*head).next = tail;
            (*tail).prev = head;
        }

        List { len: 0, head, tail }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a value at the back and returns a pointer to its node.
    pub(crate) fn push_back(&mut self, v: T) -> *mut Entry<T> {
        let node = NonNull::from(Box::leak(Box::new(Entry::new(v)))).as_ptr();
        // SAFETY: node is newly allocated and not part of any list yet
        unsafe { self.link_back(node) };
        node
    }

    /// Removes and returns the value at the front (oldest).
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so head.next is a real node
        unsafe {
            let node = (*self.head).next;
            Some(self.remove(node))
        }
    }

    /// Removes and returns the value at the back (newest).
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so tail.prev is a real node
        unsafe {
            let node = (*self.tail).prev;
            Some(self.remove(node))
        }
    }

    pub(crate) fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so head.next is an initialized node
        unsafe { Some((*(*self.head).next).get_value()) }
    }

    pub(crate) fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so tail.prev is an initialized node
        unsafe { Some((*(*self.tail).prev).get_value()) }
    }

    /// Unlinks `node`, frees it and returns its value.
    ///
    /// # Safety
    ///
    /// `node` must be a live, non-sigil node of this list.
    pub(crate) unsafe fn remove(&mut self, node: *mut Entry<T>) -> T {
        // SAFETY: caller guarantees node belongs to this list
        unsafe {
            self.unlink(node);
            let entry = *Box::from_raw(node);
            entry.val.assume_init()
        }
    }

    /// Moves `node` to the back of the list.
    ///
    /// # Safety
    ///
    /// `node` must be a live, non-sigil node of this list.
    pub(crate) unsafe fn move_to_back(&mut self, node: *mut Entry<T>) {
        // SAFETY: caller guarantees node belongs to this list, so tail is valid
        unsafe {
            if (*self.tail).prev == node {
                return;
            }
            self.unlink(node);
            self.link_back(node);
        }
    }

    /// Detaches `node` without freeing it. The node may then be linked into
    /// another list with [`link_back`](List::link_back).
    ///
    /// # Safety
    ///
    /// `node` must be a live, non-sigil node of this list.
    pub(crate) unsafe fn unlink(&mut self, node: *mut Entry<T>) {
        // SAFETY: node is in this list, so its neighbours are valid entries
        unsafe {
            (*(*node).prev).next = (*node).next;
            (*(*node).next).prev = (*node).prev;
            (*node).prev = ptr::null_mut();
            (*node).next = ptr::null_mut();
        }
        self.len -= 1;
    }

    /// Links a detached node before the tail sigil.
    ///
    /// # Safety
    ///
    /// `node` must be a valid, initialized node that is not linked into any
    /// list.
    pub(crate) unsafe fn link_back(&mut self, node: *mut Entry<T>) {
        // SAFETY: tail is valid for the lifetime of the list and the caller
        // guarantees node is detached
        unsafe {
            (*node).next = self.tail;
            (*node).prev = (*self.tail).prev;
            (*(*self.tail).prev).next = node;
            (*self.tail).prev = node;
        }
        self.len += 1;
    }

    pub(crate) fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();

        // SAFETY: head and tail were allocated in `new` and are only freed here.
        // Their values are uninitialized, and MaybeUninit never drops.
        unsafe {
            drop(Box::from_raw(self.head));
            drop(Box::from_raw(self.tail));
        }
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("len", &self.len).finish()
    }
}
