use std::fmt;

use tracing::debug;

use crate::error::{BufferError, Result};

/// A byte buffer with a movable gap at the edit point.
///
/// The backing storage is laid out as:
///
/// ```text
///  [ before | gap (unused) | after ]
///    0..gap_start   gap_start..gap_end   gap_end..capacity
/// ```
///
/// The logical text is `before` followed by `after`. Inserting, deleting and
/// stepping the cursor only touch the gap boundary, so each is O(1); when an
/// insertion finds the gap closed the storage doubles, keeping insertion
/// amortized O(1).
///
/// There is no seek primitive. The cursor moves one byte at a time with
/// [`move_left`](Self::move_left) and [`move_right`](Self::move_right).
pub struct GapBuffer {
    storage: Vec<u8>,
    gap_start: usize,
    gap_end: usize,
}

impl GapBuffer {
    /// Create an empty buffer whose gap spans `initial_capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::ZeroCapacity`] for a zero capacity and
    /// [`BufferError::Allocation`] if the storage cannot be obtained.
    pub fn new(initial_capacity: usize) -> Result<Self> {
        if initial_capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        let storage = allocate(initial_capacity)?;
        Ok(Self {
            storage,
            gap_start: 0,
            gap_end: initial_capacity,
        })
    }

    /// Offset where the gap begins; also the logical cursor position.
    pub const fn gap_start(&self) -> usize {
        self.gap_start
    }

    /// Offset where the content after the gap resumes.
    pub const fn gap_end(&self) -> usize {
        self.gap_end
    }

    /// Total size of the backing storage, gap included.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of live bytes.
    pub fn len(&self) -> usize {
        self.gap_start + (self.capacity() - self.gap_end)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The live bytes before the gap.
    pub fn before(&self) -> &[u8] {
        &self.storage[..self.gap_start]
    }

    /// The live bytes after the gap.
    pub fn after(&self) -> &[u8] {
        &self.storage[self.gap_end..]
    }

    /// The byte immediately left of the gap.
    pub fn peek_before(&self) -> Option<u8> {
        self.before().last().copied()
    }

    /// The byte immediately right of the gap.
    pub fn peek_after(&self) -> Option<u8> {
        self.after().first().copied()
    }

    /// Insert `byte` at the cursor and advance the cursor past it.
    ///
    /// # Errors
    ///
    /// Fails only when the gap is closed and the storage cannot be doubled.
    /// The buffer is unchanged in that case.
    pub fn insert(&mut self, byte: u8) -> Result<()> {
        if self.gap_start == self.gap_end {
            self.grow()?;
        }
        self.storage[self.gap_start] = byte;
        self.gap_start += 1;
        self.check_invariant();
        Ok(())
    }

    /// Delete the byte before the cursor (backspace).
    ///
    /// Returns the removed byte, or `None` at the start of the text.
    pub fn delete_before(&mut self) -> Option<u8> {
        let removed = self.peek_before()?;
        self.gap_start -= 1;
        self.check_invariant();
        Some(removed)
    }

    /// Step the cursor one byte left without changing the text.
    pub fn move_left(&mut self) {
        if self.gap_start == 0 {
            return;
        }
        self.gap_start -= 1;
        self.gap_end -= 1;
        self.storage[self.gap_end] = self.storage[self.gap_start];
        self.check_invariant();
    }

    /// Step the cursor one byte right without changing the text.
    pub fn move_right(&mut self) {
        if self.gap_end == self.capacity() {
            return;
        }
        self.storage[self.gap_start] = self.storage[self.gap_end];
        self.gap_start += 1;
        self.gap_end += 1;
        self.check_invariant();
    }

    /// Iterate over the logical text without copying it.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.before().iter().chain(self.after()).copied()
    }

    /// The full logical text, gap excluded.
    pub fn to_text(&self) -> Vec<u8> {
        let mut text = Vec::with_capacity(self.len());
        text.extend_from_slice(self.before());
        text.extend_from_slice(self.after());
        text
    }

    /// Render the raw storage for debugging.
    ///
    /// `<` marks the gap start, `>` the gap end, `_` an unused gap slot.
    /// Printable ASCII is shown as-is and every other byte as `.`. A closed
    /// gap at the very end has no slot to mark its start, so only `>` shows.
    pub fn layout(&self) -> String {
        let capacity = self.capacity();
        let mut out = String::with_capacity(capacity + 4);
        out.push('[');
        for (i, &byte) in self.storage.iter().enumerate() {
            if i == self.gap_start {
                out.push('<');
            }
            if i == self.gap_end {
                out.push('>');
            }
            if (self.gap_start..self.gap_end).contains(&i) {
                out.push('_');
            } else if byte.is_ascii_graphic() || byte == b' ' {
                out.push(char::from(byte));
            } else {
                out.push('.');
            }
        }
        if self.gap_end == capacity {
            out.push('>');
        }
        out.push(']');
        out
    }

    /// Make room for `additional` inserts without further growth.
    ///
    /// Doubles the capacity as many times as needed in a single
    /// reallocation.
    ///
    /// # Errors
    ///
    /// Fails if the required capacity overflows or cannot be allocated. The
    /// buffer is unchanged in that case.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let gap = self.gap_end - self.gap_start;
        if additional <= gap {
            return Ok(());
        }
        let mut new_capacity = self.capacity();
        while new_capacity - self.len() < additional {
            new_capacity = new_capacity
                .checked_mul(2)
                .ok_or(BufferError::CapacityOverflow {
                    capacity: new_capacity,
                })?;
        }
        self.resize_storage(new_capacity)
    }

    /// Double the storage, keeping `after` flush with the new end.
    fn grow(&mut self) -> Result<()> {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_mul(2)
            .ok_or(BufferError::CapacityOverflow {
                capacity: old_capacity,
            })?;
        self.resize_storage(new_capacity)
    }

    fn resize_storage(&mut self, new_capacity: usize) -> Result<()> {
        let old_capacity = self.capacity();
        let mut storage = allocate(new_capacity)?;

        let after_len = old_capacity - self.gap_end;
        let new_gap_end = new_capacity - after_len;
        storage[..self.gap_start].copy_from_slice(self.before());
        storage[new_gap_end..].copy_from_slice(self.after());

        self.storage = storage;
        self.gap_end = new_gap_end;
        self.check_invariant();
        debug!(old_capacity, new_capacity, len = self.len(), "grew gap buffer");
        Ok(())
    }

    fn check_invariant(&self) {
        debug_assert!(
            self.gap_start <= self.gap_end && self.gap_end <= self.capacity(),
            "gap out of bounds: start={} end={} capacity={}",
            self.gap_start,
            self.gap_end,
            self.capacity()
        );
    }
}

fn allocate(capacity: usize) -> Result<Vec<u8>> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(capacity)
        .map_err(|_| BufferError::Allocation {
            requested: capacity,
        })?;
    storage.resize(capacity, 0);
    Ok(storage)
}

impl fmt::Debug for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GapBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("gap", &(self.gap_start..self.gap_end))
            .finish()
    }
}
