//! Growable contiguous array of fixed-size byte records.
//!
//! A [`BlobVec`] stores homogeneous, untyped records whose size is chosen
//! at construction. Records are addressed by a 0-based `u32` index and are
//! always packed in `[0, len)`. Removal is swap-based: O(1), but the last
//! record moves into the vacated slot.
//!
//! Every accessor hands out a borrow of the array, so a view obtained from
//! [`append`](BlobVec::append), [`get`](BlobVec::get) or
//! [`data`](BlobVec::data) cannot outlive the next mutation.

use std::fmt;
use std::ops::Range;

use necs_core::Record;

/// Smallest capacity a growing array jumps to from empty.
pub const MIN_NON_ZERO_CAP: u32 = 4;

/// A resizable buffer of fixed-size byte records.
///
/// The backing buffer is exactly `capacity * element_size` bytes. It is
/// zero-filled when first allocated and grown, never shrunk implicitly.
#[derive(Clone)]
pub struct BlobVec {
    /// Backing storage. `data.len() == cap * element_size` at all times.
    data: Vec<u8>,
    element_size: usize,
    len: u32,
    cap: u32,
}

impl BlobVec {
    /// Create an empty array of `element_size`-byte records.
    ///
    /// Does not allocate until the first record is appended.
    pub fn new(element_size: usize) -> Self {
        Self::with_capacity(element_size, 0)
    }

    /// Create an empty array with room for exactly `initial_cap` records.
    pub fn with_capacity(element_size: usize, initial_cap: u32) -> Self {
        let mut vec = Self {
            data: Vec::new(),
            element_size,
            len: 0,
            cap: 0,
        };
        if initial_cap > 0 {
            vec.reallocate(initial_cap);
        }
        vec
    }

    /// Ensure room for at least `new_cap` records.
    ///
    /// No-op when `new_cap <= capacity()`. Otherwise the capacity becomes
    /// `max(new_cap, 2 * capacity(), MIN_NON_ZERO_CAP)`. Existing records are
    /// preserved byte-for-byte.
    pub fn grow(&mut self, new_cap: u32) {
        if new_cap <= self.cap {
            return;
        }
        let target = new_cap
            .max(self.cap.saturating_mul(2))
            .max(MIN_NON_ZERO_CAP);
        self.reallocate(target);
    }

    /// Ensure room for `additional` more records beyond the current length.
    pub fn reserve(&mut self, additional: u32) {
        self.grow(self.len.saturating_add(additional));
    }

    fn reallocate(&mut self, cap: u32) {
        let bytes = byte_len(self.element_size, cap);
        self.data.reserve_exact(bytes - self.data.len());
        self.data.resize(bytes, 0);
        self.cap = cap;
    }

    /// Drop all records. Capacity and the backing buffer are kept.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a new record slot and return it for the caller to fill.
    ///
    /// The slot may hold bytes left behind by an earlier record; callers
    /// must overwrite all of it.
    pub fn append(&mut self) -> &mut [u8] {
        let index = self.len;
        let new_len = index.checked_add(1).unwrap_or_else(|| capacity_overflow());
        self.grow(new_len);
        self.len = new_len;
        let range = self.range(index);
        &mut self.data[range]
    }

    /// Append a copy of `bytes` as a new record.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len()` differs from the element size.
    pub fn push(&mut self, bytes: &[u8]) {
        assert_eq!(
            bytes.len(),
            self.element_size,
            "record length must equal the element size"
        );
        self.append().copy_from_slice(bytes);
    }

    /// Append `value` encoded as a record.
    ///
    /// `R::SIZE` must not exceed the element size.
    pub fn push_record<R: Record>(&mut self, value: &R) {
        debug_assert!(R::SIZE <= self.element_size);
        value.write_bytes(self.append());
    }

    /// Decode the record at `index` as an `R`.
    pub fn read_record<R: Record>(&self, index: u32) -> R {
        debug_assert!(R::SIZE <= self.element_size);
        R::read_bytes(self.get(index))
    }

    /// The live records as one contiguous byte slice.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.live_bytes()]
    }

    /// The live records as one contiguous mutable byte slice.
    pub fn data_mut(&mut self) -> &mut [u8] {
        let end = self.live_bytes();
        &mut self.data[..end]
    }

    /// The record at `index`.
    ///
    /// `index` must be less than `len()`. This is only checked in debug
    /// builds; release builds may return a stale slot or panic.
    #[inline]
    pub fn get(&self, index: u32) -> &[u8] {
        debug_assert!(
            index < self.len,
            "index {index} out of bounds for length {}",
            self.len
        );
        &self.data[self.range(index)]
    }

    /// The record at `index`, mutably. Same precondition as [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, index: u32) -> &mut [u8] {
        debug_assert!(
            index < self.len,
            "index {index} out of bounds for length {}",
            self.len
        );
        let range = self.range(index);
        &mut self.data[range]
    }

    /// The record at `len() - 1`. The array must not be empty.
    pub fn get_last(&self) -> &[u8] {
        debug_assert!(self.len > 0, "get_last on empty BlobVec");
        self.get(self.len.wrapping_sub(1))
    }

    /// The record at `len() - 1`, mutably. The array must not be empty.
    pub fn get_last_mut(&mut self) -> &mut [u8] {
        debug_assert!(self.len > 0, "get_last_mut on empty BlobVec");
        self.get_mut(self.len.wrapping_sub(1))
    }

    /// Swap-remove the record at `index`.
    ///
    /// The last record's bytes are copied into `index` (unless `index` is
    /// the last slot) and the length shrinks by one. Order is not preserved.
    pub fn remove(&mut self, index: u32) {
        debug_assert!(
            index < self.len,
            "index {index} out of bounds for length {}",
            self.len
        );
        let last = self.len - 1;
        if index != last {
            let src = self.range(last);
            let dst = self.range(index).start;
            self.data.copy_within(src, dst);
        }
        self.len = last;
    }

    /// Number of live records.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether the array holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of records the buffer can hold without reallocating.
    pub fn capacity(&self) -> u32 {
        self.cap
    }

    /// Size of one record in bytes.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Memory usage of the backing buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len()
    }

    /// Iterate over the live records in index order.
    pub fn iter(&self) -> Records<'_> {
        Records {
            bytes: self.data(),
            element_size: self.element_size,
            remaining: self.len,
        }
    }

    /// Iterate mutably over the live records in index order.
    pub fn iter_mut(&mut self) -> RecordsMut<'_> {
        let element_size = self.element_size;
        let remaining = self.len;
        RecordsMut {
            bytes: self.data_mut(),
            element_size,
            remaining,
        }
    }

    #[inline]
    fn range(&self, index: u32) -> Range<usize> {
        let start = index as usize * self.element_size;
        start..start + self.element_size
    }

    fn live_bytes(&self) -> usize {
        self.len as usize * self.element_size
    }
}

impl fmt::Debug for BlobVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobVec")
            .field("element_size", &self.element_size)
            .field("len", &self.len)
            .field("cap", &self.cap)
            .finish_non_exhaustive()
    }
}

fn byte_len(element_size: usize, cap: u32) -> usize {
    element_size
        .checked_mul(cap as usize)
        .unwrap_or_else(|| capacity_overflow())
}

#[cold]
fn capacity_overflow() -> ! {
    panic!("BlobVec capacity overflow")
}

/// Iterator over the records of a [`BlobVec`].
///
/// Yields one `&[u8]` of `element_size` bytes per record, including
/// empty slices when the element size is zero.
#[derive(Clone, Debug)]
pub struct Records<'a> {
    bytes: &'a [u8],
    element_size: usize,
    remaining: u32,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (head, tail) = self.bytes.split_at(self.element_size);
        self.bytes = tail;
        self.remaining -= 1;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Records<'_> {}

/// Mutable iterator over the records of a [`BlobVec`].
#[derive(Debug)]
pub struct RecordsMut<'a> {
    bytes: &'a mut [u8],
    element_size: usize,
    remaining: u32,
}

impl<'a> Iterator for RecordsMut<'a> {
    type Item = &'a mut [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let bytes = std::mem::take(&mut self.bytes);
        let (head, tail) = bytes.split_at_mut(self.element_size);
        self.bytes = tail;
        self.remaining -= 1;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RecordsMut<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u32(vec: &mut BlobVec, v: u32) {
        vec.push(&v.to_ne_bytes());
    }

    fn read_u32(vec: &BlobVec, index: u32) -> u32 {
        vec.read_record(index)
    }

    #[test]
    fn new_does_not_allocate() {
        let vec = BlobVec::new(8);
        assert_eq!(vec.len(), 0);
        assert_eq!(vec.capacity(), 0);
        assert_eq!(vec.memory_bytes(), 0);
        assert!(vec.is_empty());
    }

    #[test]
    fn with_capacity_allocates_exactly() {
        let vec = BlobVec::with_capacity(12, 5);
        assert_eq!(vec.capacity(), 5);
        assert_eq!(vec.memory_bytes(), 60);
        assert_eq!(vec.len(), 0);
    }

    #[test]
    fn append_returns_slot_of_element_size() {
        let mut vec = BlobVec::new(3);
        let slot = vec.append();
        assert_eq!(slot.len(), 3);
        slot.copy_from_slice(&[1, 2, 3]);
        assert_eq!(vec.len(), 1);
        assert_eq!(vec.get(0), &[1, 2, 3]);
        assert_eq!(vec.get_last(), &[1, 2, 3]);
    }

    #[test]
    fn first_growth_uses_minimum_capacity() {
        let mut vec = BlobVec::new(4);
        push_u32(&mut vec, 1);
        assert_eq!(vec.capacity(), MIN_NON_ZERO_CAP);
    }

    #[test]
    fn growth_doubles_capacity() {
        let mut vec = BlobVec::new(4);
        for i in 0..5 {
            push_u32(&mut vec, i);
        }
        assert_eq!(vec.capacity(), 8);
        for i in 5..9 {
            push_u32(&mut vec, i);
        }
        assert_eq!(vec.capacity(), 16);
    }

    #[test]
    fn grow_to_larger_request_than_double() {
        let mut vec = BlobVec::with_capacity(4, 4);
        vec.grow(100);
        assert_eq!(vec.capacity(), 100);
    }

    #[test]
    fn grow_never_shrinks() {
        let mut vec = BlobVec::with_capacity(4, 32);
        vec.grow(8);
        assert_eq!(vec.capacity(), 32);
    }

    #[test]
    fn grow_preserves_records() {
        let mut vec = BlobVec::new(4);
        for i in 0..4 {
            push_u32(&mut vec, i * 11);
        }
        vec.grow(1000);
        assert_eq!(vec.len(), 4);
        for i in 0..4 {
            assert_eq!(read_u32(&vec, i), i * 11);
        }
    }

    #[test]
    fn remove_middle_moves_last_into_slot() {
        let mut vec = BlobVec::new(4);
        for v in [10, 20, 30, 40] {
            push_u32(&mut vec, v);
        }
        vec.remove(1);
        assert_eq!(vec.len(), 3);
        assert_eq!(read_u32(&vec, 0), 10);
        assert_eq!(read_u32(&vec, 1), 40);
        assert_eq!(read_u32(&vec, 2), 30);
    }

    #[test]
    fn remove_last_only_shrinks() {
        let mut vec = BlobVec::new(4);
        for v in [10, 20, 30] {
            push_u32(&mut vec, v);
        }
        vec.remove(2);
        assert_eq!(vec.len(), 2);
        assert_eq!(read_u32(&vec, 0), 10);
        assert_eq!(read_u32(&vec, 1), 20);
    }

    #[test]
    fn remove_single_element_empties() {
        let mut vec = BlobVec::new(4);
        push_u32(&mut vec, 5);
        vec.remove(0);
        assert!(vec.is_empty());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut vec = BlobVec::new(4);
        for v in 0..6 {
            push_u32(&mut vec, v);
        }
        let cap = vec.capacity();
        vec.clear();
        assert_eq!(vec.len(), 0);
        assert_eq!(vec.capacity(), cap);
        assert!(vec.data().is_empty());
    }

    #[test]
    fn data_spans_live_records_only() {
        let mut vec = BlobVec::with_capacity(2, 8);
        vec.push(&[1, 2]);
        vec.push(&[3, 4]);
        assert_eq!(vec.data(), &[1, 2, 3, 4]);
        vec.data_mut()[3] = 9;
        assert_eq!(vec.get(1), &[3, 9]);
    }

    #[test]
    fn get_last_mut_writes_through() {
        let mut vec = BlobVec::new(1);
        vec.push(&[1]);
        vec.push(&[2]);
        vec.get_last_mut()[0] = 7;
        assert_eq!(vec.get(1), &[7]);
    }

    #[test]
    fn iter_yields_records_in_order() {
        let mut vec = BlobVec::new(2);
        vec.push(&[1, 1]);
        vec.push(&[2, 2]);
        vec.push(&[3, 3]);
        let collected: Vec<&[u8]> = vec.iter().collect();
        let expected: Vec<&[u8]> = vec![&[1, 1], &[2, 2], &[3, 3]];
        assert_eq!(collected, expected);
        assert_eq!(vec.iter().len(), 3);
    }

    #[test]
    fn iter_mut_writes_through() {
        let mut vec = BlobVec::new(1);
        for v in 0..4u8 {
            vec.push(&[v]);
        }
        for record in vec.iter_mut() {
            record[0] *= 2;
        }
        assert_eq!(vec.data(), &[0, 2, 4, 6]);
    }

    #[test]
    fn zero_sized_records_are_counted() {
        let mut vec = BlobVec::new(0);
        for _ in 0..10 {
            assert!(vec.append().is_empty());
        }
        assert_eq!(vec.len(), 10);
        assert_eq!(vec.memory_bytes(), 0);
        assert_eq!(vec.iter().count(), 10);
        vec.remove(3);
        assert_eq!(vec.len(), 9);
    }

    #[test]
    fn reserve_counts_from_length() {
        let mut vec = BlobVec::with_capacity(4, 4);
        for v in 0..4 {
            push_u32(&mut vec, v);
        }
        vec.reserve(10);
        assert!(vec.capacity() >= 14);
    }

    #[test]
    #[should_panic(expected = "record length must equal the element size")]
    fn push_rejects_wrong_length() {
        let mut vec = BlobVec::new(4);
        vec.push(&[1, 2]);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn oversized_buffer_panics() {
        BlobVec::with_capacity(usize::MAX, 2);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn appended_records_read_back_in_order(
                values in proptest::collection::vec(any::<u64>(), 0..200),
            ) {
                let mut vec = BlobVec::new(8);
                for v in &values {
                    vec.push_record(v);
                }
                prop_assert_eq!(vec.len() as usize, values.len());
                prop_assert!(vec.capacity() >= vec.len());
                for (i, v) in values.iter().enumerate() {
                    prop_assert_eq!(vec.read_record::<u64>(i as u32), *v);
                }
            }

            #[test]
            fn swap_remove_matches_vec_swap_remove(
                values in proptest::collection::vec(any::<u32>(), 1..64),
                picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..64),
            ) {
                let mut vec = BlobVec::new(4);
                let mut model = values.clone();
                for v in &values {
                    vec.push_record(v);
                }
                for pick in picks {
                    if model.is_empty() {
                        break;
                    }
                    let i = pick.index(model.len());
                    model.swap_remove(i);
                    vec.remove(i as u32);
                    prop_assert_eq!(vec.len() as usize, model.len());
                }
                let stored: Vec<u32> = vec.iter().map(u32::read_bytes).collect();
                prop_assert_eq!(stored, model);
            }

            #[test]
            fn grow_keeps_len_and_bytes(
                values in proptest::collection::vec(any::<u16>(), 0..50),
                request in 0u32..500,
            ) {
                let mut vec = BlobVec::new(2);
                for v in &values {
                    vec.push_record(v);
                }
                let before = vec.data().to_vec();
                let cap_before = vec.capacity();
                vec.grow(request);
                prop_assert!(vec.capacity() >= cap_before);
                prop_assert!(vec.capacity() >= request);
                prop_assert_eq!(vec.data(), &before[..]);
            }
        }
    }
}
