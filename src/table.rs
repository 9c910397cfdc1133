use std::ops::Index;

use crate::utils::MyHash;

/// Marks the end of a bucket chain.
const NIL: usize = usize::MAX;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    next: usize,
}

impl<T> Entry<T> {
    /// Create a new cell with the given value.
    pub fn new(value: T) -> Self {
        Self { value, next: NIL }
    }

    /// Get the reference to the value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Get the index of the next cell in the bucket chain.
    pub fn next(&self) -> usize {
        self.next
    }
    /// Set the index of the next cell in the bucket chain.
    pub fn set_next(&mut self, next: usize) {
        self.next = next;
    }
}

/// Unique table: stores each structurally distinct value exactly once.
///
/// Values are addressed by dense indices in insertion order. Nothing is ever
/// removed, so an index stays valid for the lifetime of the table.
#[derive(Debug, Clone)]
pub struct Table<T> {
    data: Vec<Entry<T>>,

    buckets: Vec<usize>,
    bitmask: u64,
}

impl<T> Table<T> {
    /// Create a new table with `2^bits` buckets.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Table bits should be in the range 0..=31");

        let buckets_size = 1 << bits;
        let buckets = vec![NIL; buckets_size];
        let bitmask = (buckets_size - 1) as u64;

        Self {
            data: Vec::new(),
            buckets,
            bitmask,
        }
    }

    /// Get the number of stored values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        self.data[index].value()
    }

    /// Get the index of the next cell in the same bucket.
    pub fn next(&self, index: usize) -> usize {
        self.data[index].next()
    }

    /// Iterate over all values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter().map(|e| e.value())
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Find the index of a value equal to the given one.
    pub fn find(&self, value: &T) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(value)];
        while index != NIL {
            if value == self.value(index) {
                return Some(index);
            }
            index = self.next(index);
        }
        None
    }

    /// Put a value into the table.
    ///
    /// Returns the index of the stored value and whether it was newly added.
    pub fn put(&mut self, value: T) -> (usize, bool) {
        let bucket_index = self.bucket_index(&value);
        let mut index = self.buckets[bucket_index];

        if index == NIL {
            // Create new entry and put it into the bucket.
            let i = self.add(value);
            self.buckets[bucket_index] = i;
            return (i, true);
        }

        loop {
            if &value == self.value(index) {
                // The value already exists.
                return (index, false);
            }

            let next = self.next(index);

            if next == NIL {
                // Create new entry and append it to the bucket.
                let i = self.add(value);
                self.data[index].set_next(i);
                return (i, true);
            } else {
                // Go to the next entry in the bucket.
                index = next;
            }
        }
    }

    fn add(&mut self, value: T) -> usize {
        self.data.push(Entry::new(value));
        self.data.len() - 1
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}
