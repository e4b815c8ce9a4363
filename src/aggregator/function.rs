//! Aggregate function interface and type-erased state layout (spec §4.C,
//! Design Notes §9).
//!
//! Each [`AggregateFunction`] manages its own accumulator state as raw bytes
//! at a computed offset inside a per-row arena allocation (a "place"),
//! rather than as a Rust value the engine could type-check. This mirrors how
//! the hash table's value slot is a single opaque byte blob holding N
//! concatenated accumulator states back to back — the layout is computed
//! once per [`super::Aggregator`] from the declared function list, not once
//! per call.

use std::ptr::NonNull;
use std::sync::Arc;

use super::block::{Column, Value};

/// A raw pointer to one row's concatenated accumulator states.
///
/// `Place` is a thin, `Copy` wrapper so it can be stored in hash table value
/// slots and passed around without borrow-checker friction; the unsafe
/// surface is confined to [`AggregateFunction`] implementations, which are
/// the only code that interprets the bytes at an offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Place(pub NonNull<u8>);

// SAFETY: a `Place` is moved between threads only after the referenced
// memory's owning `Arena` has stopped being mutated by the allocating
// thread (merge/convert hand off fully-built aggregators before another
// thread touches their arenas).
unsafe impl Send for Place {}
unsafe impl Sync for Place {}

impl Place {
    /// Byte pointer at `offset` from the start of this place.
    ///
    /// # Safety
    /// `offset` must be within the bounds reserved for this place by the
    /// [`Layout`] that produced it.
    pub unsafe fn offset(&self, offset: usize) -> NonNull<u8> {
        // SAFETY: forwarded from the caller's obligation.
        unsafe { NonNull::new_unchecked(self.0.as_ptr().add(offset)) }
    }
}

/// Computed byte layout of the concatenated accumulator states for a fixed
/// ordered list of aggregate functions (Design Notes §9: "compute size_of()
/// + align_of() once, not per row").
#[derive(Clone, Debug)]
pub struct Layout {
    pub offsets: Vec<usize>,
    pub total_size: usize,
    pub align: usize,
}

impl Layout {
    pub fn compute(funcs: &[Arc<dyn AggregateFunction>]) -> Layout {
        let mut offsets = Vec::with_capacity(funcs.len());
        let mut cursor = 0usize;
        let mut max_align = 1usize;
        for f in funcs {
            let align = f.align_of().max(1);
            max_align = max_align.max(align);
            let aligned = cursor.next_multiple_of(align);
            offsets.push(aligned);
            cursor = aligned + f.size_of();
        }
        Layout {
            offsets,
            total_size: cursor.next_multiple_of(max_align.max(1)),
            align: max_align,
        }
    }
}

/// One aggregate function's accumulator contract.
///
/// Implementors own a fixed-size, fixed-alignment piece of a place's bytes;
/// `create`/`destroy` establish and tear down the invariant that those bytes
/// hold a valid accumulator, and every other method assumes it already
/// holds.
pub trait AggregateFunction: Send + Sync {
    fn name(&self) -> &'static str;

    fn size_of(&self) -> usize;
    fn align_of(&self) -> usize;

    /// Initialize the accumulator at `place + offset`.
    ///
    /// # Safety
    /// The bytes at `place + offset` for `size_of()` bytes must be
    /// allocated, unaliased, and not currently holding a live accumulator.
    unsafe fn create(&self, place: Place, offset: usize);

    /// Run the accumulator's destructor, if any.
    ///
    /// # Safety
    /// `place + offset` must currently hold a live accumulator created by
    /// [`Self::create`] and not yet destroyed.
    unsafe fn destroy(&self, place: Place, offset: usize);

    /// Skips the destroy pass entirely for functions whose state is `Copy`
    /// plain-old-data (e.g. a running sum), matching Design Notes §9's
    /// "most accumulators never need a destructor" observation.
    fn has_trivial_destructor(&self) -> bool {
        true
    }

    /// Fold one input row into the accumulator.
    ///
    /// # Safety
    /// `place + offset` must hold a live accumulator.
    unsafe fn add(&self, place: Place, offset: usize, args: &[&Column], row: usize);

    /// Fold every row `rows` into the accumulator. The default loops over
    /// [`Self::add`]; functions with a vectorizable update (e.g. `sum`)
    /// override this.
    ///
    /// # Safety
    /// Same obligations as [`Self::add`], for every row in `rows`.
    unsafe fn add_batch(&self, place: Place, offset: usize, args: &[&Column], rows: std::ops::Range<usize>) {
        for row in rows {
            // SAFETY: forwarded from the caller's obligation.
            unsafe { self.add(place, offset, args, row) };
        }
    }

    /// Fold `other`'s accumulator into `place`'s.
    ///
    /// # Safety
    /// Both `place + offset` and `other + offset` must hold live
    /// accumulators created by the same function.
    unsafe fn merge(&self, place: Place, other: Place, offset: usize);

    /// Produce the accumulator's final output value.
    ///
    /// # Safety
    /// `place + offset` must hold a live accumulator.
    unsafe fn insert_result(&self, place: Place, offset: usize) -> Value;

    /// Serialize the accumulator's state to bytes (spilling, checkpointing).
    ///
    /// # Safety
    /// `place + offset` must hold a live accumulator.
    unsafe fn serialize(&self, place: Place, offset: usize) -> Vec<u8>;

    /// Initialize the accumulator at `place + offset` from serialized bytes.
    ///
    /// # Safety
    /// `place + offset` must be allocated and not currently holding a live
    /// accumulator.
    unsafe fn deserialize(&self, place: Place, offset: usize, bytes: &[u8]);

    /// True for functions whose `insert_result` returns intermediate state
    /// rather than a finished value (a "-State" combinator, spec §4.E step
    /// 4's "expression evaluation is out of scope" non-goal means this crate
    /// never needs to unwrap one, so it always returns `false` here).
    fn is_state(&self) -> bool {
        false
    }

    /// True for functions that define their own emission schedule via
    /// [`Self::get_emit_times`]/[`Self::flush`] rather than only emitting at
    /// window close (spec §8 scenario 4).
    fn is_user_defined(&self) -> bool {
        false
    }

    /// Number of times this accumulator wants to emit its current value
    /// since the last call to [`Self::flush`]. Only meaningful when
    /// [`Self::is_user_defined`] is `true`.
    ///
    /// # Safety
    /// `place + offset` must hold a live accumulator.
    unsafe fn get_emit_times(&self, _place: Place, _offset: usize) -> u32 {
        0
    }

    /// Acknowledge the pending emits counted by [`Self::get_emit_times`],
    /// resetting the pending count to zero.
    ///
    /// # Safety
    /// `place + offset` must hold a live accumulator.
    unsafe fn flush(&self, _place: Place, _offset: usize) {}
}

macro_rules! trivial_state {
    ($ty:ty) => {
        unsafe fn create(&self, place: Place, offset: usize) {
            // SAFETY: forwarded from the caller's obligation; `<$ty>::default()`
            // is valid for all bit patterns this write produces.
            unsafe { place.offset(offset).cast::<$ty>().as_ptr().write(<$ty>::default()) };
        }

        unsafe fn destroy(&self, _place: Place, _offset: usize) {}

        fn has_trivial_destructor(&self) -> bool {
            true
        }

        fn size_of(&self) -> usize {
            std::mem::size_of::<$ty>()
        }

        fn align_of(&self) -> usize {
            std::mem::align_of::<$ty>()
        }
    };
}

/// `count(*)`.
pub struct CountFn;

impl AggregateFunction for CountFn {
    fn name(&self) -> &'static str {
        "count"
    }

    trivial_state!(u64);

    unsafe fn add(&self, place: Place, offset: usize, _args: &[&Column], _row: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let p = place.offset(offset).cast::<u64>().as_ptr();
            *p += 1;
        }
    }

    unsafe fn add_batch(&self, place: Place, offset: usize, _args: &[&Column], rows: std::ops::Range<usize>) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let p = place.offset(offset).cast::<u64>().as_ptr();
            *p += rows.len() as u64;
        }
    }

    unsafe fn merge(&self, place: Place, other: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let dst = place.offset(offset).cast::<u64>().as_ptr();
            let src = *other.offset(offset).cast::<u64>().as_ptr();
            *dst += src;
        }
    }

    unsafe fn insert_result(&self, place: Place, offset: usize) -> Value {
        // SAFETY: obligation forwarded from trait contract.
        Value::Int(unsafe { *place.offset(offset).cast::<u64>().as_ptr() } as i64)
    }

    unsafe fn serialize(&self, place: Place, offset: usize) -> Vec<u8> {
        // SAFETY: obligation forwarded from trait contract.
        unsafe { *place.offset(offset).cast::<u64>().as_ptr() }.to_le_bytes().to_vec()
    }

    unsafe fn deserialize(&self, place: Place, offset: usize, bytes: &[u8]) {
        let v = u64::from_le_bytes(bytes.try_into().expect("8-byte count state"));
        // SAFETY: obligation forwarded from trait contract.
        unsafe { place.offset(offset).cast::<u64>().as_ptr().write(v) };
    }
}

/// `sum(i64 column)`.
pub struct SumI64Fn {
    pub arg: usize,
}

impl AggregateFunction for SumI64Fn {
    fn name(&self) -> &'static str {
        "sum_i64"
    }

    trivial_state!(i64);

    unsafe fn add(&self, place: Place, offset: usize, args: &[&Column], row: usize) {
        let v = args[self.arg].value_at(row).as_i64();
        // SAFETY: obligation forwarded from trait contract.
        unsafe { *place.offset(offset).cast::<i64>().as_ptr() += v };
    }

    unsafe fn merge(&self, place: Place, other: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let src = *other.offset(offset).cast::<i64>().as_ptr();
            *place.offset(offset).cast::<i64>().as_ptr() += src;
        }
    }

    unsafe fn insert_result(&self, place: Place, offset: usize) -> Value {
        // SAFETY: obligation forwarded from trait contract.
        Value::Int(unsafe { *place.offset(offset).cast::<i64>().as_ptr() })
    }

    unsafe fn serialize(&self, place: Place, offset: usize) -> Vec<u8> {
        // SAFETY: obligation forwarded from trait contract.
        unsafe { *place.offset(offset).cast::<i64>().as_ptr() }.to_le_bytes().to_vec()
    }

    unsafe fn deserialize(&self, place: Place, offset: usize, bytes: &[u8]) {
        let v = i64::from_le_bytes(bytes.try_into().expect("8-byte sum state"));
        // SAFETY: obligation forwarded from trait contract.
        unsafe { place.offset(offset).cast::<i64>().as_ptr().write(v) };
    }
}

/// `sum(f64 column)`.
pub struct SumF64Fn {
    pub arg: usize,
}

impl AggregateFunction for SumF64Fn {
    fn name(&self) -> &'static str {
        "sum_f64"
    }

    trivial_state!(f64);

    unsafe fn add(&self, place: Place, offset: usize, args: &[&Column], row: usize) {
        let v = args[self.arg].value_at(row).as_f64();
        // SAFETY: obligation forwarded from trait contract.
        unsafe { *place.offset(offset).cast::<f64>().as_ptr() += v };
    }

    unsafe fn merge(&self, place: Place, other: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let src = *other.offset(offset).cast::<f64>().as_ptr();
            *place.offset(offset).cast::<f64>().as_ptr() += src;
        }
    }

    unsafe fn insert_result(&self, place: Place, offset: usize) -> Value {
        // SAFETY: obligation forwarded from trait contract.
        Value::Float(unsafe { *place.offset(offset).cast::<f64>().as_ptr() })
    }

    unsafe fn serialize(&self, place: Place, offset: usize) -> Vec<u8> {
        // SAFETY: obligation forwarded from trait contract.
        unsafe { *place.offset(offset).cast::<f64>().as_ptr() }.to_le_bytes().to_vec()
    }

    unsafe fn deserialize(&self, place: Place, offset: usize, bytes: &[u8]) {
        let v = f64::from_le_bytes(bytes.try_into().expect("8-byte sum state"));
        // SAFETY: obligation forwarded from trait contract.
        unsafe { place.offset(offset).cast::<f64>().as_ptr().write(v) };
    }
}

/// `min(i64 column)`.
pub struct MinI64Fn {
    pub arg: usize,
}

impl AggregateFunction for MinI64Fn {
    fn name(&self) -> &'static str {
        "min_i64"
    }

    unsafe fn create(&self, place: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe { place.offset(offset).cast::<i64>().as_ptr().write(i64::MAX) };
    }

    unsafe fn destroy(&self, _place: Place, _offset: usize) {}

    fn size_of(&self) -> usize {
        std::mem::size_of::<i64>()
    }

    fn align_of(&self) -> usize {
        std::mem::align_of::<i64>()
    }

    unsafe fn add(&self, place: Place, offset: usize, args: &[&Column], row: usize) {
        let v = args[self.arg].value_at(row).as_i64();
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let p = place.offset(offset).cast::<i64>().as_ptr();
            if v < *p {
                *p = v;
            }
        }
    }

    unsafe fn merge(&self, place: Place, other: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let src = *other.offset(offset).cast::<i64>().as_ptr();
            let p = place.offset(offset).cast::<i64>().as_ptr();
            if src < *p {
                *p = src;
            }
        }
    }

    unsafe fn insert_result(&self, place: Place, offset: usize) -> Value {
        // SAFETY: obligation forwarded from trait contract.
        Value::Int(unsafe { *place.offset(offset).cast::<i64>().as_ptr() })
    }

    unsafe fn serialize(&self, place: Place, offset: usize) -> Vec<u8> {
        // SAFETY: obligation forwarded from trait contract.
        unsafe { *place.offset(offset).cast::<i64>().as_ptr() }.to_le_bytes().to_vec()
    }

    unsafe fn deserialize(&self, place: Place, offset: usize, bytes: &[u8]) {
        let v = i64::from_le_bytes(bytes.try_into().expect("8-byte min state"));
        // SAFETY: obligation forwarded from trait contract.
        unsafe { place.offset(offset).cast::<i64>().as_ptr().write(v) };
    }
}

/// `max(i64 column)`.
pub struct MaxI64Fn {
    pub arg: usize,
}

impl AggregateFunction for MaxI64Fn {
    fn name(&self) -> &'static str {
        "max_i64"
    }

    unsafe fn create(&self, place: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe { place.offset(offset).cast::<i64>().as_ptr().write(i64::MIN) };
    }

    unsafe fn destroy(&self, _place: Place, _offset: usize) {}

    fn size_of(&self) -> usize {
        std::mem::size_of::<i64>()
    }

    fn align_of(&self) -> usize {
        std::mem::align_of::<i64>()
    }

    unsafe fn add(&self, place: Place, offset: usize, args: &[&Column], row: usize) {
        let v = args[self.arg].value_at(row).as_i64();
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let p = place.offset(offset).cast::<i64>().as_ptr();
            if v > *p {
                *p = v;
            }
        }
    }

    unsafe fn merge(&self, place: Place, other: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let src = *other.offset(offset).cast::<i64>().as_ptr();
            let p = place.offset(offset).cast::<i64>().as_ptr();
            if src > *p {
                *p = src;
            }
        }
    }

    unsafe fn insert_result(&self, place: Place, offset: usize) -> Value {
        // SAFETY: obligation forwarded from trait contract.
        Value::Int(unsafe { *place.offset(offset).cast::<i64>().as_ptr() })
    }

    unsafe fn serialize(&self, place: Place, offset: usize) -> Vec<u8> {
        // SAFETY: obligation forwarded from trait contract.
        unsafe { *place.offset(offset).cast::<i64>().as_ptr() }.to_le_bytes().to_vec()
    }

    unsafe fn deserialize(&self, place: Place, offset: usize, bytes: &[u8]) {
        let v = i64::from_le_bytes(bytes.try_into().expect("8-byte max state"));
        // SAFETY: obligation forwarded from trait contract.
        unsafe { place.offset(offset).cast::<i64>().as_ptr().write(v) };
    }
}

/// `avg(f64 column)`: state is `(sum: f64, count: u64)`.
pub struct AvgF64Fn {
    pub arg: usize,
}

impl AvgF64Fn {
    const COUNT_OFFSET: usize = 8;
}

impl AggregateFunction for AvgF64Fn {
    fn name(&self) -> &'static str {
        "avg_f64"
    }

    unsafe fn create(&self, place: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            place.offset(offset).cast::<f64>().as_ptr().write(0.0);
            place
                .offset(offset + Self::COUNT_OFFSET)
                .cast::<u64>()
                .as_ptr()
                .write(0);
        }
    }

    unsafe fn destroy(&self, _place: Place, _offset: usize) {}

    fn size_of(&self) -> usize {
        16
    }

    fn align_of(&self) -> usize {
        8
    }

    unsafe fn add(&self, place: Place, offset: usize, args: &[&Column], row: usize) {
        let v = args[self.arg].value_at(row).as_f64();
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            *place.offset(offset).cast::<f64>().as_ptr() += v;
            *place.offset(offset + Self::COUNT_OFFSET).cast::<u64>().as_ptr() += 1;
        }
    }

    unsafe fn merge(&self, place: Place, other: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let other_sum = *other.offset(offset).cast::<f64>().as_ptr();
            let other_count = *other.offset(offset + Self::COUNT_OFFSET).cast::<u64>().as_ptr();
            *place.offset(offset).cast::<f64>().as_ptr() += other_sum;
            *place.offset(offset + Self::COUNT_OFFSET).cast::<u64>().as_ptr() += other_count;
        }
    }

    unsafe fn insert_result(&self, place: Place, offset: usize) -> Value {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let sum = *place.offset(offset).cast::<f64>().as_ptr();
            let count = *place.offset(offset + Self::COUNT_OFFSET).cast::<u64>().as_ptr();
            if count == 0 {
                Value::Null
            } else {
                Value::Float(sum / count as f64)
            }
        }
    }

    unsafe fn serialize(&self, place: Place, offset: usize) -> Vec<u8> {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let sum = *place.offset(offset).cast::<f64>().as_ptr();
            let count = *place.offset(offset + Self::COUNT_OFFSET).cast::<u64>().as_ptr();
            let mut bytes = Vec::with_capacity(16);
            bytes.extend_from_slice(&sum.to_le_bytes());
            bytes.extend_from_slice(&count.to_le_bytes());
            bytes
        }
    }

    unsafe fn deserialize(&self, place: Place, offset: usize, bytes: &[u8]) {
        let sum = f64::from_le_bytes(bytes[0..8].try_into().expect("8-byte avg sum"));
        let count = u64::from_le_bytes(bytes[8..16].try_into().expect("8-byte avg count"));
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            place.offset(offset).cast::<f64>().as_ptr().write(sum);
            place
                .offset(offset + Self::COUNT_OFFSET)
                .cast::<u64>()
                .as_ptr()
                .write(count);
        }
    }
}

/// Demonstrates the user-defined emit hook (spec §8 scenario 4): emits the
/// running row count every `n` rows, independent of window close.
///
/// State is `(count: u64, last_emit_boundary: u64, pending: u32)`. `flush`
/// computes how many multiples of `n` were newly crossed since the last
/// flush and records that as `pending`; `get_emit_times` just reads it back.
/// Crossing more than one multiple inside a single batch collapses into one
/// emit of the latest value, rather than replaying each intermediate
/// multiple — an accepted simplification for a demonstrator function, noted
/// in `DESIGN.md`.
pub struct EmitEveryNFn {
    pub n: u64,
}

impl EmitEveryNFn {
    const LAST_BOUNDARY_OFFSET: usize = 8;
    const PENDING_OFFSET: usize = 16;
}

impl AggregateFunction for EmitEveryNFn {
    fn name(&self) -> &'static str {
        "emit_every_n"
    }

    unsafe fn create(&self, place: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            place.offset(offset).cast::<u64>().as_ptr().write(0);
            place
                .offset(offset + Self::LAST_BOUNDARY_OFFSET)
                .cast::<u64>()
                .as_ptr()
                .write(0);
            place
                .offset(offset + Self::PENDING_OFFSET)
                .cast::<u32>()
                .as_ptr()
                .write(0);
        }
    }

    unsafe fn destroy(&self, _place: Place, _offset: usize) {}

    fn size_of(&self) -> usize {
        20
    }

    fn align_of(&self) -> usize {
        8
    }

    unsafe fn add(&self, place: Place, offset: usize, _args: &[&Column], _row: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe { *place.offset(offset).cast::<u64>().as_ptr() += 1 };
    }

    unsafe fn merge(&self, place: Place, other: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let src_count = *other.offset(offset).cast::<u64>().as_ptr();
            *place.offset(offset).cast::<u64>().as_ptr() += src_count;
        }
    }

    unsafe fn insert_result(&self, place: Place, offset: usize) -> Value {
        // SAFETY: obligation forwarded from trait contract.
        Value::Int(unsafe { *place.offset(offset).cast::<u64>().as_ptr() } as i64)
    }

    unsafe fn serialize(&self, place: Place, offset: usize) -> Vec<u8> {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let count = *place.offset(offset).cast::<u64>().as_ptr();
            let boundary = *place.offset(offset + Self::LAST_BOUNDARY_OFFSET).cast::<u64>().as_ptr();
            let mut bytes = Vec::with_capacity(16);
            bytes.extend_from_slice(&count.to_le_bytes());
            bytes.extend_from_slice(&boundary.to_le_bytes());
            bytes
        }
    }

    unsafe fn deserialize(&self, place: Place, offset: usize, bytes: &[u8]) {
        let count = u64::from_le_bytes(bytes[0..8].try_into().expect("8-byte count"));
        let boundary = u64::from_le_bytes(bytes[8..16].try_into().expect("8-byte boundary"));
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            place.offset(offset).cast::<u64>().as_ptr().write(count);
            place
                .offset(offset + Self::LAST_BOUNDARY_OFFSET)
                .cast::<u64>()
                .as_ptr()
                .write(boundary);
            place.offset(offset + Self::PENDING_OFFSET).cast::<u32>().as_ptr().write(0);
        }
    }

    fn is_user_defined(&self) -> bool {
        true
    }

    unsafe fn get_emit_times(&self, place: Place, offset: usize) -> u32 {
        // SAFETY: obligation forwarded from trait contract.
        unsafe { *place.offset(offset + Self::PENDING_OFFSET).cast::<u32>().as_ptr() }
    }

    unsafe fn flush(&self, place: Place, offset: usize) {
        // SAFETY: obligation forwarded from trait contract.
        unsafe {
            let count = *place.offset(offset).cast::<u64>().as_ptr();
            let boundary_ptr = place.offset(offset + Self::LAST_BOUNDARY_OFFSET).cast::<u64>().as_ptr();
            let current_multiple = count / self.n.max(1);
            let pending = current_multiple.saturating_sub(*boundary_ptr);
            *boundary_ptr = current_multiple;
            place
                .offset(offset + Self::PENDING_OFFSET)
                .cast::<u32>()
                .as_ptr()
                .write(pending.min(u32::MAX as u64) as u32);
        }
    }
}
