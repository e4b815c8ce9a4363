//! The group-by hash table itself, single- and two-level (spec §4.D).

use std::collections::HashMap;
use std::sync::Arc;

use super::arena::Arena;
use super::function::{AggregateFunction, Layout, Place};
use super::key::Key;

/// Number of buckets a two-level table partitions into. ClickHouse uses 256;
/// this crate uses 16, since the workloads this spec targets (bounded
/// windows, moderate cardinality) don't need that much merge/convert
/// parallelism and a smaller bucket count keeps per-bucket overhead (each
/// bucket is a full `HashMap`) from dominating at the threshold crossover
/// point. Decided as an explicit Open Question resolution; see `DESIGN.md`.
pub const NUM_BUCKETS: usize = 16;

/// One hash table mapping group keys to accumulator places.
pub type Table = HashMap<Key, Place>;

/// The group-by hash table, in either its single-level or two-level form.
///
/// A `Variants` owns the [`Arena`] backing every place it hands out, plus
/// (when in `no_more_keys` mode, spec §4.E step 7) a dedicated overflow
/// place that absorbs rows whose key would otherwise grow the table.
pub enum Variants {
    WithoutKey {
        place: Option<Place>,
        arena: Arena,
    },
    SingleLevel {
        table: Table,
        arena: Arena,
        overflow: Option<Place>,
    },
    TwoLevel {
        buckets: Vec<Table>,
        arena: Arena,
        overflow: Option<Place>,
    },
}

impl Variants {
    pub fn without_key() -> Self {
        Variants::WithoutKey {
            place: None,
            arena: Arena::new(),
        }
    }

    pub fn single_level() -> Self {
        Variants::SingleLevel {
            table: HashMap::new(),
            arena: Arena::new(),
            overflow: None,
        }
    }

    pub fn two_level() -> Self {
        Variants::TwoLevel {
            buckets: (0..NUM_BUCKETS).map(|_| HashMap::new()).collect(),
            arena: Arena::new(),
            overflow: None,
        }
    }

    pub fn is_two_level(&self) -> bool {
        matches!(self, Variants::TwoLevel { .. })
    }

    /// Row count across every live key (excludes the overflow row).
    pub fn size(&self) -> usize {
        match self {
            Variants::WithoutKey { place, .. } => place.is_some() as usize,
            Variants::SingleLevel { table, .. } => table.len(),
            Variants::TwoLevel { buckets, .. } => buckets.iter().map(|b| b.len()).sum(),
        }
    }

    pub fn bytes_allocated(&self) -> usize {
        match self {
            Variants::WithoutKey { arena, .. } => arena.bytes_allocated(),
            Variants::SingleLevel { arena, .. } => arena.bytes_allocated(),
            Variants::TwoLevel { arena, .. } => arena.bytes_allocated(),
        }
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        match self {
            Variants::WithoutKey { arena, .. } => arena,
            Variants::SingleLevel { arena, .. } => arena,
            Variants::TwoLevel { arena, .. } => arena,
        }
    }

    /// Whether crossing the configured threshold should trigger conversion
    /// to two-level, per [`super::params::AggregatorParams::crosses_two_level_threshold`].
    pub fn is_convertible_to_two_level(&self) -> bool {
        matches!(self, Variants::SingleLevel { .. })
    }

    /// Find an existing place for `key`, or allocate and `create` a new one
    /// via `layout`/`funcs`. Returns `None` only when `no_more_keys` is set
    /// and `key` is new (caller should route the row to the overflow place
    /// instead, spec §4.E step 7).
    pub fn find_or_create(
        &mut self,
        key: Key,
        layout: &Layout,
        funcs: &[Arc<dyn AggregateFunction>],
        no_more_keys: bool,
    ) -> Option<Place> {
        match self {
            Variants::WithoutKey { place, arena } => {
                if place.is_none() {
                    *place = Some(new_place(arena, layout, funcs));
                }
                *place
            }
            Variants::SingleLevel { table, arena, .. } => {
                find_or_create_in(table, key, arena, layout, funcs, no_more_keys)
            }
            Variants::TwoLevel { buckets, arena, .. } => {
                let idx = key.bucket(NUM_BUCKETS);
                find_or_create_in(&mut buckets[idx], key, arena, layout, funcs, no_more_keys)
            }
        }
    }

    /// The dedicated overflow-row place used once `no_more_keys` mode is
    /// entered (spec §4.E step 7, `OverflowMode::Any`).
    pub fn overflow_place(&mut self, layout: &Layout, funcs: &[Arc<dyn AggregateFunction>]) -> Place {
        let (overflow, arena) = match self {
            Variants::WithoutKey { .. } => unreachable!("without_key tables have no overflow row"),
            Variants::SingleLevel { overflow, arena, .. } => (overflow, arena),
            Variants::TwoLevel { overflow, arena, .. } => (overflow, arena),
        };
        if overflow.is_none() {
            *overflow = Some(new_place(arena, layout, funcs));
        }
        overflow.expect("just initialized")
    }

    /// Converts a single-level table into a two-level one in place, by
    /// rehashing every existing entry into its bucket (spec §4.D "convert to
    /// two-level").
    pub fn convert_to_two_level(&mut self) {
        let Variants::SingleLevel { table, arena, overflow } = self else {
            return;
        };
        let mut buckets: Vec<Table> = (0..NUM_BUCKETS).map(|_| HashMap::new()).collect();
        for (key, place) in table.drain() {
            let idx = key.bucket(NUM_BUCKETS);
            buckets[idx].insert(key, place);
        }
        *self = Variants::TwoLevel {
            buckets,
            arena: std::mem::take(arena),
            overflow: overflow.take(),
        };
    }

    /// Runs `f` once per bucket (spec §4.F/§4.G "bucket-parallel"), handing
    /// back `(bucket_index, table)` pairs. Only meaningful for two-level
    /// tables; single-level tables are treated as one bucket (index 0).
    pub fn for_each_bucket<R>(&self, mut f: impl FnMut(usize, &Table) -> R) -> Vec<R> {
        match self {
            Variants::TwoLevel { buckets, .. } => {
                buckets.iter().enumerate().map(|(i, b)| f(i, b)).collect()
            }
            Variants::SingleLevel { table, .. } => vec![f(0, table)],
            Variants::WithoutKey { .. } => Vec::new(),
        }
    }

    /// Whether `key` already has a place, without allocating one if not.
    /// Used by restore paths that need to tell a genuinely new key apart
    /// from one reappearing across independently-restored blocks (spec
    /// §4.G step 4: new vs. existing key takes a different path).
    pub fn contains_key(&self, key: &Key) -> bool {
        match self {
            Variants::WithoutKey { place, .. } => place.is_some(),
            Variants::SingleLevel { table, .. } => table.contains_key(key),
            Variants::TwoLevel { buckets, .. } => {
                let idx = key.bucket(NUM_BUCKETS);
                buckets[idx].contains_key(key)
            }
        }
    }

    pub fn bucket(&self, idx: usize) -> Option<&Table> {
        match self {
            Variants::TwoLevel { buckets, .. } => buckets.get(idx),
            Variants::SingleLevel { table, .. } if idx == 0 => Some(table),
            _ => None,
        }
    }
}

/// Allocates and `create`s a fresh place directly from `arena`, bypassing
/// any table lookup. Used by [`super::converter::rebuild_from_intermediate_blocks`]
/// to build a scratch place to `merge` into an already-restored key (spec
/// §4.G step 4: "a new allocation is required").
pub(crate) fn new_place(arena: &mut Arena, layout: &Layout, funcs: &[Arc<dyn AggregateFunction>]) -> Place {
    let ptr = arena.aligned_alloc(layout.total_size.max(1), layout.align.max(1));
    let place = Place(ptr);
    for (f, &offset) in funcs.iter().zip(&layout.offsets) {
        // SAFETY: `ptr` was just allocated with room for `layout.total_size`
        // bytes at `layout.align`, and `offset` was computed by the same
        // `Layout` so `offset + f.size_of() <= layout.total_size`. No other
        // reference to this place exists yet.
        unsafe { f.create(place, offset) };
    }
    place
}

fn find_or_create_in(
    table: &mut Table,
    key: Key,
    arena: &mut Arena,
    layout: &Layout,
    funcs: &[Arc<dyn AggregateFunction>],
    no_more_keys: bool,
) -> Option<Place> {
    if let Some(&place) = table.get(&key) {
        return Some(place);
    }
    if no_more_keys {
        return None;
    }
    let place = new_place(arena, layout, funcs);
    table.insert(key, place);
    Some(place)
}
