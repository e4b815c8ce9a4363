//! Window eviction: retiring completed windows' keys and their backing
//! arena memory (spec §4.J).
//!
//! Windowed group-by keys (`GroupByKind::WindowStart`/`WindowEnd`) store the
//! window boundary as key column 0. Once a watermark advances past a
//! window's boundary (minus the retention margin in `streaming_window_count`),
//! its rows can be destroyed and the arena chunks backing them reclaimed in
//! one bulk free, rather than place by place.

use std::sync::Arc;

use super::function::{AggregateFunction, Layout};
use super::key::Key;
use super::params::{AggDesc, AggregatorParams};
use super::variants::{Table, Variants};

/// Stats returned by [`evict`], reported through
/// [`crate::metrics::MetricsCollector`] by callers (spec §4.J "log stats").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvictionStats {
    pub keys_evicted: usize,
    pub chunks_freed: usize,
    pub bytes_freed: usize,
}

fn funcs_of(params: &AggregatorParams) -> Vec<Arc<dyn AggregateFunction>> {
    params.aggregates.iter().map(|d| d.func.clone()).collect()
}

/// Decodes a window key column's `i64` boundary from its encoded [`Key`].
/// `None` for anything not fixed-width: string/bytes/serialized keys never
/// arise from a single window-boundary column (`choose_method` picks a fixed
/// tag whenever there's exactly one numeric key column).
fn decode_window_key(key: &Key) -> Option<i64> {
    match key {
        Key::Fixed8(b) => Some(b[0] as i64),
        Key::Fixed16(b) => Some(u16::from_le_bytes(*b) as i64),
        Key::Fixed32(b) => Some(u32::from_le_bytes(*b) as i64),
        Key::Fixed64(b) => Some(i64::from_le_bytes(*b)),
        Key::Fixed128(b) => Some(i64::from_le_bytes(b[..8].try_into().expect("8 bytes"))),
        Key::None | Key::Str(_) | Key::Bytes(_) | Key::Serialized(_) => None,
    }
}

/// Lowers `watermark` so at least `streaming_window_count` distinct window
/// boundaries currently present survive eviction, even if the watermark has
/// already passed them (spec §4.J "retain the last N windows").
fn retained_boundary(variants: &Variants, params: &AggregatorParams, watermark: i64) -> i64 {
    if params.streaming_window_count == 0 {
        return watermark;
    }

    let mut window_keys: Vec<i64> = Vec::new();
    variants.for_each_bucket(|_, table| {
        window_keys.extend(table.keys().filter_map(decode_window_key));
    });
    window_keys.sort_unstable();
    window_keys.dedup();

    if window_keys.len() <= params.streaming_window_count {
        return i64::MIN;
    }
    let keep_from = window_keys.len() - params.streaming_window_count;
    watermark.min(window_keys[keep_from] - 1)
}

fn evict_table(table: &mut Table, aggregates: &[AggDesc], offsets: &[usize], boundary: i64, stats: &mut EvictionStats) -> bool {
    let expired: Vec<Key> = table
        .keys()
        .filter(|k| decode_window_key(k).is_some_and(|wk| wk <= boundary))
        .cloned()
        .collect();

    for key in &expired {
        let Some(place) = table.remove(key) else { continue };
        for (desc, offset) in aggregates.iter().zip(offsets) {
            if !desc.func.has_trivial_destructor() {
                // SAFETY: `place` held a live accumulator for `desc.func`
                // that has just been removed from the table and not yet
                // destroyed.
                unsafe { desc.func.destroy(place, *offset) };
            }
        }
    }

    stats.keys_evicted += expired.len();
    !expired.is_empty()
}

/// Destroys every place whose window key is `<= watermark` (after applying
/// the `streaming_window_count` retention margin), then bulk-frees every
/// arena chunk that no longer backs a live place.
///
/// No-op unless `params.group_by` is windowed — `Ordinary`/`UserDefined`
/// group-bys have no watermark-ordered key to evict by and rely on the
/// caller retiring the whole aggregator instead.
pub fn evict(variants: &mut Variants, params: &AggregatorParams, watermark: i64) -> EvictionStats {
    let mut stats = EvictionStats::default();
    if !params.group_by.is_windowed() {
        return stats;
    }

    let offsets = &Layout::compute(&funcs_of(params)).offsets;
    let boundary = retained_boundary(variants, params, watermark);

    let any_evicted = match variants {
        Variants::WithoutKey { .. } => false,
        Variants::SingleLevel { table, .. } => evict_table(table, &params.aggregates, offsets, boundary, &mut stats),
        Variants::TwoLevel { buckets, .. } => buckets
            .iter_mut()
            .map(|t| evict_table(t, &params.aggregates, offsets, boundary, &mut stats))
            .fold(false, |acc, e| acc | e),
    };

    if any_evicted {
        let free_stats = variants.arena_mut().free_before(boundary);
        stats.chunks_freed = free_stats.chunks_freed;
        stats.bytes_freed = free_stats.bytes_freed;
    }

    stats
}
