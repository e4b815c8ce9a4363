//! Streaming group-by aggregation engine.
//!
//! Components, matched to the spec's lettered modules:
//!
//! - [`arena`] (A): bump-allocated, watermark-tagged memory for accumulator state.
//! - [`key`] (B): group-key encoding and hash-method dispatch.
//! - [`function`] (C): the `AggregateFunction` accumulator contract.
//! - [`variants`] (D): the polymorphic single-/two-level hash table.
//! - [`executor`] (E): folding input blocks into a `Variants` table.
//! - [`converter`] (F): converting a `Variants` table into output blocks.
//! - [`merger`] (G): merging multiple partial `Variants` tables into one.
//! - [`spill`] (H): spilling/restoring blocks to the temp filesystem.
//! - [`checkpoint`] (I): serializing/restoring an aggregator's full state.
//! - [`eviction`] (J): retiring completed windows' keys and arena memory.
//!
//! [`Aggregator`] ties these together into the single entry point the
//! `PCollection`/`Runner` integration (`crate::helpers::group_aggregate`)
//! drives: one call per input block to fold it in, one call to merge
//! partials built on other threads, one call to emit current results.

pub mod arena;
pub mod block;
pub mod checkpoint;
pub mod converter;
pub mod error;
pub mod eviction;
pub mod executor;
pub mod function;
pub mod key;
pub mod merger;
pub mod params;
pub mod spill;
pub mod variants;

use std::sync::Arc;

use self::block::Block;
use self::error::AggResult;
use self::executor::{BatchExecutor, BatchOutcome};
use self::params::{AggregatorParams, ConvertAction};
use self::variants::Variants;

/// Owns one running group-by's hash table and the executor driving it.
///
/// This is the engine's single caller-facing handle: everything else in
/// this module (`arena`, `key`, `function`, `variants`, `executor`,
/// `converter`, `merger`, `spill`, `checkpoint`, `eviction`) is reached
/// through it rather than used standalone, mirroring how a single
/// ClickHouse/proton `Aggregator` instance owns one query's worth of
/// partial-aggregation state.
pub struct Aggregator {
    params: Arc<AggregatorParams>,
    executor: BatchExecutor,
    variants: Variants,
    /// Created lazily on the first spill (spec §4.E step 8). `None` means
    /// nothing has ever spilled, which is also true whenever
    /// `external_spill_enabled()` is false.
    spill: Option<spill::SpillManager>,
}

impl Aggregator {
    pub fn new(params: Arc<AggregatorParams>) -> Self {
        let variants = if params.key_columns.is_empty() {
            Variants::without_key()
        } else {
            Variants::single_level()
        };
        Self {
            executor: BatchExecutor::new(params.clone()),
            params,
            variants,
            spill: None,
        }
    }

    pub fn params(&self) -> &Arc<AggregatorParams> {
        &self.params
    }

    /// Folds one input block into this aggregator's table (spec §4.E).
    /// `window_key_col` names the block column (if any) holding the window
    /// boundary that drives arena-watermark tagging and, later, eviction.
    /// After the fold, checks whether the table is two-level and over the
    /// configured byte threshold and, if so, spills it to disk (spec §4.E
    /// step 8).
    pub fn add_block(&mut self, block: &Block, window_key_col: Option<usize>) -> AggResult<BatchOutcome> {
        let outcome = self.executor.execute_batch(&mut self.variants, block, window_key_col)?;
        self.maybe_spill()?;
        Ok(outcome)
    }

    /// Spills the current table to disk and resets it to empty if it is
    /// two-level and has grown past `max_bytes_before_external_group_by`
    /// (spec §4.E step 8, §4.H). No-op otherwise.
    fn maybe_spill(&mut self) -> AggResult<()> {
        if !self.params.external_spill_enabled() || !self.variants.is_two_level() {
            return Ok(());
        }
        if self.variants.bytes_allocated() <= self.params.max_bytes_before_external_group_by {
            return Ok(());
        }
        let blocks = converter::convert_to_intermediate_blocks(&self.variants, &self.params, ConvertAction::WriteToTempFs);
        let params = &self.params;
        let mgr = self
            .spill
            .get_or_insert_with(|| spill::SpillManager::new(params.tmp_disk_path.clone(), params.min_free_disk_space));
        mgr.spill(blocks)?;
        self.variants = Variants::two_level();
        self.executor.mark_spilled();
        Ok(())
    }

    /// Retires completed windows (spec §4.J). No-op for non-windowed
    /// group-bys.
    pub fn evict(&mut self, watermark: i64) -> eviction::EvictionStats {
        eviction::evict(&mut self.variants, &self.params, watermark)
    }

    /// Converts the current table to output blocks without ending the
    /// aggregator's lifetime (a streaming tick, spec §4.F/§8 scenario 4).
    pub fn emit(&self) -> Vec<Block> {
        converter::convert_to_blocks(&self.variants, &self.params, ConvertAction::StreamingEmit)
    }

    /// Consumes this aggregator, converting its final table to output
    /// blocks (spec §4.F). If anything was spilled along the way, restores
    /// and merges it back in first (spec §4.H step 4) so the result
    /// reflects every row ever added, not just what's still in memory.
    pub fn finish(mut self) -> AggResult<Vec<Block>> {
        self.executor.finish();
        if let Some(mgr) = self.spill.take() {
            let spilled_blocks = mgr.restore_all()?;
            if !spilled_blocks.is_empty() {
                let restored = converter::rebuild_from_intermediate_blocks(&spilled_blocks, &self.params)?;
                let offsets = self.executor.layout.offsets.clone();
                self.variants =
                    merger::merge_all(vec![self.variants, restored], &self.params, &offsets, ConvertAction::DistributedMerge)?;
            }
        }
        let blocks = converter::convert_to_blocks(&self.variants, &self.params, ConvertAction::DistributedMerge);
        self.executor.terminate();
        Ok(blocks)
    }

    /// Snapshots full accumulator state to checkpoint bytes (spec §4.I),
    /// preserving every place untouched.
    pub fn checkpoint(&self, inited: bool) -> AggResult<Vec<u8>> {
        checkpoint::encode(&self.variants, &self.params, inited)
    }

    /// Rebuilds an `Aggregator` from checkpoint bytes previously produced by
    /// [`Self::checkpoint`] (spec §4.I "recover").
    pub fn recover(params: Arc<AggregatorParams>, bytes: &[u8]) -> AggResult<Self> {
        let (blocks, _inited) = checkpoint::decode(bytes, &params)?;
        let variants = checkpoint::rebuild_variants(&blocks, &params)?;
        Ok(Self {
            executor: BatchExecutor::new(params.clone()),
            params,
            variants,
            spill: None,
        })
    }

    /// Consumes `self` and `other`, merging `other`'s table into this one's
    /// (spec §4.G). Used to fold partial aggregators built on different
    /// threads/partitions back into one. Any data either side spilled is
    /// restored and folded in too, so the merged aggregator carries no spill
    /// debt forward.
    pub fn merge(mut self, mut other: Self) -> AggResult<Self> {
        let offsets = self.executor.layout.offsets.clone();
        let params = self.params.clone();
        let mut parts = vec![self.variants, other.variants];
        for mgr in [self.spill.take(), other.spill.take()].into_iter().flatten() {
            let spilled_blocks = mgr.restore_all()?;
            if !spilled_blocks.is_empty() {
                parts.push(converter::rebuild_from_intermediate_blocks(&spilled_blocks, &params)?);
            }
        }
        let merged = merger::merge_all(parts, &params, &offsets, ConvertAction::InternalMerge)?;
        Ok(Self {
            executor: BatchExecutor::new(params.clone()),
            params,
            variants: merged,
            spill: None,
        })
    }

    pub fn row_count(&self) -> usize {
        self.variants.size()
    }

    /// Whether the backing table has converted to two-level (spec §4.D),
    /// exposed for callers/tests that want to observe the threshold
    /// crossover without reaching into the engine's internals.
    pub fn is_two_level(&self) -> bool {
        self.variants.is_two_level()
    }
}
