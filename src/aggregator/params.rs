//! Immutable aggregator configuration (spec §3 "Aggregator parameters", §6).

use std::path::PathBuf;
use std::sync::Arc;

use super::function::AggregateFunction;

/// Declared type of a group-key column, used only by [`super::key::choose_method`]
/// to pick a hash-table specialization. Decoupled from the runtime [`super::block::Column`]
/// representation, which always stores widened `i64`/`f64`/`String`/`Vec<u8>` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyColumnType {
    Int8,
    Int16,
    Int32,
    Int64,
    Str,
    Bytes,
}

impl KeyColumnType {
    pub(crate) fn fixed_width(self) -> Option<usize> {
        match self {
            KeyColumnType::Int8 => Some(1),
            KeyColumnType::Int16 => Some(2),
            KeyColumnType::Int32 => Some(4),
            KeyColumnType::Int64 => Some(8),
            KeyColumnType::Str | KeyColumnType::Bytes => None,
        }
    }
}

/// What happens when `max_rows_to_group_by` is exceeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowMode {
    /// Raise [`super::error::AggError::TooManyRows`].
    Throw,
    /// Signal the caller to abort the batch (`abort = true`), no error.
    Break,
    /// Switch silently to `no_more_keys` mode: new keys fold into the
    /// overflow row.
    Any,
}

/// The shape of the group-by clause driving method choice and eviction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupByKind {
    /// No group-by clause (`without_key`).
    None,
    /// A plain list of group-key columns.
    Ordinary,
    /// First (or only) key column is a window-start timestamp.
    WindowStart,
    /// First (or only) key column is a window-end timestamp.
    WindowEnd,
    /// Caller-supplied partitioning key not tied to a window.
    UserDefined,
}

impl GroupByKind {
    pub fn is_windowed(self) -> bool {
        matches!(self, GroupByKind::WindowStart | GroupByKind::WindowEnd)
    }
}

/// Declares one aggregate computed by the engine.
pub struct AggDesc {
    pub func: Arc<dyn AggregateFunction>,
    /// Indices into the input block's argument columns for this aggregate.
    pub arg_columns: Vec<usize>,
    pub output_name: String,
}

/// The action a [`super::converter`]/[`super::merger`] call is performed for;
/// governs whether per-place state survives the call (spec §6, §7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvertAction {
    /// Distributed merge of partial aggregators: states are consumed.
    DistributedMerge,
    /// Spilling to the temp filesystem: states are always destroyed after
    /// serializing.
    WriteToTempFs,
    /// Checkpointing: states are always preserved.
    Checkpoint,
    /// In-process merge of two-level buckets: states are consumed.
    InternalMerge,
    /// A streaming tick emitting current results without ending the group's
    /// lifetime.
    StreamingEmit,
}

/// Immutable configuration for one [`super::Aggregator`] instance (spec §6
/// "Aggregator parameters").
pub struct AggregatorParams {
    pub key_types: Vec<KeyColumnType>,
    pub key_nullable: Vec<bool>,
    pub key_columns: Vec<usize>,
    pub aggregates: Vec<AggDesc>,

    pub max_rows_to_group_by: usize,
    pub group_by_overflow_mode: OverflowMode,

    pub group_by_two_level_threshold: usize,
    pub group_by_two_level_threshold_bytes: usize,

    pub max_bytes_before_external_group_by: usize,
    pub min_free_disk_space: u64,

    pub keep_state: bool,
    pub group_by: GroupByKind,
    pub streaming_window_count: usize,
    pub delta_col_pos: Option<usize>,
    pub window_keys_num: u8,
    pub low_cardinality: bool,

    pub tmp_disk_path: PathBuf,
    pub max_threads: usize,
}

impl AggregatorParams {
    pub fn new(key_types: Vec<KeyColumnType>, key_columns: Vec<usize>, aggregates: Vec<AggDesc>) -> Self {
        let key_nullable = vec![false; key_types.len()];
        Self {
            key_types,
            key_nullable,
            key_columns,
            aggregates,
            max_rows_to_group_by: 0,
            group_by_overflow_mode: OverflowMode::Throw,
            group_by_two_level_threshold: 100_000,
            group_by_two_level_threshold_bytes: 50_000_000,
            max_bytes_before_external_group_by: 0,
            min_free_disk_space: 0,
            keep_state: false,
            group_by: GroupByKind::Ordinary,
            streaming_window_count: 0,
            delta_col_pos: None,
            window_keys_num: 0,
            low_cardinality: false,
            tmp_disk_path: PathBuf::from("./streamagg_tmp"),
            max_threads: 1,
        }
    }

    pub fn without_key(aggregates: Vec<AggDesc>) -> Self {
        let mut p = Self::new(Vec::new(), Vec::new(), aggregates);
        p.group_by = GroupByKind::None;
        p
    }

    pub fn two_level_enabled(&self) -> bool {
        self.group_by_two_level_threshold > 0 && self.group_by_two_level_threshold_bytes > 0
    }

    pub fn crosses_two_level_threshold(&self, rows: usize, bytes: usize) -> bool {
        self.two_level_enabled()
            && rows >= self.group_by_two_level_threshold
            && bytes >= self.group_by_two_level_threshold_bytes
    }

    pub fn external_spill_enabled(&self) -> bool {
        self.max_bytes_before_external_group_by > 0
    }
}
