//! Converting a [`Variants`] table into output [`Block`]s (spec §4.F).

use std::sync::Arc;

use rayon::prelude::*;

use super::block::{Block, Column, ColumnBuilder, Value};
use super::error::{AggError, AggResult};
use super::function::{AggregateFunction, Layout};
use super::key::Key;
use super::params::{AggDesc, AggregatorParams, ConvertAction};
use super::variants::{Table, Variants};

/// Column name a serialized accumulator's bytes are stored under in an
/// intermediate block (spec §4.F "Intermediate: append the raw place
/// pointers into a state column").
fn state_column_name(desc: &AggDesc) -> String {
    format!("state_{}", desc.output_name)
}

/// Converts one bucket's table into a [`Block`]. States are destroyed
/// unless `action` is [`ConvertAction::Checkpoint`] (spec §6: "Checkpointing
/// ... states are always preserved").
fn convert_table(
    table: &Table,
    key_names: &[String],
    aggregates: &[AggDesc],
    offsets: &[usize],
    preserve_state: bool,
    bucket_num: i32,
) -> Block {
    // Keys are reconstructed generically via their raw encoding; callers
    // that need typed key columns back (rather than the opaque `Key` bytes)
    // post-process via `Key`'s variant, matched below.
    let mut decoded_keys: Vec<Vec<super::block::Value>> = vec![Vec::new(); key_names.len()];
    let mut result_builders: Vec<ColumnBuilder> = aggregates
        .iter()
        .map(|d| ColumnBuilder::new(result_column_type(&d.func)))
        .collect();

    for (key, place) in table.iter() {
        let repeat = emit_repeat_count(*place, aggregates, offsets);
        for ((desc, offset), builder) in aggregates.iter().zip(offsets).zip(&mut result_builders) {
            // SAFETY: `place` holds a live accumulator for `desc.func`,
            // created with the same layout these offsets were computed
            // from.
            let value = unsafe { desc.func.insert_result(*place, *offset) };
            for _ in 0..repeat {
                builder.push_value(value.clone());
            }
        }
        for _ in 0..repeat {
            push_decoded_key(key, &mut decoded_keys);
        }
        if !preserve_state {
            for (desc, offset) in aggregates.iter().zip(offsets) {
                if !desc.func.is_state() && !desc.func.has_trivial_destructor() {
                    // SAFETY: `place` holds a live accumulator for this
                    // aggregate that has not yet been destroyed.
                    unsafe { desc.func.destroy(*place, *offset) };
                }
            }
        }
    }

    let mut columns: Vec<(String, super::block::Column)> = Vec::new();
    for (name, values) in key_names.iter().zip(decoded_keys) {
        let mut builder = ColumnBuilder::new(infer_key_column_type(&values));
        for v in values {
            builder.push_value(v);
        }
        columns.push((name.clone(), builder.finish()));
    }
    for (desc, builder) in aggregates.iter().zip(result_builders) {
        columns.push((desc.output_name.clone(), builder.finish()));
    }

    Block::bucketed(columns, bucket_num)
}

fn infer_key_column_type(values: &[super::block::Value]) -> super::block::ColumnType {
    use super::block::{ColumnType, Value};
    match values.first() {
        Some(Value::Int(_)) | None => ColumnType::Int64,
        Some(Value::Float(_)) => ColumnType::Float64,
        Some(Value::Str(_)) => ColumnType::Str,
        Some(Value::Bytes(_)) => ColumnType::Bytes,
        Some(Value::Null) => ColumnType::Int64,
    }
}

fn push_decoded_key(key: &Key, out: &mut [Vec<super::block::Value>]) {
    use super::block::Value;
    let slot = out.first_mut().expect("at least one key column expected");
    let value = match key {
        Key::None => return,
        Key::Fixed8(b) => Value::Int(b[0] as i64),
        Key::Fixed16(b) => Value::Int(u16::from_le_bytes(*b) as i64),
        Key::Fixed32(b) => Value::Int(u32::from_le_bytes(*b) as i64),
        Key::Fixed64(b) => Value::Int(i64::from_le_bytes(*b)),
        Key::Fixed128(b) => Value::Int(i64::from_le_bytes(b[..8].try_into().expect("8 bytes"))),
        Key::Str(s) => Value::Str(s.to_string()),
        Key::Bytes(b) => Value::Bytes(b.to_vec()),
        Key::Serialized(b) => Value::Bytes(b.to_vec()),
    };
    slot.push(value);
}

fn result_column_type(func: &Arc<dyn AggregateFunction>) -> super::block::ColumnType {
    use super::block::ColumnType;
    match func.name() {
        "sum_f64" | "avg_f64" => ColumnType::Float64,
        _ => ColumnType::Int64,
    }
}

/// Converts an entire [`Variants`] table to output blocks. Two-level tables
/// convert one block per bucket in parallel via rayon (spec §4.F "bucket
/// parallel convert"); single-level and without-key tables produce one
/// block.
pub fn convert_to_blocks(variants: &Variants, params: &AggregatorParams, action: ConvertAction) -> Vec<Block> {
    let key_names: Vec<String> = (0..params.key_columns.len().max(1))
        .map(|i| format!("key_{i}"))
        .collect();
    let offsets = &super::function::Layout::compute(&funcs_of(params)).offsets;
    // Spec §7 "place destruction policy on final emit": a `checkpoint`
    // conversion always preserves state, and so does a `streaming-emit`
    // conversion when the aggregator is configured with `keep_state` (the
    // continuation case — the next batch still needs a live accumulator at
    // this place). Every other action (`distributed-merge`,
    // `internal-merge`, `write-to-temp-fs`) destroys after reading, since
    // the place's owning table is about to be dropped or replaced.
    let preserve_state = matches!(action, ConvertAction::Checkpoint)
        || (matches!(action, ConvertAction::StreamingEmit) && params.keep_state);

    match variants {
        Variants::WithoutKey { place, .. } => {
            let Some(place) = place else { return Vec::new() };
            let repeat = emit_repeat_count(*place, &params.aggregates, offsets);
            let mut builders: Vec<ColumnBuilder> = params
                .aggregates
                .iter()
                .map(|d| ColumnBuilder::new(result_column_type(&d.func)))
                .collect();
            for ((desc, offset), builder) in params.aggregates.iter().zip(offsets).zip(&mut builders) {
                // SAFETY: `place` holds a live accumulator for `desc.func`.
                let value = unsafe { desc.func.insert_result(*place, *offset) };
                for _ in 0..repeat {
                    builder.push_value(value.clone());
                }
                if !preserve_state && !desc.func.is_state() && !desc.func.has_trivial_destructor() {
                    // SAFETY: same place, not yet destroyed.
                    unsafe { desc.func.destroy(*place, *offset) };
                }
            }
            let columns = params
                .aggregates
                .iter()
                .zip(builders)
                .map(|(d, b)| (d.output_name.clone(), b.finish()))
                .collect();
            if repeat == 0 {
                return Vec::new();
            }
            vec![Block::unbucketed(columns)]
        }
        Variants::SingleLevel { table, overflow, .. } => {
            let mut blocks = vec![convert_table(table, &key_names, &params.aggregates, offsets, preserve_state, -1)];
            if let Some(overflow_table) = overflow_as_table(*overflow) {
                blocks.push(overflow_block(&overflow_table, &params.aggregates, offsets, preserve_state));
            }
            blocks
        }
        Variants::TwoLevel { buckets, overflow, .. } => {
            let mut blocks: Vec<Block> = buckets
                .par_iter()
                .enumerate()
                .map(|(i, table)| convert_table(table, &key_names, &params.aggregates, offsets, preserve_state, i as i32))
                .collect();
            if let Some(overflow_table) = overflow_as_table(*overflow) {
                blocks.push(overflow_block(&overflow_table, &params.aggregates, offsets, preserve_state));
            }
            blocks
        }
    }
}

/// How many times `place`'s current value should appear in the output
/// (spec §4.F "For user-defined aggregates, each group is repeated
/// `get_emit_times(place)` times and the key row duplicated accordingly").
/// Ordinary queries (no user-defined aggregate) always emit a group exactly
/// once; a query with a user-defined aggregate emits a group only when that
/// aggregate has crossed its own emit boundary since the last flush (spec §8
/// scenario 4: a row that hasn't crossed a boundary yet "remains pending",
/// i.e. is skipped this trigger rather than emitted with a stale value).
fn emit_repeat_count(place: super::function::Place, aggregates: &[AggDesc], offsets: &[usize]) -> usize {
    let mut max_times: Option<u32> = None;
    for (desc, &offset) in aggregates.iter().zip(offsets) {
        if !desc.func.is_user_defined() {
            continue;
        }
        // SAFETY: `place` holds a live accumulator for `desc.func`.
        let times = unsafe { desc.func.get_emit_times(place, offset) };
        max_times = Some(max_times.map_or(times, |m| m.max(times)));
    }
    max_times.map_or(1, |t| t as usize)
}

fn overflow_as_table(overflow: Option<super::function::Place>) -> Option<Table> {
    overflow.map(|place| {
        let mut t = Table::new();
        t.insert(Key::None, place);
        t
    })
}

fn overflow_block(table: &Table, aggregates: &[AggDesc], offsets: &[usize], preserve_state: bool) -> Block {
    let mut builders: Vec<ColumnBuilder> = aggregates
        .iter()
        .map(|d| ColumnBuilder::new(result_column_type(&d.func)))
        .collect();
    for (_, place) in table.iter() {
        for ((desc, offset), builder) in aggregates.iter().zip(offsets).zip(&mut builders) {
            // SAFETY: the overflow place was created with this layout and
            // holds a live accumulator for every declared aggregate.
            let value = unsafe { desc.func.insert_result(*place, *offset) };
            builder.push_value(value);
            if !preserve_state && !desc.func.is_state() && !desc.func.has_trivial_destructor() {
                // SAFETY: same place, not yet destroyed.
                unsafe { desc.func.destroy(*place, *offset) };
            }
        }
    }
    let columns = aggregates
        .iter()
        .zip(builders)
        .map(|(d, b)| (d.output_name.clone(), b.finish()))
        .collect();
    Block::overflow(columns)
}

fn funcs_of(params: &AggregatorParams) -> Vec<Arc<dyn AggregateFunction>> {
    params.aggregates.iter().map(|d| d.func.clone()).collect()
}

/// Converts one bucket's table to a block of *raw serialized accumulator
/// state* rather than finished values (spec §4.F "Intermediate: append the
/// raw place pointers into a state column"), used by spill and checkpoint,
/// both of which must be able to resume accumulating rather than only
/// report a final value (spec §4.H, §4.I).
fn convert_table_intermediate(
    table: &Table,
    key_names: &[String],
    aggregates: &[AggDesc],
    offsets: &[usize],
    action: ConvertAction,
    bucket_num: i32,
) -> Block {
    let mut decoded_keys: Vec<Vec<Value>> = vec![Vec::new(); key_names.len()];
    let mut state_builders: Vec<Vec<Vec<u8>>> = vec![Vec::new(); aggregates.len()];

    for (key, place) in table.iter() {
        push_decoded_key(key, &mut decoded_keys);
        for (i, (desc, offset)) in aggregates.iter().zip(offsets).enumerate() {
            // SAFETY: `place` holds a live accumulator for `desc.func`.
            let bytes = unsafe { desc.func.serialize(*place, *offset) };
            state_builders[i].push(bytes);
        }
        if !matches!(action, ConvertAction::Checkpoint) {
            for (desc, offset) in aggregates.iter().zip(offsets) {
                if !desc.func.has_trivial_destructor() {
                    // SAFETY: `place` holds a live accumulator not yet
                    // destroyed.
                    unsafe { desc.func.destroy(*place, *offset) };
                }
            }
        }
    }

    let mut columns: Vec<(String, Column)> = Vec::new();
    for (name, values) in key_names.iter().zip(decoded_keys) {
        let mut builder = ColumnBuilder::new(infer_key_column_type(&values));
        for v in values {
            builder.push_value(v);
        }
        columns.push((name.clone(), builder.finish()));
    }
    for (desc, bytes) in aggregates.iter().zip(state_builders) {
        columns.push((state_column_name(desc), Column::Bytes(bytes)));
    }

    Block::bucketed(columns, bucket_num)
}

/// Converts an entire [`Variants`] table to intermediate blocks (raw
/// accumulator state, spec §4.F "Intermediate" mode), used by
/// [`super::spill`]/[`super::checkpoint`].
pub fn convert_to_intermediate_blocks(variants: &Variants, params: &AggregatorParams, action: ConvertAction) -> Vec<Block> {
    let key_names: Vec<String> = (0..params.key_columns.len().max(1))
        .map(|i| format!("key_{i}"))
        .collect();
    let offsets = &Layout::compute(&funcs_of(params)).offsets;

    match variants {
        Variants::WithoutKey { place, .. } => {
            let Some(place) = place else { return Vec::new() };
            let mut columns: Vec<(String, Column)> = Vec::new();
            for (desc, offset) in params.aggregates.iter().zip(offsets) {
                // SAFETY: `place` holds a live accumulator for `desc.func`.
                let bytes = unsafe { desc.func.serialize(*place, *offset) };
                columns.push((state_column_name(desc), Column::Bytes(vec![bytes])));
                if !matches!(action, ConvertAction::Checkpoint) && !desc.func.has_trivial_destructor() {
                    // SAFETY: same place, not yet destroyed.
                    unsafe { desc.func.destroy(*place, *offset) };
                }
            }
            vec![Block::unbucketed(columns)]
        }
        Variants::SingleLevel { table, overflow, .. } => {
            let mut blocks = vec![convert_table_intermediate(table, &key_names, &params.aggregates, offsets, action, -1)];
            if let Some(overflow_table) = overflow_as_table(*overflow) {
                let mut block = convert_table_intermediate(&overflow_table, &key_names, &params.aggregates, offsets, action, -1);
                block.is_overflows = true;
                blocks.push(block);
            }
            blocks
        }
        Variants::TwoLevel { buckets, overflow, .. } => {
            let mut blocks: Vec<Block> = buckets
                .par_iter()
                .enumerate()
                .map(|(i, table)| convert_table_intermediate(table, &key_names, &params.aggregates, offsets, action, i as i32))
                .collect();
            if let Some(overflow_table) = overflow_as_table(*overflow) {
                let mut block = convert_table_intermediate(&overflow_table, &key_names, &params.aggregates, offsets, action, -1);
                block.is_overflows = true;
                blocks.push(block);
            }
            blocks
        }
    }
}

/// Rebuilds a [`Variants`] table from intermediate blocks previously
/// produced by [`convert_to_intermediate_blocks`], deserializing each
/// aggregate's raw state bytes back into a freshly allocated place via
/// [`AggregateFunction::deserialize`] (spec §4.I "`move` transfers the
/// serialised state bytes into a freshly allocated place").
///
/// Detects the three restore shapes from spec §4.I: without-key (no key
/// columns), single-level/two-level (keyed, routed by `find_or_create` —
/// block `bucket_num` is informational only, since any valid bucketing of
/// the same entries is equivalent for correctness).
pub fn rebuild_from_intermediate_blocks(blocks: &[Block], params: &AggregatorParams) -> AggResult<Variants> {
    let funcs = funcs_of(params);
    let layout = Layout::compute(&funcs);
    let any_two_level = blocks.iter().any(|b| b.bucket_num >= 0) && !params.key_columns.is_empty();
    let mut variants = if params.key_columns.is_empty() {
        Variants::without_key()
    } else if any_two_level {
        Variants::two_level()
    } else {
        Variants::single_level()
    };

    for block in blocks {
        let key_col_count = params.key_columns.len();
        for row in 0..block.row_count() {
            let (place, already_present) = if key_col_count == 0 {
                let already_present = variants.contains_key(&Key::None);
                let place = match variants.find_or_create(Key::None, &layout, &funcs, false) {
                    Some(p) => p,
                    None => return Err(AggError::LogicalError("without_key restore hit no_more_keys".into())),
                };
                (place, already_present)
            } else {
                let key_cols: Vec<&Column> = (0..key_col_count).map(|i| &block.columns[i].1).collect();
                let key = super::key::encode_key(super::key::choose_method(&params.key_types), &key_cols, row);
                if block.is_overflows {
                    // The overflow row always folds across restore calls:
                    // it has no single "key" to dedupe on, it absorbed many
                    // distinct keys already.
                    let already_present = matches!(
                        &variants,
                        Variants::SingleLevel { overflow: Some(_), .. } | Variants::TwoLevel { overflow: Some(_), .. }
                    );
                    (variants.overflow_place(&layout, &funcs), already_present)
                } else {
                    let already_present = variants.contains_key(&key);
                    let place = match variants.find_or_create(key, &layout, &funcs, false) {
                        Some(p) => p,
                        None => variants.overflow_place(&layout, &funcs),
                    };
                    (place, already_present)
                }
            };

            // A key restored from an earlier block in this same call folds
            // via `merge` (spec §4.G step 4: existing key merges, new key
            // takes the deserialized state directly) rather than
            // overwriting — restoring several spill files can see the same
            // key reappear after an intervening spill reset.
            let scratch = already_present.then(|| super::variants::new_place(variants.arena_mut(), &layout, &funcs));

            for (i, (desc, offset)) in params.aggregates.iter().zip(&layout.offsets).enumerate() {
                let col_idx = key_col_count + i;
                let Column::Bytes(state_col) = &block.columns[col_idx].1 else {
                    return Err(AggError::LogicalError(format!(
                        "intermediate block column {} is not a state byte column",
                        block.columns[col_idx].0
                    )));
                };
                match scratch {
                    Some(scratch_place) => {
                        // SAFETY: `scratch_place` was just created with
                        // this `layout` and holds no prior state.
                        unsafe {
                            desc.func.deserialize(scratch_place, *offset, &state_col[row]);
                            desc.func.merge(place, scratch_place, *offset);
                            if !desc.func.has_trivial_destructor() {
                                desc.func.destroy(scratch_place, *offset);
                            }
                        }
                    }
                    None => {
                        // SAFETY: `place` was just created with this
                        // `layout` and holds no prior state yet.
                        unsafe { desc.func.deserialize(place, *offset, &state_col[row]) };
                    }
                }
            }
        }
    }
    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::function::CountFn;
    use crate::aggregator::params::KeyColumnType;
    use std::sync::Arc;

    #[test]
    fn without_key_converts_single_row() {
        let params = AggregatorParams::without_key(vec![AggDesc {
            func: Arc::new(CountFn),
            arg_columns: vec![],
            output_name: "cnt".into(),
        }]);
        let mut variants = Variants::without_key();
        let layout = super::super::function::Layout::compute(&funcs_of(&params));
        let funcs = funcs_of(&params);
        variants.find_or_create(Key::None, &layout, &funcs, false);
        let blocks = convert_to_blocks(&variants, &params, ConvertAction::StreamingEmit);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].row_count(), 1);
    }

    #[test]
    fn two_level_produces_one_block_per_bucket() {
        let params = AggregatorParams::new(
            vec![KeyColumnType::Int64],
            vec![0],
            vec![AggDesc {
                func: Arc::new(CountFn),
                arg_columns: vec![],
                output_name: "cnt".into(),
            }],
        );
        let mut variants = Variants::two_level();
        let layout = super::super::function::Layout::compute(&funcs_of(&params));
        let funcs = funcs_of(&params);
        for i in 0..5i64 {
            variants.find_or_create(Key::Fixed64(i.to_le_bytes()), &layout, &funcs, false);
        }
        let blocks = convert_to_blocks(&variants, &params, ConvertAction::StreamingEmit);
        assert_eq!(blocks.len(), crate::aggregator::variants::NUM_BUCKETS);
    }
}
