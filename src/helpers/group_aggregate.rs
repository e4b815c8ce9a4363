//! Bridges the [`aggregator`](crate::aggregator) engine into the
//! `PCollection`/`Node` dataflow.
//!
//! [`PCollection::group_aggregate`] feeds `(key, arg)` pairs through an
//! [`Aggregator`](crate::aggregator::Aggregator) for the local pass, then
//! merges and converts the partial tables back to `(key, result)` pairs for
//! the merge pass — the same split [`Node::CombineValues`] already expects
//! from [`super::combine`], just driven by the aggregator engine instead of
//! a [`CombineFn`](crate::CombineFn).

use std::marker::PhantomData;
use std::sync::Arc;

use crate::aggregator::block::{Block, Column, ColumnBuilder, ColumnType, Value};
use crate::aggregator::function::AggregateFunction;
use crate::aggregator::params::{AggDesc, AggregatorParams, ConvertAction, KeyColumnType};
use crate::aggregator::{converter, executor::BatchExecutor, merger, variants::Variants};
use crate::node::Node;
use crate::{PCollection, Partition};

fn column_type_of(ty: KeyColumnType) -> ColumnType {
    match ty {
        KeyColumnType::Str => ColumnType::Str,
        KeyColumnType::Bytes => ColumnType::Bytes,
        KeyColumnType::Int8 | KeyColumnType::Int16 | KeyColumnType::Int32 | KeyColumnType::Int64 => ColumnType::Int64,
    }
}

fn column_from_values(values: impl Iterator<Item = Value>, ty: ColumnType) -> Column {
    let mut builder = ColumnBuilder::new(ty);
    for v in values {
        builder.push_value(v);
    }
    builder.finish()
}

/// Builds a 2-column `(key, arg)` block from a batch of pairs, ready for
/// [`BatchExecutor::execute_batch`].
fn block_from_pairs(pairs: Vec<(Value, Value)>, key_ty: ColumnType, arg_ty: ColumnType) -> Block {
    let keys = column_from_values(pairs.iter().map(|(k, _)| k.clone()), key_ty);
    let args = column_from_values(pairs.into_iter().map(|(_, v)| v), arg_ty);
    Block::unbucketed(vec![("key_0".into(), keys), ("arg_0".into(), args)])
}

/// Extracts `(key, result)` pairs from converted output blocks. A block with
/// no `key_0` column (the overflow block, spec §4.E step 7) contributes
/// `Value::Null` keys rather than being dropped, matching the overflow row's
/// own "absorbs rows that would otherwise grow the table" semantics.
fn pairs_from_blocks(blocks: Vec<Block>, output_name: &str) -> Vec<(Value, Value)> {
    let mut out = Vec::new();
    for block in blocks {
        let result_col = match block.column(output_name) {
            Some(c) => c,
            None => continue,
        };
        for row in 0..block.row_count() {
            let key = block.column("key_0").map(|c| c.value_at(row)).unwrap_or(Value::Null);
            out.push((key, result_col.value_at(row)));
        }
    }
    out
}

impl PCollection<(Value, Value)> {
    /// Groups `(key, arg)` pairs by `key` and folds `arg` through `func`,
    /// using the [`aggregator`](crate::aggregator) engine rather than a
    /// [`CombineFn`](crate::CombineFn) accumulator per key.
    ///
    /// Unlike [`PCollection::combine_values`], this operates on the
    /// aggregator's own [`Value`] domain: the input pair's first element is
    /// the group key (typed by `key_type`), the second is `func`'s sole
    /// input argument. `output_name` becomes the result column's name,
    /// surfaced back as the returned pair's second element.
    ///
    /// # Example
    /// ```
    /// use streamagg::*;
    /// use streamagg::aggregator::block::Value;
    /// use streamagg::aggregator::function::SumI64Fn;
    /// use streamagg::aggregator::params::KeyColumnType;
    /// use std::sync::Arc;
    ///
    /// let p = Pipeline::default();
    /// let pairs = from_vec(&p, vec![
    ///     (Value::Int(1), Value::Int(10)),
    ///     (Value::Int(1), Value::Int(20)),
    ///     (Value::Int(2), Value::Int(5)),
    /// ]);
    ///
    /// let sums = pairs
    ///     .group_aggregate(KeyColumnType::Int64, Arc::new(SumI64Fn { arg: 0 }), "sum")
    ///     .collect_seq_sorted()
    ///     .unwrap();
    /// assert_eq!(sums, vec![
    ///     (Value::Int(1), Value::Int(30)),
    ///     (Value::Int(2), Value::Int(5)),
    /// ]);
    /// ```
    pub fn group_aggregate(
        self,
        key_type: KeyColumnType,
        func: Arc<dyn AggregateFunction>,
        output_name: impl Into<String>,
    ) -> PCollection<(Value, Value)> {
        let output_name = output_name.into();
        let key_col_ty = column_type_of(key_type);
        let arg_col_ty = match func.name() {
            "sum_f64" | "avg_f64" => ColumnType::Float64,
            _ => ColumnType::Int64,
        };

        let params = Arc::new(AggregatorParams::new(
            vec![key_type],
            vec![0],
            vec![AggDesc {
                func,
                arg_columns: vec![0],
                output_name: output_name.clone(),
            }],
        ));

        // local: Vec<(Value, Value)> -> Variants (one partition's partial table)
        let local_pairs = {
            let params = Arc::clone(&params);
            Arc::new(move |p: Partition| -> Partition {
                let pairs = *p
                    .downcast::<Vec<(Value, Value)>>()
                    .expect("group_aggregate local: expected Vec<(Value, Value)>");
                let block = block_from_pairs(pairs, key_col_ty, arg_col_ty);
                let mut executor = BatchExecutor::new(params.clone());
                let mut variants = Variants::single_level();
                executor
                    .execute_batch(&mut variants, &block, None)
                    .expect("group_aggregate: local batch fold failed");
                Box::new(variants) as Partition
            })
        };

        // merge: Vec<Variants> -> Vec<(Value, Value)>
        let merge = {
            let params = Arc::clone(&params);
            Arc::new(move |parts: Vec<Partition>| -> Partition {
                let sources: Vec<Variants> = parts
                    .into_iter()
                    .map(|p| *p.downcast::<Variants>().expect("group_aggregate merge: expected Variants"))
                    .collect();
                let offsets = crate::aggregator::function::Layout::compute(&[params.aggregates[0].func.clone()]).offsets;
                let merged = merger::merge_all(sources, &params, &offsets, ConvertAction::DistributedMerge)
                    .expect("group_aggregate: merge failed");
                let blocks = converter::convert_to_blocks(&merged, &params, ConvertAction::DistributedMerge);
                let out = pairs_from_blocks(blocks, &params.aggregates[0].output_name);
                Box::new(out) as Partition
            })
        };

        let id = self.pipeline.insert_node(Node::CombineValues {
            local_pairs,
            local_groups: None,
            merge,
        });
        self.pipeline.connect(self.id, id);
        PCollection {
            pipeline: self.pipeline,
            id,
            _t: PhantomData,
        }
    }
}
