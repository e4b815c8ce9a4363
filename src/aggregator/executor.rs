//! Batch execution: folding one input block into a [`Variants`] table
//! (spec §4.E).

use std::sync::Arc;

use super::block::Block;
use super::error::{AggError, AggResult};
use super::function::{AggregateFunction, Layout};
use super::key::{choose_method, encode_key, Key, MethodKind};
use super::params::{AggregatorParams, OverflowMode};
use super::variants::Variants;

/// Where a running aggregation currently sits in its lifecycle.
///
/// Modeled as an explicit enum (rather than scattered booleans) so illegal
/// transitions — e.g. accepting rows after `Draining` — are a match
/// exhaustiveness problem the compiler catches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecState {
    Initial,
    Accepting,
    TwoLevelAccepting,
    Spilling,
    OverflowCapped,
    Draining,
    Terminal,
}

impl ExecState {
    pub(crate) fn can_accept(self) -> bool {
        matches!(
            self,
            ExecState::Initial
                | ExecState::Accepting
                | ExecState::TwoLevelAccepting
                | ExecState::Spilling
                | ExecState::OverflowCapped
        )
    }
}

/// Outcome of folding one batch: whether the caller should stop feeding rows
/// (`abort`, spec §4.E step 6 under `OverflowMode::Break`) and whether a
/// finalize/emit pass is now due.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub abort: bool,
    pub rows_processed: usize,
    /// Set when a user-defined aggregate crossed its own emit boundary this
    /// batch (spec §4.E step 6, §4.C "when-to-emit"). The caller should
    /// finalize (call [`super::Aggregator::emit`]) before feeding the next
    /// batch, so the emitted value reflects this batch's state rather than
    /// whatever the accumulator has become by the time some later trigger
    /// fires.
    pub need_finalize: bool,
}

/// Drives one [`Variants`] table through the batch-execution algorithm.
pub struct BatchExecutor {
    pub params: Arc<AggregatorParams>,
    pub layout: Layout,
    pub state: ExecState,
    no_more_keys: bool,
}

impl BatchExecutor {
    pub fn new(params: Arc<AggregatorParams>) -> Self {
        let layout = Layout::compute(&funcs_of(&params));
        Self {
            params,
            layout,
            state: ExecState::Initial,
            no_more_keys: false,
        }
    }

    pub fn funcs(&self) -> Vec<Arc<dyn AggregateFunction>> {
        funcs_of(&self.params)
    }

    /// Step through the 8-step batch algorithm for one input block:
    /// 1. choose the dispatch method from key column types,
    /// 2. stamp the arena's watermark from any window key present,
    /// 3. for each row, find-or-create (or route to overflow) a place,
    /// 4. unwrap -State/-Array combinators (a no-op: expression evaluation
    ///    is out of scope for this crate, spec §4.E step 4 non-goal),
    /// 5. fold the row into the place — `add_batch` over the whole range
    ///    for the without-key single-place case, `add` per row otherwise,
    /// 6. check `max_rows_to_group_by` and apply `group_by_overflow_mode`,
    /// 7. flip to two-level once the configured threshold is crossed,
    /// 8. return whether the caller should abort.
    pub fn execute_batch(
        &mut self,
        variants: &mut Variants,
        block: &Block,
        window_key_col: Option<usize>,
    ) -> AggResult<BatchOutcome> {
        if !self.state.can_accept() {
            return Err(AggError::LogicalError(format!(
                "cannot accept rows in state {:?}",
                self.state
            )));
        }
        if self.state == ExecState::Initial {
            self.state = ExecState::Accepting;
        }

        let funcs = self.funcs();
        let method = choose_method(&self.params.key_types);
        let key_cols: Vec<&super::block::Column> = self
            .params
            .key_columns
            .iter()
            .map(|&i| &block.columns[i].1)
            .collect();
        let arg_cols: Vec<Vec<&super::block::Column>> = self
            .params
            .aggregates
            .iter()
            .map(|d| d.arg_columns.iter().map(|&i| &block.columns[i].1).collect())
            .collect();

        if let Some(col_idx) = window_key_col {
            if let Some(max_key) = (0..block.row_count())
                .map(|r| block.columns[col_idx].1.value_at(r).as_i64())
                .max()
            {
                variants.arena_mut().set_current_timestamp(max_key);
            }
        }

        let mut outcome = BatchOutcome::default();
        let has_user_defined = funcs.iter().any(|f| f.is_user_defined());
        let mut touched: std::collections::HashSet<super::function::Place> = std::collections::HashSet::new();

        if method == MethodKind::WithoutKey {
            // A single implicit group spans the whole range: fold the batch
            // through `add_batch` directly instead of a per-row `add` loop
            // (spec §4.E step 5's `without_key: add_batch_single_place`
            // path, Design Notes §9 "avoid per-row virtual calls").
            let row_count = block.row_count();
            let place = match variants.find_or_create(Key::None, &self.layout, &funcs, self.no_more_keys) {
                Some(p) => p,
                None => variants.overflow_place(&self.layout, &funcs),
            };

            for (i, (desc, args)) in self.params.aggregates.iter().zip(&arg_cols).enumerate() {
                // SAFETY: `place` was created with this executor's `layout`,
                // computed from `funcs`, whose order matches
                // `params.aggregates` one-to-one, so `layout.offsets[i]`
                // addresses the accumulator belonging to `desc.func`.
                unsafe {
                    desc.func.add_batch(place, self.layout.offsets[i], args, 0..row_count);
                }
            }

            if has_user_defined && row_count > 0 {
                touched.insert(place);
            }
            outcome.rows_processed = row_count;
        } else {
            for row in 0..block.row_count() {
                let key = encode_key(method, &key_cols, row);

                let place = match variants.find_or_create(key, &self.layout, &funcs, self.no_more_keys) {
                    Some(p) => p,
                    None => variants.overflow_place(&self.layout, &funcs),
                };

                for (i, (desc, args)) in self.params.aggregates.iter().zip(&arg_cols).enumerate() {
                    // SAFETY: `place` was created with this executor's `layout`,
                    // computed from `funcs`, whose order matches
                    // `params.aggregates` one-to-one, so `layout.offsets[i]`
                    // addresses the accumulator belonging to `desc.func`.
                    unsafe {
                        desc.func.add(place, self.layout.offsets[i], args, row);
                    }
                }

                if has_user_defined {
                    touched.insert(place);
                }

                outcome.rows_processed += 1;

                if self.params.max_rows_to_group_by > 0 && variants.size() > self.params.max_rows_to_group_by {
                    match self.params.group_by_overflow_mode {
                        OverflowMode::Throw => {
                            return Err(AggError::TooManyRows {
                                limit: self.params.max_rows_to_group_by,
                            });
                        }
                        OverflowMode::Break => {
                            outcome.abort = true;
                            self.state = ExecState::Draining;
                            return Ok(outcome);
                        }
                        OverflowMode::Any => {
                            self.no_more_keys = true;
                            self.state = ExecState::OverflowCapped;
                        }
                    }
                }
            }
        }

        if has_user_defined {
            for place in touched {
                for (desc, &offset) in self.params.aggregates.iter().zip(&self.layout.offsets) {
                    if !desc.func.is_user_defined() {
                        continue;
                    }
                    // SAFETY: `place` came from `find_or_create`/`overflow_place`
                    // this batch and holds a live accumulator at `offset` for
                    // `desc.func`.
                    unsafe {
                        desc.func.flush(place, offset);
                        if desc.func.get_emit_times(place, offset) > 0 {
                            outcome.need_finalize = true;
                        }
                    }
                }
            }
        }

        if variants.is_convertible_to_two_level()
            && self
                .params
                .crosses_two_level_threshold(variants.size(), variants.bytes_allocated())
        {
            variants.convert_to_two_level();
            if self.state != ExecState::OverflowCapped {
                self.state = ExecState::TwoLevelAccepting;
            }
        }

        Ok(outcome)
    }

    /// Records that the table was just spilled to disk (spec §4.E step 8,
    /// `two_level_accepting → spilling`). The table itself has already been
    /// reset to empty by the caller; rows keep being accepted afterward
    /// (spilling doesn't end the batch-accepting lifecycle), so this state
    /// stays in [`ExecState::can_accept`]'s set.
    pub(crate) fn mark_spilled(&mut self) {
        self.state = ExecState::Spilling;
    }

    /// Marks the executor as finished accepting new batches; callers must
    /// not call [`Self::execute_batch`] again afterward.
    pub fn finish(&mut self) {
        self.state = ExecState::Draining;
    }

    pub fn terminate(&mut self) {
        self.state = ExecState::Terminal;
    }
}

fn funcs_of(params: &AggregatorParams) -> Vec<Arc<dyn AggregateFunction>> {
    params.aggregates.iter().map(|d| d.func.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::block::{Column, ColumnType};
    use crate::aggregator::function::{CountFn, SumI64Fn};
    use crate::aggregator::params::{AggDesc, KeyColumnType};

    fn test_block() -> Block {
        Block::unbucketed(vec![
            ("k".into(), Column::Int64(vec![1, 1, 2, 2, 2])),
            ("v".into(), Column::Int64(vec![10, 20, 1, 1, 1])),
        ])
    }

    #[test]
    fn counts_rows_per_key() {
        let params = Arc::new(AggregatorParams::new(
            vec![KeyColumnType::Int64],
            vec![0],
            vec![AggDesc {
                func: Arc::new(CountFn),
                arg_columns: vec![],
                output_name: "cnt".into(),
            }],
        ));
        let mut executor = BatchExecutor::new(params);
        let mut variants = Variants::single_level();
        let block = test_block();
        let outcome = executor.execute_batch(&mut variants, &block, None).unwrap();
        assert_eq!(outcome.rows_processed, 5);
        assert_eq!(variants.size(), 2);
    }

    #[test]
    fn sums_argument_column_per_key() {
        let sum_fn: Arc<dyn AggregateFunction> = Arc::new(SumI64Fn { arg: 0 });
        let params = Arc::new(AggregatorParams::new(
            vec![KeyColumnType::Int64],
            vec![0],
            vec![AggDesc {
                func: sum_fn.clone(),
                arg_columns: vec![1],
                output_name: "sum_v".into(),
            }],
        ));
        let mut executor = BatchExecutor::new(params);
        let mut variants = Variants::single_level();
        let block = test_block();
        executor.execute_batch(&mut variants, &block, None).unwrap();
        assert_eq!(variants.size(), 2);
        let _ = ColumnType::Int64;
    }

    #[test]
    fn throw_mode_errors_past_row_limit() {
        let params = Arc::new(AggregatorParams {
            max_rows_to_group_by: 1,
            group_by_overflow_mode: OverflowMode::Throw,
            ..AggregatorParams::new(
                vec![KeyColumnType::Int64],
                vec![0],
                vec![AggDesc {
                    func: Arc::new(CountFn),
                    arg_columns: vec![],
                    output_name: "cnt".into(),
                }],
            )
        });
        let mut executor = BatchExecutor::new(params);
        let mut variants = Variants::single_level();
        let block = test_block();
        let err = executor.execute_batch(&mut variants, &block, None).unwrap_err();
        assert!(matches!(err, AggError::TooManyRows { .. }));
    }

    #[test]
    fn break_mode_aborts_without_error() {
        let params = Arc::new(AggregatorParams {
            max_rows_to_group_by: 1,
            group_by_overflow_mode: OverflowMode::Break,
            ..AggregatorParams::new(
                vec![KeyColumnType::Int64],
                vec![0],
                vec![AggDesc {
                    func: Arc::new(CountFn),
                    arg_columns: vec![],
                    output_name: "cnt".into(),
                }],
            )
        });
        let mut executor = BatchExecutor::new(params);
        let mut variants = Variants::single_level();
        let block = test_block();
        let outcome = executor.execute_batch(&mut variants, &block, None).unwrap();
        assert!(outcome.abort);
    }

    #[test]
    fn overflow_any_routes_new_keys_to_overflow_row() {
        let params = Arc::new(AggregatorParams {
            max_rows_to_group_by: 1,
            group_by_overflow_mode: OverflowMode::Any,
            ..AggregatorParams::new(
                vec![KeyColumnType::Int64],
                vec![0],
                vec![AggDesc {
                    func: Arc::new(CountFn),
                    arg_columns: vec![],
                    output_name: "cnt".into(),
                }],
            )
        });
        let mut executor = BatchExecutor::new(params);
        let mut variants = Variants::single_level();
        let block = test_block();
        executor.execute_batch(&mut variants, &block, None).unwrap();
        assert!(variants.size() <= 1);
    }
}
