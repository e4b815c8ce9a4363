//! Merging multiple [`Variants`] tables into one (spec §4.G).
//!
//! The seven-step algorithm: (1) pick a non-empty head table to merge into,
//! (2) if any input is two-level, convert every input to two-level so
//! buckets line up, (3) splice arenas onto the head, (4) bucket-parallel
//! merge via rayon, (5) merge overflow rows, (6) merge without-key places,
//! (7) destroy source places once folded (unless checkpointing).

use std::sync::Arc;

use rayon::prelude::*;

use super::error::{AggError, AggResult};
use super::function::AggregateFunction;
use super::params::{AggDesc, AggregatorParams, ConvertAction};
use super::variants::{Table, Variants};

fn funcs_of(params: &AggregatorParams) -> Vec<Arc<dyn AggregateFunction>> {
    params.aggregates.iter().map(|d| d.func.clone()).collect()
}

/// Merges `sources` into a single [`Variants`], consuming them. Returns an
/// error if `sources` mixes [`Variants::WithoutKey`] with keyed variants —
/// that would mean two [`super::Aggregator`]s were built with incompatible
/// `group_by` configurations, always a caller bug.
pub fn merge_all(
    mut sources: Vec<Variants>,
    params: &AggregatorParams,
    offsets: &[usize],
    action: ConvertAction,
) -> AggResult<Variants> {
    if sources.is_empty() {
        return Err(AggError::EmptyData);
    }
    if sources.len() == 1 {
        return Ok(sources.remove(0));
    }

    if sources.iter().any(|v| matches!(v, Variants::WithoutKey { .. })) {
        return merge_without_key(sources, &params.aggregates, offsets, action);
    }

    let any_two_level = sources.iter().any(Variants::is_two_level);
    if any_two_level {
        for v in sources.iter_mut() {
            if v.is_convertible_to_two_level() {
                v.convert_to_two_level();
            }
        }
    }

    let mut iter = sources.into_iter();
    let mut head = iter.next().expect("checked non-empty above");
    for tail in iter {
        merge_two(&mut head, tail, &params.aggregates, offsets, action)?;
    }
    Ok(head)
}

fn merge_without_key(
    sources: Vec<Variants>,
    aggregates: &[AggDesc],
    offsets: &[usize],
    action: ConvertAction,
) -> AggResult<Variants> {
    let mut head = Variants::without_key();
    let Variants::WithoutKey {
        place: head_place,
        arena: head_arena,
    } = &mut head
    else {
        unreachable!("just constructed as WithoutKey")
    };

    for src in sources {
        let Variants::WithoutKey { place, arena } = src else {
            return Err(AggError::CannotMergeDifferentVariants);
        };
        head_arena.splice_from(arena);
        let Some(src_place) = place else { continue };
        match head_place {
            None => *head_place = Some(src_place),
            Some(dst_place) => {
                for (desc, offset) in aggregates.iter().zip(offsets) {
                    // SAFETY: both places hold live accumulators for
                    // `desc.func`, created with the same layout `offsets`
                    // came from.
                    unsafe { desc.func.merge(*dst_place, src_place, *offset) };
                }
                if !matches!(action, ConvertAction::Checkpoint) {
                    for (desc, offset) in aggregates.iter().zip(offsets) {
                        if !desc.func.has_trivial_destructor() {
                            // SAFETY: `src_place` held a live accumulator
                            // just folded into `dst_place` and not yet
                            // destroyed.
                            unsafe { desc.func.destroy(src_place, *offset) };
                        }
                    }
                }
            }
        }
    }
    Ok(head)
}

fn merge_two(
    head: &mut Variants,
    tail: Variants,
    aggregates: &[AggDesc],
    offsets: &[usize],
    action: ConvertAction,
) -> AggResult<()> {
    match (head, tail) {
        (Variants::SingleLevel { table: ht, arena: ha, overflow: ho }, Variants::SingleLevel { table: tt, arena: ta, overflow: to }) => {
            ha.splice_from(ta);
            merge_table_into(ht, tt, aggregates, offsets, action);
            merge_overflow(ho, to, aggregates, offsets, action);
            Ok(())
        }
        (Variants::TwoLevel { buckets: hb, arena: ha, overflow: ho }, Variants::TwoLevel { buckets: tb, arena: ta, overflow: to }) => {
            ha.splice_from(ta);
            // Bucket-parallel merge: bucket i of `tail` only ever touches
            // bucket i of `head`, so rayon can fold every bucket
            // concurrently with no cross-bucket synchronization.
            hb.par_iter_mut().zip(tb.into_par_iter()).for_each(|(ht, tt)| {
                merge_table_into(ht, tt, aggregates, offsets, action);
            });
            merge_overflow(ho, to, aggregates, offsets, action);
            Ok(())
        }
        _ => Err(AggError::CannotMergeDifferentVariants),
    }
}

fn merge_table_into(dst: &mut Table, src: Table, aggregates: &[AggDesc], offsets: &[usize], action: ConvertAction) {
    for (key, src_place) in src {
        match dst.get(&key) {
            Some(&dst_place) => {
                for (desc, offset) in aggregates.iter().zip(offsets) {
                    // SAFETY: both places hold live accumulators for
                    // `desc.func`.
                    unsafe { desc.func.merge(dst_place, src_place, *offset) };
                }
                if !matches!(action, ConvertAction::Checkpoint) {
                    for (desc, offset) in aggregates.iter().zip(offsets) {
                        if !desc.func.has_trivial_destructor() {
                            // SAFETY: `src_place` held a live accumulator
                            // just folded into `dst_place`.
                            unsafe { desc.func.destroy(src_place, *offset) };
                        }
                    }
                }
            }
            None => {
                dst.insert(key, src_place);
            }
        }
    }
}

fn merge_overflow(
    head: &mut Option<super::function::Place>,
    tail: Option<super::function::Place>,
    aggregates: &[AggDesc],
    offsets: &[usize],
    action: ConvertAction,
) {
    let Some(tail_place) = tail else { return };
    match head {
        None => *head = Some(tail_place),
        Some(head_place) => {
            for (desc, offset) in aggregates.iter().zip(offsets) {
                // SAFETY: both the head and tail overflow places hold live
                // accumulators for every declared aggregate.
                unsafe { desc.func.merge(*head_place, tail_place, *offset) };
            }
            if !matches!(action, ConvertAction::Checkpoint) {
                for (desc, offset) in aggregates.iter().zip(offsets) {
                    if !desc.func.has_trivial_destructor() {
                        // SAFETY: `tail_place` held a live accumulator just
                        // folded into `head_place`.
                        unsafe { desc.func.destroy(tail_place, *offset) };
                    }
                }
            }
        }
    }
}
