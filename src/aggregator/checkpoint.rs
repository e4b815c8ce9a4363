//! Engine-state checkpointing: snapshotting and restoring a running
//! [`super::Aggregator`]'s accumulator state (spec §4.I).
//!
//! This is distinct from [`crate::checkpoint`], which checkpoints a whole
//! pipeline's barrier position; this module only knows how to serialize one
//! aggregator's [`super::variants::Variants`] table to and from bytes.
//! States are always preserved here (never destroyed), matching
//! [`super::params::ConvertAction::Checkpoint`]'s contract.

use super::block::Block;
use super::converter::{convert_to_intermediate_blocks, rebuild_from_intermediate_blocks};
use super::error::{AggError, AggResult};
use super::params::{AggregatorParams, ConvertAction};
use super::variants::Variants;

const FORMAT_VERSION: u32 = 1;

/// On-wire layout: `[version:u32][inited:u8][num_aggregates:u16][num_blocks:u32][block...]`.
///
/// `inited` records whether the source aggregator had processed at least
/// one row (distinguishes "empty without_key state" from "never ran").
#[derive(serde::Serialize, serde::Deserialize)]
struct Wire {
    version: u32,
    inited: bool,
    num_aggregates: u16,
    blocks: Vec<Block>,
}

/// Serializes `variants`'s current state to the checkpoint wire format.
/// Blocks carry each aggregate's raw accumulator bytes
/// ([`AggregateFunction::serialize`](super::function::AggregateFunction::serialize)),
/// not a finished value — checkpoint restore must be able to resume
/// accumulating, not just re-emit a snapshot. Does not destroy any
/// accumulator state.
pub fn encode(variants: &Variants, params: &AggregatorParams, inited: bool) -> AggResult<Vec<u8>> {
    let blocks = convert_to_intermediate_blocks(variants, params, ConvertAction::Checkpoint);
    let wire = Wire {
        version: FORMAT_VERSION,
        inited,
        num_aggregates: params.aggregates.len() as u16,
        blocks,
    };
    postcard::to_allocvec(&wire).map_err(|e| AggError::LogicalError(format!("checkpoint encode failed: {e}")))
}

/// Decodes checkpoint bytes into their raw blocks, validating the wire
/// version and aggregate count (spec §7 "Checkpoint mismatch ... surfaces
/// `recover_checkpoint_failed`"). Does not rebuild a [`Variants`] table —
/// callers that want one call [`rebuild_variants`] next.
pub fn decode(bytes: &[u8], params: &AggregatorParams) -> AggResult<(Vec<Block>, bool)> {
    let wire: Wire =
        postcard::from_bytes(bytes).map_err(|e| AggError::RecoverCheckpointFailed(e.to_string()))?;
    if wire.version != FORMAT_VERSION {
        return Err(AggError::RecoverCheckpointFailed(format!(
            "unsupported checkpoint version {}",
            wire.version
        )));
    }
    if wire.num_aggregates as usize != params.aggregates.len() {
        return Err(AggError::RecoverCheckpointFailed(format!(
            "checkpoint has {} aggregates, aggregator declares {}",
            wire.num_aggregates,
            params.aggregates.len()
        )));
    }
    Ok((wire.blocks, wire.inited))
}

/// Rebuilds a [`Variants`] table from decoded checkpoint blocks, `move`-ing
/// each aggregate's serialized state into a freshly allocated place via
/// [`AggregateFunction::deserialize`](super::function::AggregateFunction::deserialize)
/// (spec §4.I "recover").
pub fn rebuild_variants(blocks: &[Block], params: &AggregatorParams) -> AggResult<Variants> {
    rebuild_from_intermediate_blocks(blocks, params)
}
