// src/runner.rs

use crate::node::Node;
use crate::pipeline::Pipeline;
use crate::type_token::Partition;
use crate::NodeId;
use anyhow::{anyhow, bail, Result};
use rayon::prelude::*;
use std::sync::Arc;

#[cfg(feature = "checkpointing")]
use crate::checkpoint::{
    compute_checksum, current_timestamp_ms, generate_pipeline_id, CheckpointConfig,
    CheckpointManager, CheckpointMetadata, CheckpointState,
};

#[derive(Clone, Copy, Debug)]
pub enum ExecMode {
    Sequential,
    Parallel {
        threads: Option<usize>,
        partitions: Option<usize>,
    },
}

pub struct Runner {
    pub mode: ExecMode,
    pub default_partitions: usize,
    /// When set, `run_collect` records a completion checkpoint for the executed
    /// chain (spec-adjacent: progress markers only, see `crate::checkpoint`'s
    /// module docs for why full mid-run data isn't snapshotted).
    #[cfg(feature = "checkpointing")]
    pub checkpoint_config: Option<CheckpointConfig>,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads: None,
                partitions: None,
            },
            default_partitions: 2 * num_cpus::get().max(2),
            #[cfg(feature = "checkpointing")]
            checkpoint_config: None,
        }
    }
}

impl Runner {
    pub fn run_collect<T: 'static + Send + Sync + Clone>(&self, p: &Pipeline, terminal: NodeId) -> Result<Vec<T>> {
        let chain = linear_chain(p, terminal)?;

        let result = match self.mode {
            ExecMode::Sequential => {
                let part = exec_chain_seq(chain.clone(), &materialize_as::<T>)?;
                downcast_vec::<T>(part)
            }
            ExecMode::Parallel { threads, partitions } => {
                if let Some(t) = threads {
                    rayon::ThreadPoolBuilder::new().num_threads(t).build_global().ok();
                }
                exec_par::<T>(chain.clone(), partitions.unwrap_or(self.default_partitions))
            }
        };

        #[cfg(feature = "checkpointing")]
        if result.is_ok() {
            self.record_completion_checkpoint(&chain)?;
        }

        result
    }

    #[cfg(feature = "checkpointing")]
    fn record_completion_checkpoint(&self, chain: &[Node]) -> Result<()> {
        let Some(config) = &self.checkpoint_config else {
            return Ok(());
        };
        if !config.enabled {
            return Ok(());
        }

        let mut manager = CheckpointManager::new(config.clone())?;
        let descriptor: String = chain.iter().map(node_tag).collect::<Vec<_>>().join("->");
        let pipeline_id = generate_pipeline_id(&descriptor);
        let timestamp = current_timestamp_ms();
        let metadata_str = format!("{pipeline_id}:{}:{timestamp}:1", chain.len());

        let state = CheckpointState {
            pipeline_id: pipeline_id.clone(),
            completed_node_index: chain.len(),
            timestamp,
            partition_count: 1,
            checksum: compute_checksum(metadata_str.as_bytes()),
            exec_mode: format!("{:?}", self.mode),
            metadata: CheckpointMetadata {
                total_nodes: chain.len(),
                last_node_type: chain.last().map(node_tag).unwrap_or_else(|| "none".into()),
                progress_percent: 100,
            },
        };
        manager.save_checkpoint(&state)?;
        Ok(())
    }
}

#[cfg(feature = "checkpointing")]
fn node_tag(node: &Node) -> String {
    match node {
        Node::Source { .. } => "Source".into(),
        Node::Stateless(_) => "Stateless".into(),
        Node::CombineValues { .. } => "CombineValues".into(),
        Node::GroupByKey { .. } => "GroupByKey".into(),
        Node::CoGroup { .. } => "CoGroup".into(),
        Node::CombineGlobal { .. } => "CombineGlobal".into(),
        Node::Materialized(_) => "Materialized".into(),
    }
}

fn linear_chain(p: &Pipeline, terminal: NodeId) -> Result<Vec<Node>> {
    let (mut nodes, edges) = p.snapshot();
    let mut chain: Vec<Node> = Vec::new();
    let mut cur = terminal;
    loop {
        let n = nodes.remove(&cur).ok_or_else(|| anyhow!("missing node {cur:?}"))?;
        chain.push(n);
        if let Some((from, _)) = edges.iter().find(|(_, to)| *to == cur).cloned() {
            cur = from;
        } else {
            break;
        }
    }
    chain.reverse();
    Ok(chain)
}

fn downcast_vec<T: 'static>(part: Partition) -> Result<Vec<T>> {
    Ok(*part.downcast::<Vec<T>>().map_err(|_| anyhow!("terminal type mismatch"))?)
}

/// Resolves a `CombineValues` node's local pass: prefer the lifted
/// `local_groups` closure when present (it expects input already grouped as
/// `Vec<(K, Vec<V>)>`), otherwise fall back to `local_pairs` on raw `Vec<(K, V)>`.
fn dispatch_combine(
    local_pairs: &Arc<dyn Fn(Partition) -> Partition + Send + Sync>,
    local_groups: &Option<Arc<dyn Fn(Partition) -> Partition + Send + Sync>>,
    input: Partition,
) -> Partition {
    match local_groups {
        Some(lg) => lg(input),
        None => local_pairs(input),
    }
}

/// Executes a node chain sequentially down to a single [`Partition`].
///
/// Used both for the top-level plan and for `CoGroup` subplans, which is why
/// `Materialized` handling is parameterized: subplans built from ordinary
/// `PCollection` chains never contain one, but the top-level terminal might.
fn exec_chain_seq(chain: Vec<Node>, materialize: &dyn Fn(&Arc<dyn std::any::Any + Send + Sync>) -> Result<Partition>) -> Result<Partition> {
    let mut buf: Option<Partition> = None;
    for node in chain {
        buf = Some(match node {
            Node::Source { payload, vec_ops, .. } => {
                vec_ops.clone_any(payload.as_ref()).ok_or_else(|| anyhow!("unsupported source vec type"))?
            }
            Node::Stateless(ops) => {
                let input = buf.take().ok_or_else(|| anyhow!("Stateless node with no input"))?;
                ops.into_iter().fold(input, |acc, op| op.apply(acc))
            }
            Node::GroupByKey { local, merge } => {
                let input = buf.take().ok_or_else(|| anyhow!("GroupByKey node with no input"))?;
                let mid = local(input);
                merge(vec![mid])
            }
            Node::CombineValues { local_pairs, local_groups, merge } => {
                let input = buf.take().ok_or_else(|| anyhow!("CombineValues node with no input"))?;
                let mid = dispatch_combine(&local_pairs, &local_groups, input);
                merge(vec![mid])
            }
            Node::CombineGlobal { local, merge, finish, .. } => {
                let input = buf.take().ok_or_else(|| anyhow!("CombineGlobal node with no input"))?;
                finish(merge(vec![local(input)]))
            }
            Node::CoGroup { left_chain, right_chain, coalesce_left, coalesce_right, exec } => {
                let left = exec_chain_seq((*left_chain).clone(), materialize)?;
                let right = exec_chain_seq((*right_chain).clone(), materialize)?;
                let left = coalesce_left(vec![left]);
                let right = coalesce_right(vec![right]);
                exec(left, right)
            }
            Node::Materialized(payload) => materialize(&payload)?,
        });
    }
    buf.ok_or_else(|| anyhow!("empty execution chain"))
}

fn materialize_as<T: 'static + Clone + Send + Sync>(payload: &Arc<dyn std::any::Any + Send + Sync>) -> Result<Partition> {
    let v = payload
        .downcast_ref::<Vec<T>>()
        .cloned()
        .ok_or_else(|| anyhow!("Materialized node: terminal type mismatch"))?;
    Ok(Box::new(v) as Partition)
}

fn bail_on_materialize(_: &Arc<dyn std::any::Any + Send + Sync>) -> Result<Partition> {
    bail!("Materialized node is not supported inside a CoGroup subplan")
}

fn exec_par<T: 'static + Send + Sync + Clone>(chain: Vec<Node>, partitions: usize) -> Result<Vec<T>> {
    // Require a Source as the first node (keeps partitioning generic & simple)
    let (payload, vec_ops, rest) = match &chain[0] {
        Node::Source { payload, vec_ops, .. } => (Arc::clone(payload), Arc::clone(vec_ops), &chain[1..]),
        _ => bail!("execution plan must start with a Source node"),
    };

    let total_len = vec_ops.len(payload.as_ref()).unwrap_or(0);
    let parts = partitions.max(1).min(total_len.max(1));
    let mut curr = vec_ops
        .split(payload.as_ref(), parts)
        .unwrap_or_else(|| vec![vec_ops.clone_any(payload.as_ref()).expect("cloneable source")]);

    let mut i = 0usize;
    while i < rest.len() {
        match &rest[i] {
            Node::Stateless(_) => {
                let mut ops = Vec::new();
                while i < rest.len() {
                    if let Node::Stateless(more) = &rest[i] {
                        ops.extend(more.iter().cloned());
                        i += 1;
                    } else {
                        break;
                    }
                }
                curr = curr.into_par_iter().map(|p| ops.iter().fold(p, |acc, op| op.apply(acc))).collect();
            }
            Node::GroupByKey { local, merge } => {
                let mids: Vec<Partition> = curr.into_par_iter().map(|p| local(p)).collect();
                curr = vec![merge(mids)];
                i += 1;
            }
            Node::CombineValues { local_pairs, local_groups, merge } => {
                let mids: Vec<Partition> = curr
                    .into_par_iter()
                    .map(|p| dispatch_combine(local_pairs, local_groups, p))
                    .collect();
                curr = vec![merge(mids)];
                i += 1;
            }
            Node::CombineGlobal { local, merge, finish, .. } => {
                let mids: Vec<Partition> = curr.into_par_iter().map(|p| local(p)).collect();
                curr = vec![finish(merge(mids))];
                i += 1;
            }
            Node::CoGroup { left_chain, right_chain, coalesce_left, coalesce_right, exec } => {
                let left = exec_chain_seq((**left_chain).clone(), &bail_on_materialize)?;
                let right = exec_chain_seq((**right_chain).clone(), &bail_on_materialize)?;
                let left = coalesce_left(vec![left]);
                let right = coalesce_right(vec![right]);
                curr = vec![exec(left, right)];
                i += 1;
            }
            Node::Materialized(payload) => {
                curr = vec![materialize_as::<T>(payload)?];
                i += 1;
            }
            Node::Source { .. } => bail!("unexpected additional source"),
        }
    }

    if curr.len() == 1 {
        let one = curr.into_iter().next().unwrap();
        downcast_vec::<T>(one)
    } else {
        let mut out = Vec::<T>::new();
        for part in curr {
            out.extend(downcast_vec::<T>(part)?);
        }
        Ok(out)
    }
}
