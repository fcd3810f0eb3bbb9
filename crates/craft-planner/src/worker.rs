//! Strategy workers for the parallel orchestrator.
//!
//! Each strategy runs on its own blocking thread with owned copies of its inputs and reports
//! back over a channel. A worker that panics reports `Failed` and only its own strategy's plans
//! are lost.

use std::sync::Arc;

use craft_core::{ActionPath, Ledger, PersistentItems, TreeNode};
use craft_paths::{enumerate, Strategy};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Everything one strategy worker needs, owned.
#[derive(Debug, Clone)]
pub struct StrategyJob {
    pub strategy: Strategy,
    pub tree: Arc<TreeNode>,
    pub ledger: Ledger,
    pub persistent: PersistentItems,
    /// Plans to take before stopping.
    pub limit: usize,
}

impl StrategyJob {
    pub fn run(&self) -> Vec<ActionPath> {
        enumerate(self.strategy, &self.tree, &self.ledger, &self.persistent)
            .take(self.limit)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome {
    Completed(Vec<ActionPath>),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyReply {
    pub strategy: Strategy,
    pub outcome: StrategyOutcome,
}

impl StrategyReply {
    pub fn into_paths(self) -> Vec<ActionPath> {
        match self.outcome {
            StrategyOutcome::Completed(paths) => paths,
            StrategyOutcome::Failed => Vec::new(),
        }
    }
}

pub(crate) type Work = Box<dyn FnOnce() -> Vec<ActionPath> + Send + 'static>;

/// Run every job to completion and gather the replies in strategy order.
pub(crate) async fn collect_replies(work: Vec<(Strategy, Work)>) -> Vec<StrategyReply> {
    let (tx, mut rx) = mpsc::channel(work.len().max(1));

    for (strategy, job) in work {
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = match tokio::task::spawn_blocking(job).await {
                Ok(paths) => {
                    debug!(%strategy, plans = paths.len(), "strategy worker finished");
                    StrategyOutcome::Completed(paths)
                }
                Err(err) => {
                    warn!(%strategy, error = %err, "strategy worker failed");
                    StrategyOutcome::Failed
                }
            };
            // The receiver is only gone if the caller itself was dropped.
            let _ = tx.send(StrategyReply { strategy, outcome }).await;
        });
    }
    drop(tx);

    let mut replies = Vec::new();
    while let Some(reply) = rx.recv().await {
        replies.push(reply);
    }
    replies.sort_by_key(|reply| reply.strategy);
    replies
}

pub(crate) async fn run_jobs(jobs: Vec<StrategyJob>) -> Vec<StrategyReply> {
    let work = jobs
        .into_iter()
        .map(|job| {
            let strategy = job.strategy;
            let work: Work = Box::new(move || job.run());
            (strategy, work)
        })
        .collect();
    collect_replies(work).await
}
