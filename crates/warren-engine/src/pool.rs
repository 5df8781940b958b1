//! Fixed-size search worker pool.
//!
//! Jobs arrive over one shared crossbeam channel that every worker
//! thread `recv`s from; whichever worker is free picks the job up,
//! runs the search against the shared world, and reports through the
//! dispatcher's completion callback. Dropping the pool closes the
//! channel and joins the threads.

use std::sync::Arc;
use std::thread::{Builder, JoinHandle};

use crossbeam_channel::{unbounded, Sender};

use warren_core::{Coord, RequesterId, WorldGrid};
use warren_search::{CancelToken, Heuristic, PathSearch};

use crate::config::ConfigError;

/// One search handed to the pool.
pub(crate) struct SearchJob {
    pub id: RequesterId,
    /// Guards the completion against a cancel-and-resubmit race: a
    /// finished search only lands if the live record still carries
    /// this ticket.
    pub ticket: u64,
    pub start: Coord,
    pub goal: Coord,
    pub ignore_no_pass: bool,
    pub cancel: CancelToken,
}

/// Invoked on a pool thread when a search finishes. The path is in
/// step-after-start → goal order; empty means no path (or cancelled).
pub(crate) type CompletionFn = dyn Fn(&SearchJob, Vec<Coord>) + Send + Sync;

pub(crate) struct SearchPool {
    job_tx: Option<Sender<SearchJob>>,
    handles: Vec<JoinHandle<()>>,
}

impl SearchPool {
    /// Spawn `worker_count` named threads over a shared job channel.
    pub fn spawn(
        world: Arc<dyn WorldGrid>,
        worker_count: usize,
        heuristic: Heuristic,
        on_done: Arc<CompletionFn>,
    ) -> Result<Self, ConfigError> {
        let (job_tx, job_rx) = unbounded::<SearchJob>();
        let mut handles = Vec::with_capacity(worker_count);

        for i in 0..worker_count {
            let rx = job_rx.clone();
            let world = Arc::clone(&world);
            let on_done = Arc::clone(&on_done);
            let handle = Builder::new()
                .name(format!("warren-search-{i}"))
                .spawn(move || {
                    while let Ok(job) = rx.recv() {
                        let path = run_search(&*world, heuristic, &job);
                        on_done(&job, path);
                    }
                })
                .map_err(|e| ConfigError::ThreadSpawnFailed {
                    reason: format!("warren-search-{i}: {e}"),
                })?;
            handles.push(handle);
        }

        Ok(Self {
            job_tx: Some(job_tx),
            handles,
        })
    }

    /// Queue a job. Never blocks.
    pub fn submit(&self, job: SearchJob) {
        if let Some(tx) = &self.job_tx {
            // Send only fails when every worker has exited, which
            // cannot happen while the pool owns the join handles.
            let _ = tx.send(job);
        }
    }
}

impl Drop for SearchPool {
    fn drop(&mut self) {
        // Closing the channel ends each worker's recv loop.
        self.job_tx.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn run_search(world: &dyn WorldGrid, heuristic: Heuristic, job: &SearchJob) -> Vec<Coord> {
    if job.cancel.is_cancelled() {
        return Vec::new();
    }
    let mut results = PathSearch::new(world, job.start, vec![job.goal], job.ignore_no_pass)
        .with_heuristic(heuristic)
        .with_cancel(job.cancel.clone())
        .run();
    match results.pop() {
        Some(goal_path) => goal_path.path,
        None => Vec::new(),
    }
}
