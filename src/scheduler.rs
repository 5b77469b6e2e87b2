//! Sequential and concurrent execution of resize tasks
//!
//! Both modes share the same per-task pipeline (decode -> resample ->
//! encode) and the same outcome reporting; only the execution strategy
//! differs. Concurrency must not change logical results, only timing.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::codec::{Dimensions, ImageCodec, Resampler};
use crate::config::default_concurrency;
use crate::error::Result;
use crate::pipeline::ResizeTask;

/// Per-task result recorded by a pass
#[derive(Debug)]
pub enum TaskOutcome {
    Completed {
        source: PathBuf,
        dest: PathBuf,
        target_dims: Dimensions,
    },
    Failed {
        source: PathBuf,
        error: String,
    },
}

impl TaskOutcome {
    fn from_result(task: ResizeTask, result: Result<()>) -> Self {
        match result {
            Ok(()) => Self::Completed {
                source: task.source,
                dest: task.dest,
                target_dims: task.target_dims,
            },
            Err(e) => Self::Failed {
                source: task.source,
                error: e.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn source(&self) -> &PathBuf {
        match self {
            Self::Completed { source, .. } | Self::Failed { source, .. } => source,
        }
    }
}

/// Outcome list and wall-clock time of one full pass
#[derive(Debug)]
pub struct PassReport {
    pub outcomes: Vec<TaskOutcome>,
    pub elapsed: Duration,
}

impl PassReport {
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed()
    }
}

/// Executes a collection of resize tasks sequentially or concurrently
#[derive(Clone)]
pub struct Scheduler {
    codec: Arc<dyn ImageCodec>,
    resampler: Arc<dyn Resampler>,
    max_concurrent: usize,
}

impl Scheduler {
    /// Create a scheduler; `max_concurrent` defaults to logical CPU count
    /// capped at 16.
    pub fn new(
        codec: Arc<dyn ImageCodec>,
        resampler: Arc<dyn Resampler>,
        max_concurrent: Option<usize>,
    ) -> Self {
        let max_concurrent = max_concurrent.unwrap_or_else(default_concurrency).max(1);
        Self {
            codec,
            resampler,
            max_concurrent,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn codec(&self) -> Arc<dyn ImageCodec> {
        Arc::clone(&self.codec)
    }

    /// One task's full pipeline. The buffer is handed off stage to stage,
    /// never shared.
    fn execute(codec: &dyn ImageCodec, resampler: &dyn Resampler, task: &ResizeTask) -> Result<()> {
        let source = codec.decode(&task.source)?;
        let resized = resampler.resample(&source, task.target_dims);
        debug!(
            "Resized {:?}: {} -> {}",
            task.source,
            source.dimensions(),
            resized.dimensions()
        );
        codec.encode(&resized, &task.dest)
    }

    /// Process every task strictly one at a time, in order.
    ///
    /// A failed task is recorded and processing continues with the next one.
    pub fn run_sequential(&self, tasks: &[ResizeTask]) -> PassReport {
        let start = Instant::now();
        info!("Starting sequential pass over {} tasks", tasks.len());

        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in tasks {
            let result = Self::execute(self.codec.as_ref(), self.resampler.as_ref(), task);
            if let Err(ref e) = result {
                warn!("Failed to process {:?}: {}", task.source, e);
            }
            outcomes.push(TaskOutcome::from_result(task.clone(), result));
        }

        let elapsed = start.elapsed();
        info!("Sequential pass completed in {:.2}s", elapsed.as_secs_f64());
        PassReport { outcomes, elapsed }
    }

    /// Process all tasks with overlapping execution, bounded by a semaphore
    /// sized to `max_concurrent`.
    ///
    /// Does not return until every submitted task has completed or
    /// definitively failed; one task's failure never cancels its siblings.
    /// Outcomes are returned in submission order, so no shared accumulator
    /// is needed.
    pub async fn run_concurrent(&self, tasks: Vec<ResizeTask>) -> PassReport {
        let start = Instant::now();
        let total = tasks.len();
        info!(
            "Starting concurrent pass over {} tasks ({} max in flight)",
            total, self.max_concurrent
        );

        let sources: Vec<PathBuf> = tasks.iter().map(|t| t.source.clone()).collect();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));

        let mut handles = Vec::with_capacity(total);
        for task in tasks {
            let codec = Arc::clone(&self.codec);
            let resampler = Arc::clone(&self.resampler);
            let semaphore = Arc::clone(&semaphore);

            handles.push(tokio::spawn(async move {
                // Bounds the number of simultaneously in-flight pipelines
                let _permit = semaphore.acquire_owned().await.unwrap();

                let source = task.source.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    let result = Self::execute(codec.as_ref(), resampler.as_ref(), &task);
                    if let Err(ref e) = result {
                        warn!("Failed to process {:?}: {}", task.source, e);
                    }
                    TaskOutcome::from_result(task, result)
                })
                .await;

                joined.unwrap_or_else(|e| TaskOutcome::Failed {
                    source,
                    error: format!("task join error: {}", e),
                })
            }));
        }

        // Full join barrier: the pass is only done once all tasks finish
        let mut outcomes = Vec::with_capacity(total);
        for (joined, source) in join_all(handles).await.into_iter().zip(sources) {
            outcomes.push(joined.unwrap_or_else(|e| TaskOutcome::Failed {
                source,
                error: format!("task join error: {}", e),
            }));
        }

        let elapsed = start.elapsed();
        info!("Concurrent pass completed in {:.2}s", elapsed.as_secs_f64());
        PassReport { outcomes, elapsed }
    }
}
