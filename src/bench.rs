//! Benchmark orchestration: sequential vs concurrent over one task set

use std::path::Path;

use tracing::info;

use crate::error::{Result, ResizeBenchError};
use crate::pipeline::{discover_files, plan_tasks, OutputArea, SkippedFile};
use crate::scheduler::{PassReport, Scheduler};

/// Outcome of one full benchmark run
#[derive(Debug)]
pub struct BenchmarkReport {
    /// Files excluded at planning time (corrupt, degenerate, colliding)
    pub skipped: Vec<SkippedFile>,
    pub sequential: PassReport,
    pub concurrent: PassReport,
}

impl BenchmarkReport {
    /// Relative speedup of the concurrent pass:
    /// (sequential - concurrent) / sequential * 100
    pub fn improvement_percent(&self) -> f64 {
        let sequential = self.sequential.elapsed.as_secs_f64();
        if sequential <= 0.0 {
            return 0.0;
        }
        let concurrent = self.concurrent.elapsed.as_secs_f64();
        (sequential - concurrent) / sequential * 100.0
    }
}

/// Runs both execution strategies over the same input snapshot and times them
pub struct BenchmarkRunner {
    scheduler: Scheduler,
    output: OutputArea,
}

impl BenchmarkRunner {
    pub fn new(scheduler: Scheduler, output: OutputArea) -> Self {
        Self { scheduler, output }
    }

    pub fn output(&self) -> &OutputArea {
        &self.output
    }

    /// Clean -> timed sequential pass -> Clean -> timed concurrent pass.
    ///
    /// Discovery and planning happen once; both passes consume clones of the
    /// identical task list, and the output area is reset in between so stale
    /// files cannot skew the comparison.
    pub async fn run(&self, source_root: &Path, scale: f64) -> Result<BenchmarkReport> {
        let files = discover_files(source_root)?;
        info!("Discovered {} candidate files", files.len());

        let plan = plan_tasks(&files, scale, self.output.root(), self.scheduler.codec().as_ref())?;
        info!(
            "Planned {} tasks ({} skipped)",
            plan.tasks.len(),
            plan.skipped.len()
        );

        self.output.clean()?;
        let seq_scheduler = self.scheduler.clone();
        let seq_tasks = plan.tasks.clone();
        let sequential = tokio::task::spawn_blocking(move || seq_scheduler.run_sequential(&seq_tasks))
            .await
            .map_err(|e| ResizeBenchError::task_join(e.to_string()))?;

        self.output.clean()?;
        let concurrent = self.scheduler.run_concurrent(plan.tasks).await;

        Ok(BenchmarkReport {
            skipped: plan.skipped,
            sequential,
            concurrent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::fake::FakeCodec;
    use crate::codec::LanczosResampler;
    use crate::scheduler::Scheduler;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn report_with_times(sequential_ms: u64, concurrent_ms: u64) -> BenchmarkReport {
        BenchmarkReport {
            skipped: Vec::new(),
            sequential: PassReport {
                outcomes: Vec::new(),
                elapsed: Duration::from_millis(sequential_ms),
            },
            concurrent: PassReport {
                outcomes: Vec::new(),
                elapsed: Duration::from_millis(concurrent_ms),
            },
        }
    }

    #[test]
    fn test_improvement_percent() {
        let report = report_with_times(1000, 400);
        assert!((report.improvement_percent() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_improvement_percent_zero_sequential() {
        let report = report_with_times(0, 400);
        assert_eq!(report.improvement_percent(), 0.0);
    }

    #[test]
    fn test_improvement_percent_can_be_negative() {
        let report = report_with_times(400, 1000);
        assert!(report.improvement_percent() < 0.0);
    }

    #[tokio::test]
    async fn test_full_run_over_fabricated_sources() {
        let dir = TempDir::new().unwrap();
        let source_root = dir.path().join("images");
        std::fs::create_dir(&source_root).unwrap();
        let out_root = dir.path().join("output");

        // Real files on disk for discovery, dimensions fabricated by the codec
        let mut codec = FakeCodec::new();
        for name in ["one.png", "two.jpg", "three.jpeg"] {
            let path = source_root.join(name);
            std::fs::write(&path, b"x").unwrap();
            codec.insert(path, 60, 40);
        }
        // A corrupt file among valid ones is reported, not fatal
        let corrupt = source_root.join("broken.png");
        std::fs::write(&corrupt, b"x").unwrap();
        codec.fail_decode(corrupt);

        let output = OutputArea::new(&out_root);
        // Stale artifact from a previous run must not survive
        output.clean().unwrap();
        std::fs::write(out_root.join("stale.jpg"), b"old").unwrap();

        let scheduler = Scheduler::new(
            Arc::new(codec),
            Arc::new(LanczosResampler::new()),
            Some(2),
        );
        let runner = BenchmarkRunner::new(scheduler, output);
        let report = runner.run(&source_root, 2.0).await.unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.sequential.completed(), 3);
        assert_eq!(report.concurrent.completed(), 3);
        assert_eq!(report.sequential.failed(), 0);

        assert!(!out_root.join("stale.jpg").exists());
        for name in ["one.jpg", "two.jpg", "three.jpg"] {
            let content = std::fs::read_to_string(out_root.join(name)).unwrap();
            assert_eq!(content, "120x80");
        }
        assert!(!out_root.join("broken.jpg").exists());
    }

    #[tokio::test]
    async fn test_missing_source_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let scheduler = Scheduler::new(
            Arc::new(FakeCodec::new()),
            Arc::new(LanczosResampler::new()),
            Some(2),
        );
        let runner = BenchmarkRunner::new(scheduler, OutputArea::new(dir.path().join("out")));

        let err = runner
            .run(&PathBuf::from(dir.path().join("missing")), 2.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ResizeBenchError::DirectoryNotFound { .. }));
    }
}
