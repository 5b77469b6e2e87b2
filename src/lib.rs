//! ResizeBench - Batch Image Resize Benchmark
//!
//! Resizes a directory of raster images by a scale factor and measures a
//! strictly sequential pass against a bounded-concurrency pass over the
//! same input set, reporting elapsed times and relative speedup.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use resizebench::{
//!     BenchmarkRunner, JpegCodec, LanczosResampler, OutputArea, Scheduler,
//! };
//!
//! # async fn run() -> resizebench::Result<()> {
//! let scheduler = Scheduler::new(
//!     Arc::new(JpegCodec::default()),
//!     Arc::new(LanczosResampler::new()),
//!     None,
//! );
//! let runner = BenchmarkRunner::new(scheduler, OutputArea::new("output"));
//! let report = runner.run(std::path::Path::new("images"), 2.0).await?;
//!
//! println!(
//!     "sequential {:?}, concurrent {:?} ({:.1}% faster)",
//!     report.sequential.elapsed,
//!     report.concurrent.elapsed,
//!     report.improvement_percent(),
//! );
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bench;
pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scheduler;

// Re-export commonly used types
pub use bench::{BenchmarkReport, BenchmarkRunner};
pub use codec::{Dimensions, ImageCodec, JpegCodec, LanczosResampler, RasterBuffer, Resampler};
pub use config::Config;
pub use error::{ResizeBenchError, Result};
pub use pipeline::{OutputArea, ResizeTask};
pub use scheduler::{PassReport, Scheduler, TaskOutcome};

use tracing::info;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with default settings.
///
/// Installs the global tracing subscriber honoring `RUST_LOG`. Safe to call
/// more than once; later calls are no-ops.
pub fn init() {
    if tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .finish(),
    )
    .is_ok()
    {
        info!("ResizeBench v{} initialized", VERSION);
    }
}
