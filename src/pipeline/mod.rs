//! Batch pipeline building blocks: discovery, task planning, output area

pub mod discovery;
pub mod output;
pub mod task;

pub use discovery::{discover_files, is_supported_extension, SUPPORTED_EXTENSIONS};
pub use output::OutputArea;
pub use task::{plan_tasks, ResizeTask, SkippedFile, TaskPlan, OUTPUT_EXTENSION};
