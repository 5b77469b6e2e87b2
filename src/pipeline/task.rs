//! Resize task construction and planning

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::{Dimensions, ImageCodec};
use crate::error::{Result, ResizeBenchError};

/// Fixed output extension; every result is written as JPEG
pub const OUTPUT_EXTENSION: &str = "jpg";

/// One unit of work: a source image, its measured and computed dimensions,
/// and the destination path. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ResizeTask {
    pub source: PathBuf,
    pub source_dims: Dimensions,
    pub target_dims: Dimensions,
    pub dest: PathBuf,
}

/// A source file excluded from the pass, with the reason
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: ResizeBenchError,
}

/// Planning result: runnable tasks plus the files skipped during planning
#[derive(Debug, Default)]
pub struct TaskPlan {
    pub tasks: Vec<ResizeTask>,
    pub skipped: Vec<SkippedFile>,
}

/// Destination path: output root + source base name + fixed extension.
/// Subdirectory structure is intentionally flattened.
fn destination_for(source: &Path, dest_root: &Path) -> Option<PathBuf> {
    let stem = source.file_stem()?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    Some(dest_root.join(name))
}

/// Build resize tasks for the discovered files.
///
/// Per-file problems (unreadable image, degenerate target, destination
/// collision) are recorded as skips and never abort planning. Two sources
/// that normalize to the same destination are resolved first-wins; the
/// later one is reported rather than silently overwritten by a race.
pub fn plan_tasks(
    files: &[PathBuf],
    scale: f64,
    dest_root: &Path,
    codec: &dyn ImageCodec,
) -> Result<TaskPlan> {
    if !(scale > 0.0 && scale.is_finite()) {
        return Err(ResizeBenchError::config(format!(
            "Scale factor must be a positive number, got {}",
            scale
        )));
    }

    let mut plan = TaskPlan::default();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

    for source in files {
        let source_dims = match codec.probe(source) {
            Ok(dims) => dims,
            Err(reason) => {
                warn!("Skipping {:?}: {}", source, reason);
                plan.skipped.push(SkippedFile {
                    path: source.clone(),
                    reason,
                });
                continue;
            }
        };

        let target_dims = match source_dims.scaled(scale) {
            Some(dims) => dims,
            None => {
                let reason = ResizeBenchError::invalid_dimensions(
                    (f64::from(source_dims.width) * scale).max(0.0) as u32,
                    (f64::from(source_dims.height) * scale).max(0.0) as u32,
                    source.clone(),
                );
                warn!("Skipping {:?}: {}", source, reason);
                plan.skipped.push(SkippedFile {
                    path: source.clone(),
                    reason,
                });
                continue;
            }
        };

        let dest = match destination_for(source, dest_root) {
            Some(dest) => dest,
            None => {
                plan.skipped.push(SkippedFile {
                    path: source.clone(),
                    reason: ResizeBenchError::decode("source has no file name", source.clone()),
                });
                continue;
            }
        };

        if let Some(first) = claimed.get(&dest) {
            let reason = ResizeBenchError::collision(dest, first.clone(), source.clone());
            warn!("Skipping {:?}: {}", source, reason);
            plan.skipped.push(SkippedFile {
                path: source.clone(),
                reason,
            });
            continue;
        }
        claimed.insert(dest.clone(), source.clone());

        debug!(
            "Planned {:?} {} -> {} at {:?}",
            source, source_dims, target_dims, dest
        );
        plan.tasks.push(ResizeTask {
            source: source.clone(),
            source_dims,
            target_dims,
            dest,
        });
    }

    Ok(plan)
}
