use std::path::PathBuf;

use crate::compile::plan::CaptionPlan;
use crate::foundation::error::CaptionResult;

/// Inputs and output of one composite run.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeJob {
    /// Source video.
    pub input_video: PathBuf,
    /// Output file; its container follows the extension.
    pub output: PathBuf,
    /// Optional video/image drawn over the whole frame beneath the captions.
    pub overlay: Option<PathBuf>,
    /// Optional sound mixed in at t = 0.
    pub intro_sound: Option<PathBuf>,
    /// Whether the source carries an audio stream to keep.
    pub source_has_audio: bool,
    /// Replace an existing output file.
    pub overwrite: bool,
}

/// Backend that burns a [`CaptionPlan`] into a video.
pub trait Compositor: Send {
    /// Produce `job.output` from `job.input_video` with `plan` drawn on top.
    fn composite(&mut self, job: &CompositeJob, plan: &CaptionPlan) -> CaptionResult<()>;
}

/// Records jobs instead of encoding, for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryCompositor {
    pub(crate) jobs: Vec<(CompositeJob, CaptionPlan)>,
}

impl InMemoryCompositor {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the recorded jobs in call order.
    pub fn jobs(&self) -> &[(CompositeJob, CaptionPlan)] {
        &self.jobs
    }
}

impl Compositor for InMemoryCompositor {
    fn composite(&mut self, job: &CompositeJob, plan: &CaptionPlan) -> CaptionResult<()> {
        self.jobs.push((job.clone(), plan.clone()));
        Ok(())
    }
}
