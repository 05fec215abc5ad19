pub mod pipeline;
pub mod blacklist;

pub use pipeline::{TokenPipeline, Outcome, PipelineStage, PipelineError};
pub use blacklist::ConfigBlacklist;
