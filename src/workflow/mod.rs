pub mod pipeline;
pub mod sanitize;

pub use pipeline::{GenerationState, RequestPipeline};
pub use sanitize::sanitize_output;
