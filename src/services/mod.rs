pub mod encoder;
pub mod preview;
pub mod prompt;
pub mod templates;

pub use encoder::encode_all;
pub use preview::{InMemoryPreviewHost, PreviewHost, PreviewKind, PreviewManager, PreviewResource};
pub use prompt::build_instruction;
