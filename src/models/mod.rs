pub mod attachment;
pub mod exam;

pub use attachment::{Attachment, AttachmentData, AttachmentStore, EncodedAttachment};
pub use exam::{ConfigAction, ConfigStore, Difficulty, ExamConfig, Language};
