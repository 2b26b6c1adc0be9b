// Model types for wiki API responses

pub mod attachment;
pub mod page;

pub use attachment::AttachmentInfo;
pub use page::{PageRecord, PageSummary, SearchHit};
