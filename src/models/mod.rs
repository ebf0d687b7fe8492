mod page;

pub use page::{CreatedPageDto, Page, PageId};
