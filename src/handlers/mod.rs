mod page;

pub use page::{create_handler, delete_handler, get_handler, update_handler, PageServiceType};
