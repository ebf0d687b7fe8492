mod page;

pub use page::{InMemoryPageRepository, PageRepositoryTrait};

#[cfg(test)]
pub use page::MockPageRepositoryTrait;
