//! Process-local store backed by `dashmap`.

pub mod page;
pub mod repository;

pub use page::MemoryPageRepository;
pub use repository::MemoryRepository;
