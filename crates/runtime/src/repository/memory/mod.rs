//! In-memory repository implementations for testing and development.

mod guild;

pub use guild::InMemoryGuildRepo;
