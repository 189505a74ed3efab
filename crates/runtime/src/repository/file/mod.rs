//! File-based repository implementations.

mod guild;

pub use guild::FileGuildRepository;
