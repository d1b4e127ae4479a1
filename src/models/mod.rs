//! Data models for the library catalog

pub mod book;
pub mod employee;
pub mod outcome;

// Re-export commonly used types
pub use book::{Book, BookForm};
pub use employee::{Employee, NewEmployee};
pub use outcome::Outcome;
