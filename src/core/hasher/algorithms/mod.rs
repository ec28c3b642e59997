//! Hash algorithm implementations.

mod difference;

pub use difference::DifferenceHasher;
