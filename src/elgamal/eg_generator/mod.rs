pub mod eg_generator;

pub use eg_generator::{is_acceptable_generator, select_generator};
