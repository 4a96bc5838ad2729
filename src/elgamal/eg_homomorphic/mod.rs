pub mod eg_homomorphic;

pub use eg_homomorphic::{eg_mul, eg_pow, eg_rerandomize};
