pub mod eg_decrypt;

pub use eg_decrypt::{eg_decrypt, eg_decrypt_direct};
