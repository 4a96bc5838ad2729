pub mod codec;

pub use codec::{Plaintext, encode, decode_bytes, decode_text, decode_u64};
