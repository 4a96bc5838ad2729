pub mod eg_keygen;

pub use eg_keygen::{
    DomainParameters, PublicKey, SecretKey, KeyPair,
    eg_keygen, MIN_PRIME_BITS, DEFAULT_PRIME_BITS,
};
