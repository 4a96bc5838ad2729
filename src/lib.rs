// Déclaration des modules
pub mod crypto_error;
pub mod elgamal;
pub mod codec;
pub mod key_management;

pub use crate::elgamal::math;

// Primitives du noyau : aléa uniforme, recherche de premiers
pub use crate::elgamal::math::{
    SecureRng, uniform_in_range, random_nbit_integer,
    is_probable_prime, probable_prime, safe_prime, mod_inverse,
};

// Génération de clés et types
pub use crate::elgamal::eg_keygen::{
    DomainParameters, PublicKey, SecretKey, KeyPair,
    eg_keygen, MIN_PRIME_BITS, DEFAULT_PRIME_BITS,
};
pub use crate::elgamal::eg_generator::select_generator;

// Chiffrement, déchiffrement, homomorphisme
pub use crate::elgamal::eg_encrypt::{Ciphertext, eg_encrypt, eg_encrypt_with};
pub use crate::elgamal::eg_decrypt::{eg_decrypt, eg_decrypt_direct};
pub use crate::elgamal::eg_homomorphic::{eg_mul, eg_pow, eg_rerandomize};

// Codec clair applicatif ↔ entier
pub use codec::Plaintext;

// Erreur centralisée
pub use crypto_error::CryptoError;
