// Noyau ElGamal : primitives arithmétiques, génération, chiffrement,
// déchiffrement et opérations homomorphes

pub mod math;
pub mod eg_keygen;
pub mod eg_generator;
pub mod eg_encrypt;
pub mod eg_decrypt;
pub mod eg_homomorphic;
