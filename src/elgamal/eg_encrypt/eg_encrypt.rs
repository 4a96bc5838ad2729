use num_bigint::BigUint;
use num_traits::One;
use crate::crypto_error::CryptoError;
use crate::elgamal::eg_keygen::PublicKey;
use crate::elgamal::math::{mod_mul, uniform_in_range, SecureRng};

// ============================================================================
// Chiffré ElGamal (a, b)
//
//   a = g^k mod p       valeur publique éphémère
//   b = y^k · m mod p   message masqué
//
// Le chiffré ne porte pas p : les opérations homomorphes le reçoivent
// du contexte (paramètres de domaine).
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub a: BigUint,
    pub b: BigUint,
}

impl Ciphertext {
    pub fn new(a: BigUint, b: BigUint) -> Self {
        Ciphertext { a, b }
    }
}

// ---------------------------------------------------------------------------
// Chiffrement ElGamal avec un aléa k frais, k ∈ [1, p-1) uniforme
//
// Chaque appel tire un k indépendant, même pour un message identique :
// c'est ce qui rend le schéma IND-CPA. k n'est jamais dérivé du message.
//
// Retourne Err(CryptoError::PlaintextOutOfRange) si m >= p : pas de
// réduction silencieuse modulo p.
// ---------------------------------------------------------------------------
pub fn eg_encrypt<R: SecureRng>(
    m: &BigUint,
    pk: &PublicKey,
    rng: &mut R,
) -> Result<Ciphertext, CryptoError> {
    let p = &pk.params.p;
    if m >= p {
        return Err(CryptoError::PlaintextOutOfRange);
    }

    let k = uniform_in_range(&BigUint::one(), &(p - BigUint::one()), rng)?;
    eg_encrypt_with(m, pk, &k)
}

// ---------------------------------------------------------------------------
// Chiffrement avec un k imposé par l'appelant.
//
// Réservé à la reproduction de vecteurs de test : réutiliser ou prédire k
// casse la sécurité sémantique (et réutiliser k sur deux messages révèle
// leur quotient).
// ---------------------------------------------------------------------------
pub fn eg_encrypt_with(m: &BigUint, pk: &PublicKey, k: &BigUint) -> Result<Ciphertext, CryptoError> {
    let p = &pk.params.p;
    if m >= p {
        return Err(CryptoError::PlaintextOutOfRange);
    }
    if k < &BigUint::one() || k >= &(p - BigUint::one()) {
        return Err(CryptoError::InvalidEphemeralKey);
    }

    let a = pk.params.g.modpow(k, p);
    let b = mod_mul(&pk.y.modpow(k, p), m, p);

    Ok(Ciphertext { a, b })
}
