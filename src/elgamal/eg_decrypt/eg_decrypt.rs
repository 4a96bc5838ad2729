use num_bigint::BigUint;
use num_traits::{One, Zero};
use crate::crypto_error::CryptoError;
use crate::elgamal::eg_encrypt::Ciphertext;
use crate::elgamal::eg_keygen::{KeyPair, PublicKey};
use crate::elgamal::math::{mod_inverse, mod_mul, uniform_in_range, SecureRng};

// a doit être inversible : a ∈ [1, p) ; b ∈ [0, p)
fn check_ciphertext(ct: &Ciphertext, pk: &PublicKey) -> Result<(), CryptoError> {
    let p = &pk.params.p;
    if ct.a.is_zero() || &ct.a >= p || &ct.b >= p {
        return Err(CryptoError::CiphertextOutOfRange);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Déchiffrement ElGamal avec aveuglement de l'exponentiation
//
//   r        ∈ [2, p-1) uniforme, indépendant
//   a_blind  = g^r · a mod p
//   ax       = a_blind^x mod p            = y^r · a^x
//   m_blind  = ax^-1 · b mod p
//   m        = y^r · m_blind mod p        = b · a^-x
//
// La base de l'exponentiation secrète est masquée par r. Ce n'est PAS une
// garantie temps constant : BigUint::modpow ne l'est pas.
//
// La clé privée est vérifiée avant toute opération, y compris le tirage de r.
// ---------------------------------------------------------------------------
pub fn eg_decrypt<R: SecureRng>(
    ct: &Ciphertext,
    kp: &KeyPair,
    rng: &mut R,
) -> Result<BigUint, CryptoError> {
    let sk = kp.secret_key()?;
    let pk = kp.public_key();
    check_ciphertext(ct, pk)?;

    let p = &pk.params.p;
    let r = uniform_in_range(&BigUint::from(2u32), &(p - BigUint::one()), rng)?;

    let a_blind = mod_mul(&pk.params.g.modpow(&r, p), &ct.a, p);
    let ax      = a_blind.modpow(sk.x(), p);
    let m_blind = mod_mul(&mod_inverse(&ax, p)?, &ct.b, p);

    Ok(mod_mul(&pk.y.modpow(&r, p), &m_blind, p))
}

// ---------------------------------------------------------------------------
// Déchiffrement direct : m = b · (a^x)^-1 mod p
//
// Algébriquement identique à eg_decrypt, sans aveuglement ni aléa.
// ---------------------------------------------------------------------------
pub fn eg_decrypt_direct(ct: &Ciphertext, kp: &KeyPair) -> Result<BigUint, CryptoError> {
    let sk = kp.secret_key()?;
    let pk = kp.public_key();
    check_ciphertext(ct, pk)?;

    let p = &pk.params.p;
    let ax = ct.a.modpow(sk.x(), p);

    Ok(mod_mul(&ct.b, &mod_inverse(&ax, p)?, p))
}
