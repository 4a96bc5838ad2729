use num_bigint::BigUint;
use num_traits::Zero;
use crate::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Inverse modulaire de a mod n.
// Retourne Err(CryptoError::NoModularInverse) si gcd(a, n) != 1 (ou a ≡ 0).
// ---------------------------------------------------------------------------
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint, CryptoError> {
    // modinv panique sur un module nul (paramètres chargés non validés)
    if n.is_zero() {
        return Err(CryptoError::NoModularInverse);
    }
    a.modinv(n).ok_or(CryptoError::NoModularInverse)
}

// Produit modulaire a·b mod n
pub fn mod_mul(a: &BigUint, b: &BigUint, n: &BigUint) -> BigUint {
    (a * b) % n
}
