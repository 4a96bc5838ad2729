use num_bigint::BigUint;
use num_traits::One;
use crate::crypto_error::CryptoError;
use crate::elgamal::eg_encrypt::{eg_encrypt, Ciphertext};
use crate::elgamal::eg_keygen::{DomainParameters, PublicKey};
use crate::elgamal::math::{mod_mul, SecureRng};

// Paramètres construits hors eg_keygen : p < 2 ferait paniquer la réduction
fn check_modulus(params: &DomainParameters) -> Result<(), CryptoError> {
    if params.p < BigUint::from(2u32) {
        return Err(CryptoError::InvalidInput("le module p doit être >= 2".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Multiplication homomorphe : E(m1) ⊗ E(m2) = E(m1·m2 mod p)
//
//   (a1·a2 mod p, b1·b2 mod p) = (g^(k1+k2), y^(k1+k2) · m1·m2)
// ---------------------------------------------------------------------------
pub fn eg_mul(
    c1: &Ciphertext,
    c2: &Ciphertext,
    params: &DomainParameters,
) -> Result<Ciphertext, CryptoError> {
    check_modulus(params)?;
    Ok(Ciphertext {
        a: mod_mul(&c1.a, &c2.a, &params.p),
        b: mod_mul(&c1.b, &c2.b, &params.p),
    })
}

// Puissance homomorphe : (a^e, b^e) déchiffre en m^e mod p
pub fn eg_pow(ct: &Ciphertext, e: &BigUint, params: &DomainParameters) -> Result<Ciphertext, CryptoError> {
    check_modulus(params)?;
    Ok(Ciphertext {
        a: ct.a.modpow(e, &params.p),
        b: ct.b.modpow(e, &params.p),
    })
}

// ---------------------------------------------------------------------------
// Re-randomisation : multiplie par un chiffré frais de 1
//
// Même clair, chiffré non reliable à l'original (usage mix-net).
// ---------------------------------------------------------------------------
pub fn eg_rerandomize<R: SecureRng>(
    ct: &Ciphertext,
    pk: &PublicKey,
    rng: &mut R,
) -> Result<Ciphertext, CryptoError> {
    let one = eg_encrypt(&BigUint::one(), pk, rng)?;
    eg_mul(ct, &one, &pk.params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::elgamal::eg_decrypt::eg_decrypt;
    use crate::elgamal::eg_keygen::eg_keygen;

    #[test]
    fn test_homomorphic_mul() {
        let mut rng = StdRng::seed_from_u64(61);
        let kp = eg_keygen(128, &mut rng).unwrap();
        let pk = kp.public_key();

        let m1 = BigUint::from(43_684_365_279_967_565u64);
        let m2 = BigUint::from(80_916_417_872_157_521u64);
        let c1 = eg_encrypt(&m1, pk, &mut rng).unwrap();
        let c2 = eg_encrypt(&m2, pk, &mut rng).unwrap();

        let product = eg_mul(&c1, &c2, &pk.params).unwrap();
        let expected = (&m1 * &m2) % &pk.params.p;
        assert_eq!(eg_decrypt(&product, &kp, &mut rng).unwrap(), expected);
    }

    #[test]
    fn test_homomorphic_mul_wraps_modulo_p() {
        let mut rng = StdRng::seed_from_u64(62);
        let kp = eg_keygen(32, &mut rng).unwrap();
        let pk = kp.public_key();
        let p = &pk.params.p;

        // m1·m2 dépasse p : le résultat est réduit modulo p
        let m1 = p - BigUint::from(2u32);
        let m2 = p - BigUint::from(3u32);
        let c1 = eg_encrypt(&m1, pk, &mut rng).unwrap();
        let c2 = eg_encrypt(&m2, pk, &mut rng).unwrap();

        let product = eg_mul(&c1, &c2, &pk.params).unwrap();
        assert_eq!(eg_decrypt(&product, &kp, &mut rng).unwrap(), BigUint::from(6u32));
    }

    #[test]
    fn test_homomorphic_pow() {
        let mut rng = StdRng::seed_from_u64(63);
        let kp = eg_keygen(64, &mut rng).unwrap();
        let pk = kp.public_key();

        let ct = eg_encrypt(&BigUint::from(9u32), pk, &mut rng).unwrap();
        let ct4 = eg_pow(&ct, &BigUint::from(4u32), &pk.params).unwrap();
        assert_eq!(eg_decrypt(&ct4, &kp, &mut rng).unwrap(), BigUint::from(6561u32));
    }

    #[test]
    fn test_degenerate_modulus_is_an_error() {
        let ct = Ciphertext::new(BigUint::from(3u32), BigUint::from(4u32));
        for p in [0u32, 1] {
            let params = DomainParameters::new(BigUint::from(p), BigUint::from(5u32));
            assert!(matches!(eg_mul(&ct, &ct, &params), Err(CryptoError::InvalidInput(_))));
            assert!(matches!(
                eg_pow(&ct, &BigUint::from(2u32), &params),
                Err(CryptoError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_rerandomize_keeps_plaintext() {
        let mut rng = StdRng::seed_from_u64(64);
        let kp = eg_keygen(64, &mut rng).unwrap();
        let pk = kp.public_key();

        let m = BigUint::from(1234u32);
        let ct = eg_encrypt(&m, pk, &mut rng).unwrap();
        let fresh = eg_rerandomize(&ct, pk, &mut rng).unwrap();

        assert_ne!(ct, fresh);
        assert_eq!(eg_decrypt(&fresh, &kp, &mut rng).unwrap(), m);
    }
}
