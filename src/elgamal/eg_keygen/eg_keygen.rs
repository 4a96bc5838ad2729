use std::fmt;
use num_bigint::BigUint;
use num_traits::One;
use zeroize::Zeroize;
use crate::crypto_error::CryptoError;
use crate::elgamal::eg_generator::select_generator;
use crate::elgamal::math::{safe_prime, uniform_in_range, SecureRng};

/// Taille minimale du module accepté par `eg_keygen`
pub const MIN_PRIME_BITS: u64 = 16;

/// Taille de module par défaut (sécurité ~112 bits)
pub const DEFAULT_PRIME_BITS: u64 = 2048;

// ============================================================================
// Paramètres de domaine : safe prime p et générateur g, 2 <= g < p
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParameters {
    pub p: BigUint,
    pub g: BigUint,
}

impl DomainParameters {
    pub fn new(p: BigUint, g: BigUint) -> Self {
        DomainParameters { p, g }
    }

    /// q = (p-1)/2, ordre du sous-groupe des résidus quadratiques
    pub fn q(&self) -> BigUint {
        (&self.p - BigUint::one()) >> 1u32
    }

    pub fn bits(&self) -> u64 {
        self.p.bits()
    }
}

// ============================================================================
// Clé publique ElGamal : pas de données secrètes, pas de zeroize nécessaire
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub params: DomainParameters,
    /// y = g^x mod p
    pub y: BigUint,
}

// ============================================================================
// Clé secrète ElGamal, ZEROISÉE À LA DESTRUCTION
// ============================================================================
#[derive(Clone)]
pub struct SecretKey {
    x: BigUint,
}

impl SecretKey {
    pub fn new(x: BigUint) -> Self {
        SecretKey { x }
    }

    /// Exposant secret x
    pub fn x(&self) -> &BigUint {
        &self.x
    }
}

// ============================================================================
// Helper : écrase un BigUint puis le remet à zéro
// num-bigint n'expose pas ses limbs : on remplace la valeur.
// ============================================================================
fn zeroize_biguint(n: &mut BigUint) {
    let bits = n.bits() as usize;
    if bits > 0 {
        *n = BigUint::from_bytes_be(&vec![0u8; (bits + 7) / 8]);
    }
    *n = BigUint::default();
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        zeroize_biguint(&mut self.x);
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// x n'apparaît jamais dans les logs ni les messages de panique
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").field("x", &"<masqué>").finish()
    }
}

// ============================================================================
// Paire de clés
//
// Type somme plutôt qu'un Option<SecretKey> : tout appel de déchiffrement
// doit traiter explicitement le cas "clé publique seule".
// ============================================================================
#[derive(Clone, Debug)]
pub enum KeyPair {
    /// Détenteur de la clé publique uniquement : chiffrement seul
    PublicOnly(PublicKey),
    /// Paire complète : chiffrement et déchiffrement
    Full {
        public_key: PublicKey,
        secret_key: SecretKey,
    },
}

impl KeyPair {
    /// Construit une paire depuis des valeurs fournies par l'appelant
    /// (stockage, vecteurs de test, paramètres externes).
    ///
    /// Ni la primalité de p ni la relation y = g^x mod p ne sont revérifiées :
    /// leur validité est à la charge de l'appelant.
    pub fn from_parameters(p: BigUint, g: BigUint, y: BigUint, x: Option<BigUint>) -> Self {
        let public_key = PublicKey {
            params: DomainParameters { p, g },
            y,
        };
        match x {
            Some(x) => KeyPair::Full {
                public_key,
                secret_key: SecretKey::new(x),
            },
            None => KeyPair::PublicOnly(public_key),
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        match self {
            KeyPair::PublicOnly(pk) => pk,
            KeyPair::Full { public_key, .. } => public_key,
        }
    }

    pub fn params(&self) -> &DomainParameters {
        &self.public_key().params
    }

    /// Retourne Err(MissingPrivateKey) pour une paire publique seule
    pub fn secret_key(&self) -> Result<&SecretKey, CryptoError> {
        match self {
            KeyPair::PublicOnly(_) => Err(CryptoError::MissingPrivateKey),
            KeyPair::Full { secret_key, .. } => Ok(secret_key),
        }
    }

    pub fn has_secret_key(&self) -> bool {
        matches!(self, KeyPair::Full { .. })
    }

    /// Copie publique seule, à distribuer aux émetteurs
    pub fn to_public(&self) -> KeyPair {
        KeyPair::PublicOnly(self.public_key().clone())
    }
}

// ============================================================================
// Génération de clés ElGamal
//
//   (p, q) = safe prime de `prime_bits` bits, p = 2q+1
//   g      = générateur durci (voir eg_generator)
//   x      ∈ [2, p-1) uniforme
//   y      = g^x mod p
//
// Ne peut échouer que si la source d'aléa est indisponible ou si
// `prime_bits` est inférieur à MIN_PRIME_BITS.
// ============================================================================
pub fn eg_keygen<R: SecureRng>(prime_bits: u64, rng: &mut R) -> Result<KeyPair, CryptoError> {
    if prime_bits < MIN_PRIME_BITS {
        return Err(CryptoError::KeySizeTooSmall {
            requested: prime_bits,
            minimum: MIN_PRIME_BITS,
        });
    }

    let (p, q) = safe_prime(prime_bits, rng)?;
    let g = select_generator(&p, &q, rng)?;

    let p_minus_1 = &p - BigUint::one();
    let x = uniform_in_range(&BigUint::from(2u32), &p_minus_1, rng)?;
    let y = g.modpow(&x, &p);

    Ok(KeyPair::Full {
        public_key: PublicKey {
            params: DomainParameters { p, g },
            y,
        },
        secret_key: SecretKey::new(x),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::elgamal::math::is_probable_prime;
    use crate::elgamal::math::random::tests::FailingRng;

    #[test]
    fn test_keygen_invariants() {
        let mut rng = StdRng::seed_from_u64(31);
        for bits in [16u64, 24, 32, 64, 128] {
            let kp = eg_keygen(bits, &mut rng).unwrap();
            let pk = kp.public_key();
            let sk = kp.secret_key().unwrap();
            let p = &pk.params.p;

            assert_eq!(p.bits(), bits);
            assert!(is_probable_prime(p, 40, &mut rng).unwrap());
            assert!(is_probable_prime(&pk.params.q(), 40, &mut rng).unwrap());
            assert_eq!(pk.y, pk.params.g.modpow(sk.x(), p));
            assert!(sk.x() > &BigUint::one() && sk.x() < &(p - BigUint::one()));
        }
    }

    #[test]
    fn test_keygen_rejects_small_modulus() {
        let mut rng = StdRng::seed_from_u64(32);
        assert_eq!(
            eg_keygen(8, &mut rng).unwrap_err(),
            CryptoError::KeySizeTooSmall { requested: 8, minimum: MIN_PRIME_BITS }
        );
    }

    #[test]
    fn test_keygen_propagates_rng_failure() {
        let mut rng = FailingRng;
        assert!(matches!(eg_keygen(64, &mut rng), Err(CryptoError::RandomnessUnavailable(_))));
    }

    #[test]
    fn test_from_parameters_variants() {
        let full = KeyPair::from_parameters(
            BigUint::from(23u32), BigUint::from(5u32), BigUint::from(10u32), Some(BigUint::from(3u32)),
        );
        assert!(full.has_secret_key());
        assert_eq!(full.secret_key().unwrap().x(), &BigUint::from(3u32));

        let public = full.to_public();
        assert!(!public.has_secret_key());
        assert_eq!(public.secret_key().unwrap_err(), CryptoError::MissingPrivateKey);
        assert_eq!(public.public_key(), full.public_key());
        assert_eq!(public.params().q(), BigUint::from(11u32));
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let sk = SecretKey::new(BigUint::from(123456789u32));
        let shown = format!("{sk:?}");
        assert!(!shown.contains("123456789"));
    }

    #[test]
    fn test_secret_key_zeroize() {
        let mut sk = SecretKey::new(BigUint::from(987654321u32));
        sk.zeroize();
        assert_eq!(sk.x(), &BigUint::from(0u32));
        assert_eq!(sk.x().bits(), 0);
    }

    #[test]
    fn test_secret_key_zeroize_large_and_idempotent() {
        let mut rng = StdRng::seed_from_u64(33);
        let kp = eg_keygen(64, &mut rng).unwrap();
        let mut sk = kp.secret_key().unwrap().clone();
        assert!(sk.x().bits() > 1);

        sk.zeroize();
        assert_eq!(sk.x(), &BigUint::default());
        sk.zeroize();
        assert_eq!(sk.x(), &BigUint::default());
    }
}
