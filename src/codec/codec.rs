use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use crate::crypto_error::CryptoError;
use crate::elgamal::eg_keygen::DomainParameters;

// ============================================================================
// Codec de valeurs : représentation applicative ↔ domaine entier [0, p)
//
// La conversion est résolue une seule fois ici ; le noyau ElGamal ne voit
// que des BigUint. Octets et texte UTF-8 sont lus comme un entier
// big-endian : les octets nuls de tête ne survivent pas à l'aller-retour.
// Pas de découpage ni de padding : un clair trop long est refusé.
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plaintext {
    Bytes(Vec<u8>),
    Integer(BigUint),
}

impl Plaintext {
    pub fn text(s: &str) -> Self {
        Plaintext::Bytes(s.as_bytes().to_vec())
    }

    pub fn to_integer(&self) -> BigUint {
        match self {
            Plaintext::Bytes(bytes) => BigUint::from_bytes_be(bytes),
            Plaintext::Integer(n) => n.clone(),
        }
    }
}

impl From<u64> for Plaintext {
    fn from(n: u64) -> Self {
        Plaintext::Integer(BigUint::from(n))
    }
}

impl From<BigUint> for Plaintext {
    fn from(n: BigUint) -> Self {
        Plaintext::Integer(n)
    }
}

impl From<&str> for Plaintext {
    fn from(s: &str) -> Self {
        Plaintext::text(s)
    }
}

impl From<Vec<u8>> for Plaintext {
    fn from(bytes: Vec<u8>) -> Self {
        Plaintext::Bytes(bytes)
    }
}

/// Encode un clair applicatif dans [0, p).
///
/// Retourne Err(PlaintextOutOfRange) si la valeur obtenue est >= p.
pub fn encode(pt: &Plaintext, params: &DomainParameters) -> Result<BigUint, CryptoError> {
    let m = pt.to_integer();
    if m >= params.p {
        return Err(CryptoError::PlaintextOutOfRange);
    }
    Ok(m)
}

pub fn decode_bytes(m: &BigUint) -> Vec<u8> {
    // to_bytes_be(0) renvoie [0] ; le texte vide doit redonner ""
    if m.is_zero() {
        return Vec::new();
    }
    m.to_bytes_be()
}

pub fn decode_text(m: &BigUint) -> Result<String, CryptoError> {
    String::from_utf8(decode_bytes(m))
        .map_err(|e| CryptoError::EncodingError(format!("UTF-8 invalide : {e}")))
}

pub fn decode_u64(m: &BigUint) -> Result<u64, CryptoError> {
    m.to_u64()
        .ok_or_else(|| CryptoError::EncodingError(format!("{} bits ne tiennent pas dans un u64", m.bits())))
}
