use serde::{Serialize, Deserialize};
use std::fs;
use std::path::Path;
use std::io;
use num_bigint::BigUint;
use num_traits::{Num, One};
use crate::crypto_error::CryptoError;
use crate::elgamal::eg_encrypt::Ciphertext;
use crate::elgamal::eg_keygen::{DomainParameters, KeyPair, PublicKey};

// ============================================================================
// Protection DoS parsing : limites de taille des entrées
//
// Un champ hex de plusieurs Mo rend BigUint::from_str_radix coûteux en CPU,
// un fichier de plusieurs Go épuise la mémoire. Ces limites sont vérifiées
// AVANT toute opération coûteuse.
// Dimensionnées pour des modules jusqu'à 16384 bits = 4096 caractères hex.
// ============================================================================

/// Taille maximale d'un fichier de clés JSON en octets (32 Ko)
const MAX_KEY_FILE_BYTES: u64 = 32_768;

/// Longueur maximale d'un champ hexadécimal ou décimal en caractères
const MAX_HEX_FIELD_LEN: usize = 4_096;

/// Taille maximale d'un chiffré binaire (deux champs de 2048 octets + en-têtes)
const MAX_CIPHERTEXT_BYTES: usize = 4_096 + 16;

// ============================================================================
// Structures JSON pour la sérialisation
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DomainParametersJson {
    pub p: String,
    pub g: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicKeyJson {
    pub p: String,
    pub g: String,
    pub y: String,
}

/// `x` absent : paire publique seule
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct KeyPairJson {
    pub public_key: PublicKeyJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CiphertextJson {
    pub a: String,
    pub b: String,
}

// Forme binaire compacte : entiers big-endian
#[derive(Serialize, Deserialize)]
struct CiphertextWire {
    a: Vec<u8>,
    b: Vec<u8>,
}

// ============================================================================
// Conversion BigUint ↔ hexadécimal / décimal
// ============================================================================

pub fn biguint_to_hex(value: &BigUint) -> String {
    value.to_str_radix(16).to_uppercase()
}

fn check_field_len(s: &str) -> Result<(), CryptoError> {
    if s.len() > MAX_HEX_FIELD_LEN {
        return Err(CryptoError::HexFieldTooLong {
            actual:  s.len(),
            maximum: MAX_HEX_FIELD_LEN,
        });
    }
    Ok(())
}

/// Convertit une string hex (majuscules ou minuscules) en BigUint.
///
/// Vérifie la longueur du champ AVANT la conversion.
///
/// Retourne :
///   Err(HexFieldTooLong)  si len > MAX_HEX_FIELD_LEN
///   Err(HexParseError)    si le contenu n'est pas un hex valide
pub fn hex_to_biguint(hex_str: &str) -> Result<BigUint, CryptoError> {
    check_field_len(hex_str)?;
    BigUint::from_str_radix(hex_str, 16)
        .map_err(|_| CryptoError::HexParseError)
}

pub fn biguint_to_decimal(value: &BigUint) -> String {
    value.to_str_radix(10)
}

pub fn decimal_to_biguint(dec_str: &str) -> Result<BigUint, CryptoError> {
    check_field_len(dec_str)?;
    BigUint::from_str_radix(dec_str, 10)
        .map_err(|_| CryptoError::DecimalParseError)
}

// ============================================================================
// Conversion structures Rust → JSON
// ============================================================================

pub fn params_to_json(params: &DomainParameters) -> DomainParametersJson {
    DomainParametersJson {
        p: biguint_to_hex(&params.p),
        g: biguint_to_hex(&params.g),
    }
}

pub fn public_key_to_json(pk: &PublicKey) -> PublicKeyJson {
    PublicKeyJson {
        p: biguint_to_hex(&pk.params.p),
        g: biguint_to_hex(&pk.params.g),
        y: biguint_to_hex(&pk.y),
    }
}

pub fn keypair_to_json(kp: &KeyPair) -> KeyPairJson {
    KeyPairJson {
        public_key: public_key_to_json(kp.public_key()),
        x: kp.secret_key().ok().map(|sk| biguint_to_hex(sk.x())),
    }
}

pub fn ciphertext_to_json(ct: &Ciphertext) -> CiphertextJson {
    CiphertextJson {
        a: biguint_to_hex(&ct.a),
        b: biguint_to_hex(&ct.b),
    }
}

// ============================================================================
// Conversion JSON → structures Rust
//
// Cohérence structurelle vérifiée au chargement : 2 <= g < p, y < p,
// x < p-1. La primalité de p n'est pas revérifiée (même contrat que
// KeyPair::from_parameters).
// ============================================================================

pub fn json_to_params(json: &DomainParametersJson) -> Result<DomainParameters, CryptoError> {
    let p = hex_to_biguint(&json.p)?;
    let g = hex_to_biguint(&json.g)?;

    if g < BigUint::from(2u32) || g >= p {
        return Err(CryptoError::KeyCoherenceError);
    }
    Ok(DomainParameters { p, g })
}

pub fn json_to_public_key(json: &PublicKeyJson) -> Result<PublicKey, CryptoError> {
    let params = json_to_params(&DomainParametersJson {
        p: json.p.clone(),
        g: json.g.clone(),
    })?;
    let y = hex_to_biguint(&json.y)?;

    if y >= params.p {
        return Err(CryptoError::KeyCoherenceError);
    }
    Ok(PublicKey { params, y })
}

pub fn json_to_keypair(json: &KeyPairJson) -> Result<KeyPair, CryptoError> {
    let PublicKey { params, y } = json_to_public_key(&json.public_key)?;

    let x = match &json.x {
        Some(hex) => {
            let x = hex_to_biguint(hex)?;
            // g < p garantit p >= 3, donc p-1 ne déborde pas
            if x >= &params.p - BigUint::one() {
                return Err(CryptoError::KeyCoherenceError);
            }
            Some(x)
        }
        None => None,
    };

    Ok(KeyPair::from_parameters(params.p, params.g, y, x))
}

pub fn json_to_ciphertext(json: &CiphertextJson) -> Result<Ciphertext, CryptoError> {
    Ok(Ciphertext {
        a: hex_to_biguint(&json.a)?,
        b: hex_to_biguint(&json.b)?,
    })
}

// ============================================================================
// Encodage binaire compact d'un chiffré (bincode)
// ============================================================================

pub fn ciphertext_to_bytes(ct: &Ciphertext) -> Result<Vec<u8>, CryptoError> {
    let wire = CiphertextWire {
        a: ct.a.to_bytes_be(),
        b: ct.b.to_bytes_be(),
    };
    bincode::serialize(&wire).map_err(|e| CryptoError::EncodingError(e.to_string()))
}

pub fn ciphertext_from_bytes(bytes: &[u8]) -> Result<Ciphertext, CryptoError> {
    if bytes.len() > MAX_CIPHERTEXT_BYTES {
        return Err(CryptoError::InvalidInput(format!(
            "chiffré binaire de {} octets (maximum : {MAX_CIPHERTEXT_BYTES})",
            bytes.len()
        )));
    }
    let wire: CiphertextWire = bincode::deserialize(bytes)
        .map_err(|e| CryptoError::EncodingError(e.to_string()))?;

    Ok(Ciphertext {
        a: BigUint::from_bytes_be(&wire.a),
        b: BigUint::from_bytes_be(&wire.b),
    })
}

// ============================================================================
// Vérification de taille de fichier (DoS protection)
// ============================================================================

fn check_file_size(filepath: &str) -> io::Result<()> {
    let meta = fs::metadata(filepath)?;
    if meta.len() > MAX_KEY_FILE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Fichier trop grand : {} octets (maximum autorisé : {} octets).",
                meta.len(),
                MAX_KEY_FILE_BYTES
            ),
        ));
    }
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(filepath: &str) -> io::Result<T> {
    check_file_size(filepath)?;
    let raw = fs::read_to_string(filepath)?;
    Ok(serde_json::from_str(&raw)?)
}

fn to_io(e: CryptoError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}

// ============================================================================
// Sauvegarde JSON sur disque
// ============================================================================

pub fn save_keypair_json(kp: &KeyPair, filepath: &str) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&keypair_to_json(kp))?;
    fs::write(filepath, json)?;
    Ok(())
}

pub fn save_public_key_json(pk: &PublicKey, filepath: &str) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&public_key_to_json(pk))?;
    fs::write(filepath, json)?;
    Ok(())
}

pub fn save_ciphertext_json(ct: &Ciphertext, filepath: &str) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&ciphertext_to_json(ct))?;
    fs::write(filepath, json)?;
    Ok(())
}

// ============================================================================
// Chargement JSON depuis disque
// Vérification de la taille du fichier AVANT la lecture (protection DoS).
// ============================================================================

pub fn load_keypair_json(filepath: &str) -> io::Result<KeyPair> {
    let json: KeyPairJson = read_json(filepath)?;
    json_to_keypair(&json).map_err(to_io)
}

pub fn load_public_key_json(filepath: &str) -> io::Result<PublicKey> {
    let json: PublicKeyJson = read_json(filepath)?;
    json_to_public_key(&json).map_err(to_io)
}

pub fn load_ciphertext_json(filepath: &str) -> io::Result<Ciphertext> {
    let json: CiphertextJson = read_json(filepath)?;
    json_to_ciphertext(&json).map_err(to_io)
}

// ============================================================================
// Utilitaires
// ============================================================================

pub fn key_file_exists(filepath: &str) -> bool {
    Path::new(filepath).exists()
}

pub fn ensure_keys_directory(dir_path: &str) -> io::Result<()> {
    if !Path::new(dir_path).exists() {
        fs::create_dir_all(dir_path)?;
    }
    Ok(())
}
