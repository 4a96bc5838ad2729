// ===========================================================================
// Gestion centralisée des erreurs cryptographiques
//
// Tous les modules utilisent ce type au lieu de panic!/assert!/unwrap().
// L'appelant reçoit une Err(...) et décide : aucune erreur n'est masquée,
// seules les boucles de rejet internes (tirage uniforme, recherche de
// premier, choix du générateur) retirent silencieusement.
// ===========================================================================

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CryptoError {
    // --- Erreurs de paramètres d'entrée ---
    /// Déchiffrement demandé avec une paire de clés publique seule
    MissingPrivateKey,
    /// Tirage borné demandé avec min >= max (erreur de programmation)
    InvalidRange,
    /// Le message m est >= p (hors domaine plaintext ElGamal)
    PlaintextOutOfRange,
    /// Une composante du chiffré est hors de [1, p) pour a ou [0, p) pour b
    CiphertextOutOfRange,
    /// Aléa éphémère k fourni hors de [1, p-1)
    InvalidEphemeralKey,
    /// La taille de clé demandée est trop petite
    KeySizeTooSmall { requested: u64, minimum: u64 },

    // --- Erreurs de la source d'aléa ---
    /// Le CSRNG du système n'a pas pu fournir d'octets, jamais remplacé
    /// par une source plus faible
    RandomnessUnavailable(String),

    // --- Erreurs mathématiques internes ---
    /// L'inverse modulaire n'existe pas (gcd != 1)
    NoModularInverse,

    // --- Erreurs de stockage / parsing ---
    /// Parsing hexadécimal invalide dans un champ de clé ou de chiffré
    HexParseError,
    /// Parsing décimal invalide
    DecimalParseError,
    /// Champ hex trop long : vecteur DoS potentiel (conversion BigUint coûteuse)
    HexFieldTooLong { actual: usize, maximum: usize },
    /// Paramètres chargés incohérents (g hors de [2, p), y >= p, x >= p-1)
    KeyCoherenceError,

    // --- Erreurs du codec de valeurs ---
    /// Le clair déchiffré ne se décode pas dans la représentation demandée
    EncodingError(String),

    InvalidInput(String), // Erreur générique pour les entrées invalides
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::MissingPrivateKey =>
                write!(f, "Aucune clé privée disponible pour le déchiffrement"),
            CryptoError::InvalidRange =>
                write!(f, "Intervalle de tirage vide : min doit être strictement inférieur à max"),
            CryptoError::PlaintextOutOfRange =>
                write!(f, "Le message doit être dans [0, p)"),
            CryptoError::CiphertextOutOfRange =>
                write!(f, "Le chiffré doit vérifier a dans [1, p) et b dans [0, p)"),
            CryptoError::InvalidEphemeralKey =>
                write!(f, "L'aléa éphémère k doit être dans [1, p-1)"),
            CryptoError::KeySizeTooSmall { requested, minimum } =>
                write!(f, "Taille de clé {requested} bits insuffisante, minimum requis : {minimum} bits"),
            CryptoError::RandomnessUnavailable(msg) =>
                write!(f, "Source d'aléa cryptographique indisponible : {msg}"),
            CryptoError::NoModularInverse =>
                write!(f, "Impossible de calculer l'inverse modulaire (gcd != 1)"),
            CryptoError::HexParseError =>
                write!(f, "Parsing hexadécimal invalide"),
            CryptoError::DecimalParseError =>
                write!(f, "Parsing décimal invalide"),
            CryptoError::HexFieldTooLong { actual, maximum } =>
                write!(f, "Champ hexadécimal trop long : {actual} caractères (maximum autorisé : {maximum})"),
            CryptoError::KeyCoherenceError =>
                write!(f, "Paramètres incohérents : g, y ou x hors de l'intervalle autorisé par p"),
            CryptoError::EncodingError(msg) =>
                write!(f, "Décodage du clair impossible : {msg}"),
            CryptoError::InvalidInput(msg) =>
                write!(f, "Entrée invalide : {msg}"),
        }
    }
}

impl std::error::Error for CryptoError {}

// Le CSRNG qui échoue doit remonter tel quel, jamais être masqué
impl From<rand_core::Error> for CryptoError {
    fn from(e: rand_core::Error) -> Self {
        CryptoError::RandomnessUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_key_size() {
        let e = CryptoError::KeySizeTooSmall { requested: 8, minimum: 16 };
        assert_eq!(e.to_string(), "Taille de clé 8 bits insuffisante, minimum requis : 16 bits");
    }

    #[test]
    fn test_rand_core_error_maps_to_randomness_unavailable() {
        let e: CryptoError = rand_core::Error::new("entropie épuisée").into();
        assert!(matches!(e, CryptoError::RandomnessUnavailable(_)));
    }
}
