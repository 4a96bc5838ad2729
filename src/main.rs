// =========================================================
// Démonstration interactive : ElGamal multiplicatif
// Génération de clés, chiffrement de texte, homomorphisme
// et mesures de durée
// =========================================================

// ── ElGamal ───────────────────────────────────────────────
use elgamal_crypto::{eg_keygen, eg_encrypt, eg_decrypt, eg_decrypt_direct, eg_mul, eg_rerandomize};
use elgamal_crypto::codec::{encode, decode_text, Plaintext};

// ── Gestion des clés ──────────────────────────────────────
use elgamal_crypto::key_management::{
    key_file_exists, ensure_keys_directory,
    save_keypair_json, save_public_key_json, save_ciphertext_json,
    load_keypair_json, ciphertext_to_bytes,
};

// ── Types et erreurs ──────────────────────────────────────
use elgamal_crypto::{uniform_in_range, CryptoError, KeyPair, DEFAULT_PRIME_BITS};

// ── Stdlib & crates externes ──────────────────────────────
use num_bigint::BigUint;
use num_traits::One;
use rand_core::OsRng;
use std::io::{self, Write};
use std::time::{Duration, Instant};

// ── Chemins des fichiers ──────────────────────────────────
const KEYS_DIR:             &str = "keys";
const KEYPAIR_JSON_PATH:    &str = "keys/keypair.json";
const PUBLIC_KEY_JSON_PATH: &str = "keys/public_key.json";
const CIPHERTEXT_JSON_PATH: &str = "keys/ciphertext.json";

// ─────────────────────────────────────────────────────────
// Erreur applicative centrale
//
// Unifie CryptoError et io::Error pour propager toutes les
// erreurs via ? sans conversion manuelle.
// ─────────────────────────────────────────────────────────

#[derive(Debug)]
enum AppError {
    Crypto(CryptoError),
    Io(std::io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Crypto(e) => write!(f, "Erreur cryptographique : {}", e),
            AppError::Io(e)     => write!(f, "Erreur I/O : {}", e),
        }
    }
}

impl From<CryptoError> for AppError {
    fn from(e: CryptoError) -> Self { AppError::Crypto(e) }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self { AppError::Io(e) }
}

// ─────────────────────────────────────────────────────────
// Point d'entrée
// ─────────────────────────────────────────────────────────

fn main() {
    if let Err(e) = ensure_keys_directory(KEYS_DIR) {
        eprintln!("[FATAL] Impossible de créer le répertoire keys/ : {}", e);
        std::process::exit(1);
    }

    loop {
        afficher_menu();
        let choix = lire_choix();

        let res = match choix.as_str() {
            "1" => demonstration_texte(),
            "2" => demonstration_homomorphisme(),
            "3" => regenerer_cles(),
            "4" => { println!("\nAu revoir !\n"); break; }
            _   => { println!("\nChoix invalide. Veuillez choisir 1, 2, 3 ou 4.\n"); continue; }
        };

        if let Err(e) = res {
            eprintln!("\n[ERREUR] {}\n", e);
        }

        println!("\nAppuyez sur Entrée pour continuer...");
        let mut pause = String::new();
        io::stdin().read_line(&mut pause).ok();
    }
}

// ─────────────────────────────────────────────────────────
// Menu
// ─────────────────────────────────────────────────────────

fn afficher_menu() {
    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║   ELGAMAL MULTIPLICATIF — MENU                ║");
    println!("╚═══════════════════════════════════════════════╝");
    println!("\n  [1] Chiffrement / déchiffrement d'un texte");
    println!("  [2] Homomorphisme multiplicatif");
    println!("  [3] Régénérer les clés");
    println!("  [4] Quitter\n");
    print!("Votre choix : ");
    io::stdout().flush().ok();
}

fn lire_choix() -> String {
    let mut input = String::new();
    io::stdin().read_line(&mut input).ok();
    input.trim().to_string()
}

fn choisir_taille() -> u64 {
    println!("\n  Taille du module p :");
    println!("  [1] 512 bits   (rapide, démonstration)");
    println!("  [2] 1024 bits");
    println!("  [3] {} bits  (production, plusieurs minutes)", DEFAULT_PRIME_BITS);
    print!("Votre choix : ");
    io::stdout().flush().ok();

    match lire_choix().as_str() {
        "2" => 1024,
        "3" => DEFAULT_PRIME_BITS,
        _   => 512,
    }
}

// ─────────────────────────────────────────────────────────
// Gestion des clés : chargement ou génération + sauvegarde
// ─────────────────────────────────────────────────────────

fn charger_ou_generer_cles() -> Result<(KeyPair, Option<Duration>), AppError> {
    if key_file_exists(KEYPAIR_JSON_PATH) {
        println!("\n  Clés existantes détectées — chargement...");
        let t = Instant::now();
        match load_keypair_json(KEYPAIR_JSON_PATH) {
            Ok(kp) => {
                println!("  Clés chargées depuis le disque ({:.3?})\n", t.elapsed());
                return Ok((kp, None));
            }
            Err(e) => println!("  Erreur de chargement ({}) — regénération...", e),
        }
    } else {
        println!("\n  Aucune clé trouvée — génération...");
    }
    let (kp, d) = generer_et_sauvegarder(choisir_taille())?;
    Ok((kp, Some(d)))
}

fn generer_et_sauvegarder(bits: u64) -> Result<(KeyPair, Duration), AppError> {
    println!("  Recherche d'un safe prime de {} bits...", bits);
    let t       = Instant::now();
    let keypair = eg_keygen(bits, &mut OsRng)?;
    let duree   = t.elapsed();
    println!("  Clés générées ({} bits) — temps : {:.3?}\n", bits, duree);

    save_keypair_json(&keypair, KEYPAIR_JSON_PATH)?;
    save_public_key_json(keypair.public_key(), PUBLIC_KEY_JSON_PATH)?;
    println!("  Clés sauvegardées dans {}/\n", KEYS_DIR);

    Ok((keypair, duree))
}

fn regenerer_cles() -> Result<(), AppError> {
    let (kp, _) = generer_et_sauvegarder(choisir_taille())?;
    afficher_cles(&kp);
    Ok(())
}

fn afficher_cles(kp: &KeyPair) {
    let pk = kp.public_key();
    println!("--- PARAMÈTRES DE DOMAINE ---");
    println!("  |p|  = {} bits", pk.params.p.bits());
    println!("  g    = {}", pk.params.g);
    println!("--- CLÉ PUBLIQUE ---");
    println!("  |y|  = {} bits", pk.y.bits());
    match kp.secret_key() {
        Ok(sk) => println!("--- CLÉ SECRÈTE ---\n  |x|  = {} bits", sk.x().bits()),
        Err(_) => println!("--- CLÉ SECRÈTE ---\n  (absente : chiffrement seul)"),
    }
}

// ─────────────────────────────────────────────────────────
// [1] Chiffrement d'un texte
// ─────────────────────────────────────────────────────────

fn demonstration_texte() -> Result<(), AppError> {
    println!("\n==============================================");
    println!("    ElGamal — Chiffrement d'un texte");
    println!("==============================================");

    let (kp, duree_keygen) = charger_ou_generer_cles()?;
    afficher_cles(&kp);

    print!("\n  Texte à chiffrer : ");
    io::stdout().flush().ok();
    let texte = lire_choix();

    let mut rng = OsRng;
    let m = encode(&Plaintext::text(&texte), kp.params())?;

    let t         = Instant::now();
    let ct        = eg_encrypt(&m, kp.public_key(), &mut rng)?;
    let duree_enc = t.elapsed();

    save_ciphertext_json(&ct, CIPHERTEXT_JSON_PATH)?;
    println!("\n  Chiffré sauvegardé dans {}", CIPHERTEXT_JSON_PATH);
    println!("  Taille binaire (bincode) : {} octets", ciphertext_to_bytes(&ct)?.len());

    let t         = Instant::now();
    let dec       = eg_decrypt(&ct, &kp, &mut rng)?;
    let duree_dec = t.elapsed();

    let t            = Instant::now();
    let dec_direct   = eg_decrypt_direct(&ct, &kp)?;
    let duree_direct = t.elapsed();

    let texte_dec = decode_text(&dec)?;
    println!("  Texte déchiffré : {}", texte_dec);

    if texte_dec == texte && dec == dec_direct {
        println!("\n Aller-retour vérifié : D(E(m)) = m (aveuglé et direct)");
    } else {
        println!("\n Erreur dans l'aller-retour !");
    }

    println!("\n==============================================");
    println!("    RÉSUMÉ DES TEMPS — Texte");
    println!("==============================================");
    afficher_duree_keygen(duree_keygen);
    println!("  Chiffrement            : {:.3?}", duree_enc);
    println!("  Déchiffrement aveuglé  : {:.3?}", duree_dec);
    println!("  Déchiffrement direct   : {:.3?}", duree_direct);
    println!("==============================================");

    Ok(())
}

// ─────────────────────────────────────────────────────────
// [2] Homomorphisme multiplicatif
// ─────────────────────────────────────────────────────────

fn demonstration_homomorphisme() -> Result<(), AppError> {
    println!("\n==============================================");
    println!("    ElGamal — Homomorphisme multiplicatif");
    println!("==============================================");

    let (kp, duree_keygen) = charger_ou_generer_cles()?;
    afficher_cles(&kp);

    // Messages dans [1, p), domaine valide ElGamal
    let mut rng       = OsRng;
    let p             = &kp.params().p;
    let un            = BigUint::one();
    let m1            = uniform_in_range(&un, p, &mut rng)?;
    let m2            = uniform_in_range(&un, p, &mut rng)?;
    let produit_clair = (&m1 * &m2) % p;

    println!("\n  m1            = {} bits", m1.bits());
    println!("  m2            = {} bits", m2.bits());
    println!("  (m1·m2) mod p = {} bits", produit_clair.bits());

    // L'émetteur n'a besoin que de la clé publique
    let emetteur = kp.to_public();

    let t            = Instant::now();
    let c1           = eg_encrypt(&m1, emetteur.public_key(), &mut rng)?;
    let duree_enc_m1 = t.elapsed();

    let t            = Instant::now();
    let c2           = eg_encrypt(&m2, emetteur.public_key(), &mut rng)?;
    let duree_enc_m2 = t.elapsed();

    // Multiplication homomorphique : E(m1) ⊗ E(m2) = E(m1·m2 mod p)
    let t         = Instant::now();
    let c_produit = eg_mul(&c1, &c2, emetteur.params())?;
    let duree_mul = t.elapsed();

    let t          = Instant::now();
    let c_melange  = eg_rerandomize(&c_produit, emetteur.public_key(), &mut rng)?;
    let duree_rand = t.elapsed();

    // Le détenteur de la clé publique seule ne peut pas déchiffrer
    if let Err(e) = eg_decrypt(&c_melange, &emetteur, &mut rng) {
        println!("\n  Émetteur (clé publique seule) : {}", e);
    }

    let t         = Instant::now();
    let dec       = eg_decrypt(&c_melange, &kp, &mut rng)?;
    let duree_dec = t.elapsed();

    if dec == produit_clair {
        println!("\n Homomorphisme multiplicatif vérifié : D(E(m1)·E(m2)) = (m1·m2) mod p");
    } else {
        println!("\n Erreur dans l'homomorphisme multiplicatif !");
    }

    println!("\n==============================================");
    println!("    RÉSUMÉ DES TEMPS — Homomorphisme");
    println!("==============================================");
    afficher_duree_keygen(duree_keygen);
    println!("  Chiffrement m1               : {:.3?}", duree_enc_m1);
    println!("  Chiffrement m2               : {:.3?}", duree_enc_m2);
    println!("  Multiplication homomorphique : {:.3?}", duree_mul);
    println!("  Re-randomisation             : {:.3?}", duree_rand);
    println!("  Déchiffrement                : {:.3?}", duree_dec);
    println!("==============================================");

    Ok(())
}

fn afficher_duree_keygen(duree: Option<Duration>) {
    match duree {
        Some(d) => println!("  Génération des clés          : {:.3?}  (nouvelle génération)", d),
        None    => println!("  Génération des clés          : —  (chargées depuis le disque)"),
    }
}
