use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use crate::crypto_error::CryptoError;
use crate::elgamal::math::random::{random_nbit_integer, uniform_in_range, SecureRng};

// Plus petite taille de safe prime : q = 3 (2 bits), p = 7 (3 bits)
pub const MIN_SAFE_PRIME_BITS: u64 = 3;

// ---------------------------------------------------------------------------
// Table de petits premiers impairs (crible préliminaire, jusqu'à 997)
// ---------------------------------------------------------------------------
const SMALL_PRIMES: &[u64] = &[
      3,   5,   7,  11,  13,  17,  19,  23,  29,  31,  37,  41,  43,  47,
     53,  59,  61,  67,  71,  73,  79,  83,  89,  97, 101, 103, 107, 109,
    113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269,
    271, 277, 281, 283, 293, 307, 311, 313, 317, 331, 337, 347, 349, 353,
    359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421, 431, 433, 439,
    443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523,
    541, 547, 557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617,
    619, 631, 641, 643, 647, 653, 659, 661, 673, 677, 683, 691, 701, 709,
    719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787, 797, 809, 811,
    821, 823, 827, 829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907,
    911, 919, 929, 937, 941, 947, 953, 967, 971, 977, 983, 991, 997,
];

// ---------------------------------------------------------------------------
// Nombre de rounds Miller-Rabin selon la taille du candidat
//
// Erreur par round <= 1/4 ; les candidats sont aléatoires donc l'erreur
// réelle est bien plus faible (FIPS 186-4, annexe C.3). Les petites tailles
// gardent beaucoup de rounds : le coût y est négligeable.
// ---------------------------------------------------------------------------
pub fn miller_rabin_rounds(bits: u64) -> u32 {
    match bits {
        0..=255    => 64,
        256..=511  => 40,
        512..=1023 => 24,
        _          => 16,
    }
}

// ---------------------------------------------------------------------------
// Test de primalité probabiliste
//
// 1. cas triviaux et division par les petits premiers ;
// 2. Miller-Rabin avec `rounds` témoins tirés uniformément dans [2, n-1).
//
// Retourne Err uniquement si la source d'aléa échoue.
// ---------------------------------------------------------------------------
pub fn is_probable_prime<R: SecureRng>(
    n: &BigUint,
    rounds: u32,
    rng: &mut R,
) -> Result<bool, CryptoError> {
    let two = BigUint::from(2u32);
    if n < &two {
        return Ok(false);
    }
    if n == &two {
        return Ok(true);
    }
    if n.is_even() {
        return Ok(false);
    }
    for &sp in SMALL_PRIMES {
        if n == &BigUint::from(sp) {
            return Ok(true);
        }
        if (n % sp).is_zero() {
            return Ok(false);
        }
    }

    // n > 997 ici, donc [2, n-1) n'est jamais vide
    let n_minus_1 = n - BigUint::one();
    let mut d = n_minus_1.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        let a = uniform_in_range(&two, &n_minus_1, rng)?;
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_1 {
            continue 'witness;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return Ok(false);
    }
    Ok(true)
}

// ---------------------------------------------------------------------------
// Premier probable de `bits` bits exactement
//
// Départ aléatoire impair de `bits` bits, puis balayage +2. Si la valeur
// courante déborde (bit length != bits, possible après des +2 près de
// 2^bits), on repart d'un nouveau tirage indépendant au lieu de continuer.
// ---------------------------------------------------------------------------
pub fn probable_prime<R: SecureRng>(bits: u64, rng: &mut R) -> Result<BigUint, CryptoError> {
    search_prime(bits, rng, |_| true)
}

// Balayage commun ; `sieve` écarte à moindre coût les candidats inutiles
// avant Miller-Rabin.
fn search_prime<R, F>(bits: u64, rng: &mut R, sieve: F) -> Result<BigUint, CryptoError>
where
    R: SecureRng,
    F: Fn(&BigUint) -> bool,
{
    if bits < 2 {
        return Err(CryptoError::KeySizeTooSmall { requested: bits, minimum: 2 });
    }
    let rounds = miller_rabin_rounds(bits);

    'restart: loop {
        let mut candidate = random_nbit_integer(bits, rng)?;
        candidate.set_bit(0, true);

        loop {
            if candidate.bits() != bits {
                continue 'restart;
            }
            if sieve(&candidate) && is_probable_prime(&candidate, rounds, rng)? {
                return Ok(candidate);
            }
            candidate += 2u32;
        }
    }
}

// ---------------------------------------------------------------------------
// Crible combiné pour safe prime : rejette q si p = 2q+1 a un petit facteur
//
// La divisibilité de q lui-même est déjà couverte par is_probable_prime.
// Évite de lancer Miller-Rabin sur q quand p est visiblement composé.
// ---------------------------------------------------------------------------
fn safe_prime_sieve(q: &BigUint) -> bool {
    let p = (q << 1u32) + BigUint::one();
    for &sp in SMALL_PRIMES {
        if (&p % sp).is_zero() {
            // p est lui-même ce petit premier → ne pas rejeter
            return p == BigUint::from(sp);
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Safe prime p = 2q+1 de `bits` bits exactement, q premier de `bits-1` bits
//
// Retourne (p, q). Chaque échec régénère un q indépendant. Par densité des
// premiers, il faut O(bits²) candidats q en moyenne avant que q et 2q+1
// soient tous deux premiers ; c'est le coût dominant de la génération de clés.
// ---------------------------------------------------------------------------
pub fn safe_prime<R: SecureRng>(bits: u64, rng: &mut R) -> Result<(BigUint, BigUint), CryptoError> {
    if bits < MIN_SAFE_PRIME_BITS {
        return Err(CryptoError::KeySizeTooSmall {
            requested: bits,
            minimum: MIN_SAFE_PRIME_BITS,
        });
    }
    let rounds = miller_rabin_rounds(bits);

    loop {
        let q = search_prime(bits - 1, rng, safe_prime_sieve)?;
        let p = (&q << 1u32) + BigUint::one();

        if is_probable_prime(&p, rounds, rng)? {
            debug_assert_eq!(p.bits(), bits);
            return Ok((p, q));
        }
    }
}
