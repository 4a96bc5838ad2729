use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use crate::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Source d'aléa injectée
//
// Toute fonction qui consomme de l'aléa reçoit un `&mut R` où R: SecureRng.
// En production : rand_core::OsRng. En test : un StdRng graine fixe.
// Le marqueur CryptoRng interdit de brancher un générateur non
// cryptographique par erreur.
// ---------------------------------------------------------------------------
pub trait SecureRng: RngCore + CryptoRng {}

impl<T: RngCore + CryptoRng> SecureRng for T {}

/// Tire `n` octets du CSRNG.
///
/// Utilise `try_fill_bytes` : si la plateforme ne peut pas fournir d'entropie,
/// l'erreur remonte en `RandomnessUnavailable` au lieu de paniquer.
pub fn fill_random<R: SecureRng>(rng: &mut R, n: usize) -> Result<Vec<u8>, CryptoError> {
    let mut buf = vec![0u8; n];
    rng.try_fill_bytes(&mut buf)?;
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Entier aléatoire de `bits` bits exactement
//
// On tire ceil(bits/8) octets puis on retire les bits excédentaires par un
// décalage fixe (indépendant de la valeur tirée), et on force le bit de
// poids fort. Les bits restants sont uniformes.
// ---------------------------------------------------------------------------
pub fn random_nbit_integer<R: SecureRng>(bits: u64, rng: &mut R) -> Result<BigUint, CryptoError> {
    if bits == 0 {
        return Err(CryptoError::InvalidInput("un entier aléatoire doit avoir au moins 1 bit".into()));
    }

    let n_bytes = ((bits + 7) / 8) as usize;
    let excess  = n_bytes as u64 * 8 - bits;

    let mut value = BigUint::from_bytes_be(&fill_random(rng, n_bytes)?) >> excess;
    value.set_bit(bits - 1, true);
    Ok(value)
}

// ---------------------------------------------------------------------------
// Tirage uniforme dans [min, max) par échantillonnage avec rejet
//
// range = max - min. On tire ceil(bits(range)/8) octets, on garde les
// bits(range) bits de poids faible : l'espace échantillonné est [0, 2^bits)
// avec 2^bits < 2·range, donc chaque tirage est accepté avec probabilité
// > 1/2. Le nombre de tirages suit une loi géométrique : terminaison avec
// probabilité 1, moins de 2 tirages en moyenne. Pas de compteur d'essais :
// un plafond biaiserait la sortie s'il était atteint.
//
// Pas de réduction modulo : elle favoriserait les petites valeurs.
// ---------------------------------------------------------------------------
pub fn uniform_in_range<R: SecureRng>(
    min: &BigUint,
    max: &BigUint,
    rng: &mut R,
) -> Result<BigUint, CryptoError> {
    if min >= max {
        return Err(CryptoError::InvalidRange);
    }

    let range   = max - min;
    let bits    = range.bits();
    let n_bytes = ((bits + 7) / 8) as usize;
    let excess  = n_bytes as u64 * 8 - bits;

    loop {
        let candidate = BigUint::from_bytes_be(&fill_random(rng, n_bytes)?) >> excess;
        if candidate < range {
            return Ok(candidate + min);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_core::OsRng;

    // Source d'aléa qui échoue systématiquement (CSRNG indisponible)
    pub(crate) struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 { 0 }
        fn next_u64(&mut self) -> u64 { 0 }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {}
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::new("CSRNG indisponible"))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn test_range_empty_is_rejected() {
        let mut rng = OsRng;
        let five = BigUint::from(5u32);
        assert_eq!(uniform_in_range(&five, &five, &mut rng), Err(CryptoError::InvalidRange));
        assert_eq!(
            uniform_in_range(&five, &BigUint::from(3u32), &mut rng),
            Err(CryptoError::InvalidRange)
        );
    }

    #[test]
    fn test_range_single_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let min = BigUint::from(41u32);
        let max = BigUint::from(42u32);
        for _ in 0..50 {
            assert_eq!(uniform_in_range(&min, &max, &mut rng).unwrap(), min);
        }
    }

    #[test]
    fn test_range_bounds_hold_over_many_draws() {
        let mut rng = StdRng::seed_from_u64(7);
        let min = BigUint::from(1_000u32);
        let max = BigUint::from(1_300u32);
        let mut seen_min = false;
        let mut seen_last = false;

        for _ in 0..100_000 {
            let v = uniform_in_range(&min, &max, &mut rng).unwrap();
            assert!(v >= min && v < max);
            seen_min  |= v == min;
            seen_last |= v == BigUint::from(1_299u32);
        }
        assert!(seen_min && seen_last, "les deux bornes doivent être atteignables");
    }

    #[test]
    fn test_range_low_bits_chi_square() {
        // range = 256 : les 4 bits de poids faible doivent être uniformes.
        // 16 classes, 15 degrés de liberté : seuil à 0.1 % ≈ 37.7
        let mut rng = StdRng::seed_from_u64(2024);
        let min = BigUint::from(512u32);
        let max = BigUint::from(768u32);
        let draws = 100_000u32;
        let mut counts = [0u32; 16];

        for _ in 0..draws {
            let v = uniform_in_range(&min, &max, &mut rng).unwrap();
            let low = (&v - &min).to_u32_digits().first().copied().unwrap_or(0);
            counts[(low & 0xF) as usize] += 1;
        }

        let expected = draws as f64 / 16.0;
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();
        assert!(chi2 < 37.7, "chi2 = {chi2}, distribution biaisée : {counts:?}");
    }

    #[test]
    fn test_range_halves_balanced() {
        // Range non alignée sur un octet : aucune moitié ne doit être favorisée
        let mut rng = StdRng::seed_from_u64(99);
        let min = BigUint::from(0u32);
        let max = BigUint::from(300u32);
        let mut low_half = 0u32;
        for _ in 0..100_000 {
            if uniform_in_range(&min, &max, &mut rng).unwrap() < BigUint::from(150u32) {
                low_half += 1;
            }
        }
        // 5 écarts-types autour de 50 000 (sigma ≈ 158)
        assert!((49_200..=50_800).contains(&low_half), "low_half = {low_half}");
    }

    #[test]
    fn test_nbit_integer_has_exact_length() {
        let mut rng = StdRng::seed_from_u64(3);
        for bits in [1u64, 2, 7, 8, 9, 63, 64, 65, 255, 256] {
            for _ in 0..20 {
                assert_eq!(random_nbit_integer(bits, &mut rng).unwrap().bits(), bits);
            }
        }
    }

    #[test]
    fn test_nbit_integer_zero_bits() {
        let mut rng = OsRng;
        assert!(matches!(random_nbit_integer(0, &mut rng), Err(CryptoError::InvalidInput(_))));
    }

    #[test]
    fn test_failing_rng_surfaces_error() {
        let mut rng = FailingRng;
        let r = uniform_in_range(&BigUint::from(0u32), &BigUint::from(10u32), &mut rng);
        assert!(matches!(r, Err(CryptoError::RandomnessUnavailable(_))));
        assert!(matches!(random_nbit_integer(16, &mut rng), Err(CryptoError::RandomnessUnavailable(_))));
    }
}
