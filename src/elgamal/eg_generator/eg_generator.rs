use num_bigint::BigUint;
use num_traits::{One, Zero};
use crate::crypto_error::CryptoError;
use crate::elgamal::eg_keygen::MIN_PRIME_BITS;
use crate::elgamal::math::{mod_inverse, uniform_in_range, SecureRng};

// ============================================================================
// Critères d'acceptation d'un générateur g pour p = 2q+1
//
// Rejeté si :
//   g^2 ≡ 1 (mod p)            élément d'ordre 2
//   g^q ≡ 1 (mod p)            g reste dans le sous-groupe d'ordre q
//   (p-1) mod g == 0           g divise p-1
//   (p-1) mod g^-1 == 0        g^-1 divise p-1 (attaque de Khadir)
//
// Un g accepté est donc d'ordre 2q = p-1 : il engendre tout Z*_p.
// ============================================================================
pub fn is_acceptable_generator(g: &BigUint, p: &BigUint, q: &BigUint) -> Result<bool, CryptoError> {
    // 0 et 1 n'engendrent rien (et g = 0 diviserait par zéro)
    if g < &BigUint::from(2u32) || g >= p {
        return Ok(false);
    }
    let p_minus_1 = p - BigUint::one();

    if g.modpow(&BigUint::from(2u32), p).is_one() {
        return Ok(false);
    }
    if g.modpow(q, p).is_one() {
        return Ok(false);
    }
    if (&p_minus_1 % g).is_zero() {
        return Ok(false);
    }

    let g_inv = mod_inverse(g, p)?;
    Ok(!(&p_minus_1 % &g_inv).is_zero())
}

// ============================================================================
// Choix du générateur
//
// Candidats tirés uniformément dans [3, p) : g = 2 est exclu (attaque de
// Bleichenbacher). Chaque rejet entraîne un nouveau tirage indépendant,
// jamais un incrément du candidat précédent.
//
// Terminaison : Z*_p possède φ(p-1) = q-1 racines primitives et au plus
// trois d'entre elles sont exclues par les tests de divisibilité, donc
// chaque tirage réussit avec probabilité ≈ 1/2 dès que p >= 2^15.
// ============================================================================
pub fn select_generator<R: SecureRng>(
    p: &BigUint,
    q: &BigUint,
    rng: &mut R,
) -> Result<BigUint, CryptoError> {
    if p.bits() < MIN_PRIME_BITS {
        return Err(CryptoError::KeySizeTooSmall {
            requested: p.bits(),
            minimum: MIN_PRIME_BITS,
        });
    }

    let three = BigUint::from(3u32);
    loop {
        let g = uniform_in_range(&three, p, rng)?;
        if is_acceptable_generator(&g, p, q)? {
            return Ok(g);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::elgamal::math::safe_prime;

    #[test]
    fn test_rejection_rules_on_p23() {
        // p = 23, q = 11 : racines primitives 5, 7, 10, 11, 14, 15, 17, 19, 20, 21
        let p = BigUint::from(23u32);
        let q = BigUint::from(11u32);
        let accepted: Vec<u32> = (3u32..23)
            .filter(|&g| is_acceptable_generator(&BigUint::from(g), &p, &q).unwrap())
            .collect();

        // 11 divise 22 ; 21^-1 = 11 divise 22 (Khadir)
        for g in &accepted {
            let g = BigUint::from(*g);
            assert!(!g.modpow(&q, &p).is_one());
            assert!(!(BigUint::from(22u32) % &g).is_zero());
        }
        assert!(!accepted.contains(&11), "11 divise p-1");
        assert!(!accepted.contains(&21), "21^-1 divise p-1");
        // 2^11 ≡ 1 mod 23 : élément du sous-groupe d'ordre q
        assert!(!is_acceptable_generator(&BigUint::from(2u32), &p, &q).unwrap());
        assert_eq!(accepted, vec![5, 7, 10, 14, 15, 17, 19, 20]);
    }

    #[test]
    fn test_degenerate_candidates_are_refused() {
        let p = BigUint::from(23u32);
        let q = BigUint::from(11u32);
        for g in [0u32, 1, 23, 30] {
            assert!(!is_acceptable_generator(&BigUint::from(g), &p, &q).unwrap(), "g = {g}");
        }
    }

    #[test]
    fn test_selected_generator_generates_full_group() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..5 {
            let (p, q) = safe_prime(40, &mut rng).unwrap();
            let g = select_generator(&p, &q, &mut rng).unwrap();

            assert!(g >= BigUint::from(3u32) && g < p);
            assert!(!g.modpow(&BigUint::from(2u32), &p).is_one());
            assert!(!g.modpow(&q, &p).is_one());
            // ordre p-1 : g^(p-1) ≡ 1
            assert!(g.modpow(&(&p - BigUint::one()), &p).is_one());
            assert!(is_acceptable_generator(&g, &p, &q).unwrap());
        }
    }

    #[test]
    fn test_select_generator_rejects_tiny_modulus() {
        let mut rng = StdRng::seed_from_u64(22);
        let r = select_generator(&BigUint::from(7u32), &BigUint::from(3u32), &mut rng);
        assert!(matches!(r, Err(CryptoError::KeySizeTooSmall { requested: 3, .. })));
    }
}
