// Réexporte les primitives arithmétiques et aléatoires du noyau

pub mod random;
pub mod prime;
pub mod modular;

pub use random::{SecureRng, fill_random, random_nbit_integer, uniform_in_range};
pub use prime::{is_probable_prime, miller_rabin_rounds, probable_prime, safe_prime, MIN_SAFE_PRIME_BITS};
pub use modular::{mod_inverse, mod_mul};
