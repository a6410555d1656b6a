//! Short code generation.

/// 64-symbol URL-safe alphabet. One random byte maps to one symbol with a
/// six-bit mask, so codes are uniform over the alphabet.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of generated short codes.
pub const CODE_LEN: usize = 8;

/// Generates a random 8-character short code from the URL-safe alphabet.
///
/// Uses `getrandom` for entropy. Collision handling is the caller's job:
/// the database enforces uniqueness and the URL service retries with a
/// fresh code on conflict.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buf = [0u8; CODE_LEN];
    getrandom::fill(&mut buf).expect("Failed to generate random bytes");
    buf.iter()
        .map(|b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect()
}
