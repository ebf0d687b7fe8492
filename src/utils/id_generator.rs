use rand::{rng, Rng};

/// Symbols a page id may contain.
///
/// Leaves out glyphs that are easy to confuse when read aloud or written
/// down: `0 o O` and `l I i`.
pub const ALPHABET: &[u8] = b"bcdfghjkmnpqrstvwxyzBCDFGHJKLMNPQRSTVWXYZ123456789";

/// Number of symbols in every page id
pub const ID_LENGTH: usize = 5;

/// Picks one symbol uniformly from [`ALPHABET`]
fn random_symbol<R: Rng + ?Sized>(rng: &mut R) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())] as char
}

/// Generates a short page id of [`ID_LENGTH`] independently drawn symbols
pub fn generate_short_id() -> String {
    let mut rng = rng();
    (0..ID_LENGTH).map(|_| random_symbol(&mut rng)).collect()
}

/// True when `candidate` has the shape of a generated id
pub fn is_valid_short_id(candidate: &str) -> bool {
    candidate.len() == ID_LENGTH && candidate.bytes().all(|b| ALPHABET.contains(&b))
}
