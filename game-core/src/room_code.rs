use rand::Rng;

pub const ROOM_CODE_LEN: usize = 4;
const ROOM_CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Attempts the coordinator makes before giving up on finding an unused code.
pub const ROOM_CODE_MAX_ATTEMPTS: usize = 32;

pub fn generate_room_code() -> String {
    generate_room_code_with(&mut rand::thread_rng())
}

pub fn generate_room_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ROOM_CODE_ALPHABET.len());
            ROOM_CODE_ALPHABET[idx] as char
        })
        .collect()
}

pub fn is_valid_room_code(code: &str) -> bool {
    code.len() == ROOM_CODE_LEN && code.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b))
}
