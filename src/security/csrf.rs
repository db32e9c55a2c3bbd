//! CSRF tokens.

use rand::RngCore;
use subtle::ConstantTimeEq;

/// Random bytes behind every token and session id.
pub const TOKEN_BYTES: usize = 32;

/// Generate a fresh hex-encoded random token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Both inputs are padded to the longer length with different fill bytes, so
/// neither the mismatch position nor a length difference short-circuits.
pub fn tokens_match(expected: &str, submitted: &str) -> bool {
    let max_len = expected.len().max(submitted.len());

    let mut a = vec![0u8; max_len];
    let mut b = vec![0xFFu8; max_len];
    a[..expected.len()].copy_from_slice(expected.as_bytes());
    b[..submitted.len()].copy_from_slice(submitted.as_bytes());

    let lengths_equal = (expected.len() as u64).ct_eq(&(submitted.len() as u64));
    let contents_equal = a.ct_eq(&b);

    (lengths_equal & contents_equal).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_hex_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_tokens_match() {
        let token = generate_token();
        assert!(tokens_match(&token, &token.clone()));
        assert!(!tokens_match(&token, ""));
        assert!(!tokens_match(&token, &token[..10]));
        assert!(!tokens_match(&token, &format!("{}0", token)));

        let mut flipped = token.clone().into_bytes();
        flipped[0] = if flipped[0] == b'a' { b'b' } else { b'a' };
        assert!(!tokens_match(&token, &String::from_utf8(flipped).unwrap()));
    }

    #[test]
    fn test_empty_expected_never_matches_nonempty() {
        assert!(!tokens_match("", "x"));
    }
}
