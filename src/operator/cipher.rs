//! Vigenère obfuscation for operator file lines
//!
//! Only ASCII letters are shifted and case is kept. The key position
//! advances on letters only, so digits and punctuation pass through without
//! consuming key characters. This hides names and passwords from a casual
//! reader of the file and nothing more.

/// Returns true if `key` is non-empty and made of ASCII letters only.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic())
}

/// Shifts every letter of `text` forward by the matching key letter.
pub fn encrypt(key: &str, text: &str) -> String {
    shift(key, text, true)
}

/// Reverses [`encrypt`].
pub fn decrypt(key: &str, text: &str) -> String {
    shift(key, text, false)
}

fn shift(key: &str, text: &str, forward: bool) -> String {
    let offsets: Vec<u8> = key
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_lowercase() - b'a')
        .collect();
    if offsets.is_empty() {
        return text.to_string();
    }

    let mut next = 0;
    text.chars()
        .map(|c| {
            let base = if c.is_ascii_lowercase() {
                b'a'
            } else if c.is_ascii_uppercase() {
                b'A'
            } else {
                return c;
            };
            let offset = offsets[next % offsets.len()];
            next += 1;

            let pos = c as u8 - base;
            let shifted = if forward {
                (pos + offset) % 26
            } else {
                (pos + 26 - offset) % 26
            };
            (base + shifted) as char
        })
        .collect()
}
