use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// In-process hash used for membership sets that must not retain the keys.
///
/// Stable within one process only; never persist these values.
pub fn stable_hash_with(f: impl FnOnce(&mut DefaultHasher)) -> u64 {
    let mut hasher = DefaultHasher::new();
    f(&mut hasher);
    hasher.finish()
}

/// Hash of `value`.
pub fn stable_hash_str(value: &str) -> u64 {
    stable_hash_with(|hasher| value.hash(hasher))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_strings_hash_equal() {
        assert_eq!(stable_hash_str("609096000"), stable_hash_str("609096000"));
        assert_ne!(stable_hash_str("609096000"), stable_hash_str("609096001"));
    }
}
