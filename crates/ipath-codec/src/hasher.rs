use ipath_types::codes;
use sha2::Digest;

/// A multihash function keyed by its multihash code.
pub trait Hasher: Send + Sync {
    /// Multihash code of this function.
    fn code(&self) -> u64;

    /// Human-readable name (e.g. `"sha2-256"`).
    fn name(&self) -> &'static str;

    /// Digest of `data`.
    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

/// SHA2-256 hasher.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn code(&self) -> u64 {
        codes::SHA2_256
    }

    fn name(&self) -> &'static str {
        "sha2-256"
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        sha2::Sha256::digest(data).to_vec()
    }
}

/// BLAKE3 hasher with the default 32-byte output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hasher;

impl Hasher for Blake3Hasher {
    fn code(&self) -> u64 {
        codes::BLAKE3
    }

    fn name(&self) -> &'static str {
        "blake3"
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        blake3::hash(data).as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        let digest = Sha256Hasher.digest(b"abc");
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn blake3_is_deterministic() {
        let a = Blake3Hasher.digest(b"hello world");
        let b = Blake3Hasher.digest(b"hello world");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn hashers_disagree() {
        assert_ne!(Sha256Hasher.digest(b"x"), Blake3Hasher.digest(b"x"));
    }

    #[test]
    fn codes_match_multihash_table() {
        assert_eq!(Sha256Hasher.code(), 0x12);
        assert_eq!(Blake3Hasher.code(), 0x1e);
    }
}
