//! Hash backends used for leaf and pair hashing.
//!
//! A tree resolves its [`HashBackend`] exactly once into a [`MerkleHasher`]
//! and keeps it for its whole lifetime, so leaves and internal nodes are
//! always produced by the same function.
//!
//! Pair hashing is `H(left || right)`. With sorted pairs the two children are
//! ordered by unsigned byte-wise comparison first, which is what on-chain
//! `MerkleProof.verify` style verifiers expect.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{HASH_SIZE, Hash, MerkleError};

type DigestFn = fn(&[&[u8]]) -> Hash;

/// The one-way function a tree is built with.
///
/// Changing the backend changes every root, so it is always an explicit
/// choice carried in [`TreeOptions`](crate::TreeOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashBackend {
    /// Ethereum Keccak-256 (original Keccak padding, not NIST SHA3-256).
    #[default]
    Keccak256,
    /// Blake3 with 32-byte output.
    Blake3,
}

impl HashBackend {
    /// Stable name of the backend, as used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            HashBackend::Keccak256 => "keccak256",
            HashBackend::Blake3 => "blake3",
        }
    }

    /// Whether this backend was compiled into the current build.
    pub fn is_available(self) -> bool {
        match self {
            HashBackend::Keccak256 => cfg!(feature = "keccak"),
            HashBackend::Blake3 => cfg!(feature = "blake3"),
        }
    }

    /// Resolve the backend into a hasher.
    ///
    /// Fails with [`MerkleError::MissingHashBackend`] when the backend's
    /// cargo feature is disabled.
    pub fn resolve(self) -> Result<MerkleHasher, MerkleError> {
        let digest: DigestFn = match self {
            #[cfg(feature = "keccak")]
            HashBackend::Keccak256 => keccak256,
            #[cfg(feature = "blake3")]
            HashBackend::Blake3 => blake3_digest,
            #[allow(unreachable_patterns)]
            missing => return Err(MerkleError::MissingHashBackend(missing.name())),
        };
        Ok(MerkleHasher {
            backend: self,
            digest,
        })
    }
}

impl fmt::Display for HashBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved hash backend.
#[derive(Clone, Copy)]
pub struct MerkleHasher {
    backend: HashBackend,
    digest: DigestFn,
}

impl MerkleHasher {
    /// Resolve `backend`; see [`HashBackend::resolve`].
    pub fn new(backend: HashBackend) -> Result<Self, MerkleError> {
        backend.resolve()
    }

    /// The backend this hasher was resolved from.
    pub fn backend(&self) -> HashBackend {
        self.backend
    }

    /// Hash an arbitrary byte string.
    pub fn hash(&self, data: &[u8]) -> Hash {
        (self.digest)(&[data])
    }

    /// Hash two sibling nodes into their parent.
    ///
    /// With `sort_pairs` the numerically smaller node goes first, otherwise
    /// `left` always goes first.
    pub fn hash_pair(&self, left: &Hash, right: &Hash, sort_pairs: bool) -> Hash {
        let (first, second) = if sort_pairs && right < left {
            (right, left)
        } else {
            (left, right)
        };
        (self.digest)(&[first, second])
    }
}

impl fmt::Debug for MerkleHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleHasher")
            .field("backend", &self.backend)
            .finish()
    }
}

#[cfg(feature = "keccak")]
fn keccak256(parts: &[&[u8]]) -> Hash {
    use sha3::{Digest, Keccak256};

    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(*part);
    }
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[cfg(feature = "blake3")]
fn blake3_digest(parts: &[&[u8]]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}
