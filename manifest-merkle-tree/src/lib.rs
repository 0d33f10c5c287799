//! Merkle commitments over upload manifests.
//!
//! Leaves are built from manifest records (`"{name}:{cid}"` bytes), hashed
//! with Keccak-256 by default, and paired layer by layer into a binary tree.
//! The last node of an odd-sized layer is paired with itself. With sorted
//! pairs each parent is `keccak256(min(a, b) || max(a, b))`, so a verifier
//! needs only the leaf, its proof and the root, the same scheme used by
//! common on-chain Merkle proof verifiers.
//!
//! # Core types
//!
//! - [`MerkleTree`]: builds the layers and hands out the root and proofs.
//! - [`LeafProof`] / [`HexProof`]: one leaf's inclusion proof.
//! - [`Manifest`]: the uploader's JSON manifest.
//! - [`ProofBundle`]: root plus every proof, ready to serialize.

#![warn(missing_docs)]

mod error;
pub mod hash;
pub mod leaf;
pub mod manifest;
pub mod output;
pub(crate) mod proof;
pub(crate) mod tree;

#[cfg(all(test, feature = "keccak"))]
pub(crate) mod test_utils;

pub use error::MerkleError;
pub use hash::{HashBackend, MerkleHasher};
pub use leaf::{LeafEncode, encode_leaf};
pub use manifest::{Manifest, ManifestEntry};
pub use manifest_merkle_costs::{CostContext, CostResult, OperationCost};
pub use output::ProofBundle;
pub use proof::{HexProof, LeafProof};
pub use tree::{MerkleTree, TreeOptions};

/// Width in bytes of every node hash.
pub const HASH_SIZE: usize = 32;

/// A node hash.
pub type Hash = [u8; HASH_SIZE];
