//! Inclusion proof generation.
//!
//! A proof for leaf `i` lists one sibling per layer below the root, bottom
//! up. Where the sibling position falls past the end of an odd-sized layer
//! nothing is emitted: the node was paired with itself and the verifier
//! rebuilds that step by hashing the node twice. Proofs are therefore at most
//! [`MerkleTree::height`] long, and shorter for leaves on a duplicated path.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{HASH_SIZE, Hash, MerkleError, MerkleTree};

/// Upper bound accepted by [`LeafProof::decode_from_slice`].
const MAX_ENCODED_PROOF_BYTES: usize = 1024 * 1024;

impl MerkleTree {
    /// Sibling hashes for the leaf at `index`, ordered from the leaf layer up.
    pub fn proof(&self, index: usize) -> Result<Vec<Hash>, MerkleError> {
        self.check_index(index)?;
        Ok(self.sibling_path(index))
    }

    /// The leaf at `index` together with its proof.
    pub fn leaf_proof(&self, index: usize) -> Result<LeafProof, MerkleError> {
        self.check_index(index)?;
        Ok(LeafProof {
            index,
            leaf: self.leaves()[index],
            proof: self.sibling_path(index),
        })
    }

    /// Proofs for every leaf, in leaf order.
    pub fn all_leaf_proofs(&self) -> Vec<LeafProof> {
        self.leaves()
            .iter()
            .enumerate()
            .map(|(index, leaf)| LeafProof {
                index,
                leaf: *leaf,
                proof: self.sibling_path(index),
            })
            .collect()
    }

    /// Hex rendering of [`leaf_proof`](Self::leaf_proof).
    pub fn hex_proof(&self, index: usize) -> Result<HexProof, MerkleError> {
        self.leaf_proof(index).map(|proof| proof.to_hex())
    }

    /// Hex renderings of every proof, in leaf order.
    pub fn all_hex_proofs(&self) -> Vec<HexProof> {
        self.all_leaf_proofs()
            .iter()
            .map(LeafProof::to_hex)
            .collect()
    }

    /// Caller guarantees `index < leaf_count`.
    fn sibling_path(&self, index: usize) -> Vec<Hash> {
        let layers = self.layers();
        let mut proof = Vec::with_capacity(self.height());
        let mut position = index;
        for layer in &layers[..layers.len() - 1] {
            let sibling = if position % 2 == 1 {
                position - 1
            } else {
                position + 1
            };
            if let Some(node) = layer.get(sibling) {
                proof.push(*node);
            }
            position /= 2;
        }
        trace!(index, proof_len = proof.len(), "generated merkle proof");
        proof
    }
}

/// A leaf and the sibling hashes proving its inclusion.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct LeafProof {
    index: usize,
    leaf: Hash,
    proof: Vec<Hash>,
}

impl LeafProof {
    /// Position of the leaf in the tree's input order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The leaf hash.
    pub fn leaf(&self) -> &Hash {
        &self.leaf
    }

    /// Sibling hashes, leaf layer first.
    pub fn proof(&self) -> &[Hash] {
        &self.proof
    }

    /// Split into `(index, leaf, proof)`.
    pub fn into_parts(self) -> (usize, Hash, Vec<Hash>) {
        (self.index, self.leaf, self.proof)
    }

    /// Lowercase hex rendering without a `0x` prefix.
    pub fn to_hex(&self) -> HexProof {
        HexProof {
            index: self.index,
            leaf: hex::encode(self.leaf),
            proof: self.proof.iter().map(hex::encode).collect(),
        }
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ MAX_ENCODED_PROOF_BYTES }>();
        let (proof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleError::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleError::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        Ok(proof)
    }
}

/// Serializable hex form of a [`LeafProof`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexProof {
    /// Leaf index.
    pub index: usize,
    /// Leaf hash as lowercase hex.
    pub leaf: String,
    /// Sibling hashes as lowercase hex, leaf layer first.
    pub proof: Vec<String>,
}

impl HexProof {
    /// Parse the hex strings back into a [`LeafProof`]. A `0x` prefix is
    /// accepted.
    pub fn to_leaf_proof(&self) -> Result<LeafProof, MerkleError> {
        Ok(LeafProof {
            index: self.index,
            leaf: decode_hash(&self.leaf)?,
            proof: self
                .proof
                .iter()
                .map(|node| decode_hash(node))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Parse a 32-byte hash from hex, with or without a `0x` prefix.
pub(crate) fn decode_hash(text: &str) -> Result<Hash, MerkleError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(digits)
        .map_err(|e| MerkleError::InvalidProof(format!("invalid hex {:?}: {}", text, e)))?;
    let len = bytes.len();
    Hash::try_from(bytes).map_err(|_| {
        MerkleError::InvalidProof(format!(
            "expected {} byte hash, got {} bytes",
            HASH_SIZE, len
        ))
    })
}
