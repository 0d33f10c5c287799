//! Independent verifier for tests.
//!
//! Uses neither [`crate::MerkleHasher`] nor any tree internals:
//! it only sees a leaf, its proof, its index and the leaf count, and calls
//! Keccak-256 directly.

use sha3::{Digest, Keccak256};

use crate::Hash;

pub(crate) fn keccak(data: &[u8]) -> Hash {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// `keccak(a || b)`.
pub(crate) fn keccak_concat(a: &Hash, b: &Hash) -> Hash {
    let mut input = [0u8; 64];
    input[..32].copy_from_slice(a);
    input[32..].copy_from_slice(b);
    keccak(&input)
}

/// Rebuild the root from a leaf and its proof.
///
/// Sorted mode orders each pair numerically; positional mode uses the parity
/// of the index at each layer. When the sibling position lies past the end
/// of a layer the node is hashed with itself and no proof item is consumed.
/// Returns `None` if the proof runs out early or has items left over.
pub(crate) fn reconstruct_root(
    leaf: Hash,
    proof: &[Hash],
    index: usize,
    leaf_count: usize,
    sort_pairs: bool,
) -> Option<Hash> {
    if index >= leaf_count {
        return None;
    }
    let mut node = leaf;
    let mut position = index;
    let mut width = leaf_count;
    let mut siblings = proof.iter();
    while width > 1 {
        let sibling_position = position ^ 1;
        node = if sibling_position < width {
            let sibling = siblings.next()?;
            if sort_pairs {
                if sibling < &node {
                    keccak_concat(sibling, &node)
                } else {
                    keccak_concat(&node, sibling)
                }
            } else if position % 2 == 1 {
                keccak_concat(sibling, &node)
            } else {
                keccak_concat(&node, sibling)
            }
        } else {
            keccak_concat(&node, &node)
        };
        position /= 2;
        width = width.div_ceil(2);
    }
    if siblings.next().is_some() {
        return None;
    }
    Some(node)
}

pub(crate) fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}

/// Leaves `b"leaf-0"`, `b"leaf-1"`, ...
pub(crate) fn numbered_leaves(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("leaf-{}", i).into_bytes())
        .collect()
}
