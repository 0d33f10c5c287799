use manifest_merkle_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Hash, MerkleError,
    hash::{HashBackend, MerkleHasher},
    leaf::LeafEncode,
};

/// How a tree turns its input into layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeOptions {
    /// Hash every input before it becomes a leaf. When `false` the inputs
    /// must already be 32-byte hashes.
    pub hash_leaves: bool,
    /// Order each pair by unsigned byte comparison before hashing.
    pub sort_pairs: bool,
    /// Hash function for leaves and pairs.
    pub backend: HashBackend,
}

impl Default for TreeOptions {
    fn default() -> Self {
        TreeOptions {
            hash_leaves: true,
            sort_pairs: true,
            backend: HashBackend::Keccak256,
        }
    }
}

/// A binary Merkle tree over an ordered list of leaves.
///
/// Layer 0 holds the leaves; each following layer pairs adjacent nodes of the
/// one below. An odd node out is paired with itself, so layer `k + 1` always
/// has `ceil(len(k) / 2)` nodes and the last layer holds only the root.
///
/// The tree is immutable once built. Rebuild it to change the leaf set.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    hasher: MerkleHasher,
    sort_pairs: bool,
    layers: Vec<Vec<Hash>>,
    root: Hash,
}

impl MerkleTree {
    /// Build a tree, discarding the hashing cost.
    ///
    /// See [`build`](Self::build).
    pub fn new<L: AsRef<[u8]>>(leaves: &[L], options: TreeOptions) -> Result<Self, MerkleError> {
        Self::build(leaves, options).unwrap()
    }

    /// Build a tree from `leaves` in the given order.
    ///
    /// The returned cost counts one `hash_byte_calls` per hashed leaf and one
    /// `hash_node_calls` per internal node.
    pub fn build<L: AsRef<[u8]>>(
        leaves: &[L],
        options: TreeOptions,
    ) -> CostResult<Self, MerkleError> {
        let mut cost = OperationCost::default();

        let hasher = cost_return_on_error_no_add!(cost, options.backend.resolve());
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput).wrap_with_cost(cost);
        }

        let mut base = Vec::with_capacity(leaves.len());
        for (index, leaf) in leaves.iter().enumerate() {
            let bytes = leaf.as_ref();
            if options.hash_leaves {
                base.push(hasher.hash(bytes));
                cost.hash_byte_calls += 1;
            } else {
                let node = cost_return_on_error_no_add!(
                    cost,
                    Hash::try_from(bytes).map_err(|_| MerkleError::InvalidLeafWidth {
                        index,
                        len: bytes.len(),
                    })
                );
                base.push(node);
            }
        }

        let mut layers = vec![base];
        while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
            let next = pair_layer(&hasher, current, options.sort_pairs);
            cost.hash_node_calls += next.len() as u32;
            trace!(layer = layers.len(), width = next.len(), "built merkle layer");
            layers.push(next);
        }
        let root = layers[layers.len() - 1][0];

        debug!(
            leaf_count = leaves.len(),
            layers = layers.len(),
            backend = %hasher.backend(),
            root = %hex::encode(root),
            "built merkle tree"
        );

        Ok(MerkleTree {
            hasher,
            sort_pairs: options.sort_pairs,
            layers,
            root,
        })
        .wrap_with_cost(cost)
    }

    /// Encode each record with [`LeafEncode`] and build a tree from the
    /// resulting bytes.
    pub fn from_records<R: LeafEncode>(
        records: &[R],
        options: TreeOptions,
    ) -> CostResult<Self, MerkleError> {
        let leaves: Vec<Vec<u8>> = records.iter().map(LeafEncode::leaf_bytes).collect();
        Self::build(&leaves, options)
    }

    /// The root commitment.
    pub fn root(&self) -> Hash {
        self.root
    }

    /// The leaf layer, after hashing if `hash_leaves` was set.
    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    /// A single leaf by index.
    pub fn leaf(&self, index: usize) -> Result<Hash, MerkleError> {
        self.check_index(index)?;
        Ok(self.layers[0][index])
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// All layers, leaves first and the single-node root layer last.
    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    /// Number of pairing rounds between the leaves and the root. This is also
    /// the longest proof the tree can produce.
    pub fn height(&self) -> usize {
        self.layers.len() - 1
    }

    /// Whether pairs were hashed in sorted order.
    pub fn sort_pairs(&self) -> bool {
        self.sort_pairs
    }

    /// The hash backend the tree was built with.
    pub fn backend(&self) -> HashBackend {
        self.hasher.backend()
    }

    /// The resolved hasher shared by every node of this tree.
    pub fn hasher(&self) -> &MerkleHasher {
        &self.hasher
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), MerkleError> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::IndexOutOfRange { index, leaf_count });
        }
        Ok(())
    }
}

/// Hash adjacent pairs of `layer` into the next layer up. The last node of an
/// odd-sized layer is hashed with itself.
fn pair_layer(hasher: &MerkleHasher, layer: &[Hash], sort_pairs: bool) -> Vec<Hash> {
    layer
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hasher.hash_pair(left, right, sort_pairs)
        })
        .collect()
}
