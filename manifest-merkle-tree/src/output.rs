//! JSON proof bundle handed to whoever publishes the root and distributes
//! proofs.

use serde::{Deserialize, Serialize};

use crate::{Hash, MerkleError, MerkleTree, proof::HexProof, proof::decode_hash};

/// Prefix of the rendered root.
pub const ROOT_PREFIX: &str = "0x";

/// Root plus one proof per leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    /// `0x`-prefixed lowercase hex root.
    pub root: String,
    /// Proofs in leaf order.
    pub proofs: Vec<HexProof>,
}

impl ProofBundle {
    /// Render the root and every proof of `tree`.
    pub fn from_tree(tree: &MerkleTree) -> Self {
        ProofBundle {
            root: format!("{}{}", ROOT_PREFIX, hex::encode(tree.root())),
            proofs: tree.all_hex_proofs(),
        }
    }

    /// The root as bytes.
    pub fn root_bytes(&self) -> Result<Hash, MerkleError> {
        decode_hash(&self.root)
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, MerkleError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MerkleError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Parse a bundle written by [`to_json_pretty`](Self::to_json_pretty).
    pub fn from_json_str(text: &str) -> Result<Self, MerkleError> {
        serde_json::from_str(text)
            .map_err(|e| MerkleError::InvalidProof(format!("decode error: {}", e)))
    }
}

#[cfg(all(test, feature = "keccak"))]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::TreeOptions;

    fn sample_tree() -> MerkleTree {
        MerkleTree::new(&[b"a", b"b", b"c"], TreeOptions::default()).expect("tree")
    }

    #[test]
    fn test_bundle_layout() {
        let tree = sample_tree();
        let bundle = ProofBundle::from_tree(&tree);

        assert!(bundle.root.starts_with("0x"));
        assert_eq!(bundle.root.len(), 2 + 64);
        assert_eq!(bundle.root_bytes().expect("root"), tree.root());
        assert_eq!(bundle.proofs.len(), 3);
        for (index, proof) in bundle.proofs.iter().enumerate() {
            assert_eq!(proof.index, index);
            assert_eq!(proof.leaf, hex::encode(tree.leaves()[index]));
            assert!(!proof.leaf.starts_with("0x"));
        }
    }

    #[test]
    fn test_bundle_json_fields() {
        let bundle = ProofBundle::from_tree(&sample_tree());
        let json = bundle.to_json_pretty().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");

        assert_eq!(value["root"], serde_json::Value::String(bundle.root.clone()));
        assert_eq!(value["proofs"][2]["index"], 2);
        assert_eq!(value["proofs"][2]["proof"].as_array().map(Vec::len), Some(1));
        assert!(json.contains("\n  \"proofs\""));

        assert_eq!(ProofBundle::from_json_str(&json).expect("bundle"), bundle);
    }

    #[test]
    fn test_bad_root_is_rejected() {
        let mut bundle = ProofBundle::from_tree(&sample_tree());
        bundle.root = "0xabcd".to_string();
        assert_matches!(bundle.root_bytes(), Err(MerkleError::InvalidProof(_)));
        bundle.root = "0xzz".to_string();
        assert_matches!(bundle.root_bytes(), Err(MerkleError::InvalidProof(_)));
    }
}
