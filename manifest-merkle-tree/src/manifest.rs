//! Upload manifests as produced by the uploader.
//!
//! ```json
//! {
//!   "service": "pinata",
//!   "cidVersion": 1,
//!   "files": [
//!     { "cid": "bafy...", "name": "0.png", "size": 1024, "uri": "ipfs://bafy...", "service": "pinata" }
//!   ]
//! }
//! ```
//!
//! Only `name` and `cid` of each entry contribute to the tree, in array
//! order. Reading the manifest from disk is up to the caller.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{
    MerkleError, MerkleTree, TreeOptions,
    leaf::{LeafEncode, encode_leaf},
};

/// One uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// File name at upload time.
    pub name: String,
    /// Content identifier returned by the storage service.
    pub cid: String,
    /// Stored size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// `ipfs://{cid}` style URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Service that stored the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl ManifestEntry {
    /// An entry with only the fields that feed the leaf.
    pub fn new(name: impl Into<String>, cid: impl Into<String>) -> Self {
        ManifestEntry {
            name: name.into(),
            cid: cid.into(),
            size: None,
            uri: None,
            service: None,
        }
    }
}

impl LeafEncode for ManifestEntry {
    fn leaf_bytes(&self) -> Vec<u8> {
        encode_leaf(&self.name, &self.cid)
    }
}

/// The uploader's summary of a batch of uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Storage service used for the batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// CID version requested from the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid_version: Option<u32>,
    /// Uploaded files; their order fixes the leaf indices.
    #[serde(default)]
    pub files: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse a manifest from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MerkleError> {
        serde_json::from_slice(bytes).map_err(|e| MerkleError::InvalidManifest(e.to_string()))
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self, MerkleError> {
        serde_json::from_str(text).map_err(|e| MerkleError::InvalidManifest(e.to_string()))
    }

    /// Parse a manifest from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MerkleError> {
        serde_json::from_reader(reader).map_err(|e| MerkleError::InvalidManifest(e.to_string()))
    }

    /// Unhashed leaf bytes, one per file, in manifest order.
    pub fn leaves(&self) -> Vec<Vec<u8>> {
        self.files.iter().map(LeafEncode::leaf_bytes).collect()
    }

    /// Build the manifest's tree with hashed leaves, sorted pairs and
    /// Keccak-256.
    pub fn build_tree(&self) -> Result<MerkleTree, MerkleError> {
        self.build_tree_with(TreeOptions::default())
    }

    /// Build the manifest's tree with explicit options.
    ///
    /// Leaves are the raw `name:cid` bytes, so `hash_leaves` must stay on
    /// unless every entry happens to encode to exactly 32 bytes.
    pub fn build_tree_with(&self, options: TreeOptions) -> Result<MerkleTree, MerkleError> {
        if self.files.is_empty() {
            return Err(MerkleError::EmptyManifest);
        }
        MerkleTree::from_records(&self.files, options).unwrap()
    }
}
