use thiserror::Error;

/// Errors from tree construction, proof generation and manifest handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MerkleError {
    /// Tried to build a tree from zero leaves.
    #[error("merkle tree requires at least one leaf")]
    EmptyInput,
    /// Requested a leaf or proof past the end of the leaf layer.
    #[error("leaf index {index} out of range (leaf count {leaf_count})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },
    /// The selected hash backend was not compiled in.
    #[error("hash backend {0} is not available in this build")]
    MissingHashBackend(&'static str),
    /// A pre-hashed leaf was not exactly one hash wide.
    #[error("pre-hashed leaf {index} is {len} bytes, expected 32")]
    InvalidLeafWidth {
        /// Position of the offending leaf.
        index: usize,
        /// Its actual length.
        len: usize,
    },
    /// The manifest lists no files.
    #[error("manifest does not contain any files")]
    EmptyManifest,
    /// The manifest is not valid JSON or misses required fields.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
    /// A proof or bundle could not be encoded or decoded.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
