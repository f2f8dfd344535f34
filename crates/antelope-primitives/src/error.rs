/// Unified error type for all primitives operations.
///
/// Covers errors from key parsing, encoding, chain types and binary
/// (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid chain id: {0}")]
    InvalidChainId(String),

    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("{0} trailing bytes after decoding")]
    TrailingData(usize),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
