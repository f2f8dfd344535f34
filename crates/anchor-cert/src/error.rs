//! Error types for key certificates.

use antelope_key_encryption::KeyEncryptionError;

/// Errors produced while parsing, generating or decrypting certificates.
#[derive(Debug, thiserror::Error)]
pub enum CertificateError {
    /// The string does not start with `anchorcert:`.
    #[error("not an anchor certificate")]
    NotAnAnchorCertificate,

    /// The wrong number of encryption words was supplied.
    #[error("expected {expected} encryption words, got {got}")]
    WrongWordCount {
        /// Required number of words.
        expected: usize,
        /// Number of words supplied.
        got: usize,
    },

    /// A mnemonic key did not have the expected number of words.
    #[error("expected {expected} key words, got {got}")]
    WrongKeyWordCount {
        /// Required number of words.
        expected: usize,
        /// Number of words supplied.
        got: usize,
    },

    /// Too few words to hold the requested number of bytes.
    #[error("{got} words cannot hold {byte_len} bytes")]
    MnemonicTooShort {
        /// Requested output length.
        byte_len: usize,
        /// Number of words supplied.
        got: usize,
    },

    /// A word outside the vocabulary.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// Explicit words and deterministic derivation were both requested.
    #[error("encryption words and deterministic words are mutually exclusive")]
    ConflictingWordOptions,

    /// The words encode a value larger than the requested byte length.
    #[error("mnemonic value does not fit in the requested length")]
    MnemonicOverflow,

    /// The certificate body is not valid unpadded URL-safe base64.
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The encryption words do not unlock the key.
    #[error("invalid password")]
    InvalidPassword,

    /// Key encryption failure other than a wrong password.
    #[error("encryption error: {0}")]
    Encryption(KeyEncryptionError),

    /// Underlying key, name or binary format failure.
    #[error("primitives error: {0}")]
    Primitives(#[from] antelope_primitives::PrimitivesError),
}

impl From<KeyEncryptionError> for CertificateError {
    fn from(err: KeyEncryptionError) -> Self {
        match err {
            KeyEncryptionError::InvalidPassword => CertificateError::InvalidPassword,
            other => CertificateError::Encryption(other),
        }
    }
}
