//! Input and output records for certificate operations.

use serde::{Deserialize, Deserializer, Serialize};

use antelope_key_encryption::{EncryptedPrivateKey, SecurityLevel};
use antelope_primitives::{ChainId, PermissionLevel, PrivateKey};

use crate::certificate::KeyCertificate;

/// Everything `generate` needs. Consumed once.
#[derive(Clone, Debug)]
pub struct GenerationArguments {
    /// Chain the key belongs to.
    pub chain_id: ChainId,
    /// Account permission the key controls.
    pub account: PermissionLevel,
    /// The plaintext key to encrypt.
    pub private_key: PrivateKey,
    /// scrypt parameters; the encryption default when `None`.
    pub security_level: Option<SecurityLevel>,
    /// Explicit encryption words.
    pub encryption_words: Option<Vec<String>>,
    /// Derive the words from the private key instead of drawing them.
    pub deterministic_words: bool,
}

impl GenerationArguments {
    /// Arguments with random words and the default security level.
    pub fn new(chain_id: ChainId, account: PermissionLevel, private_key: PrivateKey) -> Self {
        GenerationArguments {
            chain_id,
            account,
            private_key,
            security_level: None,
            encryption_words: None,
            deterministic_words: false,
        }
    }

    /// Use the given scrypt parameters.
    pub fn with_security_level(mut self, level: SecurityLevel) -> Self {
        self.security_level = Some(level);
        self
    }

    /// Use the given encryption words.
    pub fn with_encryption_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.encryption_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Derive the encryption words from the private key.
    pub fn with_deterministic_words(mut self) -> Self {
        self.deterministic_words = true;
        self
    }
}

/// A new certificate and the words that unlock it.
#[derive(Clone, Debug)]
pub struct GenerationResult {
    /// The certificate.
    pub cert: KeyCertificate,
    /// The six encryption words. Not stored anywhere else.
    pub encryption_words: Vec<String>,
}

/// Output of the top-level `decrypt`.
#[derive(Clone, Debug)]
pub struct DecryptedCertificate {
    /// The recovered private key.
    pub private_key: PrivateKey,
    /// Account permission from the certificate.
    pub account: PermissionLevel,
    /// Chain id from the certificate.
    pub chain_id: ChainId,
}

/// A certificate with its key written as words.
///
/// Serializes as `{"chainId": "…", "account": {"actor": "…",
/// "permission": "…"}, "key": ["…", …]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnemonicCertificate {
    /// Chain id as hex.
    #[serde(rename = "chainId")]
    pub chain_id: String,
    /// Account permission.
    pub account: PermissionLevel,
    /// The 28 key words.
    pub key: Vec<String>,
}

/// The key of a [`CertificateRecord`], in any accepted form.
///
/// Deserializes from a `SEC_K1_…` string, parsed on the spot so a bad
/// string reports its own error, or from an array of words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyInput {
    /// An already-parsed encrypted key.
    Encrypted(EncryptedPrivateKey),
    /// A `SEC_K1_…` string.
    String(String),
    /// The 28-word mnemonic form.
    Mnemonic(Vec<String>),
}

impl<'de> Deserialize<'de> for KeyInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Key(String),
            Words(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Key(s) => EncryptedPrivateKey::from_string(&s)
                .map(KeyInput::Encrypted)
                .map_err(serde::de::Error::custom),
            Raw::Words(words) => Ok(KeyInput::Mnemonic(words)),
        }
    }
}

impl From<EncryptedPrivateKey> for KeyInput {
    fn from(key: EncryptedPrivateKey) -> Self {
        KeyInput::Encrypted(key)
    }
}

impl From<Vec<String>> for KeyInput {
    fn from(words: Vec<String>) -> Self {
        KeyInput::Mnemonic(words)
    }
}

/// A certificate given as separate fields.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CertificateRecord {
    /// Chain id.
    #[serde(rename = "chainId")]
    pub chain_id: ChainId,
    /// Account permission.
    pub account: PermissionLevel,
    /// Encrypted key.
    pub key: KeyInput,
}

/// Anything a [`KeyCertificate`] can be built from.
#[derive(Clone, Debug)]
pub enum KeyCertificateInput {
    /// An existing certificate, returned unchanged.
    Certificate(KeyCertificate),
    /// A canonical `anchorcert:` string.
    String(String),
    /// Separate fields.
    Record(CertificateRecord),
}

impl From<KeyCertificate> for KeyCertificateInput {
    fn from(cert: KeyCertificate) -> Self {
        KeyCertificateInput::Certificate(cert)
    }
}

impl From<&KeyCertificate> for KeyCertificateInput {
    fn from(cert: &KeyCertificate) -> Self {
        KeyCertificateInput::Certificate(cert.clone())
    }
}

impl From<&str> for KeyCertificateInput {
    fn from(s: &str) -> Self {
        KeyCertificateInput::String(s.to_string())
    }
}

impl From<String> for KeyCertificateInput {
    fn from(s: String) -> Self {
        KeyCertificateInput::String(s)
    }
}

impl From<CertificateRecord> for KeyCertificateInput {
    fn from(record: CertificateRecord) -> Self {
        KeyCertificateInput::Record(record)
    }
}
