//! The key certificate envelope.
//!
//! A certificate is `chain_id | account | encrypted key` in the Antelope
//! binary layout (86 bytes), written as `anchorcert:` followed by unpadded
//! URL-safe base64.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use antelope_key_encryption::{EncryptedPrivateKey, Progress, ENCRYPTED_KEY_DATA_LEN};
use antelope_primitives::serializer::{self, AbiDeserialize, AbiReader, AbiSerialize, AbiWriter};
use antelope_primitives::{ChainId, PermissionLevel, PrimitivesError, PrivateKey};

use crate::encryption_words::{deterministic_encryption_words, os_random_encryption_words};
use crate::mnemonic::{self, PASSPHRASE_BYTES, PASSPHRASE_WORDS};
use crate::types::{
    CertificateRecord, GenerationArguments, GenerationResult, KeyCertificateInput, KeyInput,
    MnemonicCertificate,
};
use crate::CertificateError;

/// Scheme prefix of the string form.
pub const CERTIFICATE_PREFIX: &str = "anchorcert:";

/// Binary length of an encrypted key: key type byte plus data.
pub const ENCRYPTED_KEY_BYTES: usize = 1 + ENCRYPTED_KEY_DATA_LEN;

/// Words in the mnemonic form of an encrypted key.
pub const KEY_WORDS: usize = mnemonic::word_count(ENCRYPTED_KEY_BYTES);

/// A key certificate.
///
/// Immutable once built; every constructor validates its input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyCertificate {
    chain_id: ChainId,
    account: PermissionLevel,
    key: EncryptedPrivateKey,
}

impl KeyCertificate {
    /// Assemble a certificate from its parts.
    pub fn new(chain_id: ChainId, account: PermissionLevel, key: EncryptedPrivateKey) -> Self {
        KeyCertificate {
            chain_id,
            account,
            key,
        }
    }

    /// The chain id.
    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    /// The account permission.
    pub fn account(&self) -> &PermissionLevel {
        &self.account
    }

    /// The encrypted key.
    pub fn key(&self) -> &EncryptedPrivateKey {
        &self.key
    }

    /// Build a certificate from an existing certificate, a canonical
    /// string, or a record whose key may be structured, a `SEC_K1_`
    /// string, or 28 words.
    pub fn from<T: Into<KeyCertificateInput>>(value: T) -> Result<Self, CertificateError> {
        match value.into() {
            KeyCertificateInput::Certificate(cert) => Ok(cert),
            KeyCertificateInput::String(s) => Self::from_string(&s),
            KeyCertificateInput::Record(record) => Self::from_record(record),
        }
    }

    fn from_record(record: CertificateRecord) -> Result<Self, CertificateError> {
        let key = match record.key {
            KeyInput::Encrypted(key) => key,
            KeyInput::String(s) => EncryptedPrivateKey::from_string(&s)?,
            KeyInput::Mnemonic(words) => key_from_words(&words)?,
        };
        Ok(KeyCertificate::new(record.chain_id, record.account, key))
    }

    /// Rebuild a certificate from its mnemonic object form.
    pub fn from_mnemonic(cert: &MnemonicCertificate) -> Result<Self, CertificateError> {
        let chain_id = ChainId::from_hex(&cert.chain_id)?;
        let key = key_from_words(&cert.key)?;
        Ok(KeyCertificate::new(chain_id, cert.account, key))
    }

    /// Parse the canonical `anchorcert:` string.
    ///
    /// Slashes directly after the prefix are ignored, so
    /// `anchorcert://…` is accepted as well.
    pub fn from_string(s: &str) -> Result<Self, CertificateError> {
        let body = s
            .strip_prefix(CERTIFICATE_PREFIX)
            .ok_or(CertificateError::NotAnAnchorCertificate)?
            .trim_start_matches('/');
        let bytes = URL_SAFE_NO_PAD.decode(body)?;
        trace!(len = bytes.len(), "decoded certificate body");
        Self::from_bytes(&bytes)
    }

    /// Decode the binary form. Trailing bytes are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CertificateError> {
        Ok(serializer::decode(bytes)?)
    }

    /// Encode the binary form.
    pub fn to_bytes(&self) -> Vec<u8> {
        serializer::encode(self)
    }

    /// Encrypt a private key into a new certificate.
    ///
    /// Words come from `args.encryption_words` if given, otherwise from
    /// the private key when `deterministic_words` is set, otherwise from
    /// the OS random source.
    ///
    /// # Returns
    /// The certificate and the six words that unlock it, or
    /// - `ConflictingWordOptions` if explicit and deterministic words are both requested,
    /// - `WrongWordCount` if the words are not exactly six,
    /// - `UnknownWord` if a word is outside the vocabulary.
    pub async fn generate(
        args: GenerationArguments,
        progress: Option<Progress<'_>>,
    ) -> Result<GenerationResult, CertificateError> {
        let GenerationArguments {
            chain_id,
            account,
            private_key,
            security_level,
            encryption_words,
            deterministic_words,
        } = args;

        let (encryption_words, source) = match (encryption_words, deterministic_words) {
            (Some(_), true) => return Err(CertificateError::ConflictingWordOptions),
            (Some(words), false) => (words, "explicit"),
            (None, true) => (deterministic_encryption_words(&private_key), "deterministic"),
            (None, false) => (os_random_encryption_words(), "random"),
        };

        let password = passphrase_bytes(&encryption_words)?;
        let key =
            EncryptedPrivateKey::encrypt(&private_key, &password, progress, security_level).await?;
        let cert = KeyCertificate::new(chain_id, account, key);
        debug!(
            account = %cert.account,
            chain_id = %cert.chain_id,
            words = source,
            "generated key certificate"
        );
        Ok(GenerationResult {
            cert,
            encryption_words,
        })
    }

    /// Decrypt the key with the six encryption words.
    ///
    /// # Returns
    /// The private key, or `WrongWordCount`, `UnknownWord` or
    /// `InvalidPassword`.
    pub async fn decrypt<S: AsRef<str>>(
        &self,
        words: &[S],
        progress: Option<Progress<'_>>,
    ) -> Result<PrivateKey, CertificateError> {
        let password = passphrase_bytes(words)?;
        debug!(account = %self.account, "decrypting key certificate");
        Ok(self.key.decrypt(&password, progress).await?)
    }

    /// The encrypted key as 28 words.
    pub fn encrypted_private_key_mnemonic(&self) -> Vec<String> {
        mnemonic::encode(&self.key.to_bytes())
    }

    /// The mnemonic object form.
    pub fn to_mnemonic(&self) -> MnemonicCertificate {
        MnemonicCertificate {
            chain_id: self.chain_id.to_hex(),
            account: self.account,
            key: self.encrypted_private_key_mnemonic(),
        }
    }
}

/// Six words to password bytes.
fn passphrase_bytes<S: AsRef<str>>(words: &[S]) -> Result<Zeroizing<Vec<u8>>, CertificateError> {
    if words.len() != PASSPHRASE_WORDS {
        return Err(CertificateError::WrongWordCount {
            expected: PASSPHRASE_WORDS,
            got: words.len(),
        });
    }
    Ok(Zeroizing::new(mnemonic::decode(words, PASSPHRASE_BYTES)?))
}

/// 28 words to an encrypted key.
fn key_from_words<S: AsRef<str>>(words: &[S]) -> Result<EncryptedPrivateKey, CertificateError> {
    if words.len() != KEY_WORDS {
        return Err(CertificateError::WrongKeyWordCount {
            expected: KEY_WORDS,
            got: words.len(),
        });
    }
    let bytes = mnemonic::decode(words, ENCRYPTED_KEY_BYTES)?;
    Ok(EncryptedPrivateKey::from_bytes(&bytes)?)
}

impl TryFrom<KeyCertificateInput> for KeyCertificate {
    type Error = CertificateError;

    fn try_from(value: KeyCertificateInput) -> Result<Self, Self::Error> {
        KeyCertificate::from(value)
    }
}

impl fmt::Display for KeyCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            CERTIFICATE_PREFIX,
            URL_SAFE_NO_PAD.encode(self.to_bytes())
        )
    }
}

impl FromStr for KeyCertificate {
    type Err = CertificateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyCertificate::from_string(s)
    }
}

impl Serialize for KeyCertificate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyCertificate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        KeyCertificate::from_string(&s).map_err(serde::de::Error::custom)
    }
}

impl AbiSerialize for KeyCertificate {
    fn write_abi(&self, w: &mut AbiWriter) {
        self.chain_id.write_abi(w);
        self.account.write_abi(w);
        self.key.write_abi(w);
    }
}

impl AbiDeserialize for KeyCertificate {
    fn read_abi(r: &mut AbiReader<'_>) -> Result<Self, PrimitivesError> {
        let chain_id = ChainId::read_abi(r)?;
        let account = PermissionLevel::read_abi(r)?;
        let key = EncryptedPrivateKey::read_abi(r)?;
        Ok(KeyCertificate {
            chain_id,
            account,
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antelope_key_encryption::SecurityLevel;

    const PUBLISHED: &str = "anchorcert:KgKgBT5ajPc6VroP2hHk2S4COKSiqnT8z0bVqRB0aEAAJANs0sSmSwAAAACAqyanAER8IsLg2SvYygVCJ1oC8OBfv4IQnP2lL1ygTly0bkvLpJbOVL4";
    const CHAIN_ID: &str = "2a02a0053e5a8cf73a56ba0fda11e4d92e0238a4a2aa74fccf46d5a910746840";
    const KEY: &str = "SEC_K1_G28QZY99rSND9TEpXjKWQVfwVFDhrew1u7ZQaTjW5PuvYCFgoWs7ojTE";
    const KEY_MNEMONIC: &str = "abandon captain vacuum flame this sing wage neglect feature beauty gym fun theory worth they cancel sound spoon runway neglect exact toss breeze nurse ripple enter deer oak";
    const PRIVATE_KEY: &str = "PVT_K1_zVFeDTSxD6KDCjQomkzZMdB5AiaR3EnCZLrxmsx5tDzH937km";
    const WORDS: [&str; 6] = ["pepper", "craft", "chat", "march", "slim", "exchange"];
    const FAST: SecurityLevel = SecurityLevel { n: 4096, r: 1, p: 1 };
    const FAST_CERT: &str = "anchorcert:KgKgBT5ajPc6VroP2hHk2S4COKSiqnT8z0bVqRB0aEAAJANs0sSmSwAAAACAqyanAAB8IsLg5V7KXDDP4cM9cOFyhF9yz4RHYEg6JlfgFxN9gfz_Al4";

    fn args() -> GenerationArguments {
        GenerationArguments::new(
            CHAIN_ID.parse().unwrap(),
            "dingdong.gm@owner".parse().unwrap(),
            PRIVATE_KEY.parse().unwrap(),
        )
        .with_security_level(FAST)
    }

    // ---- parsing ----

    #[test]
    fn test_parse_published_certificate() {
        let cert = KeyCertificate::from_string(PUBLISHED).unwrap();
        assert_eq!(cert.chain_id().to_string(), CHAIN_ID);
        assert_eq!(cert.account().to_string(), "dingdong.gm@owner");
        assert_eq!(cert.key().to_string(), KEY);
        assert_eq!(cert.to_bytes().len(), 86);
        assert_eq!(cert.to_string(), PUBLISHED);
    }

    #[test]
    fn test_parse_ignores_slashes() {
        let with_slashes = PUBLISHED.replace("anchorcert:", "anchorcert://");
        let cert: KeyCertificate = with_slashes.parse().unwrap();
        assert_eq!(cert.to_string(), PUBLISHED);
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            KeyCertificate::from_string("eosio:abc"),
            Err(CertificateError::NotAnAnchorCertificate)
        ));
        assert!(matches!(
            KeyCertificate::from_string("anchorcert:!!!"),
            Err(CertificateError::InvalidBase64(_))
        ));
        // padded base64 is not accepted
        assert!(KeyCertificate::from_string(&format!("{}=", PUBLISHED)).is_err());
        // truncated body
        assert!(matches!(
            KeyCertificate::from_string(&PUBLISHED[..PUBLISHED.len() - 3]),
            Err(CertificateError::Primitives(PrimitivesError::UnexpectedEof))
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = KeyCertificate::from_string(PUBLISHED).unwrap().to_bytes();
        bytes.push(0);
        assert!(matches!(
            KeyCertificate::from_bytes(&bytes),
            Err(CertificateError::Primitives(PrimitivesError::TrailingData(1)))
        ));
    }

    // ---- mnemonic forms ----

    #[test]
    fn test_key_mnemonic() {
        let cert = KeyCertificate::from_string(PUBLISHED).unwrap();
        let words = cert.encrypted_private_key_mnemonic();
        assert_eq!(words.len(), KEY_WORDS);
        assert_eq!(words.join(" "), KEY_MNEMONIC);
    }

    #[test]
    fn test_to_mnemonic_object() {
        let cert = KeyCertificate::from_string(PUBLISHED).unwrap();
        let m = cert.to_mnemonic();
        assert_eq!(m.chain_id, CHAIN_ID);
        assert_eq!(m.account.actor.to_string(), "dingdong.gm");
        assert_eq!(m.account.permission.to_string(), "owner");
        assert_eq!(KeyCertificate::from_mnemonic(&m).unwrap(), cert);
    }

    #[test]
    fn test_from_record_with_each_key_form() {
        let cert = KeyCertificate::from_string(PUBLISHED).unwrap();
        let words: Vec<String> = KEY_MNEMONIC.split(' ').map(String::from).collect();
        let forms = vec![
            KeyInput::Encrypted(cert.key().clone()),
            KeyInput::String(KEY.to_string()),
            KeyInput::Mnemonic(words),
        ];
        for key in forms {
            let record = CertificateRecord {
                chain_id: CHAIN_ID.parse().unwrap(),
                account: "dingdong.gm@owner".parse().unwrap(),
                key,
            };
            assert_eq!(KeyCertificate::from(record).unwrap().to_string(), PUBLISHED);
        }
    }

    #[test]
    fn test_from_identity_and_string() {
        let cert = KeyCertificate::from(PUBLISHED).unwrap();
        assert_eq!(KeyCertificate::from(cert.clone()).unwrap(), cert);
        assert_eq!(KeyCertificate::from(PUBLISHED.to_string()).unwrap(), cert);
        assert_eq!(KeyCertificate::try_from(KeyCertificateInput::from(&cert)).unwrap(), cert);
    }

    #[test]
    fn test_record_mnemonic_wrong_length() {
        let words: Vec<String> = KEY_MNEMONIC.split(' ').skip(1).map(String::from).collect();
        let record = CertificateRecord {
            chain_id: CHAIN_ID.parse().unwrap(),
            account: "dingdong.gm@owner".parse().unwrap(),
            key: KeyInput::Mnemonic(words),
        };
        assert!(matches!(
            KeyCertificate::from(record),
            Err(CertificateError::WrongKeyWordCount { expected: 28, got: 27 })
        ));
    }

    // ---- generate / decrypt ----

    #[tokio::test]
    async fn test_generate_known_answer() {
        let result = KeyCertificate::generate(args().with_encryption_words(WORDS), None)
            .await
            .unwrap();
        assert_eq!(result.encryption_words, WORDS);
        assert_eq!(result.cert.to_string(), FAST_CERT);
    }

    #[tokio::test]
    async fn test_generate_published_certificate() {
        let published = args()
            .with_security_level(SecurityLevel::MEDIUM)
            .with_encryption_words(WORDS);
        let result = KeyCertificate::generate(published, None).await.unwrap();
        assert_eq!(result.encryption_words, WORDS);
        assert_eq!(result.cert.to_string(), PUBLISHED);
    }

    #[tokio::test]
    async fn test_decrypt_published_certificate() {
        let cert = KeyCertificate::from_string(PUBLISHED).unwrap();
        let key = cert.decrypt(&WORDS, None).await.unwrap();
        assert_eq!(key.to_string(), PRIVATE_KEY);

        let wrong = ["this", "sing", "wage", "gym", "deer", "oak"];
        assert!(matches!(
            cert.decrypt(&wrong, None).await,
            Err(CertificateError::InvalidPassword)
        ));
        let unknown = ["this", "sing", "wage", "gym", "deer", "pancetta"];
        assert!(matches!(
            cert.decrypt(&unknown, None).await,
            Err(CertificateError::UnknownWord(ref w)) if w == "pancetta"
        ));
        assert!(matches!(
            cert.decrypt(&wrong[..5], None).await,
            Err(CertificateError::WrongWordCount { expected: 6, got: 5 })
        ));
    }

    #[tokio::test]
    async fn test_generate_then_decrypt() {
        let result = KeyCertificate::generate(args(), None).await.unwrap();
        assert_eq!(result.encryption_words.len(), 6);
        let key = result.cert.decrypt(&result.encryption_words, None).await.unwrap();
        assert_eq!(key.to_string(), PRIVATE_KEY);
    }

    #[tokio::test]
    async fn test_generate_deterministic_words() {
        let result = KeyCertificate::generate(args().with_deterministic_words(), None)
            .await
            .unwrap();
        assert_eq!(
            result.encryption_words,
            vec!["match", "effort", "boost", "spirit", "record", "buzz"]
        );
    }

    #[tokio::test]
    async fn test_generate_conflicting_options() {
        let conflicting = args().with_encryption_words(WORDS).with_deterministic_words();
        assert!(matches!(
            KeyCertificate::generate(conflicting, None).await,
            Err(CertificateError::ConflictingWordOptions)
        ));
    }

    #[tokio::test]
    async fn test_generate_wrong_word_count() {
        let five = args().with_encryption_words(WORDS[..5].iter().copied());
        match KeyCertificate::generate(five, None).await {
            Err(e) => assert_eq!(e.to_string(), "expected 6 encryption words, got 5"),
            Ok(_) => panic!("five words accepted"),
        }
    }

    #[tokio::test]
    async fn test_decrypt_failures() {
        let cert: KeyCertificate = FAST_CERT.parse().unwrap();

        let result = cert.decrypt(&WORDS[..5], None).await;
        assert!(matches!(
            result,
            Err(CertificateError::WrongWordCount { expected: 6, got: 5 })
        ));

        let unknown = ["pepper", "craft", "chat", "march", "slim", "pancetta"];
        match cert.decrypt(&unknown, None).await {
            Err(e) => assert_eq!(e.to_string(), "unknown word: pancetta"),
            Ok(_) => panic!("unknown word accepted"),
        }

        let wrong = ["pepper", "craft", "chat", "march", "slim", "excite"];
        assert!(matches!(
            cert.decrypt(&wrong, None).await,
            Err(CertificateError::InvalidPassword)
        ));

        let key = cert.decrypt(&WORDS, None).await.unwrap();
        assert_eq!(key.to_string(), PRIVATE_KEY);
    }

    #[test]
    fn test_serde_string_form() {
        let cert: KeyCertificate = PUBLISHED.parse().unwrap();
        let json = serde_json::to_string(&cert).unwrap();
        assert_eq!(json, format!("\"{}\"", PUBLISHED));
        let back: KeyCertificate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cert);
    }
}
