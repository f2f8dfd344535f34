#![deny(missing_docs)]

//! # anchor-cert
//!
//! Anchor key certificates: a portable `anchorcert:` string that binds an
//! Antelope account permission and chain id to a private key encrypted
//! under six words from the BIP-39 English vocabulary.
//!
//! - [`mnemonic`] converts bytes to words and back without loss.
//! - [`prng`] is the seeded `sfc32` generator behind deterministic words.
//! - [`KeyCertificate`] parses, prints, generates and decrypts certificates.
//!
//! # Example
//!
//! ```no_run
//! use anchor_cert::{GenerationArguments, KeyCertificate};
//!
//! # async fn run() -> Result<(), anchor_cert::CertificateError> {
//! let args = GenerationArguments::new(
//!     "2a02a0053e5a8cf73a56ba0fda11e4d92e0238a4a2aa74fccf46d5a910746840".parse()?,
//!     "dingdong.gm@owner".parse()?,
//!     antelope_primitives::PrivateKey::new(),
//! );
//! let generated = anchor_cert::generate(args, None).await?;
//! println!("{}", generated.cert);
//!
//! let cert: KeyCertificate = generated.cert.to_string().parse()?;
//! let key = cert.decrypt(&generated.encryption_words, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod certificate;
pub mod encryption_words;
pub mod error;
pub mod mnemonic;
pub mod prng;
pub mod types;
pub mod wordlist;

pub use antelope_key_encryption::{Progress, SecurityLevel};
pub use certificate::{KeyCertificate, CERTIFICATE_PREFIX, KEY_WORDS};
pub use encryption_words::{
    deterministic_encryption_words, os_random_encryption_words, random_encryption_words,
};
pub use error::CertificateError;
pub use prng::Sfc32;
pub use types::{
    CertificateRecord, DecryptedCertificate, GenerationArguments, GenerationResult,
    KeyCertificateInput, KeyInput, MnemonicCertificate,
};

/// Generate a certificate. See [`KeyCertificate::generate`].
pub async fn generate(
    args: GenerationArguments,
    progress: Option<Progress<'_>>,
) -> Result<GenerationResult, CertificateError> {
    KeyCertificate::generate(args, progress).await
}

/// Parse `input` and decrypt it with the six encryption words.
///
/// # Returns
/// The private key together with the certificate's account and chain id.
pub async fn decrypt<T, S>(
    input: T,
    words: &[S],
    progress: Option<Progress<'_>>,
) -> Result<DecryptedCertificate, CertificateError>
where
    T: Into<KeyCertificateInput>,
    S: AsRef<str>,
{
    let cert = KeyCertificate::from(input)?;
    let private_key = cert.decrypt(words, progress).await?;
    Ok(DecryptedCertificate {
        private_key,
        account: *cert.account(),
        chain_id: *cert.chain_id(),
    })
}
