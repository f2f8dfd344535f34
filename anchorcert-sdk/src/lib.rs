#![deny(missing_docs)]

//! Anchor key certificate SDK.
//!
//! Re-exports the certificate, key encryption and primitives crates for
//! single-crate usage. The certificate API is also available at the root.

pub use anchor_cert as cert;
pub use antelope_key_encryption as key_encryption;
pub use antelope_primitives as primitives;

pub use anchor_cert::{decrypt, generate, CertificateError, GenerationArguments, KeyCertificate};
