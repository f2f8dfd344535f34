/// Elliptic curve keys on secp256k1 in their Antelope forms.
///
/// Provides private keys (`PVT_K1_` and legacy WIF), public keys
/// (`PUB_K1_` and legacy `EOS`), and the key type tag shared with the
/// encrypted key format.

pub mod key_type;
pub mod private_key;
pub mod public_key;

pub use key_type::KeyType;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
