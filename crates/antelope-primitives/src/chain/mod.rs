//! Chain-level value types carried inside a certificate.
//!
//! - [`ChainId`]: the 32-byte chain identifier, shown as lowercase hex.
//! - [`Name`]: the 64-bit base32 account / permission name.
//! - [`PermissionLevel`]: an `actor@permission` pair.

pub mod chain_id;
pub mod name;
pub mod permission_level;

pub use chain_id::ChainId;
pub use name::Name;
pub use permission_level::PermissionLevel;
