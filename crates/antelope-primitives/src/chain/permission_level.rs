//! Account permission pair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chain::name::Name;
use crate::serializer::{AbiDeserialize, AbiReader, AbiSerialize, AbiWriter};
use crate::PrimitivesError;

/// An `actor@permission` pair, e.g. `dingdong.gm@owner`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// The account.
    pub actor: Name,
    /// The permission on that account.
    pub permission: Name,
}

impl PermissionLevel {
    /// Build a permission level from its two names.
    pub fn new(actor: Name, permission: Name) -> Self {
        PermissionLevel { actor, permission }
    }

    /// Parse `actor@permission`.
    pub fn from_string(s: &str) -> Result<Self, PrimitivesError> {
        let (actor, permission) = s.split_once('@').ok_or_else(|| {
            PrimitivesError::InvalidName(format!("{} is not of the form actor@permission", s))
        })?;
        Ok(PermissionLevel {
            actor: actor.parse()?,
            permission: permission.parse()?,
        })
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.actor, self.permission)
    }
}

impl FromStr for PermissionLevel {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionLevel::from_string(s)
    }
}

impl AbiSerialize for PermissionLevel {
    fn write_abi(&self, w: &mut AbiWriter) {
        self.actor.write_abi(w);
        self.permission.write_abi(w);
    }
}

impl AbiDeserialize for PermissionLevel {
    fn read_abi(r: &mut AbiReader<'_>) -> Result<Self, PrimitivesError> {
        let actor = Name::read_abi(r)?;
        let permission = Name::read_abi(r)?;
        Ok(PermissionLevel { actor, permission })
    }
}
