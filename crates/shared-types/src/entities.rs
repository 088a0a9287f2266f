//! # Core Domain Entities
//!
//! Defines the ledger entities shared by the read-path subsystems.
//!
//! ## Clusters
//!
//! - **Stream**: `Offset`: the position of a committed event in the
//!   transaction log.
//! - **Interpretation**: `Party`, `ContractId`, `PackageId`,
//!   `GlobalKeyWithMaintainers`, `ContractInstance`, `Package`: the data
//!   the interpreter requests from the host while a computation is paused.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// CLUSTER A: THE STREAM
// =============================================================================

/// The position of a committed event in the transaction log.
///
/// Offsets are assigned by the committer and are totally ordered. Consumers
/// must never interpret the interior value beyond equality and ordering;
/// in particular, offsets are not required to be dense.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Offset(u64);

impl Offset {
    /// The offset before any committed event.
    pub const BEGINNING: Offset = Offset(0);

    /// Wraps a raw committer-assigned position.
    pub fn new(position: u64) -> Self {
        Self(position)
    }

    /// Returns the raw position. Intended for storage adapters only.
    pub fn position(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Fixed-width hex so lexicographic and numeric order agree in logs.
        write!(f, "{:016x}", self.0)
    }
}

// =============================================================================
// CLUSTER B: INTERPRETATION
// =============================================================================

/// A ledger party identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Party(String);

impl Party {
    /// Wraps a party identifier string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque contract identifier assigned at creation time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContractId(String);

impl ContractId {
    /// Wraps a contract identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque package identifier (content hash of the compiled package).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageId(String);

impl PackageId {
    /// Wraps a package identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contract key together with the parties that maintain it.
///
/// Key lookups are routed to the host with the maintainers attached so the
/// host can scope the lookup without re-deriving them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GlobalKeyWithMaintainers {
    /// Fully qualified template the key belongs to.
    pub template_id: String,
    /// Canonical serialization of the key value.
    pub key: Vec<u8>,
    /// Parties maintaining the key.
    pub maintainers: BTreeSet<Party>,
}

impl GlobalKeyWithMaintainers {
    /// Builds a key for `template_id` from its canonical bytes and maintainers.
    pub fn new(
        template_id: impl Into<String>,
        key: Vec<u8>,
        maintainers: BTreeSet<Party>,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            key,
            maintainers,
        }
    }
}

/// An instance of a contract as stored on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInstance {
    /// Fully qualified template this instance was created from.
    pub template_id: String,
    /// Canonical serialization of the create argument.
    pub argument: Vec<u8>,
    /// Parties that signed the create.
    pub signatories: BTreeSet<Party>,
    /// Signatories plus observers.
    pub stakeholders: BTreeSet<Party>,
}

/// A compiled package as resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Human-readable package name.
    pub name: String,
    /// Package version string.
    pub version: String,
    /// Names of the modules the package contains.
    pub modules: Vec<String>,
}

impl Package {
    /// Builds a package descriptor with no modules listed.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            modules: Vec::new(),
        }
    }
}
