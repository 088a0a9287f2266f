//! # Shared Types Crate
//!
//! Ledger-wide domain entities used across the LedgerCore subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Opaque Identifiers**: `Offset`, `ContractId`, `PackageId` and `Party`
//!   are newtypes; consumers rely on equality and ordering, never on the
//!   interior representation.
//! - **No Behavior Leakage**: Entities carry data and cheap accessors only;
//!   subsystem logic lives in the subsystem crates.

pub mod entities;

pub use entities::{
    ContractId, ContractInstance, GlobalKeyWithMaintainers, Offset, Package, PackageId, Party,
};
