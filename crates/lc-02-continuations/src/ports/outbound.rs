//! Outbound (Driven) ports for the suspendable computation subsystem.
//!
//! The driver answers every pause through these lookups. Hosts typically
//! back them with the participant database or an in-memory cache.

use std::collections::BTreeSet;

use shared_types::{ContractId, ContractInstance, GlobalKeyWithMaintainers, Package, PackageId, Party};

use crate::domain::visibility::VisibleByKey;

/// Host-supplied resolvers for the four request kinds.
///
/// Implementations must be pure with respect to a single driver run or own
/// their concurrency; the driver itself never synchronizes. Timeouts belong
/// here too: a resolver that gives up returns `None` (or a failing verdict)
/// rather than interrupting the driver.
pub trait LedgerResolvers: Send + Sync {
    /// Resolves a contract id to its instance, if active.
    fn contract(&self, id: &ContractId) -> Option<ContractInstance>;

    /// Resolves a package id to the compiled package, if loaded.
    fn package(&self, id: &PackageId) -> Option<Package>;

    /// Resolves a contract key to the active contract id, if any.
    fn contract_id_by_key(&self, key: &GlobalKeyWithMaintainers) -> Option<ContractId>;

    /// Rules whether the submitter may see a contract with the given
    /// stakeholders when looking it up by key.
    fn local_key_visible(&self, stakeholders: &BTreeSet<Party>) -> VisibleByKey;
}

/// Map-backed resolvers for driver tests.
#[cfg(test)]
#[derive(Default)]
pub struct MapResolvers {
    contracts: std::collections::HashMap<ContractId, ContractInstance>,
    packages: std::collections::HashMap<PackageId, Package>,
    keys: std::collections::HashMap<GlobalKeyWithMaintainers, ContractId>,
    visibility: Option<crate::domain::visibility::KeyVisibilityCheck>,
}

#[cfg(test)]
impl MapResolvers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contract(mut self, id: ContractId, instance: ContractInstance) -> Self {
        self.contracts.insert(id, instance);
        self
    }

    pub fn with_package(mut self, id: PackageId, package: Package) -> Self {
        self.packages.insert(id, package);
        self
    }

    pub fn with_key(mut self, key: GlobalKeyWithMaintainers, id: ContractId) -> Self {
        self.keys.insert(key, id);
        self
    }

    pub fn with_submitters(mut self, act_as: BTreeSet<Party>, read_as: BTreeSet<Party>) -> Self {
        self.visibility = Some(crate::domain::visibility::KeyVisibilityCheck::from_submitters(
            act_as, read_as,
        ));
        self
    }
}

#[cfg(test)]
impl LedgerResolvers for MapResolvers {
    fn contract(&self, id: &ContractId) -> Option<ContractInstance> {
        self.contracts.get(id).cloned()
    }

    fn package(&self, id: &PackageId) -> Option<Package> {
        self.packages.get(id).cloned()
    }

    fn contract_id_by_key(&self, key: &GlobalKeyWithMaintainers) -> Option<ContractId> {
        self.keys.get(key).cloned()
    }

    fn local_key_visible(&self, stakeholders: &BTreeSet<Party>) -> VisibleByKey {
        match &self.visibility {
            Some(check) => check.check(stakeholders),
            // No submitters configured: nothing is visible.
            None => VisibleByKey::NotVisible {
                act_as: BTreeSet::new(),
                read_as: BTreeSet::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The driver holds resolvers as a trait object.
    fn _assert_object_safe(_: &dyn LedgerResolvers) {}

    #[test]
    fn test_map_resolvers_miss_returns_none() {
        let resolvers = MapResolvers::new();
        assert!(resolvers.package(&PackageId::new("absent")).is_none());
        assert!(resolvers.contract(&ContractId::new("#0:0")).is_none());
    }
}
