//! # Interpreter Host Loop
//!
//! Drives suspendable computations against an in-memory ledger host, the
//! way the engine's call sites do: the computation pauses at contract,
//! package, key and visibility requests; the host answers from its stores.

use std::collections::{BTreeSet, HashMap};

use lc_02_continuations::{
    run, EngineError, KeyVisibilityCheck, LedgerResolvers, Outcome, VisibleByKey,
};
use shared_types::{
    ContractId, ContractInstance, GlobalKeyWithMaintainers, Package, PackageId, Party,
};

/// In-memory ledger host: contract, package and key stores plus the
/// submitter's visibility predicate.
#[derive(Default)]
pub struct InMemoryHost {
    contracts: HashMap<ContractId, ContractInstance>,
    packages: HashMap<PackageId, Package>,
    keys: HashMap<GlobalKeyWithMaintainers, ContractId>,
    visibility: Option<KeyVisibilityCheck>,
}

impl InMemoryHost {
    /// Empty host; populate with the `insert_*` methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an active contract.
    pub fn insert_contract(&mut self, id: ContractId, instance: ContractInstance) {
        self.contracts.insert(id, instance);
    }

    /// Loads a package.
    pub fn insert_package(&mut self, id: PackageId, package: Package) {
        self.packages.insert(id, package);
    }

    /// Indexes an active contract under its key.
    pub fn insert_key(&mut self, key: GlobalKeyWithMaintainers, id: ContractId) {
        self.keys.insert(key, id);
    }

    /// Sets the submitter whose visibility governs key lookups.
    pub fn set_submitters(&mut self, act_as: BTreeSet<Party>, read_as: BTreeSet<Party>) {
        self.visibility = Some(KeyVisibilityCheck::from_submitters(act_as, read_as));
    }
}

impl LedgerResolvers for InMemoryHost {
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
            None => VisibleByKey::NotVisible {
                act_as: BTreeSet::new(),
                read_as: BTreeSet::new(),
            },
        }
    }
}

/// The engine-side shape of a key exercise: resolve the key, check the
/// submitter may see the contract, fetch it, and summarize it using its
/// package metadata.
pub fn exercise_by_key(
    key: GlobalKeyWithMaintainers,
    package_id: PackageId,
) -> Outcome<String> {
    Outcome::need_key(key, move |found| match found {
        None => Outcome::Failed(EngineError::Interpretation(
            lc_02_continuations::InterpretationError::Generic("no contract for key".to_string()),
        )),
        Some(contract_id) => Outcome::need_contract(contract_id, move |instance| {
            let stakeholders = instance.stakeholders.clone();
            Outcome::need_local_key_visible(stakeholders, move |verdict| match verdict {
                VisibleByKey::NotVisible { .. } => Outcome::Failed(EngineError::Interpretation(
                    lc_02_continuations::InterpretationError::Generic(
                        "key lookup not visible to submitter".to_string(),
                    ),
                )),
                VisibleByKey::Visible => Outcome::need_package(package_id, move |package| {
                    Outcome::Done(format!("{} ({})", instance.template_id, package.name))
                }),
            })
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_02_continuations::InterpretationError;

    fn parties(names: &[&str]) -> BTreeSet<Party> {
        names.iter().map(|n| Party::new(*n)).collect()
    }

    fn iou_key() -> GlobalKeyWithMaintainers {
        GlobalKeyWithMaintainers::new("Iou:Iou", vec![0x01, 0x02], parties(&["issuer"]))
    }

    fn populated_host() -> InMemoryHost {
        let mut host = InMemoryHost::new();
        let cid = ContractId::new("#42:0");
        host.insert_key(iou_key(), cid.clone());
        host.insert_contract(
            cid,
            ContractInstance {
                template_id: "Iou:Iou".to_string(),
                argument: vec![0xCA, 0xFE],
                signatories: parties(&["issuer"]),
                stakeholders: parties(&["issuer", "owner"]),
            },
        );
        host.insert_package(
            PackageId::new("pkg-iou"),
            Package::new("iou-model", "2.1.0"),
        );
        host.set_submitters(parties(&["owner"]), BTreeSet::new());
        host
    }

    #[test]
    fn test_exercise_by_key_completes_against_the_host() {
        let host = populated_host();
        let result = run(
            exercise_by_key(iou_key(), PackageId::new("pkg-iou")),
            &host,
        );
        assert_eq!(result, Ok("Iou:Iou (iou-model)".to_string()));
    }

    #[test]
    fn test_invisible_submitter_is_rejected_before_package_lookup() {
        let mut host = populated_host();
        host.set_submitters(parties(&["stranger"]), BTreeSet::new());

        // The package id is bogus on purpose: the visibility failure must
        // surface first, proving the package request is never issued.
        let result = run(
            exercise_by_key(iou_key(), PackageId::new("never-resolved")),
            &host,
        );
        assert_eq!(
            result,
            Err(EngineError::Interpretation(InterpretationError::Generic(
                "key lookup not visible to submitter".to_string()
            )))
        );
    }

    #[test]
    fn test_dangling_key_surfaces_contract_not_found() {
        let mut host = populated_host();
        // The key still resolves, but the contract was archived meanwhile.
        host.contracts.clear();

        let result = run(
            exercise_by_key(iou_key(), PackageId::new("pkg-iou")),
            &host,
        );
        assert_eq!(
            result,
            Err(EngineError::Interpretation(
                InterpretationError::ContractNotFound(ContractId::new("#42:0"))
            ))
        );
    }

    #[test]
    fn test_sequence_of_exercises_preserves_order_and_short_circuits() {
        let host = populated_host();

        let batch = Outcome::sequence(vec![
            exercise_by_key(iou_key(), PackageId::new("pkg-iou")),
            exercise_by_key(iou_key(), PackageId::new("pkg-iou")),
        ]);
        let result = run(batch, &host);
        assert_eq!(
            result,
            Ok(vec![
                "Iou:Iou (iou-model)".to_string(),
                "Iou:Iou (iou-model)".to_string(),
            ])
        );

        // A missing package in the middle fails the whole batch.
        let batch = Outcome::sequence(vec![
            exercise_by_key(iou_key(), PackageId::new("pkg-iou")),
            exercise_by_key(iou_key(), PackageId::new("absent")),
            exercise_by_key(iou_key(), PackageId::new("pkg-iou")),
        ]);
        let result = run(batch, &host);
        assert_eq!(
            result,
            Err(EngineError::Interpretation(InterpretationError::Generic(
                "Couldn't find package absent".to_string()
            )))
        );
    }
}
