//! # Outcome - Suspendable Computation Value
//!
//! An [`Outcome`] is an in-progress computation: either terminal (`Done`,
//! `Failed`) or paused at one of four request points waiting for the host
//! to supply a datum. Pausing is encoded as a variant carrying the request
//! plus a boxed continuation.
//!
//! ## Composition Discipline
//!
//! `map` and `bind` rewrite the `Done` leaf of a computation. On a pending
//! variant they wrap the continuation so the rewrite happens only after the
//! continuation eventually completes; they never inspect or invoke the
//! continuation early. Deep `bind` chains therefore rebuild one wrapper per
//! resumed step. Real chains are short; the driver loop in
//! [`super::driver`] stays iterative regardless.

use std::collections::BTreeSet;
use std::fmt;

use shared_types::{
    ContractId, ContractInstance, GlobalKeyWithMaintainers, Package, PackageId, Party,
};

use super::errors::{EngineError, InterpretationError};
use super::visibility::VisibleByKey;

/// A paused computation's resume function: feeds the host's answer back in.
pub type Continuation<X, A> = Box<dyn FnOnce(X) -> Outcome<A>>;

/// A suspendable computation producing an `A`.
///
/// Closed tagged union: two terminal variants and four request kinds. No
/// other suspension points exist; hosts drive a value to completion by
/// answering exactly these requests.
pub enum Outcome<A> {
    /// Terminal success.
    Done(A),
    /// Terminal failure.
    Failed(EngineError),
    /// Paused until the host resolves a contract id to an instance.
    NeedContract(ContractId, Continuation<Option<ContractInstance>, A>),
    /// Paused until the host resolves a package id to a package.
    NeedPackage(PackageId, Continuation<Option<Package>, A>),
    /// Paused until the host resolves a contract key to a contract id.
    NeedKey(GlobalKeyWithMaintainers, Continuation<Option<ContractId>, A>),
    /// Paused until the host rules on key visibility for the stakeholders.
    NeedLocalKeyVisible(BTreeSet<Party>, Continuation<VisibleByKey, A>),
}

impl<A: 'static> Outcome<A> {
    /// Applies `f` to the terminal value once the computation completes.
    ///
    /// `Failed` propagates unchanged; pending variants keep their request
    /// and defer the projection into the continuation.
    pub fn map<B: 'static>(self, f: impl FnOnce(A) -> B + 'static) -> Outcome<B> {
        self.bind(move |value| Outcome::Done(f(value)))
    }

    /// Splices `f`'s computation in at the `Done` leaf.
    ///
    /// `Failed` short-circuits; pending variants wrap their continuation so
    /// `f` runs only after the original computation completes.
    pub fn bind<B: 'static>(self, f: impl FnOnce(A) -> Outcome<B> + 'static) -> Outcome<B> {
        match self {
            Outcome::Done(value) => f(value),
            Outcome::Failed(error) => Outcome::Failed(error),
            Outcome::NeedContract(id, resume) => {
                Outcome::NeedContract(id, Box::new(move |found| resume(found).bind(f)))
            }
            Outcome::NeedPackage(id, resume) => {
                Outcome::NeedPackage(id, Box::new(move |found| resume(found).bind(f)))
            }
            Outcome::NeedKey(key, resume) => {
                Outcome::NeedKey(key, Box::new(move |found| resume(found).bind(f)))
            }
            Outcome::NeedLocalKeyVisible(stakeholders, resume) => Outcome::NeedLocalKeyVisible(
                stakeholders,
                Box::new(move |verdict| resume(verdict).bind(f)),
            ),
        }
    }

    /// Collects an ordered sequence of computations into one computation of
    /// the ordered results.
    ///
    /// Pauses on the first pending element; upon resumption the remaining,
    /// not-yet-inspected tail is spliced through `bind`, so order is
    /// preserved and no element is examined twice. A `Failed` element
    /// short-circuits the whole sequence.
    pub fn sequence(outcomes: Vec<Outcome<A>>) -> Outcome<Vec<A>> {
        let capacity = outcomes.len();
        sequence_tail(Vec::with_capacity(capacity), outcomes.into_iter())
    }

    /// Requests a contract instance; a missing contract fails the
    /// computation with `ContractNotFound`.
    pub fn need_contract(
        contract_id: ContractId,
        k: impl FnOnce(ContractInstance) -> Outcome<A> + 'static,
    ) -> Outcome<A> {
        let requested = contract_id.clone();
        Outcome::NeedContract(
            contract_id,
            Box::new(move |found| match found {
                Some(instance) => k(instance),
                None => Outcome::Failed(EngineError::Interpretation(
                    InterpretationError::ContractNotFound(requested),
                )),
            }),
        )
    }

    /// Requests a package; a missing package fails the computation with a
    /// generic interpretation error.
    pub fn need_package(
        package_id: PackageId,
        k: impl FnOnce(Package) -> Outcome<A> + 'static,
    ) -> Outcome<A> {
        let requested = package_id.clone();
        Outcome::NeedPackage(
            package_id,
            Box::new(move |found| match found {
                Some(package) => k(package),
                None => Outcome::Failed(EngineError::Interpretation(
                    InterpretationError::Generic(format!("Couldn't find package {requested}")),
                )),
            }),
        )
    }

    /// Requests a contract id by key. A missing key is not an error here;
    /// the continuation decides.
    pub fn need_key(
        key: GlobalKeyWithMaintainers,
        k: impl FnOnce(Option<ContractId>) -> Outcome<A> + 'static,
    ) -> Outcome<A> {
        Outcome::NeedKey(key, Box::new(k))
    }

    /// Requests a key visibility verdict for the given stakeholders.
    pub fn need_local_key_visible(
        stakeholders: BTreeSet<Party>,
        k: impl FnOnce(VisibleByKey) -> Outcome<A> + 'static,
    ) -> Outcome<A> {
        Outcome::NeedLocalKeyVisible(stakeholders, Box::new(k))
    }
}

impl Outcome<()> {
    /// The completed unit computation.
    pub fn unit() -> Self {
        Outcome::Done(())
    }

    /// `Done(())` when `condition` holds, otherwise `Failed(error)`.
    pub fn ensure(condition: bool, error: EngineError) -> Self {
        if condition {
            Outcome::Done(())
        } else {
            Outcome::Failed(error)
        }
    }
}

fn sequence_tail<A: 'static>(
    mut collected: Vec<A>,
    mut rest: std::vec::IntoIter<Outcome<A>>,
) -> Outcome<Vec<A>> {
    while let Some(next) = rest.next() {
        match next {
            Outcome::Done(value) => collected.push(value),
            Outcome::Failed(error) => return Outcome::Failed(error),
            pending => {
                return pending.bind(move |value| {
                    collected.push(value);
                    sequence_tail(collected, rest)
                });
            }
        }
    }
    Outcome::Done(collected)
}

impl<A: fmt::Debug> fmt::Debug for Outcome<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Done(value) => f.debug_tuple("Done").field(value).finish(),
            Outcome::Failed(error) => f.debug_tuple("Failed").field(error).finish(),
            Outcome::NeedContract(id, _) => f.debug_tuple("NeedContract").field(id).finish(),
            Outcome::NeedPackage(id, _) => f.debug_tuple("NeedPackage").field(id).finish(),
            Outcome::NeedKey(key, _) => f.debug_tuple("NeedKey").field(&key.template_id).finish(),
            Outcome::NeedLocalKeyVisible(stakeholders, _) => f
                .debug_tuple("NeedLocalKeyVisible")
                .field(stakeholders)
                .finish(),
        }
    }
}
