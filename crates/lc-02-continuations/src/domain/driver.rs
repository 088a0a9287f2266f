//! # Consumer Driver
//!
//! Synchronously drives an [`Outcome`] to completion by answering each
//! pause through the host's [`LedgerResolvers`].
//!
//! The loop is an iterative trampoline: each iteration consumes exactly one
//! suspension, so the stack does not grow with the number of pauses. One
//! driver invocation owns one computation; there is no ambient concurrency,
//! and timeouts are the resolvers' responsibility (return `None` or answer
//! with a failing verdict), never an interruption of the loop.

use tracing::trace;

use super::errors::EngineError;
use super::outcome::Outcome;
use crate::ports::outbound::LedgerResolvers;

/// Drives `outcome` to a terminal state.
///
/// Returns `Ok` for `Done` and `Err` for `Failed`. Every pending variant is
/// answered by the corresponding resolver and the loop continues with
/// whatever the continuation produces.
pub fn run<A>(outcome: Outcome<A>, resolvers: &dyn LedgerResolvers) -> Result<A, EngineError> {
    let mut current = outcome;
    loop {
        current = match current {
            Outcome::Done(value) => return Ok(value),
            Outcome::Failed(error) => return Err(error),
            Outcome::NeedContract(id, resume) => {
                trace!(contract_id = %id, "resolving contract lookup");
                resume(resolvers.contract(&id))
            }
            Outcome::NeedPackage(id, resume) => {
                trace!(package_id = %id, "resolving package lookup");
                resume(resolvers.package(&id))
            }
            Outcome::NeedKey(key, resume) => {
                trace!(template_id = %key.template_id, "resolving key lookup");
                resume(resolvers.contract_id_by_key(&key))
            }
            Outcome::NeedLocalKeyVisible(stakeholders, resume) => {
                trace!(
                    stakeholders = stakeholders.len(),
                    "resolving key visibility"
                );
                resume(resolvers.local_key_visible(&stakeholders))
            }
        };
    }
}
