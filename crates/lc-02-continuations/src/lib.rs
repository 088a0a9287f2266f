//! # Suspendable Computations Subsystem
//!
//! **Subsystem ID:** 2
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! The ledger interpreter frequently needs data it does not hold: a
//! contract instance, a compiled package, a contract id looked up by key,
//! or a visibility verdict for a key lookup. Instead of blocking on the
//! host, an in-progress computation is represented as a value, an
//! [`Outcome`], that pauses at one of four well-defined request points and
//! resumes once the host supplies the datum.
//!
//! ## State Machine
//!
//! ```text
//! [Pending(kind)] ──nested continuation──→ [Pending(kind)]
//!        │
//!        ├── host answer, computation completes ──→ [Done]      (terminal)
//!        └── host answer, computation fails ─────→ [Failed]     (terminal)
//! ```
//!
//! `Done` and `Failed` are terminal; a computation never transitions back
//! to `Pending`.
//!
//! ## Execution Model
//!
//! - **Composition** is by value: `map`, `bind` and `sequence` rewrite the
//!   `Done` leaf of a computation without inspecting or invoking any
//!   pending continuation.
//! - **Execution** is by the synchronous [`domain::driver::run`] loop,
//!   which answers each pause through the [`ports::outbound::LedgerResolvers`]
//!   port. The loop is iterative: the stack does not grow with the number
//!   of suspensions.
//! - **Cancellation** is dropping the value; continuations are plain
//!   closures, not live handles, so no cleanup is required.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/outbound.rs - LedgerResolvers trait                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/outcome.rs    - Outcome value, map/bind/sequence        │
//! │  domain/driver.rs     - synchronous resolver-driven consumer    │
//! │  domain/visibility.rs - VisibleByKey, KeyVisibilityCheck        │
//! │  domain/errors.rs     - EngineError union                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;

pub use domain::{
    run, EngineError, InterpretationError, KeyVisibilityCheck, Outcome, PackageError,
    PreprocessingError, ValidationError, VisibleByKey,
};
pub use ports::LedgerResolvers;
