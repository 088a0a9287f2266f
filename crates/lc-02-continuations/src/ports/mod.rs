//! Ports (driven interfaces) of the suspendable computation subsystem.

pub mod outbound;

pub use outbound::LedgerResolvers;
