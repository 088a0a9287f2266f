//! Key visibility verdicts.
//!
//! A contract lookup by key is only allowed when the submitter can see the
//! contract, i.e. when one of the parties it acts or reads for is among the
//! contract's stakeholders.

use shared_types::Party;
use std::collections::BTreeSet;

/// Verdict of a local key visibility check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisibleByKey {
    /// At least one reader is a stakeholder.
    Visible,
    /// No reader is a stakeholder. Carries the authorizing party sets so
    /// the rejection can be explained without a second lookup.
    NotVisible {
        /// Parties the submitter acts for.
        act_as: BTreeSet<Party>,
        /// Parties the submitter reads for.
        read_as: BTreeSet<Party>,
    },
}

/// Precomputed visibility predicate for one submitter.
///
/// Pure and shareable: the reader union is computed once, and `check` never
/// mutates. Clone freely across threads.
#[derive(Clone, Debug)]
pub struct KeyVisibilityCheck {
    act_as: BTreeSet<Party>,
    read_as: BTreeSet<Party>,
    readers: BTreeSet<Party>,
}

impl KeyVisibilityCheck {
    /// Builds the predicate from the submitter's `act_as` and `read_as`
    /// party sets.
    pub fn from_submitters(act_as: BTreeSet<Party>, read_as: BTreeSet<Party>) -> Self {
        let readers = act_as.union(&read_as).cloned().collect();
        Self {
            act_as,
            read_as,
            readers,
        }
    }

    /// Builds the predicate for a submitter with no extra read delegation.
    pub fn from_act_as(act_as: BTreeSet<Party>) -> Self {
        Self::from_submitters(act_as, BTreeSet::new())
    }

    /// `Visible` iff the reader union intersects `stakeholders`.
    pub fn check(&self, stakeholders: &BTreeSet<Party>) -> VisibleByKey {
        if self.readers.intersection(stakeholders).next().is_some() {
            VisibleByKey::Visible
        } else {
            VisibleByKey::NotVisible {
                act_as: self.act_as.clone(),
                read_as: self.read_as.clone(),
            }
        }
    }
}
