//! Candidate peer selection.

use pares_traits::{EquityRecord, EquityTable, TargetProfile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which equities count as peers of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerScope {
    /// Equities in the target's subsector.
    Subsector,
    /// Every equity in the table.
    Universe,
}

impl fmt::Display for PeerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subsector => f.write_str("same subsector"),
            Self::Universe => f.write_str("all subsectors"),
        }
    }
}

/// Records of `table` that are peers of `target` under `scope`.
///
/// The target itself is always excluded. Dataset order is preserved.
pub fn select_peers<'a>(
    table: &'a EquityTable,
    target: &TargetProfile,
    scope: PeerScope,
) -> Vec<&'a EquityRecord> {
    table
        .iter()
        .filter(|record| record.ticker() != target.ticker)
        .filter(|record| match scope {
            PeerScope::Subsector => record.subsector() == target.subsector,
            PeerScope::Universe => true,
        })
        .collect()
}
