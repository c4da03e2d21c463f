//! Standing: one row of the ranked table.

use crate::models::config::TieBreak;
use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub participant_id: ParticipantId,
    pub name: String,
    /// 1-based; unique because the ordering is total.
    pub rank: usize,
    pub score: f64,
    /// Values in the order of the configured chain.
    pub tie_breaks: Vec<(TieBreak, f64)>,
}

impl Standing {
    pub fn tie_break(&self, kind: TieBreak) -> Option<f64> {
        self.tie_breaks
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(_, v)| v)
    }
}
