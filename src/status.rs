//! Legal transitions for the funding-request status machine.
//!
//! ```text
//! pending ──► negotiated ──► accepted | declined
//! pending ──► accepted | declined
//! pending | negotiated ──► withdrawn
//! ```
//!
//! `accepted`, `declined`, and `withdrawn` are terminal: no transition leaves
//! them, and term edits / negotiation entries are rejected once reached.

use crate::entities::funding_request::RequestStatus;

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestStatus::Accepted | RequestStatus::Declined | RequestStatus::Withdrawn
        )
    }

    /// Open requests accept term edits and negotiation entries.
    pub fn is_open(self) -> bool {
        !self.is_terminal()
    }

    pub fn can_transition(self, to: RequestStatus) -> bool {
        use RequestStatus::*;
        match (self, to) {
            (Pending, Negotiated) => true,
            (Pending, Accepted) | (Pending, Declined) | (Pending, Withdrawn) => true,
            (Negotiated, Accepted) | (Negotiated, Declined) | (Negotiated, Withdrawn) => true,
            _ => false,
        }
    }
}
