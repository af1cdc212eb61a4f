use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// The five states the admin side understands.
///
/// Declaration order is the lifecycle order; `Cancelled` sits outside the
/// forward chain and is reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    Pending,
    Processing,
    Shipping,
    Completed,
    Cancelled,
}

impl AdminStatus {
    pub const ALL: [AdminStatus; 5] = [
        AdminStatus::Pending,
        AdminStatus::Processing,
        AdminStatus::Shipping,
        AdminStatus::Completed,
        AdminStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AdminStatus::Pending => "pending",
            AdminStatus::Processing => "processing",
            AdminStatus::Shipping => "shipping",
            AdminStatus::Completed => "completed",
            AdminStatus::Cancelled => "cancelled",
        }
    }

    /// Operator-facing label shown on the dashboard badge.
    pub fn label(self) -> &'static str {
        match self {
            AdminStatus::Pending => "Chờ xử lý",
            AdminStatus::Processing => "Đang xử lý",
            AdminStatus::Shipping => "Đang giao",
            AdminStatus::Completed => "Hoàn thành",
            AdminStatus::Cancelled => "Đã hủy",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AdminStatus::Completed | AdminStatus::Cancelled)
    }

    /// Position on the forward chain; `None` for `Cancelled`.
    fn rank(self) -> Option<u8> {
        match self {
            AdminStatus::Pending => Some(0),
            AdminStatus::Processing => Some(1),
            AdminStatus::Shipping => Some(2),
            AdminStatus::Completed => Some(3),
            AdminStatus::Cancelled => None,
        }
    }

    /// Whether an operator may move an order from `self` to `next`.
    ///
    /// Forward moves may skip steps; backward and same-state moves are
    /// rejected, and nothing leaves a terminal state.
    pub fn can_transition_to(self, next: AdminStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == AdminStatus::Cancelled {
            return true;
        }
        match (self.rank(), next.rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }

    pub fn allowed_transitions(self) -> Vec<AdminStatus> {
        AdminStatus::ALL
            .into_iter()
            .filter(|next| self.can_transition_to(*next))
            .collect()
    }
}

impl fmt::Display for AdminStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse of a canonical status name, for operator input.
///
/// Backend values go through [`normalize`] instead, which never fails.
impl FromStr for AdminStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        AdminStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == lowered)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown status '{}'", s)))
    }
}

/// Map a backend status string onto the admin vocabulary.
///
/// Unknown and empty values fall back to `Pending` so that a new backend
/// status never breaks the order table.
pub fn normalize(raw: &str) -> AdminStatus {
    match raw.to_lowercase().as_str() {
        "waiting" | "preparing" => AdminStatus::Processing,
        "done" => AdminStatus::Shipping,
        "completed" => AdminStatus::Completed,
        "cancelled" => AdminStatus::Cancelled,
        // Paid online but not yet picked up by the barista queue.
        "confirmed" => AdminStatus::Pending,
        _ => AdminStatus::Pending,
    }
}
