use bigdecimal::BigDecimal;

use super::status::AdminStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub phone: String,
    pub products: String,
    pub total: BigDecimal,
    /// Lowercased backend status, kept for audit.
    pub raw_status: String,
    pub status: AdminStatus,
    pub date: String,
}

/// Explicit operator answer to the "cancel this order?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}
