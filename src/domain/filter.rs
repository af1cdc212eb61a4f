use std::str::FromStr;

use super::errors::DomainError;
use super::order::Order;
use super::status::AdminStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AdminStatus),
}

impl StatusFilter {
    pub fn matches(self, status: AdminStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl OrderFilter {
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        let needle = self.query.to_lowercase();
        let matches_search = order.id.to_lowercase().contains(&needle)
            || order.customer.to_lowercase().contains(&needle);
        matches_search && self.status.matches(order.status)
    }

    /// Derived view, preserving the collection order.
    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        orders.iter().filter(|o| self.matches(o)).cloned().collect()
    }
}
