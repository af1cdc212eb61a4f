use futures::future::BoxFuture;

use super::errors::DomainError;
use super::order::Order;
use super::status::AdminStatus;

/// Verdict of the order service on a status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusAck {
    Accepted,
    Rejected(String),
}

/// Outbound port to the order backend.
///
/// `fetch_orders` returns already-ingested orders; a response that cannot be
/// ingested as a whole is an error, never a partial list.
pub trait OrderGateway: Send + Sync + 'static {
    fn fetch_orders(&self) -> BoxFuture<'_, Result<Vec<Order>, DomainError>>;

    fn update_status<'a>(
        &'a self,
        order_id: &'a str,
        status: AdminStatus,
    ) -> BoxFuture<'a, Result<StatusAck, DomainError>>;
}

impl<G: OrderGateway + ?Sized> OrderGateway for Box<G> {
    fn fetch_orders(&self) -> BoxFuture<'_, Result<Vec<Order>, DomainError>> {
        (**self).fetch_orders()
    }

    fn update_status<'a>(
        &'a self,
        order_id: &'a str,
        status: AdminStatus,
    ) -> BoxFuture<'a, Result<StatusAck, DomainError>> {
        (**self).update_status(order_id, status)
    }
}
