use tokio::sync::RwLock;

use crate::domain::errors::DomainError;
use crate::domain::filter::OrderFilter;
use crate::domain::order::{Confirmation, Order};
use crate::domain::ports::{OrderGateway, StatusAck};
use crate::domain::status::AdminStatus;

/// Holds the loaded orders and drives their status transitions.
///
/// The lock is never held across a gateway call; concurrent updates of the
/// same order are applied in the order their acknowledgments arrive.
pub struct OrderService<G> {
    gateway: G,
    orders: RwLock<Vec<Order>>,
}

impl<G: OrderGateway> OrderService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            orders: RwLock::new(Vec::new()),
        }
    }

    /// Reload every order from the backend, replacing the whole collection.
    ///
    /// On any error the previous collection is kept as is.
    pub async fn refresh(&self) -> Result<usize, DomainError> {
        let fresh = self.gateway.fetch_orders().await?;
        let count = fresh.len();
        *self.orders.write().await = fresh;
        log::info!("Loaded {} orders", count);
        Ok(count)
    }

    pub async fn snapshot(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    pub async fn get(&self, order_id: &str) -> Option<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
    }

    pub async fn filter(&self, filter: &OrderFilter) -> Vec<Order> {
        filter.apply(&self.orders.read().await)
    }

    /// Move an order to `next` once the backend acknowledges it.
    ///
    /// `raw_status` is left untouched; the next refresh reconciles it.
    pub async fn set_status(&self, order_id: &str, next: AdminStatus) -> Result<Order, DomainError> {
        let current = self
            .get(order_id)
            .await
            .ok_or_else(|| DomainError::OrderNotFound(order_id.to_string()))?
            .status;

        if !current.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        match self.gateway.update_status(order_id, next).await? {
            StatusAck::Accepted => {}
            StatusAck::Rejected(reason) => {
                log::warn!("Status update {} -> {} rejected: {}", order_id, next, reason);
                return Err(DomainError::Rejected(reason));
            }
        }

        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = next;
                log::info!("Order {} is now {}", order_id, next);
                Ok(order.clone())
            }
            None => {
                log::warn!(
                    "Order {} was acknowledged as {} but is no longer loaded",
                    order_id,
                    next
                );
                Err(DomainError::OrderNotFound(order_id.to_string()))
            }
        }
    }

    /// Cancel an order; requires the operator's explicit confirmation.
    pub async fn cancel(&self, order_id: &str, confirmation: Confirmation) -> Result<Order, DomainError> {
        if confirmation != Confirmation::Confirmed {
            return Err(DomainError::CancellationNotConfirmed);
        }
        self.set_status(order_id, AdminStatus::Cancelled).await
    }
}

impl OrderService<Box<dyn OrderGateway>> {
    /// Type-erased service, as stored in `web::Data`.
    pub fn boxed(gateway: impl OrderGateway) -> Self {
        Self::new(Box::new(gateway))
    }
}
