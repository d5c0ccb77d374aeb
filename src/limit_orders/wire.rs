//! Response envelopes of the order API.

use serde::Deserialize;

use crate::limit_orders::OpenLimitOrder;

/// `{ "order": ... }`, returned by order creation and lookup by hash.
#[derive(Deserialize, Debug, Clone)]
pub struct OrderResponse {
    pub order: OpenLimitOrder,
}

/// `{ "orders": [...] }`, returned by the per-user order listing.
#[derive(Deserialize, Debug, Clone)]
pub struct OrdersResponse {
    pub orders: Vec<OpenLimitOrder>,
}
