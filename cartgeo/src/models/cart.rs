use serde::{Deserialize, Serialize};

/// A shopping cart as listed by the carts endpoint.
///
/// Only the owner and the purchased products are kept, everything else in the
/// payload (totals, discounts, per-product prices) is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: i64,
    #[serde(default)]
    pub products: Vec<CartProduct>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CartProduct {
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub quantity: i64,
}
