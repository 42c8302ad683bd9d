use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

use crate::geocoder::UNKNOWN_COUNTRY;
use crate::models::{Cart, User};

/// Favorite category of a cart with nothing to tally.
pub const UNKNOWN_CATEGORY: &str = UNKNOWN_COUNTRY;

const CATEGORY_SEPARATOR: &str = "; ";

/// Extracts the product category from a thumbnail url such as
/// `https://cdn.dummyjson.com/products/images/laptops/Apple%20MacBook/thumbnail.png`.
///
/// Returns `None` when the url does not start with `prefix` or has no segment after it.
pub fn category_from_thumbnail<'a>(thumbnail: &'a str, prefix: &str) -> Option<&'a str> {
    thumbnail
        .strip_prefix(prefix)
        .and_then(|rest| rest.split('/').next())
        .filter(|category| !category.is_empty())
}

/// Purchased quantity per category for one cart, in encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTally<'a>(IndexMap<&'a str, i64>);

impl<'a> CategoryTally<'a> {
    pub fn from_cart(cart: &'a Cart, prefix: &str) -> Self {
        let mut tally = IndexMap::new();
        for product in &cart.products {
            match category_from_thumbnail(&product.thumbnail, prefix) {
                Some(category) => *tally.entry(category).or_insert(0) += product.quantity,
                None => debug!(
                    "cart of user {}: no category in thumbnail {:?}",
                    cart.user_id, product.thumbnail
                ),
            }
        }
        Self(tally)
    }

    pub fn get(&self, category: &str) -> Option<i64> {
        self.0.get(category).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every category tied at the highest quantity, joined by `"; "`.
    pub fn favorite(&self) -> String {
        let Some(max) = self.0.values().max().copied() else {
            return UNKNOWN_CATEGORY.to_string();
        };
        self.0
            .iter()
            .filter(|(_, quantity)| **quantity == max)
            .map(|(category, _)| *category)
            .join(CATEGORY_SEPARATOR)
    }
}

pub fn favorite_category(cart: &Cart, prefix: &str) -> String {
    CategoryTally::from_cart(cart, prefix).favorite()
}

/// Writes each cart's favorite category onto its owner.
///
/// Carts whose owner is not among `users` are skipped. Users without any cart
/// end up with `None`; a later cart of the same user replaces an earlier result.
pub fn assign_favorite_categories(users: &mut [User], carts: &[Cart], prefix: &str) {
    let index: HashMap<i64, usize> = users
        .iter()
        .enumerate()
        .map(|(i, user)| (user.id, i))
        .collect();
    for user in users.iter_mut() {
        user.favorite_category = None;
    }

    for cart in carts {
        let Some(user) = index.get(&cart.user_id).and_then(|&i| users.get_mut(i)) else {
            debug!("skipping cart of unknown user {}", cart.user_id);
            continue;
        };
        let favorite = favorite_category(cart, prefix);
        debug!("user {} favorite category: {favorite}", user.id);
        user.favorite_category = Some(favorite);
    }
}
