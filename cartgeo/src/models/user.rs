use serde::{Deserialize, Serialize};

/** An enriched user record.
 * Built from the users listing payload, of which only these fields survive:
 * id                      numeric user id
 * firstName / lastName    names as given by the API
 * age                     integer
 * gender / email          strings
 * lat / lng               taken from address.coordinates
 * country                 reverse geocoded, "Unknown" when the lookup failed
 * fav_category_in_cart    filled by the aggregator, None when the user owns no cart
 * The serde names double as CSV column names.
 */
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: String,
    pub email: String,
    pub lat: f64,
    pub lng: f64,
    pub country: String,
    #[serde(rename = "fav_category_in_cart")]
    pub favorite_category: Option<String>,
}
