use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::models::User;

/// Raw user as returned by the users listing endpoint.
///
/// Unknown fields are dropped during deserialization, which leaves exactly
/// the whitelisted set plus the coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInternal {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: String,
    pub email: String,
    pub address: AddressInternal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressInternal {
    pub coordinates: CoordinatesInternal,
}

// the API has served coordinates both as numbers and as decimal strings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CoordinatesInternal {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub lat: f64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub lng: f64,
}

impl UserInternal {
    pub fn lat(&self) -> f64 {
        self.address.coordinates.lat
    }

    pub fn lng(&self) -> f64 {
        self.address.coordinates.lng
    }

    pub fn into_user(self, country: String) -> User {
        let CoordinatesInternal { lat, lng } = self.address.coordinates;
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            gender: self.gender,
            email: self.email,
            lat,
            lng,
            country,
            favorite_category: None,
        }
    }
}
