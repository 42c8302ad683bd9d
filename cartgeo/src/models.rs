pub mod cart;
pub mod user;

pub use cart::{Cart, CartProduct};
pub use user::User;
