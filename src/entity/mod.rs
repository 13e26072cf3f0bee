pub mod enums;
pub mod favorites;
pub mod listings;
pub mod users;

pub use favorites::Entity as Favorites;
pub use listings::Entity as Listings;
pub use users::Entity as Users;
