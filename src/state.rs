use sea_orm::DatabaseConnection;

use crate::middleware::auth::AuthKeys;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub auth: AuthKeys,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, auth: AuthKeys) -> Self {
        Self { orm, auth }
    }
}
