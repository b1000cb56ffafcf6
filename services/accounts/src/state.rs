use sea_orm::DatabaseConnection;

use crate::infra::db::DbAccountDirectory;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn directory(&self) -> DbAccountDirectory {
        DbAccountDirectory {
            db: self.db.clone(),
        }
    }
}
