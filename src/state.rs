use sqlx::SqlitePool;

use crate::credentials::CredentialStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub credentials: CredentialStore,
}
