//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    clock::Clock,
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        orders::{OrdersService, PgOrdersService},
        reservations::{PgReservationsService, ReservationsService},
        returns::{PgReturnsService, ReturnsService},
        support::{PgSupportService, SupportService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub accounts: Arc<dyn AccountsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub reservations: Arc<dyn ReservationsService>,
    pub orders: Arc<dyn OrdersService>,
    pub returns: Arc<dyn ReturnsService>,
    pub support: Arc<dyn SupportService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            auth: Arc::new(PgAuthService::new(pool, Arc::clone(&clock))),
            accounts: Arc::new(PgAccountsService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            reservations: Arc::new(PgReservationsService::new(db.clone(), Arc::clone(&clock))),
            orders: Arc::new(PgOrdersService::new(db.clone(), Arc::clone(&clock))),
            returns: Arc::new(PgReturnsService::new(db.clone(), Arc::clone(&clock))),
            support: Arc::new(PgSupportService::new(db)),
        })
    }
}
