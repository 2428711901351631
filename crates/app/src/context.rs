//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        campaigns::{CampaignsService, SqliteCampaignsService},
        carts::{CartsService, SqliteCartsService},
        customers::{CustomersService, SqliteCustomersService},
        notifications::{Notifier, TracingNotifier},
        orders::{OrdersService, SqliteOrdersService},
        payments::{
            PaymentGateway, PaymentsService, SimulatedGateway, SqlitePaymentsService,
            models::CheckoutSettings,
        },
        products::{ProductsService, SqliteProductsService},
        promotions::{PromotionsService, SqlitePromotionsService},
        returns::{ReturnsService, SqliteReturnsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub customers: Arc<dyn CustomersService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub campaigns: Arc<dyn CampaignsService>,
    pub payments: Arc<dyn PaymentsService>,
    pub returns: Arc<dyn ReturnsService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        settings: CheckoutSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migration)?;

        Ok(Self::from_db(Db::new(pool), settings))
    }

    /// Wire every service against `db` with the simulated gateway and a
    /// log-only notifier.
    #[must_use]
    pub fn from_db(db: Db, settings: CheckoutSettings) -> Self {
        let gateway: Arc<dyn PaymentGateway> = Arc::new(SimulatedGateway::new());
        let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier::new());

        Self {
            customers: Arc::new(SqliteCustomersService::new(db.clone())),
            products: Arc::new(SqliteProductsService::new(db.clone())),
            carts: Arc::new(SqliteCartsService::new(db.clone())),
            orders: Arc::new(SqliteOrdersService::new(db.clone())),
            promotions: Arc::new(SqlitePromotionsService::new(db.clone())),
            campaigns: Arc::new(SqliteCampaignsService::new(db.clone())),
            payments: Arc::new(SqlitePaymentsService::new(
                db.clone(),
                Arc::clone(&gateway),
                Arc::clone(&notifier),
                settings,
            )),
            returns: Arc::new(SqliteReturnsService::new(db, gateway, notifier)),
        }
    }
}
