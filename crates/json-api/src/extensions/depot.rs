//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use storefront_app::context::AppContext;

use crate::state::State;

/// Access to the injected application state.
pub(crate) trait DepotExt {
    fn app_or_500(&self) -> Result<&AppContext, StatusError>;
}

impl DepotExt for Depot {
    fn app_or_500(&self) -> Result<&AppContext, StatusError> {
        self.obtain::<Arc<State>>()
            .map(|state| &state.app)
            .map_err(|_ignored| {
                error!("application state missing from depot");

                StatusError::internal_server_error()
            })
    }
}
