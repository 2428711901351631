//! Response bodies shared across resources.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Bulk Delete Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeletedResponse {
    /// Number of records removed
    pub deleted: u64,
}
