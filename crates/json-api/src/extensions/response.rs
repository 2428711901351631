//! Response helper extensions.

use salvo::{
    http::header::LOCATION,
    prelude::{Response, StatusCode, StatusError},
};

use crate::extensions::*;

pub(crate) trait ResponseExt {
    /// Mark the response `201 Created` with a `Location` header.
    fn created_at(&mut self, location: String) -> Result<(), StatusError>;
}

impl ResponseExt for Response {
    fn created_at(&mut self, location: String) -> Result<(), StatusError> {
        self.add_header(LOCATION, location, true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::CREATED);

        Ok(())
    }
}
