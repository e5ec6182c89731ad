#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status and an `{error}` body.
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
}

impl ApiClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiClientError::Status { status, .. } => Some(*status),
            ApiClientError::Http(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error("No restaurant selected")]
    NoRestaurantSelected,
    #[error("No menu selected")]
    NoMenuSelected,
    #[error("Menu {0} is not one of the restaurant's saved menus")]
    UnknownMenu(i64),
    #[error("No item at position {0}")]
    NoSuchItem(usize),
    #[error(transparent)]
    Api(#[from] ApiClientError),
}
