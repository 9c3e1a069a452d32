#[derive(Debug, thiserror::Error)]
pub enum AgriMarketError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Missing contact: a listing needs a phone number or other contact")]
    MissingContact,

    #[error("Invalid transport input: {0}")]
    InvalidTransport(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AgriMarketError {
    /// True for errors raised by the input validation boundary, i.e. the ones
    /// that should be shown back to the user rather than treated as failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AgriMarketError::InvalidCrop(_)
                | AgriMarketError::InvalidPrice(_)
                | AgriMarketError::InvalidQuantity(_)
                | AgriMarketError::MissingContact
                | AgriMarketError::InvalidTransport(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AgriMarketError>;
