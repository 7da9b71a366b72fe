//! Response bodies shared by several handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirmation returned by delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Contact deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
