//! Travis API model types.

mod repository;
mod user;

pub use repository::*;
pub use user::*;

use crate::error::TravisError;

/// Attach the entity type and caller-facing id to a bare 404 from the client.
pub(crate) fn label_not_found(err: TravisError, entity_type: &'static str, id: &str) -> TravisError {
    match err {
        TravisError::NotFound { .. } => TravisError::NotFound {
            entity_type,
            id: id.to_string(),
        },
        other => other,
    }
}
