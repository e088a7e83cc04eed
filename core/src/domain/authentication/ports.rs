use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity, common::entities::app_errors::CoreError,
};

/// Remote identity lookup for a bearer token
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    fn lookup(&self, token: String) -> impl Future<Output = Result<Identity, CoreError>> + Send;
}

/// Service trait for caller authorization
pub trait AuthService: Send + Sync {
    /// Resolves the caller from a raw `Authorization` header value.
    fn authorize(
        &self,
        authorization_header: Option<String>,
    ) -> impl Future<Output = Result<Identity, CoreError>> + Send;
}
