//! Resource API modules.
//!
//! One thin struct per backend entity, each borrowing the shared
//! [`ApiClient`]. Obtain them through the accessors on the client:
//!
//! ```no_run
//! # async fn demo(client: docudash_client::ApiClient) -> docudash_client::AppResult<()> {
//! use docudash_client::models::ListParams;
//!
//! let page = client
//!     .test_cases()
//!     .list(&ListParams::new().with("status", "PRODUCTIVE"))
//!     .await?;
//! println!("{} test cases", page.data.len());
//! # Ok(())
//! # }
//! ```

pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod features;
pub mod groups;
pub mod pipelines;
pub mod test_cases;
pub mod test_requests;
pub mod uploads;
pub mod users;

pub use applications::ApplicationsApi;
pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use features::FeaturesApi;
pub use groups::GroupsApi;
pub use pipelines::PipelinesApi;
pub use test_cases::TestCasesApi;
pub use test_requests::TestRequestsApi;
pub use uploads::{UploadedImage, UploadsApi};
pub use users::UsersApi;

use crate::error::AppResult;
use crate::models::validation::validate_required;
use crate::services::ApiClient;

/// Build `{base}/{id}` with the id percent-encoded.
///
/// Empty ids are rejected before any request is made.
pub(crate) fn entity_path(base: &str, id: &str) -> AppResult<String> {
    validate_required(id, "id")?;
    Ok(format!("{}/{}", base, urlencoding::encode(id)))
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn groups(&self) -> GroupsApi<'_> {
        GroupsApi::new(self)
    }

    pub fn applications(&self) -> ApplicationsApi<'_> {
        ApplicationsApi::new(self)
    }

    pub fn features(&self) -> FeaturesApi<'_> {
        FeaturesApi::new(self)
    }

    pub fn test_cases(&self) -> TestCasesApi<'_> {
        TestCasesApi::new(self)
    }

    pub fn test_requests(&self) -> TestRequestsApi<'_> {
        TestRequestsApi::new(self)
    }

    pub fn uploads(&self) -> UploadsApi<'_> {
        UploadsApi::new(self)
    }

    pub fn pipelines(&self) -> PipelinesApi<'_> {
        PipelinesApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_path_encodes_id() {
        assert_eq!(entity_path("/groups", "g-1").unwrap(), "/groups/g-1");
        assert_eq!(entity_path("/groups", "a b/c").unwrap(), "/groups/a%20b%2Fc");
    }

    #[test]
    fn test_entity_path_rejects_empty_id() {
        let err = entity_path("/features", "  ").unwrap_err();
        assert!(matches!(err, crate::AppError::InvalidInput { .. }));
    }
}
