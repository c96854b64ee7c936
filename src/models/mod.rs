//! Data models mirrored from the DocuDash API.
//!
//! Records deserialize from the server's camelCase JSON; input structs
//! serialize to the same shape after passing `validate()`.

/// Closed string enum with `as_str`, `Display` and `FromStr`.
///
/// Wire values are SCREAMING_SNAKE_CASE, matching the server.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(crate::error::AppError::invalid_input(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        stringify!($name),
                        other,
                        [$($wire),+].join(", ")
                    ))),
                }
            }
        }
    };
}

pub mod application;
pub mod dashboard;
pub mod envelope;
pub mod feature;
pub mod group;
pub mod params;
pub mod pipeline;
pub mod test_case;
pub mod test_request;
pub mod user;
pub mod validation;

// Re-exports for convenient access
pub use application::{Application, ApplicationStats, ApplicationStatus, ApplicationUpdate, NewApplication};
pub use dashboard::{DashboardStats, PipelineStats, RecentActivity, StatusCount};
pub use envelope::{ApiEnvelope, ListEnvelope, Paginated, Pagination};
pub use feature::{Feature, FeatureStatus, FeatureUpdate, NewFeature};
pub use group::{Group, GroupSubscription, GroupUpdate, NewGroup};
pub use params::ListParams;
pub use pipeline::{
    GitlabPipeline, PipelineResults, PipelineStatus, RegisterPipelineResult, ResultSummary,
    SyncStatus, TestCasePipelineResult, TestResultInput, TestResultStatus,
};
pub use test_case::{
    GherkinStep, GherkinStepInput, GherkinStepType, GherkinSubStep, GherkinSubStepInput, NewTestCase, TestCase,
    TestCasePriority, TestCaseStatus, TestCaseType, TestCaseUpdate,
};
pub use test_request::{
    ApiTestPlan, FrontTestPlan, NewTestRequest, StatusChange, TestRequest, TestRequestStatus,
    TestRequestType, TestRequestUpdate,
};
pub use user::{
    AuthUser, ChangePasswordInput, LoginInput, LoginResponse, NewUser, RegisterInput, User,
    UserRole, UserStatus, UserUpdate,
};
