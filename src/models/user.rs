//! User and authentication models.

use super::validation::{validate_email, validate_optional, validate_password, validate_required};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Role of a user.
    pub enum UserRole {
        Admin => "ADMIN",
        User => "USER",
    }
}

wire_enum! {
    /// Account status of a user.
    pub enum UserStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
}

/// A user account as returned by `/users` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Group subscriptions, included by `/auth/me` and `/users/:id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<Vec<super::GroupSubscription>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The slim user profile kept in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
        }
    }
}

/// Minimal user reference embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Data returned by `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

/// Credentials for `/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email, "email")?;
        validate_required(&self.password, "password")
    }
}

/// Self-registration payload for `/auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterInput {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email, "email")?;
        validate_password(&self.password, "password")?;
        validate_required(&self.first_name, "firstName")?;
        validate_required(&self.last_name, "lastName")
    }
}

/// Payload for `/auth/change-password`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordInput {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.current_password, "currentPassword")?;
        validate_password(&self.new_password, "newPassword")
    }
}

/// Admin-side user creation payload for `POST /users`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email, "email")?;
        validate_password(&self.password, "password")?;
        validate_required(&self.first_name, "firstName")?;
        validate_required(&self.last_name, "lastName")
    }
}

/// Partial update for `PUT /users/:id`. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(email) = &self.email {
            validate_email(email, "email")?;
        }
        validate_optional(self.first_name.as_deref(), "firstName")?;
        validate_optional(self.last_name.as_deref(), "lastName")?;
        if let Some(password) = &self.password {
            validate_password(password, "password")?;
        }
        Ok(())
    }
}
