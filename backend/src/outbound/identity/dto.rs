//! Wire shapes of the GoTrue auth API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub(super) struct PasswordBodyDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: Uuid,
}

/// Sign-up answers with the bare user, or with a session wrapping it when
/// e-mail confirmation is disabled.
#[derive(Debug, Deserialize)]
pub(super) struct SignUpResponseDto {
    pub(super) id: Option<Uuid>,
    pub(super) user: Option<UserDto>,
}

impl SignUpResponseDto {
    pub(super) fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|user| user.id).or(self.id)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
    pub(super) user: UserDto,
}
