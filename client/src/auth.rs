//! Token authentication.
//!
//! The API hands out a numeric user id and a token (valid for roughly a day)
//! in exchange for a username and password. Every other call carries the pair
//! in its query string.

use std::fmt;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_string_from_number;

use crate::endpoints::Endpoint;
use crate::error::CiceroError;
use crate::query::encode_pairs;
use crate::response::DecodeError;
use crate::transport::Transport;

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(rename = "user", deserialize_with = "deserialize_string_from_number")]
    pub user_id: String,
    pub token: String,
}

impl Credentials {
    #[must_use]
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Exchange a username and password for [`Credentials`].
///
/// # Errors
/// Returns [`CiceroError::Api`] when the API rejects the login,
/// [`CiceroError::Network`] when it cannot be reached, and
/// [`CiceroError::Decode`] when the token response lacks `user` or `token`.
pub async fn authenticate<T>(
    transport: &T,
    api_root: &str,
    username: &str,
    password: &str,
) -> Result<Credentials, CiceroError>
where
    T: Transport + ?Sized,
{
    let url = format!("{api_root}{}", Endpoint::Token.path());
    let form = encode_pairs([("username", username), ("password", password)]);

    tracing::debug!(endpoint = Endpoint::Token.path(), "requesting API token");
    let response = transport.post_form(&url, &form).await?;

    if !response.is_success() {
        let err = CiceroError::from_failure(response.status, &response.body);
        tracing::warn!(status = response.status, error = %err, "authentication rejected");
        return Err(err);
    }

    let credentials: Credentials = serde_json::from_str(&response.body)
        .map_err(|e| DecodeError::new(Endpoint::Token.path(), e))?;
    tracing::debug!(user_id = %credentials.user_id, "obtained API token");
    Ok(credentials)
}
