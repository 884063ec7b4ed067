//! IAM
//!
//! Login and user management against `/api/iam`.

use super::auth::{Authorization, Credentials, SessionToken};
use super::client::{endpoint, segment, ApiClient};
use super::codec::WireFormat;
use super::error::{Result, VchsError};
use super::http::{sanitize_for_log, ApiRequest, Transport};
use super::media::{class, MediaType, VCHS_AUTHORIZATION_HEADER};
use super::timestamp::{deserialize_optional, XmlDateTime};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

const LOGIN_PATH: &str = "/api/iam/login";
const USERS_PATH: &str = "/api/iam/Users";

/// IAM user record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Roles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<UserMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roles {
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Server-maintained bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMeta {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional"
    )]
    pub created: Option<XmlDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional"
    )]
    pub modified: Option<XmlDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Users {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Log in and return the session token
///
/// Succeeds only on `201 Created` with a non-empty `vchs-authorization`
/// header; any other status is an authentication failure.
pub async fn login<T: Transport>(
    client: &ApiClient<T>,
    credentials: &Credentials,
) -> Result<SessionToken> {
    let request = ApiRequest::post(endpoint(&credentials.host, LOGIN_PATH))
        .authorize(Authorization::Basic {
            username: &credentials.username,
            password: &credentials.password,
        })
        .accept(MediaType::json(client.version()));

    let response = client.send(request).await?;
    if response.status != StatusCode::CREATED {
        tracing::warn!("Login rejected with status {}", response.status);
        return Err(VchsError::AuthFailure {
            status: response.status,
        });
    }

    let token = response
        .header(VCHS_AUTHORIZATION_HEADER)
        .filter(|t| !t.is_empty())
        .ok_or(VchsError::MissingHeader(VCHS_AUTHORIZATION_HEADER))?;

    tracing::info!("Logged in as {}", credentials.username);
    Ok(SessionToken::new(token))
}

/// Get a single user by id
pub async fn get_user<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    user_id: &str,
) -> Result<User> {
    let url = endpoint(host, &format!("{}/{}", USERS_PATH, segment(user_id)));
    let request = ApiRequest::get(url)
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::xml(client.version()).with_class(class::USER));
    client.fetch(request, &[StatusCode::OK]).await
}

/// List users visible to the session
///
/// On failure, [`VchsError::error_body`] exposes the server's error code
/// and message.
pub async fn list_users<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
) -> Result<Vec<User>> {
    let request = ApiRequest::get(endpoint(host, USERS_PATH))
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::xml(client.version()).with_class(class::USERS));
    let users: Users = client.fetch(request, &[StatusCode::OK]).await?;
    Ok(users.users)
}

/// The user the session belongs to, if the server returned one
pub async fn get_self<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
) -> Result<Option<User>> {
    let url = endpoint(host, &format!("{}?self=1", USERS_PATH));
    let request = ApiRequest::get(url)
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::json(client.version()).with_class(class::USERS));
    let users: Users = client.fetch(request, &[StatusCode::OK]).await?;
    Ok(users.users.into_iter().next())
}

/// Create a user and return the record the server stored
pub async fn create_user<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    user: &User,
) -> Result<User> {
    let media = MediaType::json(client.version()).with_class(class::USER);
    let request = ApiRequest::post(endpoint(host, USERS_PATH))
        .authorize(Authorization::Bearer(token))
        .accept(media)
        .body(media, WireFormat::Json.encode(user)?);
    client.fetch(request, &[StatusCode::CREATED]).await
}

/// Replace a user record; returns the raw response status
///
/// `204 No Content` is success. Any other status is logged together with
/// the response body and handed back for the caller to interpret.
pub async fn update_user<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    user: &User,
) -> Result<StatusCode> {
    let user_id = user
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(VchsError::MissingId("user"))?;
    let url = endpoint(host, &format!("{}/{}", USERS_PATH, segment(user_id)));
    let request = ApiRequest::put(url)
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::json(client.version()))
        .body(
            MediaType::json(client.version()).with_class(class::USER),
            WireFormat::Json.encode(user)?,
        );

    let response = client.send(request).await?;
    if response.status != StatusCode::NO_CONTENT {
        tracing::warn!(
            "Update of user {} returned {} - {}",
            user_id,
            response.status,
            sanitize_for_log(&response.body)
        );
    }
    Ok(response.status)
}

/// Delete a user; returns the raw response status
pub async fn delete_user<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    user_id: &str,
) -> Result<StatusCode> {
    let url = endpoint(host, &format!("{}/{}", USERS_PATH, segment(user_id)));
    let request = ApiRequest::delete(url)
        .accept(MediaType::json(client.version()))
        .authorize(Authorization::Bearer(token));
    Ok(client.send(request).await?.status)
}
