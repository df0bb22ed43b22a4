//! This module provides a client to connect to the task API
//!
//! The client attaches the session token (if any) to every request.
//! When the server rejects that token, the session is signed out, so that the app can ask the user to sign in again.

use std::error::Error;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cache::SessionCache;
use crate::date_key::DateKey;
use crate::error::ApiError;
use crate::item::TaskId;
use crate::task::{Task, TaskStatus};
use crate::traits::{TaskQuery, TaskSource};
use crate::wire::{build_create_request, build_update_request, NewTask};


/// The role a user registers with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Creates a family, and can invite other users to join it
    Admin,
    User,
}

/// What a user fills in to register
#[derive(Clone, Debug, PartialEq)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: u32,
    pub avatar_id: u32,
    pub role: Role,
    /// Only used by admins
    pub family_name: Option<String>,
    pub invite_code: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    age: u32,
    avatar_id: u32,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    family_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invite_code: Option<&'a str>,
}

impl<'a> From<&'a SignUp> for SignUpRequest<'a> {
    fn from(sign_up: &'a SignUp) -> Self {
        let family_name = match sign_up.role {
            Role::Admin => sign_up.family_name.as_deref(),
            Role::User => None,
        };
        Self {
            username: &sign_up.username,
            email: &sign_up.email,
            password: &sign_up.password,
            age: sign_up.age,
            avatar_id: sign_up.avatar_id,
            role: sign_up.role,
            family_name,
            invite_code: sign_up.invite_code.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct SignInResponse {
    token: Option<String>,
    user: Option<serde_json::Value>,
}

/// The auth endpoints, which do not report failures the same way
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthEndpoint {
    SignIn,
    SignUp,
    VerifyResetCode,
    Other,
}

/// Translate the status code of a failed auth request
fn auth_error(endpoint: AuthEndpoint, status: u16, body: String) -> ApiError {
    match (endpoint, status) {
        (AuthEndpoint::SignIn, 400) | (AuthEndpoint::SignIn, 401) | (AuthEndpoint::SignIn, 403) => ApiError::InvalidCredentials,
        (AuthEndpoint::SignIn, 404) => ApiError::UserNotFound,
        (AuthEndpoint::SignUp, 409) => ApiError::AlreadyExists,
        (AuthEndpoint::VerifyResetCode, 400) => ApiError::InvalidResetCode,
        (AuthEndpoint::VerifyResetCode, 410) => ApiError::ResetCodeExpired,
        (_, 401) => ApiError::Unauthorized,
        (_, status) => ApiError::Status(status, body),
    }
}


/// A task source that talks to the REST API of the planner server
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    session: SessionCache,
}

impl Client {
    /// Create a client. This does not start a connection.
    ///
    /// `base_url` may contain a path prefix (e.g. `https://example.com/planner`), the API paths are appended to it.
    pub fn new<S: AsRef<str>>(base_url: S, session: SessionCache) -> Result<Self, Box<dyn Error>> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // Endpoints are relative to the base, keep its last path segment
        if base_url.path().ends_with('/') == false {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self{
            base_url,
            http: reqwest::Client::new(),
            session,
        })
    }

    /// Create a client for the API URL set in [`crate::config`]
    pub fn from_config(session: SessionCache) -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::get(&crate::config::API_BASE_URL), session)
    }

    pub fn session(&self) -> &SessionCache { &self.session }
    pub fn session_mut(&mut self) -> &mut SessionCache { &mut self.session }

    fn endpoint(&self, path: &str) -> Result<Url, Box<dyn Error>> {
        Ok(self.base_url.join(path)?)
    }

    fn tasks_list_url(&self, query: &TaskQuery) -> Result<Url, Box<dyn Error>> {
        let mut url = self.endpoint("api/tasks/list")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(from) = query.from_date {
                pairs.append_pair("fromDate", &DateKey::from(from).to_string());
            }
            if let Some(to) = query.to_date {
                pairs.append_pair("toDate", &DateKey::from(to).to_string());
            }
            pairs.append_pair("includeCompleted", if query.include_completed { "true" } else { "false" });
        }
        Ok(url)
    }

    fn task_update_url(&self, id: &TaskId) -> Result<Url, Box<dyn Error>> {
        let mut url = self.endpoint("api/tasks")?;
        let email = self.session.user()
            .and_then(|user| user.get("email"))
            .and_then(|email| email.as_str())
            .map(|email| email.to_string());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("taskId", id.as_str());
            if let Some(email) = &email {
                pairs.append_pair("email", email);
            }
        }
        Ok(url)
    }

    fn task_status_url(&self, id: &TaskId, status: TaskStatus) -> Result<Url, Box<dyn Error>> {
        let mut url = self.endpoint("api/tasks/")?;
        url.path_segments_mut()
            .map_err(|_| "The API URL cannot be a base")?
            .pop_if_empty()
            .push(id.as_str())
            .push("status");
        url.query_pairs_mut().append_pair("status", status.as_str());
        Ok(url)
    }

    fn task_delete_url(&self, id: &TaskId) -> Result<Url, Box<dyn Error>> {
        let mut url = self.endpoint("api/tasks")?;
        url.query_pairs_mut().append_pair("id", id.as_str());
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request, and forget the session in case the server does not accept its token anymore
    async fn send(&mut self, builder: RequestBuilder) -> Result<Response, Box<dyn Error>> {
        let response = self.authorized(builder).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED && self.session.token().is_some() {
            log::warn!("The server rejected the session token. Signing out");
            self.session.sign_out();
        }
        Ok(response)
    }

    /// Send a request and return the body of its successful response
    async fn send_and_read(&mut self, builder: RequestBuilder) -> Result<String, Box<dyn Error>> {
        let response = self.send(builder).await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() == false {
            if status == StatusCode::UNAUTHORIZED {
                return Err(ApiError::Unauthorized.into());
            }
            return Err(ApiError::Status(status.as_u16(), text).into());
        }
        Ok(text)
    }

    async fn post_auth<B: Serialize + ?Sized>(&mut self, endpoint: AuthEndpoint, path: &str, body: &B) -> Result<String, Box<dyn Error>> {
        let url = self.endpoint(path)?;
        let builder = self.http.post(url).json(body);
        let response = self.send(builder).await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() == false {
            log::debug!("{} failed with status {}", path, status);
            return Err(auth_error(endpoint, status.as_u16(), text).into());
        }
        Ok(text)
    }

    /// Sign in, and store the session token and user in the session cache.
    ///
    /// Returns the user profile, as sent by the server.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<serde_json::Value, Box<dyn Error>> {
        let body = serde_json::json!({ "email": email, "password": password });
        let text = self.post_auth(AuthEndpoint::SignIn, "api/auth/sign-in", &body).await?;

        let (token, user) = read_credentials(&text)?;
        log::info!("Signed in as {}", email);
        self.session.sign_in(token, user.clone());
        Ok(user)
    }

    /// Forget the current session
    pub fn sign_out(&mut self) {
        self.session.sign_out();
    }

    /// Register a new user.
    ///
    /// The server signs the new user in at once: the returned token and user are stored in the session cache.
    pub async fn sign_up(&mut self, sign_up: &SignUp) -> Result<serde_json::Value, Box<dyn Error>> {
        let body = SignUpRequest::from(sign_up);
        let text = self.post_auth(AuthEndpoint::SignUp, "api/auth/sign-up", &body).await?;
        Ok(self.remember_registration(&text))
    }

    fn remember_registration(&mut self, text: &str) -> serde_json::Value {
        match read_credentials(text) {
            Ok((token, user)) => {
                log::info!("Registered and signed in");
                self.session.sign_in(token, user.clone());
                user
            },
            Err(err) => {
                log::debug!("Registered without a session: {}", err);
                parse_optional_json(text)
            },
        }
    }

    /// Join the family that issued `invite_code`
    pub async fn join_family(&mut self, invite_code: &str) -> Result<serde_json::Value, Box<dyn Error>> {
        let body = serde_json::json!({ "inviteCode": invite_code });
        let text = self.post_auth(AuthEndpoint::Other, "api/auth/join-family", &body).await?;
        Ok(parse_optional_json(&text))
    }

    /// Ask the server to send a password reset code by email
    pub async fn request_password_reset(&mut self, email: &str) -> Result<(), Box<dyn Error>> {
        let body = serde_json::json!({ "email": email });
        self.post_auth(AuthEndpoint::Other, "api/auth/forgot-password", &body).await?;
        Ok(())
    }

    /// Check a password reset code received by email
    pub async fn verify_reset_code(&mut self, email: &str, token: &str) -> Result<(), Box<dyn Error>> {
        let body = serde_json::json!({ "email": email, "token": token });
        self.post_auth(AuthEndpoint::VerifyResetCode, "api/auth/verify-reset-code", &body).await?;
        Ok(())
    }

    /// Set a new password, using a verified reset code
    pub async fn reset_password(&mut self, email: &str, token: &str, new_password: &str) -> Result<(), Box<dyn Error>> {
        let body = serde_json::json!({ "email": email, "token": token, "newPassword": new_password });
        self.post_auth(AuthEndpoint::Other, "api/auth/reset-password", &body).await?;
        Ok(())
    }
}

/// Extract the session token and the user profile of a sign-in (or sign-up) response
fn read_credentials(text: &str) -> Result<(String, serde_json::Value), ApiError> {
    let response: SignInResponse = serde_json::from_str(text)
        .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
    match (response.token, response.user) {
        (Some(token), Some(user)) => Ok((token, user)),
        _ => Err(ApiError::InvalidResponse("missing token or user".to_string())),
    }
}

/// Some endpoints reply with an empty body, some with a plain text message
fn parse_optional_json(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text)
        .unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

#[async_trait]
impl TaskSource for Client {
    async fn fetch_tasks(&mut self, query: &TaskQuery) -> Result<Vec<Task>, Box<dyn Error>> {
        let url = self.tasks_list_url(query)?;
        log::debug!("Fetching tasks from {}", url);
        let builder = self.http.get(url);
        let text = self.send_and_read(builder).await?;
        let tasks = crate::wire::parse_list(&text)?;
        log::info!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn create_task(&mut self, task: &NewTask) -> Result<(), Box<dyn Error>> {
        let url = self.endpoint("api/tasks")?;
        let builder = self.http.post(url).json(&build_create_request(task));
        self.send_and_read(builder).await?;
        log::info!("Created task {}", task.name);
        Ok(())
    }

    async fn update_task(&mut self, id: &TaskId, task: &NewTask) -> Result<(), Box<dyn Error>> {
        let url = self.task_update_url(id)?;
        let builder = self.http.put(url).json(&build_update_request(task));
        self.send_and_read(builder).await?;
        Ok(())
    }

    async fn set_task_status(&mut self, id: &TaskId, status: TaskStatus) -> Result<(), Box<dyn Error>> {
        let url = self.task_status_url(id, status)?;
        let builder = self.http.patch(url);
        self.send_and_read(builder).await?;
        Ok(())
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        let url = self.task_delete_url(id)?;
        let builder = self.http.delete(url);
        self.send_and_read(builder).await?;
        Ok(())
    }
}
