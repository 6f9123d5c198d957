use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::oauth2::config::{
    GOOGLE_PROVIDER_NAME, GoogleOAuthConfig, OAUTH2_AUTH_URL, OAUTH2_HTTP_TIMEOUT_SECS,
    OAUTH2_SCOPES, OAUTH2_TOKEN_URL, OAUTH2_USERINFO_URL,
};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::provider::OAuthProvider;
use crate::oauth2::types::{GoogleUserInfo, OAuthPurpose, OAuthUserInfo, TokenResponse};

/// Google authorization-code client.
#[derive(Debug, Clone)]
pub struct GoogleOAuthGateway {
    config: GoogleOAuthConfig,
    client: reqwest::Client,
    auth_url: Url,
    token_url: String,
    userinfo_url: String,
}

impl GoogleOAuthGateway {
    pub fn new(config: GoogleOAuthConfig) -> Result<Self, OAuth2Error> {
        Self::with_endpoints(
            config,
            OAUTH2_AUTH_URL.as_str(),
            OAUTH2_TOKEN_URL.as_str(),
            OAUTH2_USERINFO_URL.as_str(),
        )
    }

    pub fn with_endpoints(
        config: GoogleOAuthConfig,
        auth_url: &str,
        token_url: &str,
        userinfo_url: &str,
    ) -> Result<Self, OAuth2Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(OAUTH2_HTTP_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| OAuth2Error::Config(format!("failed to build HTTP client: {e}")))?;

        Self::from_parts(config, client, auth_url, token_url, userinfo_url)
    }

    fn from_parts(
        config: GoogleOAuthConfig,
        client: reqwest::Client,
        auth_url: &str,
        token_url: &str,
        userinfo_url: &str,
    ) -> Result<Self, OAuth2Error> {
        let auth_url = Url::parse(auth_url)
            .map_err(|e| OAuth2Error::Config(format!("invalid authorization URL: {e}")))?;

        Ok(Self {
            config,
            client,
            auth_url,
            token_url: token_url.to_string(),
            userinfo_url: userinfo_url.to_string(),
        })
    }

    fn redirect_uri(&self, purpose: OAuthPurpose) -> String {
        format!("{}/{}", self.config.redirect_url, purpose)
    }

    async fn exchange_code_for_token(
        &self,
        code: &str,
        purpose: OAuthPurpose,
    ) -> Result<String, OAuth2Error> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri(purpose).as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!("Token exchange rejected with status {}", status);
            return Err(OAuth2Error::Rejected(format!(
                "token endpoint returned {status}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuth2Error::InvalidResponse(e.to_string()))?;
        Ok(token.access_token)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, OAuth2Error> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!("Userinfo request rejected with status {}", status);
            return Err(OAuth2Error::Rejected(format!(
                "userinfo endpoint returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| OAuth2Error::InvalidResponse(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> OAuth2Error {
    if e.is_timeout() {
        OAuth2Error::Transport(format!("timed out: {e}"))
    } else {
        OAuth2Error::Transport(e.to_string())
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthGateway {
    async fn exchange_code_for_user_info(
        &self,
        code: &str,
        purpose: OAuthPurpose,
    ) -> Result<OAuthUserInfo, OAuth2Error> {
        let access_token = self.exchange_code_for_token(code, purpose).await?;
        let user = self.fetch_user_info(&access_token).await?;

        tracing::debug!("Fetched Google user info for subject {}", user.sub);
        Ok(OAuthUserInfo {
            subject_id: user.sub,
            email: user.email,
            full_name: user.name.unwrap_or_default(),
            provider_name: GOOGLE_PROVIDER_NAME.to_string(),
        })
    }

    fn build_auth_url(&self, purpose: OAuthPurpose, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.redirect_uri(purpose))
            .append_pair("response_type", "code")
            .append_pair("scope", OAUTH2_SCOPES)
            .append_pair("access_type", "online")
            .append_pair("state", state);
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Form, Json, Router,
        extract::State,
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    fn test_config() -> GoogleOAuthConfig {
        GoogleOAuthConfig {
            client_id: "client-123".to_string(),
            client_secret: "shh".to_string(),
            redirect_url: "http://localhost:8080/api/auth/google/callback".to_string(),
        }
    }

    #[derive(Clone)]
    struct MockProvider {
        token: (StatusCode, Value),
        userinfo: (StatusCode, Value),
        token_forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
    }

    async fn token_endpoint(
        State(mock): State<MockProvider>,
        Form(form): Form<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        mock.token_forms.lock().unwrap().push(form);
        let (status, body) = mock.token;
        (status, Json(body))
    }

    async fn userinfo_endpoint(
        State(mock): State<MockProvider>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        let bearer = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        if bearer != Some("Bearer at-1") {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "invalid_token" })),
            );
        }
        let (status, body) = mock.userinfo;
        (status, Json(body))
    }

    /// Serves `/token` and `/userinfo` on a local port; returns the base URL
    /// and the forms posted to `/token`.
    async fn spawn_mock_provider(
        token: (StatusCode, Value),
        userinfo: (StatusCode, Value),
    ) -> (String, Arc<Mutex<Vec<HashMap<String, String>>>>) {
        let token_forms = Arc::new(Mutex::new(Vec::new()));
        let mock = MockProvider {
            token,
            userinfo,
            token_forms: token_forms.clone(),
        };
        let app = Router::new()
            .route("/token", post(token_endpoint))
            .route("/userinfo", get(userinfo_endpoint))
            .with_state(mock);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), token_forms)
    }

    fn token_ok() -> (StatusCode, Value) {
        (
            StatusCode::OK,
            json!({ "access_token": "at-1", "token_type": "Bearer" }),
        )
    }

    fn userinfo_ok() -> (StatusCode, Value) {
        (
            StatusCode::OK,
            json!({ "sub": "g-42", "email": "user@example.com", "name": "Jane Doe" }),
        )
    }

    fn gateway_for(base: &str) -> GoogleOAuthGateway {
        // Local fake provider; bypass any proxy configured in the environment
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        GoogleOAuthGateway::from_parts(
            test_config(),
            client,
            "https://accounts.google.com/o/oauth2/auth",
            &format!("{base}/token"),
            &format!("{base}/userinfo"),
        )
        .unwrap()
    }

    #[test]
    fn test_build_auth_url_contains_parameters() {
        let gateway = GoogleOAuthGateway::new(test_config()).unwrap();
        let url = Url::parse(&gateway.build_auth_url(OAuthPurpose::Signup, "st+ate/=")).unwrap();
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

        assert_eq!(params["client_id"], "client-123");
        assert_eq!(
            params["redirect_uri"],
            "http://localhost:8080/api/auth/google/callback/signup"
        );
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["scope"], OAUTH2_SCOPES);
        assert_eq!(params["access_type"], "online");
        // base64 state survives encoding intact
        assert_eq!(params["state"], "st+ate/=");
    }

    #[test]
    fn test_build_auth_url_purpose_selects_redirect() {
        let gateway = GoogleOAuthGateway::new(test_config()).unwrap();
        let url = gateway.build_auth_url(OAuthPurpose::Login, "s");
        assert!(url.contains(&urlencode("http://localhost:8080/api/auth/google/callback/login")));
    }

    fn urlencode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }

    #[test]
    fn test_invalid_auth_endpoint_is_config_error() {
        let result = GoogleOAuthGateway::with_endpoints(test_config(), "not a url", "t", "u");
        assert!(matches!(result, Err(OAuth2Error::Config(_))));
    }

    #[tokio::test]
    async fn test_exchange_success() {
        let (base, _) = spawn_mock_provider(token_ok(), userinfo_ok()).await;

        let info = gateway_for(&base)
            .exchange_code_for_user_info("code", OAuthPurpose::Login)
            .await
            .unwrap();

        assert_eq!(
            info,
            OAuthUserInfo {
                subject_id: "g-42".to_string(),
                email: "user@example.com".to_string(),
                full_name: "Jane Doe".to_string(),
                provider_name: "google".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_token_request_is_authorization_code_grant() {
        let (base, forms) = spawn_mock_provider(token_ok(), userinfo_ok()).await;

        gateway_for(&base)
            .exchange_code_for_user_info("code-7", OAuthPurpose::Signup)
            .await
            .unwrap();

        let forms = forms.lock().unwrap();
        assert_eq!(forms.len(), 1);
        let form = &forms[0];
        assert_eq!(form["grant_type"], "authorization_code");
        assert_eq!(form["code"], "code-7");
        assert_eq!(form["client_id"], "client-123");
        assert_eq!(form["client_secret"], "shh");
        assert_eq!(
            form["redirect_uri"],
            "http://localhost:8080/api/auth/google/callback/signup"
        );
    }

    #[tokio::test]
    async fn test_exchange_rejected_code_is_terminal() {
        let (base, _) = spawn_mock_provider(
            (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid_grant" }),
            ),
            userinfo_ok(),
        )
        .await;

        let err = gateway_for(&base)
            .exchange_code_for_user_info("bad", OAuthPurpose::Login)
            .await
            .unwrap_err();

        assert!(matches!(err, OAuth2Error::Rejected(_)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_userinfo_rejection_is_terminal() {
        // Token endpoint hands out a token the userinfo endpoint refuses
        let (base, _) = spawn_mock_provider(
            (StatusCode::OK, json!({ "access_token": "revoked" })),
            userinfo_ok(),
        )
        .await;

        let err = gateway_for(&base)
            .exchange_code_for_user_info("code", OAuthPurpose::Signup)
            .await
            .unwrap_err();
        assert!(matches!(err, OAuth2Error::Rejected(_)));
    }

    #[tokio::test]
    async fn test_malformed_token_response() {
        let (base, _) =
            spawn_mock_provider((StatusCode::OK, json!({ "nope": true })), userinfo_ok()).await;

        let err = gateway_for(&base)
            .exchange_code_for_user_info("code", OAuthPurpose::Login)
            .await
            .unwrap_err();
        assert!(matches!(err, OAuth2Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transient() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = gateway_for(&format!("http://{addr}"))
            .exchange_code_for_user_info("code", OAuthPurpose::Login)
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }
}
