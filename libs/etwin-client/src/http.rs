//! HTTP implementation of [`EtwinClient`] over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use etwin_core::auth::AuthContext;
use etwin_core::user::{MaybeCompleteUser, UserId};

use crate::{Auth, ClientError, EtwinClient};

const USER_AGENT: &str = concat!("etwin_client/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_millis(5000);

/// Client for a live Eternaltwin server.
///
/// Routes are resolved under `<base>/api/v1/`; a path prefix on the base URL
/// is preserved, so reverse-proxied deployments work.
pub struct HttpEtwinClient {
    client: Client,
    base: Url,
}

impl HttpEtwinClient {
    /// Build a client against an API base URL, e.g.
    /// `https://eternal-twin.net`.
    ///
    /// Fails when the URL cannot carry path segments or when the underlying
    /// HTTP client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, ClientError> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base));
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client, base })
    }

    /// Resolve a route under `<base>/api/v1/`.
    fn route(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        {
            // Infallible: `new` rejects cannot-be-a-base URLs.
            let mut path = url.path_segments_mut().unwrap_or_else(|()| unreachable!());
            path.pop_if_empty();
            path.extend(["api", "v1"]);
            path.extend(segments);
        }
        url
    }

    async fn get_json<R: DeserializeOwned>(&self, auth: &Auth, url: Url) -> Result<R, ClientError> {
        tracing::debug!(http.method = "GET", http.url = %url, "sending API request");
        let builder = self.client.get(url.clone()).with_auth(auth);
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(http.url = %url, http.status_code = status.as_u16(), "API response");
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { url });
        }
        if !status.is_success() {
            return Err(ClientError::Api { status, url });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ClientError::UnexpectedResponse { url, source })
    }
}

trait RequestBuilderExt {
    fn with_auth(self, auth: &Auth) -> RequestBuilder;
}

impl RequestBuilderExt for RequestBuilder {
    fn with_auth(self, auth: &Auth) -> RequestBuilder {
        match auth {
            Auth::Guest => self,
            Auth::Token(token) => self.bearer_auth(token),
        }
    }
}

#[async_trait]
impl EtwinClient for HttpEtwinClient {
    #[instrument(name = "etwin_client.http.get_self", skip_all, fields(base = %self.base))]
    async fn get_self(&self, auth: &Auth) -> Result<AuthContext, ClientError> {
        self.get_json(auth, self.route(&["auth", "self"])).await
    }

    #[instrument(
        name = "etwin_client.http.get_user",
        skip_all,
        fields(base = %self.base, user_id = %user_id)
    )]
    async fn get_user(&self, auth: &Auth, user_id: UserId) -> Result<MaybeCompleteUser, ClientError> {
        self.get_json(auth, self.route(&["users", &user_id.to_string()]))
            .await
    }
}
