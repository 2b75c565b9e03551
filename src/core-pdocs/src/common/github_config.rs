use crate::common::env_value::env_string;

/// Credentials used to raise the GitHub API rate limits.
///
/// Every field is optional. The GitHub extractors stay disabled unless a client id
/// or a token is present (see [`GithubCredentials::is_configured`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubCredentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Sent as `Authorization: Bearer <token>` to the GitHub API.
    pub token: Option<String>,
}

impl GithubCredentials {
    /// Reads GITHUB_CLIENT_ID, GITHUB_CLIENT_SECRET and GITHUB_TOKEN. Blank values count as unset.
    pub fn from_env() -> Self {
        let credentials = Self {
            client_id: env_string("GITHUB_CLIENT_ID"),
            client_secret: env_string("GITHUB_CLIENT_SECRET"),
            token: env_string("GITHUB_TOKEN"),
        };
        if !credentials.is_configured() {
            tracing::warn!("No GitHub client id or token specified, GitHub documentation will be linked to instead of embedded");
        }
        credentials
    }

    pub fn with_client(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: Some(client_id.to_string()),
            client_secret: Some(client_secret.to_string()),
            token: None,
        }
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token: Some(token.to_string()),
        }
    }

    /// True if GitHub API calls carry some identification.
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() || self.token.is_some()
    }

    /// `client_id`/`client_secret` query pairs, in that order. Empty without a client id.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let Some(client_id) = self.client_id.as_deref() else {
            return Vec::new();
        };
        let mut pairs = vec![("client_id", client_id)];
        if let Some(secret) = self.client_secret.as_deref() {
            pairs.push(("client_secret", secret));
        }
        pairs
    }

    pub fn authorization_header(&self) -> Option<(String, String)> {
        self.token
            .as_ref()
            .map(|token| ("Authorization".to_string(), format!("Bearer {token}")))
    }
}
