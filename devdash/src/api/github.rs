//! GitHub user lookup

use serde::Deserialize;

use super::{ApiClient, FetchError};

/// Read-only projection of `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubProfile {
    pub login: String,
    /// Display name; `None` falls back to the login when rendered
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub html_url: String,
}

impl GitHubProfile {
    /// Name to show: display name if set and non-empty, else the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

impl ApiClient {
    /// Look up a GitHub user by login.
    pub async fn fetch_profile(&self, username: &str) -> Result<GitHubProfile, FetchError> {
        let url = format!(
            "{}/users/{}",
            self.endpoints().github.trim_end_matches('/'),
            urlencoding::encode(username.trim())
        );
        tracing::info!(%username, "Fetching GitHub profile");

        let request = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        self.get_json("GitHub", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: Option<&str>) -> GitHubProfile {
        GitHubProfile {
            login: "octocat".into(),
            name: name.map(Into::into),
            avatar_url: "https://avatars.githubusercontent.com/u/583231".into(),
            bio: None,
            public_repos: 8,
            followers: 100,
            following: 9,
            html_url: "https://github.com/octocat".into(),
        }
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        assert_eq!(profile(Some("The Octocat")).display_name(), "The Octocat");
        assert_eq!(profile(None).display_name(), "octocat");
        assert_eq!(profile(Some("  ")).display_name(), "octocat");
    }

    #[test]
    fn test_null_name_parses_as_none() {
        let json = r#"{
            "login": "octocat",
            "name": null,
            "avatar_url": "a",
            "bio": null,
            "public_repos": 8,
            "followers": 1,
            "following": 2,
            "html_url": "h",
            "company": "GitHub"
        }"#;
        let parsed: GitHubProfile = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, None);
        assert_eq!(parsed.public_repos, 8);
    }
}
