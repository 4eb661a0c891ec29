use serde::{Deserialize, Serialize};

/// A signed-in GitButler user as returned by the cloud API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    /// Token for the GitButler cloud API
    pub access_token: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Token for GitHub, present once the user connected their account
    #[serde(default)]
    pub github_access_token: Option<String>,
    #[serde(default)]
    pub github_username: Option<String>,
}
