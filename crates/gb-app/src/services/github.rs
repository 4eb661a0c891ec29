use gb_core::CellReader;
use url::Url;

/// Owner/name pair of a repository hosted on github.com.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepo {
    pub owner: String,
    pub name: String,
}

/// GitHub integration.
///
/// Serves two scopes at once: account-level actions only need the access
/// token, repository-level actions also need the remote URL of the open
/// project. Both arrive as cell readers, so new tokens and remotes are seen
/// without rebuilding the service.
#[derive(Debug, Clone)]
pub struct GitHubService {
    access_token: CellReader<String>,
    remote_url: CellReader<String>,
}

impl GitHubService {
    pub fn new(access_token: CellReader<String>, remote_url: CellReader<String>) -> Self {
        Self {
            access_token,
            remote_url,
        }
    }

    /// True once the user has connected a GitHub account.
    pub fn is_enabled(&self) -> bool {
        self.access_token.get().is_set()
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token.value()
    }

    pub fn remote_url(&self) -> Option<String> {
        self.remote_url.value()
    }

    /// Repository of the open project, if its remote lives on github.com.
    pub fn repo(&self) -> Option<GitHubRepo> {
        self.remote_url().as_deref().and_then(parse_remote_url)
    }
}

/// Parse `https://github.com/o/n(.git)`, `git@github.com:o/n(.git)` and
/// `ssh://git@github.com/o/n(.git)`.
pub fn parse_remote_url(url: &str) -> Option<GitHubRepo> {
    let url = url.trim();

    // scp-style remotes are not URLs.
    if let Some(path) = url.strip_prefix("git@github.com:") {
        return repo_from_segments(path.split('/'));
    }

    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "https" | "http" | "ssh") {
        return None;
    }
    if !parsed.host_str()?.eq_ignore_ascii_case("github.com") {
        return None;
    }
    repo_from_segments(parsed.path_segments()?)
}

fn repo_from_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Option<GitHubRepo> {
    let mut segments = segments.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let name = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let name = name.strip_suffix(".git").unwrap_or(name);
    if name.is_empty() {
        return None;
    }
    Some(GitHubRepo {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}
