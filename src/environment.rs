use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Default address of a lot server started locally.
pub const LOCAL_SERVER_URL: &str = "http://127.0.0.1:5000";

/// The lot server the CLI talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Server running on this machine on its default port.
    #[default]
    Local,
    /// Server at an explicit URL.
    Custom { server_url: String },
}

impl Environment {
    /// Returns the base URL of the lot server.
    pub fn server_url(&self) -> String {
        match self {
            Environment::Local => LOCAL_SERVER_URL.to_string(),
            Environment::Custom { server_url } => server_url.clone(),
        }
    }

    /// Picks the first configured server URL, falling back to the local server.
    pub fn resolve(candidates: &[Option<String>]) -> Self {
        candidates
            .iter()
            .flatten()
            .find_map(|url| url.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "" => Err(()),
            "local" => Ok(Environment::Local),
            _ if s.starts_with("http://") || s.starts_with("https://") => {
                Ok(Environment::Custom {
                    server_url: s.trim_end_matches('/').to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.server_url())
    }
}
