use crate::consts::cli_consts::network::DEFAULT_API_URL;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The wind data service the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// The service running on this machine at its default address.
    #[default]
    Local,
    /// Any other deployment, addressed by its base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the base URL of the wind data API.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => DEFAULT_API_URL.to_string(),
            Environment::Custom { api_url } => api_url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Environment::Custom {
                api_url: s.trim_end_matches('/').to_string(),
            });
        }
        Err(format!(
            "Invalid API location '{}': expected 'local' or an http(s) URL",
            s
        ))
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
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!(
            "https://wind.example.com/api/".parse::<Environment>(),
            Ok(Environment::Custom {
                api_url: "https://wind.example.com/api".to_string()
            })
        );
        assert!("ftp://nope".parse::<Environment>().is_err());
    }

    #[test]
    fn test_api_url() {
        assert_eq!(Environment::Local.api_url(), DEFAULT_API_URL);
        let env = Environment::Custom {
            api_url: "http://10.0.0.5:8000/api/".to_string(),
        };
        assert_eq!(env.api_url(), "http://10.0.0.5:8000/api");
    }
}
