//! # Session Collaborators
//!
//! State owned by the shell that some special commands read: who the client
//! is (for the status banner) and whether output goes through a pager.
//! Both are captured once at startup and passed to commands by reference.

use crate::config::{CLIENT_NAME, PAGER_ENV_VAR};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
    pub runtime: String,
    pub runtime_version: String,
}

impl ClientInfo {
    pub fn current() -> Self {
        Self {
            name: CLIENT_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            runtime: "Rust".to_string(),
            runtime_version: format!("{}/{}", env::consts::OS, env::consts::ARCH),
        }
    }

    /// `sqlshell 0.1.0, running on Rust linux/x86_64`
    pub fn banner(&self) -> String {
        format!(
            "{} {}, running on {} {}",
            self.name, self.version, self.runtime, self.runtime_version
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerState {
    pub enabled: bool,
    pub pager: Option<String>,
}

impl PagerState {
    pub fn new(enabled: bool, pager: Option<String>) -> Self {
        Self { enabled, pager }
    }

    pub fn from_env(enabled: bool) -> Self {
        let pager = env::var(PAGER_ENV_VAR).ok().filter(|p| !p.is_empty());
        Self::new(enabled, pager)
    }

    pub fn describe(&self) -> String {
        if !self.enabled {
            return "stdout".to_string();
        }
        match &self.pager {
            Some(pager) => pager.clone(),
            None => "System default".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub client: ClientInfo,
    pub pager: PagerState,
}

impl SessionContext {
    pub fn new(client: ClientInfo, pager: PagerState) -> Self {
        Self { client, pager }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_pager_reports_stdout() {
        let state = PagerState::new(false, Some("less -SR".to_string()));
        assert_eq!(state.describe(), "stdout");
    }

    #[test]
    fn enabled_pager_reports_command() {
        let state = PagerState::new(true, Some("less -SR".to_string()));
        assert_eq!(state.describe(), "less -SR");
    }

    #[test]
    fn enabled_pager_without_env_reports_system_default() {
        let state = PagerState::new(true, None);
        assert_eq!(state.describe(), "System default");
    }

    #[test]
    fn banner_names_client_and_runtime() {
        let client = ClientInfo {
            name: "sqlshell".to_string(),
            version: "1.2.3".to_string(),
            runtime: "Rust".to_string(),
            runtime_version: "linux/x86_64".to_string(),
        };
        assert_eq!(client.banner(), "sqlshell 1.2.3, running on Rust linux/x86_64");
    }
}
