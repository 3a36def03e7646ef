//! Game-server status payloads and the normalized status value.

use std::fmt;

use serde::Deserialize;

/// Normalized game-server availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Online,
    Offline,
}

impl ServerStatus {
    pub fn from_online(online: bool) -> Self {
        if online {
            Self::Online
        } else {
            Self::Offline
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Primary status API response (`GET /status`).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusApiDto {
    pub online: bool,
}

/// Status-page fallback response.
///
/// Follows the common status-page format where an indicator of `"none"` means every
/// component is operational.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPageDto {
    pub status: StatusPageIndicatorDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusPageIndicatorDto {
    pub indicator: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl StatusPageDto {
    pub fn server_status(&self) -> ServerStatus {
        ServerStatus::from_online(self.status.indicator == "none")
    }
}
