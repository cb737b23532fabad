//! Viewport emulation settings.

use a11yforge_core::{ViewportInfo, ViewportOptions};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

pub const DEFAULT_DESKTOP_WIDTH: u32 = 1920;
pub const DEFAULT_DESKTOP_HEIGHT: u32 = 1080;
pub const DEFAULT_MOBILE_WIDTH: u32 = 1080;
pub const DEFAULT_MOBILE_HEIGHT: u32 = 1920;

/// The viewport a page is loaded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSettings {
    pub width: u32,
    pub height: u32,
    pub is_mobile: bool,
    pub has_touch: bool,
    pub is_landscape: bool,
    pub user_agent: String,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl ViewportSettings {
    /// Resolve user options against the desktop/mobile defaults.
    pub fn resolve(options: Option<&ViewportOptions>) -> Self {
        let Some(options) = options else {
            return Self {
                width: DEFAULT_DESKTOP_WIDTH,
                height: DEFAULT_DESKTOP_HEIGHT,
                is_mobile: false,
                has_touch: false,
                is_landscape: true,
                user_agent: DEFAULT_DESKTOP_USER_AGENT.to_string(),
            };
        };

        let user_agent = match (&options.user_agent, options.mobile) {
            (Some(agent), _) if !agent.trim().is_empty() => agent.clone(),
            (_, true) => DEFAULT_MOBILE_USER_AGENT.to_string(),
            (_, false) => DEFAULT_DESKTOP_USER_AGENT.to_string(),
        };

        let (mut width, mut height) = if options.mobile {
            (DEFAULT_MOBILE_WIDTH, DEFAULT_MOBILE_HEIGHT)
        } else {
            (DEFAULT_DESKTOP_WIDTH, DEFAULT_DESKTOP_HEIGHT)
        };
        if let Some(resolution) = options.resolution {
            width = resolution.width.unwrap_or(width);
            height = resolution.height.unwrap_or(height);
        }

        Self {
            width,
            height,
            is_mobile: options.mobile,
            has_touch: options.mobile,
            is_landscape: options.landscape.unwrap_or(width > height),
            user_agent,
        }
    }

    /// The viewport as recorded in evaluation reports.
    pub fn info(&self) -> ViewportInfo {
        ViewportInfo {
            mobile: self.is_mobile,
            landscape: self.is_landscape,
            user_agent: self.user_agent.clone(),
            width: self.width,
            height: self.height,
        }
    }
}
