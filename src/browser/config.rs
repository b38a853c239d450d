//! Browser session configuration

/// User agent presented to the site
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:104.0) Gecko/20100101 Firefox/104.0 Chrome/103.0.0.0";

/// Launch configuration for one retrieval session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Run Chrome without a visible window (default: true)
    pub headless: bool,

    /// User agent string
    pub user_agent: String,

    /// Viewport width in pixels (default: 1920)
    pub window_width: u32,

    /// Viewport height in pixels (default: 1080)
    pub window_height: u32,

    /// Enable the Chrome sandbox (default: false)
    pub sandbox: bool,

    /// Path to a custom Chrome binary
    pub chrome_path: Option<std::path::PathBuf>,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set the Chrome binary path
    pub fn chrome_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_width: 1920,
            window_height: 1080,
            sandbox: false,
            chrome_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_options_defaults() {
        let opts = SessionOptions::default();
        assert!(opts.headless);
        assert!(!opts.sandbox);
        assert_eq!(opts.window_width, 1920);
        assert_eq!(opts.window_height, 1080);
        assert_eq!(opts.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_session_options_builder() {
        let opts = SessionOptions::new()
            .headless(false)
            .window_size(800, 600)
            .user_agent("test-agent");

        assert!(!opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
        assert_eq!(opts.user_agent, "test-agent");
    }
}
