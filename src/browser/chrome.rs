//! Chrome-backed retrieval session
//!
//! One [`ChromeSession`] owns one Chrome instance with a single tab, bound to
//! one product identifier's processing lifetime. Dropping the session closes
//! its tabs and releases the browser. Element waits are polled against the
//! live DOM; a poll that never finds the element resolves into
//! [`LookupError::Timeout`], failures while reading back a found element into
//! [`LookupError::Other`].

use crate::browser::config::SessionOptions;
use crate::driver::{ElementHandle, LookupError, LookupResult, PageDriver, SessionFactory};
use crate::error::{Result, ScrapeError};
use crate::locator::Locator;
use headless_chrome::{Browser, Element, Tab};
use std::ffi::{OsStr, OsString};
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A live Chrome instance with one tab
pub struct ChromeSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Launch Chrome with the scraper's fixed switch set
    pub fn launch(options: &SessionOptions) -> Result<Self> {
        let user_agent_arg = OsString::from(format!("--user-agent={}", options.user_agent));

        let mut launch_opts = headless_chrome::LaunchOptions::default();
        launch_opts.headless = options.headless;
        launch_opts.sandbox = options.sandbox;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        if let Some(ref path) = options.chrome_path {
            launch_opts.path = Some(path.clone());
        }

        launch_opts.args.push(user_agent_arg.as_os_str());
        launch_opts.args.push(OsStr::new("--ignore-certificate-errors-spki-list"));
        launch_opts.args.push(OsStr::new("--ignore-ssl-errors"));
        launch_opts.args.push(OsStr::new("--disable-dev-shm-usage"));
        launch_opts.args.push(OsStr::new("--disable-gpu"));
        launch_opts.args.push(OsStr::new("--disable-3d-apis"));
        launch_opts.args.push(OsStr::new("--disable-logging"));
        launch_opts.args.push(OsStr::new("--log-level=3"));

        let browser =
            Browser::new(launch_opts).map_err(|e| ScrapeError::LaunchFailed(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab })
    }

    fn find_raw(&self, locator: &Locator) -> Option<Vec<Element<'_>>> {
        let found = match locator {
            Locator::Css(selector) => self.tab.find_elements(selector),
            Locator::XPath(expression) => self.tab.find_elements_by_xpath(expression),
        };
        found.ok().filter(|elements| !elements.is_empty())
    }

    fn snapshot(element: &Element<'_>) -> LookupResult<ElementHandle> {
        let text = element
            .get_inner_text()
            .map_err(|e| LookupError::Other(e.to_string()))?;
        let source = element
            .get_attributes()
            .map_err(|e| LookupError::Other(e.to_string()))?
            .and_then(|attributes| {
                attributes
                    .chunks_exact(2)
                    .find(|pair| pair[0] == "src")
                    .map(|pair| pair[1].clone())
            });
        Ok(ElementHandle { text, source })
    }

    fn wait_for_handles(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> LookupResult<Vec<ElementHandle>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(elements) = self.find_raw(locator) {
                return elements.iter().map(Self::snapshot).collect();
            }
            if Instant::now() >= deadline {
                return Err(LookupError::Timeout);
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline.saturating_duration_since(Instant::now())));
        }
    }
}

impl PageDriver for ChromeSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| ScrapeError::NavigationFailed(format!("Failed to open {}: {}", url, e)))?;

        Ok(())
    }

    fn reload(&self) -> Result<()> {
        self.tab
            .reload(false, None)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| ScrapeError::NavigationFailed(format!("Reload failed: {}", e)))?;

        Ok(())
    }

    fn wait_for(&self, locator: &Locator, timeout: Duration) -> LookupResult<ElementHandle> {
        self.wait_for_handles(locator, timeout).map(|handles| {
            handles
                .into_iter()
                .next()
                .expect("wait_for_handles yields at least one element")
        })
    }

    fn wait_for_all(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> LookupResult<Vec<ElementHandle>> {
        self.wait_for_handles(locator, timeout)
    }

    fn find_all_now(&self, locator: &Locator) -> Vec<ElementHandle> {
        self.find_raw(locator)
            .map(|elements| {
                elements
                    .iter()
                    .filter_map(|element| Self::snapshot(element).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn click(&self, locator: &Locator) -> Result<()> {
        let elements = self
            .find_raw(locator)
            .ok_or_else(|| ScrapeError::InteractionFailed(format!("{} not found", locator)))?;
        elements[0]
            .click()
            .map_err(|e| ScrapeError::InteractionFailed(format!("Click on {} failed: {}", locator, e)))?;

        Ok(())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // Browser shuts down when dropped; closing tabs first keeps the
        // teardown quiet. Individual close errors are irrelevant here.
        if let Ok(tabs) = self.browser.get_tabs().lock() {
            for tab in tabs.iter() {
                let _ = tab.close(false);
            }
        }
    }
}

/// Factory producing one fresh [`ChromeSession`] per product identifier
#[derive(Debug, Clone, Default)]
pub struct ChromeFactory {
    options: SessionOptions,
}

impl ChromeFactory {
    pub fn new(options: SessionOptions) -> Self {
        Self { options }
    }
}

impl SessionFactory for ChromeFactory {
    type Session = ChromeSession;

    fn open(&self) -> Result<ChromeSession> {
        ChromeSession::launch(&self.options)
    }
}
