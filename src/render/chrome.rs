use crate::error::{Result, ScrapeError};
use crate::render::{ElementHandle, ElementQuery, PageRenderer};
use headless_chrome::{Browser, Element, Tab};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

const USER_AGENT: &str = "--user-agent=Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Scripts applied after launch so the page sees an ordinary browser profile
const STEALTH_SCRIPTS: &[&str] = &[
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})",
    "Object.defineProperty(navigator, 'plugins', {get: () => [1, 2, 3, 4, 5]})",
    "Object.defineProperty(navigator, 'languages', {get: () => ['en-US', 'en']})",
];

/// Options for launching the Chrome session
#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Run without a visible window (default: true)
    pub headless: bool,

    /// Viewport width in pixels
    pub window_width: u32,

    /// Viewport height in pixels
    pub window_height: u32,

    /// Path to the Chrome/Chromium binary (default: auto-detect)
    pub chrome_path: Option<PathBuf>,

    /// Profile directory (default: temporary)
    pub user_data_dir: Option<PathBuf>,

    /// Whether to run Chrome with its sandbox enabled
    pub sandbox: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            chrome_path: None,
            user_data_dir: None,
            sandbox: true,
        }
    }
}

impl RendererOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set Chrome binary path
    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builder method: set profile directory
    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    /// Builder method: set sandbox mode
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }
}

/// Live rendering session over one Chrome tab via CDP.
///
/// Element handles are resolved back to live elements through their query's
/// XPath at every use, so a handle enumerated before a reload simply stops
/// matching instead of going stale mid-operation.
pub struct ChromeRenderer {
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeRenderer {
    /// Launch a Chrome instance and prepare a single tab for scraping
    pub fn launch(options: RendererOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // The registry blocks obviously automated sessions
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));
        launch_opts.args.push(OsStr::new("--disable-gpu"));
        launch_opts.args.push(OsStr::new("--disable-dev-shm-usage"));
        launch_opts.args.push(OsStr::new(USER_AGENT));

        // Long runs with fixed inter-record delays outlive the 30s default
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }
        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser = Browser::new(launch_opts).map_err(|e| ScrapeError::LaunchFailed(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::TabOperationFailed(format!("Failed to create tab: {}", e)))?;

        let renderer = Self { browser, tab };
        renderer.apply_stealth()?;
        Ok(renderer)
    }

    /// Install the navigator overrides that mask the automation profile
    fn apply_stealth(&self) -> Result<()> {
        for script in STEALTH_SCRIPTS {
            self.tab
                .evaluate(script, false)
                .map_err(|e| ScrapeError::EvaluationFailed(format!("stealth setup: {}", e)))?;
        }
        Ok(())
    }

    /// Resolve a handle back to a live element via its query's XPath
    fn resolve<'a>(&'a self, handle: &ElementHandle) -> Result<Element<'a>> {
        let xpath = handle.query.to_xpath();
        let elements = self
            .tab
            .find_elements_by_xpath(&xpath)
            .map_err(|e| ScrapeError::ElementNotFound(format!("{}: {}", xpath, e)))?;
        elements.into_iter().nth(handle.position).ok_or_else(|| {
            ScrapeError::ElementNotFound(format!(
                "element {} of '{}' no longer present",
                handle.position, xpath
            ))
        })
    }

    /// Script acting on the element a handle points at. Returns false from the
    /// page when the element has disappeared.
    fn element_script(handle: &ElementHandle, action: &str) -> String {
        // JSON-escape the XPath so its quoting survives embedding
        let xpath = serde_json::to_string(&handle.query.to_xpath()).unwrap_or_default();
        format!(
            "(function() {{\n\
                const found = document.evaluate({xpath}, document, null, \
                    XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);\n\
                const el = found.snapshotItem({position});\n\
                if (!el) {{ return false; }}\n\
                {action};\n\
                return true;\n\
             }})()",
            position = handle.position,
        )
    }

    fn run_element_script(&mut self, handle: &ElementHandle, action: &str) -> Result<()> {
        let script = Self::element_script(handle, action);
        let value = self.run_script(&script)?;
        if value.as_bool().unwrap_or(false) {
            Ok(())
        } else {
            Err(ScrapeError::ElementNotFound(format!(
                "element {} of '{}' no longer present",
                handle.position,
                handle.query.to_xpath()
            )))
        }
    }
}

impl PageRenderer for ChromeRenderer {
    fn load(&mut self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;
        Ok(())
    }

    fn current_url(&mut self) -> Result<String> {
        Ok(self.tab.get_url())
    }

    fn current_markup(&mut self) -> Result<String> {
        self.tab
            .get_content()
            .map_err(|e| ScrapeError::MarkupUnavailable(e.to_string()))
    }

    fn run_script(&mut self, code: &str) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(code, false)
            .map_err(|e| ScrapeError::EvaluationFailed(e.to_string()))?;
        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    fn find_all(&mut self, query: &ElementQuery) -> Result<Vec<ElementHandle>> {
        let xpath = query.to_xpath();
        // A miss surfaces as an error from CDP; treat it as zero matches
        let count = match self.tab.find_elements_by_xpath(&xpath) {
            Ok(elements) => elements.len(),
            Err(e) => {
                log::debug!("No elements for '{}': {}", xpath, e);
                0
            }
        };
        Ok((0..count).map(|position| ElementHandle::new(query.clone(), position)).collect())
    }

    fn scroll_into_view(&mut self, handle: &ElementHandle) -> Result<()> {
        self.run_element_script(handle, "el.scrollIntoView({behavior: 'smooth', block: 'center'})")
    }

    fn activate(&mut self, handle: &ElementHandle) -> Result<()> {
        let element = self.resolve(handle)?;
        element
            .click()
            .map_err(|e| ScrapeError::InteractionFailed(format!("click on '{}': {}", handle.query.text(), e)))?;
        Ok(())
    }

    fn activate_via_script(&mut self, handle: &ElementHandle) -> Result<()> {
        self.run_element_script(handle, "el.click()")
    }

    fn wait_for_ready(&mut self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            // Evaluation fails transiently while a navigation is in flight;
            // that just means "not ready yet"
            let ready = self
                .run_script("document.readyState === 'complete'")
                .map(|v| v.as_bool().unwrap_or(false))
                .unwrap_or(false);
            if ready {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn wait_for_element(&mut self, query: &ElementQuery, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if !self.find_all(query)?.is_empty() {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn close(&mut self) -> Result<()> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| ScrapeError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();
        for tab in tabs {
            let _ = tab.close(false); // Ignore errors on individual tab closes
        }
        Ok(())
    }
}
