//! Process-wide host state for the Cheerpaw window.
//!
//! Settings come from the command line and the HTTP client is built once in
//! `main`, before the window opens. Components read both through [`host`].

use std::sync::{Arc, OnceLock};

use cheerpaw_core::{CheerApi, InteractionConfig, Page};
use url::Url;

/// Command-line settings that shape every page the window shows.
#[derive(Debug, Clone)]
pub struct HostSettings {
    pub start: Url,
    pub cookies: String,
    pub authenticated: bool,
    pub reduced_motion: bool,
    pub config: InteractionConfig,
}

impl HostSettings {
    /// A blank page at `location` carrying this session.
    pub fn page(&self, location: Url) -> Page {
        Page::new(location)
            .with_cookies(self.cookies.clone())
            .with_authenticated(self.authenticated)
            .with_reduced_motion(self.reduced_motion)
    }
}

/// Server port shared by every event handler.
pub type SharedApi = Arc<dyn CheerApi>;

pub struct Host {
    pub settings: HostSettings,
    pub api: SharedApi,
}

static HOST: OnceLock<Host> = OnceLock::new();

/// Store the host state. Only the first call wins.
pub fn install(settings: HostSettings, api: SharedApi) {
    if HOST.set(Host { settings, api }).is_err() {
        tracing::warn!("Host already installed, ignoring new settings");
    }
}

/// The installed host, if `main` got that far.
pub fn host() -> Option<&'static Host> {
    HOST.get()
}
