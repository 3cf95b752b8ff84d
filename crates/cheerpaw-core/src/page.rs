//! The browser-window analogue every controller works against.
//!
//! A [`Page`] bundles the document with the pieces of window state the
//! interaction layer touches: the timer queue, the current location and its
//! history replacements, the cookie header, the viewer's authentication flag,
//! the reduced-motion preference, a random source, user-facing notices, and
//! form submissions (navigations) waiting for the host to perform them.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use url::Url;

use crate::dom::{Document, ElementId};
use crate::error::CheerResult;
use crate::timers::Timers;

/// A non-blocking message shown to the viewer (the `alert` of this layer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// Page time at which it was raised.
    pub at: Duration,
}

/// A form submission that should turn into a full page navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// The form's `action`, as written on the element.
    pub action: String,
    /// Upper-cased HTTP method (`POST` unless the form says otherwise).
    pub method: String,
}

pub struct Page {
    document: Document,
    timers: Timers,
    location: Url,
    history: Vec<Url>,
    cookies: String,
    authenticated: bool,
    reduced_motion: bool,
    rng: StdRng,
    notices: Vec<Notice>,
    submissions: Vec<FormSubmission>,
}

impl Page {
    pub fn new(location: Url) -> Self {
        Self {
            document: Document::new(),
            timers: Timers::new(),
            location,
            history: Vec::new(),
            cookies: String::new(),
            authenticated: false,
            reduced_motion: false,
            rng: StdRng::from_os_rng(),
            notices: Vec::new(),
            submissions: Vec::new(),
        }
    }

    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = cookies.into();
        self
    }

    pub fn with_authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Deterministic randomness, for tests and reproducible demos.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// A fresh page at `location` carrying over the session (cookies,
    /// authentication, motion preference). This is what a full navigation or
    /// a reload produces: an empty document waiting for new markup.
    pub fn navigate(&self, location: Url) -> Page {
        Page::new(location)
            .with_cookies(self.cookies.clone())
            .with_authenticated(self.authenticated)
            .with_reduced_motion(self.reduced_motion)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    /// Split borrow for code that schedules timers while editing the DOM.
    pub fn parts_mut(&mut self) -> (&mut Document, &mut Timers, &mut StdRng) {
        (&mut self.document, &mut self.timers, &mut self.rng)
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn cookies(&self) -> &str {
        &self.cookies
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    // ------------------------------------------------------------------
    // Notices
    // ------------------------------------------------------------------

    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "notice raised");
        self.notices.push(Notice {
            message,
            at: self.timers.now(),
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Submit `form`: record a navigation to its `action` with its `method`.
    pub fn submit_form(&mut self, form: ElementId) -> Option<FormSubmission> {
        let action = self.document.attribute(form, "action")?.to_string();
        let method = self
            .document
            .attribute(form, "method")
            .unwrap_or("post")
            .to_ascii_uppercase();
        let submission = FormSubmission { action, method };
        tracing::info!(action = %submission.action, method = %submission.method, "form submitted");
        self.submissions.push(submission.clone());
        Some(submission)
    }

    pub fn submissions(&self) -> &[FormSubmission] {
        &self.submissions
    }

    /// Oldest navigation the host has not performed yet.
    pub fn take_submission(&mut self) -> Option<FormSubmission> {
        if self.submissions.is_empty() {
            None
        } else {
            Some(self.submissions.remove(0))
        }
    }

    /// Resolve a possibly relative URL against the current location.
    pub fn resolve(&self, target: &str) -> CheerResult<Url> {
        Ok(self.location.join(target)?)
    }

    /// `history.replaceState`: change the visible URL without navigating.
    pub fn replace_location(&mut self, target: &str) -> CheerResult<()> {
        let next = self.resolve(target)?;
        tracing::debug!(from = %self.location, to = %next, "history replaced");
        self.history.push(std::mem::replace(&mut self.location, next));
        Ok(())
    }

    /// Locations that were replaced, oldest first.
    pub fn replaced_locations(&self) -> &[Url] {
        &self.history
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("location", &self.location.as_str())
            .field("authenticated", &self.authenticated)
            .field("timers", &self.timers.len())
            .field("notices", &self.notices.len())
            .finish()
    }
}
