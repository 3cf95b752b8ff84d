use std::time::{Duration, Instant};

use cheerpaw_core::anchors::class;
use cheerpaw_core::markup::{demo_animals, render_for, WalletSnapshot};
use cheerpaw_core::{ClickOutcome, DomEvent, ElementId, Interactions, LikeRequest, Notice};
use cheerpaw_ui::{scroll_offset, use_mounted_controls, DomView, MountedControls, ToastStack};
use dioxus::prelude::*;
use url::Url;

use crate::context::{self, Host, HostSettings};
use crate::theme::GLOBAL_STYLES;

/// Longest the timer driver sleeps when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);
const TOAST_LIFETIME: Duration = Duration::from_secs(4);
const STARTING_WALLET: WalletSnapshot = WalletSnapshot { coins: 1_000, points: 0 };

/// Root application component.
///
/// Owns the interactions of the page currently shown, drives its timers from
/// the wall clock and turns like requests, form submissions and link clicks
/// into server calls and navigations.
#[component]
pub fn App() -> Element {
    let host = use_hook(context::host);
    let Some(host) = host else {
        return rsx! {
            style { {GLOBAL_STYLES} }
            p { class: "host-error", "Cheerpaw was started without host settings." }
        };
    };

    let interactions: Signal<Interactions> = use_signal(|| {
        open_page(&host.settings, host.settings.start.clone(), Some(STARTING_WALLET))
    });
    // Wall-clock instant that corresponds to page time zero
    let epoch: Signal<Instant> = use_signal(Instant::now);
    let mut toasts: Signal<Vec<Notice>> = use_signal(Vec::new);
    let controls = use_mounted_controls();

    // Timer driver
    use_future(move || async move {
        let mut interactions = interactions;
        loop {
            let now = epoch.peek().elapsed();
            let wait = interactions
                .peek()
                .next_due()
                .map_or(IDLE_POLL, |due| due.saturating_sub(now).min(IDLE_POLL));
            tokio::time::sleep(wait).await;

            let now = epoch.peek().elapsed();
            if interactions.peek().next_due().is_some_and(|due| due <= now) {
                interactions.write().advance_to(now);
                drain_notices(interactions, toasts);
            }
        }
    });

    let on_event = move |(target, event): (ElementId, DomEvent)| {
        let view = HostView {
            host,
            interactions,
            epoch,
            toasts,
            controls,
        };
        view.handle_event(target, event);
    };

    rsx! {
        style { {GLOBAL_STYLES} }
        DomView { interactions, on_event }
        ToastStack {
            notices: toasts(),
            on_dismiss: move |index: usize| {
                if index < toasts.peek().len() {
                    toasts.write().remove(index);
                }
            },
        }
    }
}

/// Build and boot the page at `location`.
fn open_page(settings: &HostSettings, location: Url, wallet: Option<WalletSnapshot>) -> Interactions {
    let mut page = settings.page(location);
    render_for(&mut page, &demo_animals(), wallet.as_ref());
    Interactions::boot(page, settings.config.clone())
}

/// Copyable bundle of the host's signals, handed to event handlers and tasks.
#[derive(Clone, Copy)]
struct HostView {
    host: &'static Host,
    interactions: Signal<Interactions>,
    epoch: Signal<Instant>,
    toasts: Signal<Vec<Notice>>,
    controls: MountedControls,
}

impl HostView {
    fn handle_event(self, target: ElementId, event: DomEvent) {
        let mut interactions = self.interactions;
        let now = self.epoch.peek().elapsed();
        let outcome = {
            let mut app = interactions.write();
            app.advance_to(now);
            match event {
                DomEvent::Click => Some(app.click(target)),
                DomEvent::PointerEnter => {
                    app.pointer_enter(target);
                    None
                }
                DomEvent::PointerLeave => {
                    app.pointer_leave(target);
                    None
                }
                DomEvent::AnimationEnd => {
                    app.animation_end(target);
                    None
                }
            }
        };

        match outcome {
            Some(ClickOutcome::Like(request)) => self.spawn_like(request),
            Some(ClickOutcome::Unhandled) => {
                let link = link_target(&interactions.peek(), target);
                if let Some(location) = link {
                    self.navigate(location);
                }
            }
            Some(ClickOutcome::Handled) | None => {}
        }

        let submission = interactions.write().page_mut().take_submission();
        if let Some(submission) = submission {
            let api = self.host.api.clone();
            spawn(async move {
                match api.submit_form(&submission).await {
                    Ok(landing) => self.navigate(landing),
                    Err(e) => {
                        tracing::error!(action = %submission.action, "Form submission failed: {}", e);
                        interactions
                            .write()
                            .page_mut()
                            .alert("The purchase could not be sent. Please try again.");
                        drain_notices(interactions, self.toasts);
                    }
                }
            });
        }

        drain_notices(interactions, self.toasts);
    }

    /// Send the cheer, then measure the control where it sits now so the
    /// hearts rise from it.
    fn spawn_like(self, request: LikeRequest) {
        let mut interactions = self.interactions;
        let api = self.host.api.clone();
        let opened = *self.epoch.peek();
        spawn(async move {
            let reply = api.like(&request).await;
            let rect = self.controls.client_rect(request.button).await;
            let scroll_y = scroll_offset().await;
            if *self.epoch.peek() != opened {
                tracing::debug!(card = %request.card_id, "Page changed before the cheer settled");
                return;
            }
            let outcome = {
                let mut app = interactions.write();
                if let Some(rect) = rect {
                    app.record_layout(request.button, rect);
                }
                if let Some(scroll_y) = scroll_y {
                    app.record_scroll(scroll_y);
                }
                app.finish_like(&request, reply)
            };
            tracing::debug!(?outcome, "Cheer settled");
            drain_notices(interactions, self.toasts);
        });
    }

    /// Replace the current page with a fresh one at `location`, keeping the
    /// displayed wallet balances.
    fn navigate(self, location: Url) {
        let mut interactions = self.interactions;
        let mut epoch = self.epoch;
        let wallet = WalletSnapshot::read(interactions.peek().page().document()).or(Some(STARTING_WALLET));
        tracing::info!(%location, "Navigating");
        self.controls.clear();
        interactions.set(open_page(&self.host.settings, location, wallet));
        epoch.set(Instant::now());
    }
}

/// The location an in-app link under `target` points to.
fn link_target(app: &Interactions, target: ElementId) -> Option<Url> {
    let doc = app.page().document();
    let link = doc.closest(target, class::NAV_LINK)?;
    let href = doc.attribute(link, "href")?;
    match app.page().resolve(href) {
        Ok(location) => Some(location),
        Err(e) => {
            tracing::warn!(href, "Ignoring unresolvable link: {}", e);
            None
        }
    }
}

/// Move raised notices into the toast stack; each one leaves on its own.
fn drain_notices(mut interactions: Signal<Interactions>, mut toasts: Signal<Vec<Notice>>) {
    if interactions.peek().page().notices().is_empty() {
        return;
    }
    let fresh = interactions.write().take_notices();
    for notice in fresh {
        tracing::info!(message = %notice.message, "Notice raised");
        toasts.write().push(notice.clone());
        spawn(async move {
            tokio::time::sleep(TOAST_LIFETIME).await;
            toasts.write().retain(|shown| shown != &notice);
        });
    }
}
