//! Cheerpaw Core Library
//!
//! Client interaction layer for a fan site where visitors cheer for animals.
//!
//! ## Overview
//!
//! Pages are server-rendered; this crate attaches behavior to them through a
//! fixed DOM contract ([`anchors`]). It owns three state machines:
//!
//! - **Likes**: a per-control busy guard around the cheer request, then a
//!   fan-out to the point counter, badge, wallet, hearts and image zoom.
//! - **Carousels**: autoplay that runs only while the pointer is over them.
//! - **Purchases**: confirmation, sign-in prompt and completion modals, the
//!   last one driven by a one-shot query on the redirect back from the server.
//!
//! The document is a small arena ([`dom`]) and time is virtual ([`timers`]),
//! so every flow runs the same in the desktop host and in tests.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::cell::RefCell;
//! use cheerpaw_core::{activate_like, anchors, markup, HttpCheerApi, InteractionConfig, Interactions, Page};
//!
//! let config = InteractionConfig::default();
//! let mut page = Page::new("http://localhost:8000/".parse()?).with_authenticated(true);
//! markup::render_for(&mut page, &markup::demo_animals(), None);
//!
//! let app = RefCell::new(Interactions::boot(page, config.clone()));
//! let api = HttpCheerApi::new("http://localhost:8000/".parse()?, "csrftoken=abc", &config)?;
//! let button = {
//!     let app = app.borrow();
//!     let doc = app.page().document();
//!     doc.query_class(doc.body(), anchors::class::LIKE_BUTTON).unwrap()
//! };
//! let outcome = activate_like(&app, &api, button).await;
//! ```

pub mod anchors;
pub mod api;
pub mod carousel;
pub mod config;
pub mod cookie;
pub mod dom;
pub mod effects;
pub mod error;
pub mod format;
pub mod like;
pub mod logging;
pub mod markup;
pub mod page;
pub mod purchase;
pub mod reveal;
pub mod runtime;
pub mod shuffle;
pub mod timers;

// Re-exports
pub use api::{CheerApi, HttpCheerApi};
pub use carousel::{Autoplay, CarouselController, CarouselId};
pub use config::InteractionConfig;
pub use cookie::read_cookie;
pub use dom::{Document, DomEvent, Element, ElementBuilder, ElementId, Rect};
pub use effects::EffectSpawner;
pub use error::{CheerError, CheerResult};
pub use like::{LikeButtonController, LikeOutcome, LikeRequest, LikeState, GENERIC_FAILURE};
pub use page::{FormSubmission, Notice, Page};
pub use purchase::{CompletionReceipt, ModalState, PurchaseFlowController, PurchaseOffer};
pub use reveal::CardRevealSequencer;
pub use runtime::{activate_like, ClickOutcome, Interactions};
pub use shuffle::shuffle_children;
pub use timers::{TimerHandle, TimerTask, Timers};
