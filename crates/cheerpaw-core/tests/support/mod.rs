//! Shared fixtures: a scripted server and page builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cheerpaw_core::dom::{ElementBuilder, ElementId, Rect};
use cheerpaw_core::markup::COIN_PLANS;
use cheerpaw_core::{
    CheerApi, CheerError, CheerResult, FormSubmission, InteractionConfig, Interactions, LikeRequest,
    Page,
};
use serde_json::Value;
use tokio::sync::Notify;
use url::Url;

/// One canned answer to a cheer request.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(Value),
    Status(u16),
    Transport,
}

impl Reply {
    fn into_result(self) -> CheerResult<Value> {
        match self {
            Reply::Body(body) => Ok(body),
            Reply::Status(code) => Err(CheerError::Status(code)),
            Reply::Transport => Err(CheerError::Transport("connection refused".to_string())),
        }
    }
}

/// Server double. Cheer replies are served in order; purchases redirect the
/// way the site does.
pub struct ScriptedApi {
    base: Url,
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<LikeRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedApi {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            base: Url::parse("http://localhost:8000/").unwrap(),
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Hold every cheer request until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<LikeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheerApi for ScriptedApi {
    async fn like(&self, request: &LikeRequest) -> CheerResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Reply::Transport);
        reply.into_result()
    }

    async fn submit_form(&self, submission: &FormSubmission) -> CheerResult<Url> {
        let coins = submission
            .action
            .trim_matches('/')
            .rsplit('/')
            .next()
            .and_then(|c| c.parse::<u64>().ok());
        let plan = COIN_PLANS.iter().find(|p| Some(p.coins) == coins);
        let target = match plan {
            Some(plan) => format!(
                "/money/charge/?done=1&coins={}&price={}",
                plan.coins, plan.price
            ),
            None => "/money/charge/".to_string(),
        };
        Ok(self.base.join(&target)?)
    }
}

pub fn page(url: &str) -> Page {
    Page::new(Url::parse(url).unwrap()).with_seed(3)
}

/// One card with every like target, plus the wallet summary.
pub struct CardPage {
    pub app: Interactions,
    pub button: ElementId,
    pub point: ElementId,
    pub badge: ElementId,
    pub media: ElementId,
    pub image: ElementId,
    pub balance: ElementId,
    pub stapo: ElementId,
}

pub fn card_page(card_id: &str, total: u64) -> CardPage {
    card_page_with(card_id, total, InteractionConfig::default())
}

/// Like [`card_page`], booted with `config`.
pub fn card_page_with(card_id: &str, total: u64, config: InteractionConfig) -> CardPage {
    let mut page = page("http://localhost:8000/").with_cookies("sessionid=s1; csrftoken=tok%3D42");
    let body = page.document().body();
    let doc = page.document_mut();
    doc.build(
        body,
        ElementBuilder::new("header")
            .child(ElementBuilder::new("span").id("wallet-balance").text("1,000"))
            .child(ElementBuilder::new("span").id("wallet-stapo").text("11")),
    );
    doc.build(
        body,
        ElementBuilder::new("div")
            .class("animal-card")
            .child(
                ElementBuilder::new("div")
                    .class("animal-media")
                    .child(ElementBuilder::new("img").attr("src", "/otter.jpg")),
            )
            .child(ElementBuilder::new("span").class("oshii-badge").text("Oshi"))
            .child(ElementBuilder::new("span").class("point").text(total.to_string()))
            .child(
                ElementBuilder::new("button")
                    .class("push-btn")
                    .data("id", card_id)
                    .rect(Rect::new(100.0, 300.0, 80.0, 32.0))
                    .child(ElementBuilder::new("span").class("push-label").text("Cheer")),
            ),
    );

    let app = Interactions::boot(page, config);
    let (button, point, badge, media, image, balance, stapo) = {
        let doc = app.page().document();
        let body = doc.body();
        let find = |class: &str| doc.query_class(body, class).unwrap();
        let media = find("animal-media");
        (
            find("push-btn"),
            find("point"),
            find("oshii-badge"),
            media,
            doc.query_tag(media, "img").unwrap(),
            doc.get_element_by_id("wallet-balance").unwrap(),
            doc.get_element_by_id("wallet-stapo").unwrap(),
        )
    };
    CardPage {
        app,
        button,
        point,
        badge,
        media,
        image,
        balance,
        stapo,
    }
}

pub fn text(app: &Interactions, el: ElementId) -> String {
    app.page().document().text(el).unwrap_or_default().to_string()
}

pub fn has_class(app: &Interactions, el: ElementId, class: &str) -> bool {
    app.page().document().has_class(el, class)
}
