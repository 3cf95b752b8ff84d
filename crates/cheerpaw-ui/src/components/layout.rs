//! Measuring rendered controls, so effects anchor to the real layout.

use std::collections::HashMap;
use std::rc::Rc;

use cheerpaw_core::{ElementId, Rect};
use dioxus::prelude::*;

/// Mount handles of rendered buttons, keyed by document element.
#[derive(Clone, Copy, PartialEq)]
pub struct MountedControls {
    mounted: Signal<HashMap<ElementId, Rc<MountedData>>>,
}

/// Create the registry and provide it to every [`DomNode`](super::DomNode)
/// below the calling component.
pub fn use_mounted_controls() -> MountedControls {
    let mounted = use_signal(HashMap::new);
    use_context_provider(|| MountedControls { mounted })
}

impl MountedControls {
    pub(crate) fn insert(mut self, id: ElementId, data: Rc<MountedData>) {
        self.mounted.write().insert(id, data);
    }

    /// Forget every handle; called when the page is replaced.
    pub fn clear(mut self) {
        self.mounted.write().clear();
    }

    /// Current box of `id` relative to the viewport, if it is mounted.
    pub async fn client_rect(&self, id: ElementId) -> Option<Rect> {
        let data = self.mounted.peek().get(&id).cloned()?;
        match data.get_client_rect().await {
            Ok(rect) => Some(Rect::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)),
            Err(e) => {
                tracing::debug!(%id, "client rect unavailable: {:?}", e);
                None
            }
        }
    }
}

/// The window's vertical scroll offset.
pub async fn scroll_offset() -> Option<f64> {
    match document::eval("return window.scrollY;").await {
        Ok(value) => value.as_f64(),
        Err(e) => {
            tracing::debug!("scroll offset unavailable: {:?}", e);
            None
        }
    }
}
