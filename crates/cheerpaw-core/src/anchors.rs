//! DOM contract shared by the server-rendered markup and the controllers.

/// Class names.
pub mod class {
    pub const ANIMAL_CARD: &str = "animal-card";
    pub const LIKE_BUTTON: &str = "push-btn";
    pub const POINT: &str = "point";
    pub const BADGE: &str = "oshii-badge";
    pub const MEDIA: &str = "animal-media";

    pub const FLASH: &str = "flash";
    pub const POP: &str = "pop";
    pub const SHAKE: &str = "shake";
    pub const HOVER_LOCK: &str = "is-hoverlock";
    pub const BUSY: &str = "is-busy";
    pub const REVEALED: &str = "is-revealed";
    pub const HEART: &str = "heart";

    pub const CAROUSEL: &str = "carousel";
    pub const CAROUSEL_SLIDE: &str = "carousel-slide";
    pub const CAROUSEL_INDICATORS: &str = "carousel-indicators";
    pub const CAROUSEL_INDICATOR: &str = "carousel-indicator";
    pub const ACTIVE: &str = "is-active";

    pub const PURCHASE_BUTTON: &str = "purchase-btn";
    pub const MODAL: &str = "modal";

    /// In-app link; the host navigates to its `href`.
    pub const NAV_LINK: &str = "nav-link";
}

/// Element ids.
pub mod id {
    pub const WALLET_BALANCE: &str = "wallet-balance";
    pub const WALLET_POINTS: &str = "wallet-stapo";
    pub const REFRESH_BUTTON: &str = "refresh-btn";

    pub const CONFIRM_MODAL: &str = "confirmModal";
    pub const CONFIRM_OK: &str = "okConfirmBtn";
    pub const CONFIRM_CANCEL: &str = "cancelConfirmBtn";
    pub const CONFIRM_COINS: &str = "confirmCoinsText";
    pub const CONFIRM_PRICE: &str = "confirmPriceText";
    pub const BUY_FORM: &str = "hiddenBuyForm";

    pub const DONE_MODAL: &str = "doneModal";
    pub const DONE_OK: &str = "doneOkBtn";
    pub const DONE_COINS: &str = "doneCoinsText";
    pub const DONE_PRICE: &str = "donePriceText";
    pub const DONE_POINTS: &str = "donePointText";

    pub const AUTH_MODAL: &str = "authModal";
    pub const AUTH_CANCEL: &str = "authCancelBtn";
    pub const AUTH_PRICE: &str = "authPriceText";
}

/// Data attribute keys (without the `data-` prefix).
pub mod data {
    pub const CARD_ID: &str = "id";
    pub const OFFER_URL: &str = "url";
    pub const OFFER_COINS: &str = "coins";
    pub const OFFER_PRICE: &str = "price";
    pub const CAROUSEL_INTERVAL: &str = "interval";
    pub const INDICATOR_INDEX: &str = "index";
    /// Attribute (full name) marking a container whose children are shuffled.
    pub const SHUFFLE: &str = "data-shuffle";
}
