//! Server-rendered pages the interaction layer attaches to.
//!
//! These builders produce the same DOM contract the site's templates do:
//! the home page with its card grid, wallet and gallery carousel, and the
//! coin charge page with its plans and the three purchase modals.

use url::Url;

use crate::anchors::{class, data, id};
use crate::dom::{Document, ElementBuilder, ElementId};
use crate::format::group_thousands;
use crate::page::Page;

pub const HOME_PATH: &str = "/";
pub const CHARGE_PATH: &str = "/money/charge/";
pub const LOGIN_PATH: &str = "/accounts/login/";

/// One purchasable coin bundle offered by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinPlan {
    pub coins: u64,
    /// Price in yen.
    pub price: u64,
}

impl CoinPlan {
    pub fn buy_url(&self) -> String {
        format!("/money/buy/{}/", self.coins)
    }
}

/// The plans the server accepts; any other amount is refused.
pub const COIN_PLANS: [CoinPlan; 4] = [
    CoinPlan { coins: 100, price: 100 },
    CoinPlan { coins: 1000, price: 1000 },
    CoinPlan { coins: 3600, price: 3000 },
    CoinPlan { coins: 7000, price: 5000 },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalProfile {
    pub id: String,
    pub name: String,
    pub species: String,
    pub pictures: Vec<String>,
    pub total_point: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalletSnapshot {
    pub coins: u64,
    pub points: u64,
}

impl WalletSnapshot {
    /// Read the balances currently displayed, so they survive a navigation.
    pub fn read(doc: &Document) -> Option<Self> {
        let value = |dom_id: &str| -> Option<u64> {
            let el = doc.get_element_by_id(dom_id)?;
            doc.text(el)?.replace(',', "").trim().parse().ok()
        };
        Some(Self {
            coins: value(id::WALLET_BALANCE)?,
            points: value(id::WALLET_POINTS)?,
        })
    }
}

/// A small roster for running the desktop host against a fresh server.
pub fn demo_animals() -> Vec<AnimalProfile> {
    [
        ("otter-1", "Kawa", "Asian small-clawed otter", 4),
        ("panda-2", "Momo", "Red panda", 12),
        ("capy-3", "Yuzu", "Capybara", 0),
        ("fennec-4", "Sora", "Fennec fox", 7),
        ("penguin-5", "Pico", "Humboldt penguin", 3),
        ("sloth-6", "Noro", "Two-toed sloth", 1),
    ]
    .into_iter()
    .map(|(id, name, species, total_point)| AnimalProfile {
        id: id.to_string(),
        name: name.to_string(),
        species: species.to_string(),
        pictures: (1..=3)
            .map(|n| format!("/media/animal_images/{}_{}.jpg", id, n))
            .collect(),
        total_point,
    })
    .collect()
}

fn nav_link(label: &str, href: &str) -> ElementBuilder {
    ElementBuilder::new("a")
        .class(class::NAV_LINK)
        .attr("href", href)
        .text(label)
}

fn wallet(snapshot: &WalletSnapshot) -> ElementBuilder {
    ElementBuilder::new("div")
        .class("wallet")
        .child(ElementBuilder::new("span").class("wallet-label").text("Cheer coins"))
        .child(
            ElementBuilder::new("span")
                .id(id::WALLET_BALANCE)
                .text(group_thousands(snapshot.coins)),
        )
        .child(ElementBuilder::new("span").class("wallet-label").text("Stanning points"))
        .child(
            ElementBuilder::new("span")
                .id(id::WALLET_POINTS)
                .text(group_thousands(snapshot.points)),
        )
}

fn animal_card(animal: &AnimalProfile) -> ElementBuilder {
    let mut media = ElementBuilder::new("div").class(class::MEDIA);
    if let Some(picture) = animal.pictures.first() {
        media = media.child(
            ElementBuilder::new("img")
                .attr("src", picture.as_str())
                .attr("alt", animal.name.as_str()),
        );
    }

    ElementBuilder::new("div")
        .class(class::ANIMAL_CARD)
        .child(media)
        .child(ElementBuilder::new("h3").class("animal-name").text(animal.name.as_str()))
        .child(ElementBuilder::new("p").class("animal-species").text(animal.species.as_str()))
        .child(
            ElementBuilder::new("div")
                .class("animal-score")
                .child(ElementBuilder::new("span").class(class::BADGE).text("Oshi"))
                .child(
                    ElementBuilder::new("span")
                        .class(class::POINT)
                        .text(animal.total_point.to_string()),
                ),
        )
        .child(
            ElementBuilder::new("button")
                .class(class::LIKE_BUTTON)
                .attr("type", "button")
                .data(data::CARD_ID, animal.id.as_str())
                .text("Cheer"),
        )
}

fn gallery(animals: &[AnimalProfile]) -> ElementBuilder {
    ElementBuilder::new("div")
        .class(class::CAROUSEL)
        .data(data::CAROUSEL_INTERVAL, "3000")
        .children(animals.iter().flat_map(|a| {
            a.pictures.iter().map(move |p| {
                ElementBuilder::new("img")
                    .class(class::CAROUSEL_SLIDE)
                    .attr("src", p.as_str())
                    .attr("alt", a.name.as_str())
            })
        }))
        .child(ElementBuilder::new("div").class(class::CAROUSEL_INDICATORS))
}

/// Home page: wallet (signed in only), gallery carousel, shuffled card grid.
pub fn render_home(
    doc: &mut Document,
    animals: &[AnimalProfile],
    wallet_snapshot: Option<&WalletSnapshot>,
) -> ElementId {
    let mut header = ElementBuilder::new("header")
        .class("site-header")
        .child(ElementBuilder::new("h1").text("Cheerpaw"))
        .child(nav_link("Charge coins", CHARGE_PATH));
    if let Some(snapshot) = wallet_snapshot {
        header = header.child(wallet(snapshot));
    }

    let main = ElementBuilder::new("main")
        .class("home")
        .child(header)
        .child(gallery(animals))
        .child(
            ElementBuilder::new("button")
                .id(id::REFRESH_BUTTON)
                .attr("type", "button")
                .text("Replay"),
        )
        .child(
            ElementBuilder::new("section")
                .class("animal-grid")
                .attr(data::SHUFFLE, "")
                .children(animals.iter().map(animal_card)),
        );
    let body = doc.body();
    doc.build(body, main)
}

fn confirm_modal() -> ElementBuilder {
    ElementBuilder::new("div")
        .class(class::MODAL)
        .id(id::CONFIRM_MODAL)
        .hidden()
        .child(
            ElementBuilder::new("div")
                .class("modal-content")
                .child(ElementBuilder::new("h2").text("Confirm purchase"))
                .child(
                    ElementBuilder::new("p")
                        .child(ElementBuilder::new("span").id(id::CONFIRM_COINS))
                        .child(ElementBuilder::new("span").text(" coins for ¥"))
                        .child(ElementBuilder::new("span").id(id::CONFIRM_PRICE)),
                )
                .child(
                    ElementBuilder::new("button")
                        .id(id::CONFIRM_OK)
                        .attr("type", "button")
                        .text("Buy"),
                )
                .child(
                    ElementBuilder::new("button")
                        .id(id::CONFIRM_CANCEL)
                        .attr("type", "button")
                        .text("Cancel"),
                ),
        )
        .child(
            ElementBuilder::new("form")
                .id(id::BUY_FORM)
                .attr("method", "post")
                .attr("action", ""),
        )
}

fn done_modal() -> ElementBuilder {
    ElementBuilder::new("div")
        .class(class::MODAL)
        .id(id::DONE_MODAL)
        .hidden()
        .child(
            ElementBuilder::new("div")
                .class("modal-content")
                .child(ElementBuilder::new("h2").text("Purchase complete"))
                .child(
                    ElementBuilder::new("p")
                        .child(ElementBuilder::new("span").id(id::DONE_COINS))
                        .child(ElementBuilder::new("span").text(" coins for ¥"))
                        .child(ElementBuilder::new("span").id(id::DONE_PRICE)),
                )
                .child(ElementBuilder::new("p").id(id::DONE_POINTS))
                .child(
                    ElementBuilder::new("button")
                        .id(id::DONE_OK)
                        .attr("type", "button")
                        .text("OK"),
                ),
        )
}

fn auth_modal(login_url: &str) -> ElementBuilder {
    ElementBuilder::new("div")
        .class(class::MODAL)
        .id(id::AUTH_MODAL)
        .hidden()
        .child(
            ElementBuilder::new("div")
                .class("modal-content")
                .child(ElementBuilder::new("h2").text("Sign in to buy coins"))
                .child(
                    ElementBuilder::new("p")
                        .child(ElementBuilder::new("span").text("This plan costs ¥"))
                        .child(ElementBuilder::new("span").id(id::AUTH_PRICE)),
                )
                .child(nav_link("Sign in", login_url))
                .child(
                    ElementBuilder::new("button")
                        .id(id::AUTH_CANCEL)
                        .attr("type", "button")
                        .text("Close"),
                ),
        )
}

/// Charge page. `location` is the full current URL; signed-out viewers get
/// a login link that returns here.
pub fn render_charge(
    doc: &mut Document,
    location: &Url,
    plans: &[CoinPlan],
    wallet_snapshot: Option<&WalletSnapshot>,
) -> ElementId {
    let mut full_path = location.path().to_string();
    if let Some(query) = location.query() {
        full_path.push('?');
        full_path.push_str(query);
    }
    let login_url: String = url::form_urlencoded::Serializer::new(format!("{}?", LOGIN_PATH))
        .append_pair("next", &full_path)
        .finish();

    let mut main = ElementBuilder::new("main")
        .class("charge")
        .child(
            ElementBuilder::new("header")
                .class("site-header")
                .child(ElementBuilder::new("h1").text("Charge cheer coins"))
                .child(nav_link("Back to animals", HOME_PATH)),
        );
    if let Some(snapshot) = wallet_snapshot {
        main = main.child(wallet(snapshot));
    }
    main = main
        .child(
            ElementBuilder::new("ul")
                .class("plans")
                .children(plans.iter().map(|plan| {
                    ElementBuilder::new("li")
                        .class("plan")
                        .child(
                            ElementBuilder::new("span")
                                .class("plan-coins")
                                .text(format!("{} coins", group_thousands(plan.coins))),
                        )
                        .child(
                            ElementBuilder::new("span")
                                .class("plan-price")
                                .text(format!("¥{}", group_thousands(plan.price))),
                        )
                        .child(
                            ElementBuilder::new("button")
                                .class(class::PURCHASE_BUTTON)
                                .attr("type", "button")
                                .data(data::OFFER_URL, plan.buy_url())
                                .data(data::OFFER_COINS, plan.coins.to_string())
                                .data(data::OFFER_PRICE, plan.price.to_string())
                                .text("Buy"),
                        )
                })),
        )
        .child(confirm_modal())
        .child(done_modal())
        .child(auth_modal(&login_url));

    let body = doc.body();
    doc.build(body, main)
}

/// Render whatever the server would serve at the page's location.
pub fn render_for(page: &mut Page, animals: &[AnimalProfile], wallet_snapshot: Option<&WalletSnapshot>) {
    let location = page.location().clone();
    let wallet_snapshot = wallet_snapshot.filter(|_| page.is_authenticated());
    let doc = page.document_mut();
    if location.path() == CHARGE_PATH {
        render_charge(doc, &location, &COIN_PLANS, wallet_snapshot);
    } else {
        render_home(doc, animals, wallet_snapshot);
    }
}
