//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the content snapshot and generates
//! the final static page.
//!
//! ## Generated Output
//!
//! ```text
//! dist/
//! └── index.html     # References carousel + services sections, CSS inlined
//! ```
//!
//! ## Sections
//!
//! - **References**: testimonials carousel. The markup is a projection of a
//!   [`Carousel`] — every slide is rendered, the current one marked, and the
//!   machine's index/direction/in-flight state surfaced as `data-` attributes.
//!   A ~40-line vanilla-JS shim drives the same transitions in the browser
//!   and reports `transitionend` back the way the library's
//!   [`Carousel::transition_settled`] does.
//! - **Services**: main service panel (rich-text body via [`portable`]),
//!   collaboration levels, and the pricing card grid. A record missing its
//!   image omits the `img` element without disturbing sibling cards.
//!
//! Each section renders distinct copy for "still loading" and "nothing to
//! show" — a failed fetch must not look like a pending one.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::carousel::Carousel;
use crate::config::{self, SiteConfig};
use crate::portable::{self, BlockRules};
use crate::store::LoadPhase;
use crate::types::{ContentSnapshot, ServiceCard, ServicesSection};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/carousel.js");

pub fn generate(snapshot_path: &Path, output_dir: &Path) -> Result<(), GenerateError> {
    let snapshot_content = fs::read_to_string(snapshot_path)?;
    let snapshot: ContentSnapshot = serde_json::from_str(&snapshot_content)?;

    fs::create_dir_all(output_dir)?;
    let page = render_page(&snapshot);
    fs::write(output_dir.join("index.html"), page.into_string())?;
    Ok(())
}

/// Assemble the full page from a snapshot.
///
/// Snapshot sections are already resolved, so each section's phase is
/// `Ready` or `Empty` — `Loading` only appears when rendering live state.
pub fn render_page(snapshot: &ContentSnapshot) -> Markup {
    let color_css = config::generate_color_css(&snapshot.config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let carousel = Carousel::new(snapshot.testimonials.clone());
    let references_phase = if carousel.is_empty() {
        LoadPhase::Empty
    } else {
        LoadPhase::Ready
    };

    let content = html! {
        (site_header(&snapshot.config))
        main {
            (render_services_section(snapshot.services_section.as_ref(), &snapshot.service_cards))
            (render_references_section(&carousel, references_phase))
        }
        script { (PreEscaped(JS)) }
    };

    base_document(&snapshot.config, &css, content)
}

// ============================================================================
// Page chrome
// ============================================================================

/// Renders the base HTML document structure
fn base_document(config: &SiteConfig, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.site.title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            span.brand { (config.site.title) }
            nav.site-nav {
                a href="#services" { "Services" }
                a href="#references" { "References" }
            }
        }
    }
}

// ============================================================================
// References section (carousel)
// ============================================================================

/// Renders the testimonials carousel from the machine's current state.
///
/// All slides are emitted; only the current one is visible. The controller
/// state rides along as data attributes so the browser shim starts exactly
/// where the machine is.
pub fn render_references_section(carousel: &Carousel, phase: LoadPhase) -> Markup {
    html! {
        section #references .references-section {
            div.section-heading {
                h2 { "References" }
                p { "What our clients say about working with us." }
            }
            @match phase {
                LoadPhase::Loading => {
                    p.section-status { "Loading references…" }
                }
                LoadPhase::Empty => {
                    p.section-status { "No references to show." }
                }
                LoadPhase::Ready => {
                    (render_carousel(carousel))
                }
            }
        }
    }
}

fn render_carousel(carousel: &Carousel) -> Markup {
    let current = carousel.current_index();
    html! {
        div.carousel
            data-index=(current)
            data-direction=(carousel.direction().as_str())
            data-in-flight=(carousel.in_flight())
        {
            div.slides {
                @for (idx, item) in carousel.items().iter().enumerate() {
                    article.testimonial-card.current[idx == current] data-id=(item.id) {
                        span.quote-mark aria-hidden="true" { "\u{201C}" }
                        p.testimonial-body { (item.body) }
                        div.attribution {
                            span.avatar aria-hidden="true" {
                                (item.name.chars().next().unwrap_or('?'))
                            }
                            div {
                                h4 { (item.name) }
                                @if let Some(position) = &item.position {
                                    p.position { (position) }
                                }
                            }
                        }
                    }
                }
            }
            div.carousel-controls {
                div.dots {
                    @for idx in 0..carousel.len() {
                        button.dot.current[idx == current]
                            data-jump=(idx)
                            aria-label={ "Go to testimonial " (idx + 1) } {}
                    }
                }
                div.arrows {
                    button.arrow data-step="-1" aria-label="Previous testimonial" { "\u{2039}" }
                    button.arrow data-step="1" aria-label="Next testimonial" { "\u{203A}" }
                }
            }
        }
    }
}

// ============================================================================
// Services section
// ============================================================================

/// Renders the services section: main panel, collaboration levels, card grid.
///
/// `section` is the singleton document (absent when its fetch failed or the
/// CMS has none published); the card grid renders independently of it.
pub fn render_services_section(section: Option<&ServicesSection>, cards: &[ServiceCard]) -> Markup {
    html! {
        section #services .services-section {
            @if let Some(section) = section {
                div.section-heading {
                    h2 { (section.title) }
                    p { (section.description) }
                }
                (render_main_service(section))
                @if let Some(levels_title) = &section.levels_title {
                    div.levels {
                        h3.levels-title { (levels_title) }
                        @for level in &section.levels {
                            div.level-card {
                                h4 { (level.title) }
                                p.level-quote { "\u{201E}" (level.quote) "\u{201C}" }
                                (portable::render_blocks(Some(&level.description), &level_rules()))
                                p.level-label { (level.label) }
                            }
                        }
                    }
                }
            }
            @if cards.is_empty() {
                p.section-status { "No services to show." }
            } @else {
                div.card-grid {
                    @for card in cards {
                        (render_service_card(card))
                    }
                }
            }
        }
    }
}

fn render_main_service(section: &ServicesSection) -> Markup {
    let main = &section.main;
    html! {
        div.main-service {
            div.main-service-hero {
                @if let Some(url) = &main.image_url {
                    img src=(url) alt=(main.image_alt.as_deref().unwrap_or(&main.heading));
                }
                div.hero-overlay {
                    h3 { (main.heading) }
                    p { (main.subheading) }
                }
            }
            div.main-service-body {
                (portable::render_blocks(Some(&main.text), &BlockRules::default()))
                @if !main.features.is_empty() {
                    div.feature-grid {
                        @for feature in &main.features {
                            div.feature {
                                h4 { (feature.title) }
                                p { (feature.description) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Rich-text rules for collaboration level descriptions — same blocks,
/// level-specific classes.
fn level_rules() -> BlockRules {
    BlockRules {
        h1: "level-h1",
        h2: "level-h2",
        h3: "level-h3",
        paragraph: "level-body",
    }
}

fn render_service_card(card: &ServiceCard) -> Markup {
    html! {
        article.service-card data-id=(card.id) {
            div.card-hero {
                @if let Some(url) = &card.image_url {
                    img src=(url) alt=(card.title);
                }
                div.card-hero-overlay {
                    h3 { (card.title) }
                }
            }
            div.card-body {
                p.price { (card.price) }
                @if !card.features.is_empty() {
                    ul.features {
                        @for feature in &card.features {
                            li { (feature) }
                        }
                    }
                }
            }
            a.card-cta href={ "/contact?package=" (card.id) } {
                "Get in touch"
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
