//! Shared content types used by both pipeline stages.
//!
//! These types are serialized to JSON between stages (fetch → generate) and
//! must deserialize from whatever the CMS returns. The CMS enforces no schema
//! beyond field names, so every optional field is `Option` or defaults to
//! empty — a record missing a field still deserializes.

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

/// A customer testimonial, shown one at a time in the references carousel.
///
/// The ordered list is fetched once per build and never mutated afterwards
/// except by full replace on refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Unique record id from the CMS.
    pub id: String,
    pub name: String,
    /// Job title / company line under the name. Optional in the CMS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// The quote body.
    pub body: String,
}

/// A service/pricing card. Records are independent of each other; a card
/// missing its image or icon renders without that element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCard {
    pub id: String,
    pub title: String,
    /// Display string, not a number — CMS authors write things like "from €900".
    pub price: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A single rich-text block as the CMS stores it: a style string plus inline
/// spans. The style is resolved to a [`crate::portable::BlockTag`] at render
/// time; unknown styles fall back to paragraph rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortableBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Span>,
}

/// Inline text run inside a block. Marks (bold, links) are out of scope —
/// only the text is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
}

/// The singleton services section document: headline copy, one main service
/// panel, and the collaboration levels listed under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicesSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub main: MainService,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels_title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<CollaborationLevel>,
}

/// The featured service panel: hero image with overlaid heading, a rich-text
/// body, and a short feature grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainService {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub subheading: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<PortableBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<MainFeature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainFeature {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One collaboration level: title, pull-quote, rich-text description and a
/// short label (typically the engagement terms).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaborationLevel {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<PortableBlock>,
    #[serde(default)]
    pub label: String,
}

/// The manifest written by the fetch stage and read by the generate stage.
///
/// A section whose fetch failed is present but empty — generation always
/// succeeds and renders the "no items" state for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSnapshot {
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub service_cards: Vec<ServiceCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services_section: Option<ServicesSection>,
    pub config: SiteConfig,
}
