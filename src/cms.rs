//! Headless-CMS content fetching.
//!
//! Stage 1 of the build pipeline. The CMS is treated as an opaque
//! asynchronous provider: a declarative [`Query`] selects a record type and
//! fields, the response is an ordered list of records (or a single document),
//! and there is no schema enforcement beyond the field names — a record
//! missing an optional field still deserializes.
//!
//! ## Endpoint Shape
//!
//! Queries go to a Sanity-style HTTP API:
//!
//! ```text
//! https://{project_id}.api.sanity.io/{api_version}/data/query/{dataset}?query=...
//! ```
//!
//! and responses arrive wrapped in a `{"result": ...}` envelope. A
//! `cms.base_url` config override replaces the derived host (tests point it
//! at a local mock server).
//!
//! ## Failure Policy
//!
//! One error kind, [`FetchError`], covering transport, non-success status
//! and decode failures. Individual `fetch_*` calls propagate it; the
//! pipeline entry point [`CmsClient::fetch_snapshot`] catches it per section,
//! logs it, and resolves that section to empty. A dead CMS produces a site
//! with "no items" sections, never a failed build. No retries.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::{CmsConfig, SiteConfig};
use crate::store::SectionStore;
use crate::types::{
    CollaborationLevel, ContentSnapshot, MainFeature, MainService, PortableBlock, ServiceCard,
    ServicesSection, Testimonial,
};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("CMS returned status {0}")]
    Status(u16),
    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid CMS endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// A declarative content query: record type, projected fields, optional
/// ordering. Serialized to the CMS query string by [`Query::to_query_string`].
#[derive(Debug, Clone)]
pub struct Query {
    record_type: String,
    fields: Vec<String>,
    order: Option<String>,
    single: bool,
}

impl Query {
    /// All records of `record_type`, in store order unless [`order_by`](Self::order_by)
    /// is set.
    pub fn records(record_type: &str) -> Self {
        Self {
            record_type: record_type.to_string(),
            fields: Vec::new(),
            order: None,
            single: false,
        }
    }

    /// The first record of `record_type` (singleton documents).
    pub fn document(record_type: &str) -> Self {
        let mut query = Self::records(record_type);
        query.single = true;
        query
    }

    /// Project a field. The expression is passed through verbatim, so aliases
    /// and dereferences like `"imageUrl": image.asset->url` work.
    pub fn field(mut self, expr: &str) -> Self {
        self.fields.push(expr.to_string());
        self
    }

    pub fn order_by(mut self, expr: &str) -> Self {
        self.order = Some(expr.to_string());
        self
    }

    /// Render the query in the CMS's selection language.
    ///
    /// ```
    /// use brochure::cms::Query;
    ///
    /// let q = Query::records("review").field("_id").field("name").order_by("_createdAt desc");
    /// assert_eq!(q.to_query_string(), "*[_type == \"review\"] | order(_createdAt desc){_id, name}");
    /// ```
    pub fn to_query_string(&self) -> String {
        let mut out = format!("*[_type == \"{}\"]", self.record_type);
        if self.single {
            out.push_str("[0]");
        }
        if let Some(order) = &self.order {
            out.push_str(&format!(" | order({order})"));
        }
        if !self.fields.is_empty() {
            out.push('{');
            out.push_str(&self.fields.join(", "));
            out.push('}');
        }
        out
    }
}

/// Every CMS response wraps its payload in a `result` field.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: T,
}

// ============================================================================
// Wire types
//
// The CMS uses its own field names (`_id`, `testimonial`, `imageUrl`). These
// mirror the projections below and convert into the snapshot types, keeping
// CMS naming out of the rest of the crate.
// ============================================================================

#[derive(Debug, Deserialize)]
struct TestimonialDoc {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    testimonial: String,
}

impl From<TestimonialDoc> for Testimonial {
    fn from(doc: TestimonialDoc) -> Self {
        Testimonial {
            id: doc.id,
            name: doc.name,
            position: doc.position,
            body: doc.testimonial,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceCardDoc {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default, rename = "imageUrl")]
    image_url: Option<String>,
}

impl From<ServiceCardDoc> for ServiceCard {
    fn from(doc: ServiceCardDoc) -> Self {
        ServiceCard {
            id: doc.id,
            title: doc.title,
            price: doc.price,
            features: doc.features,
            icon: doc.icon,
            image_url: doc.image_url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ServicesSectionDoc {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "mainService")]
    main_service: MainServiceDoc,
    #[serde(default, rename = "levelsTitle")]
    levels_title: Option<String>,
    #[serde(default, rename = "collaborationLevels")]
    collaboration_levels: Vec<LevelDoc>,
}

#[derive(Debug, Default, Deserialize)]
struct MainServiceDoc {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    subheading: String,
    #[serde(default)]
    text: Vec<PortableBlock>,
    #[serde(default)]
    image: Option<ImageDoc>,
    #[serde(default)]
    features: Vec<MainFeature>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageDoc {
    #[serde(default)]
    asset: Option<AssetDoc>,
    #[serde(default)]
    alt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetDoc {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LevelDoc {
    #[serde(default)]
    title: String,
    #[serde(default)]
    quote: String,
    #[serde(default)]
    description: Vec<PortableBlock>,
    #[serde(default)]
    label: String,
}

impl From<ServicesSectionDoc> for ServicesSection {
    fn from(doc: ServicesSectionDoc) -> Self {
        let image = doc.main_service.image.unwrap_or_default();
        ServicesSection {
            title: doc.title,
            description: doc.description,
            main: MainService {
                heading: doc.main_service.heading,
                subheading: doc.main_service.subheading,
                text: doc.main_service.text,
                image_url: image.asset.and_then(|a| a.url),
                image_alt: image.alt,
                features: doc.main_service.features,
            },
            levels_title: doc.levels_title,
            levels: doc
                .collaboration_levels
                .into_iter()
                .map(|l| CollaborationLevel {
                    title: l.title,
                    quote: l.quote,
                    description: l.description,
                    label: l.label,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the CMS query endpoint.
pub struct CmsClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl CmsClient {
    pub fn new(cms: &CmsConfig) -> Result<Self, FetchError> {
        let base = match &cms.base_url {
            Some(url) => Url::parse(url)?,
            None => Url::parse(&format!("https://{}.api.sanity.io", cms.project_id))?,
        };
        let endpoint = base.join(&format!("{}/data/query/{}", cms.api_version, cms.dataset))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run one query and decode the `result` envelope.
    async fn query<T: DeserializeOwned>(&self, query: &Query) -> Result<T, FetchError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", &query.to_query_string());

        tracing::debug!(%url, "querying CMS");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        tracing::debug!(%status, "CMS response");
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.result)
    }

    /// Ordered testimonial list, newest first.
    pub async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, FetchError> {
        let query = Query::records("review")
            .order_by("_createdAt desc")
            .field("_id")
            .field("name")
            .field("position")
            .field("testimonial");
        let docs: Vec<TestimonialDoc> = self.query(&query).await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    /// Service/pricing cards, oldest first (authoring order).
    pub async fn fetch_service_cards(&self) -> Result<Vec<ServiceCard>, FetchError> {
        let query = Query::records("serviceCard")
            .order_by("_createdAt asc")
            .field("_id")
            .field("title")
            .field("price")
            .field("features")
            .field("icon")
            .field("\"imageUrl\": image.asset->url");
        let docs: Vec<ServiceCardDoc> = self.query(&query).await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    /// The singleton services section document, if one is published.
    pub async fn fetch_services_section(&self) -> Result<Option<ServicesSection>, FetchError> {
        let query = Query::document("servicesSection")
            .field("title")
            .field("description")
            .field("mainService")
            .field("levelsTitle")
            .field("collaborationLevels");
        let doc: Option<ServicesSectionDoc> = self.query(&query).await?;
        Ok(doc.map(Into::into))
    }

    /// Fetch every section and assemble the snapshot for the generate stage.
    ///
    /// Sections fetch independently; a failure empties that section and the
    /// others still land. This never fails — the error policy is logged
    /// degradation, not propagation.
    pub async fn fetch_snapshot(&self, config: SiteConfig) -> ContentSnapshot {
        let mut testimonials = SectionStore::new();
        let ticket = testimonials.begin_fetch();
        let outcome = self.fetch_testimonials().await;
        if let Err(error) = &outcome {
            tracing::warn!(%error, "testimonial fetch failed, section will be empty");
        }
        testimonials.resolve(ticket, outcome);

        let mut cards = SectionStore::new();
        let ticket = cards.begin_fetch();
        let outcome = self.fetch_service_cards().await;
        if let Err(error) = &outcome {
            tracing::warn!(%error, "service card fetch failed, section will be empty");
        }
        cards.resolve(ticket, outcome);

        let services_section = match self.fetch_services_section().await {
            Ok(section) => section,
            Err(error) => {
                tracing::warn!(%error, "services section fetch failed, section will be empty");
                None
            }
        };

        ContentSnapshot {
            testimonials: testimonials.into_items(),
            service_cards: cards.into_items(),
            services_section,
            config,
        }
    }
}
