//! # Brochure
//!
//! A minimal static marketing-site generator fed by a headless CMS.
//! Editors write testimonials, service cards and rich-text copy in the CMS;
//! `brochure` pulls them over HTTP and renders a static page with a
//! testimonials carousel and a services/pricing section.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content moves through two independent stages, with a JSON snapshot
//! between them:
//!
//! ```text
//! 1. Fetch     CMS HTTP API  →  content.json   (remote records → snapshot)
//! 2. Generate  content.json  →  dist/          (snapshot → HTML)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the snapshot is human-readable JSON you can inspect.
//! - **Offline rebuilds**: regenerate HTML without touching the CMS.
//! - **Testability**: generation is a pure function from snapshot to markup,
//!   so tests exercise it without a network.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cms`] | Stage 1 — declarative queries against the CMS HTTP API, snapshot assembly |
//! | [`generate`] | Stage 2 — renders the final page from the snapshot using Maud |
//! | [`carousel`] | Testimonial rotation state machine with the in-flight transition guard |
//! | [`store`] | Per-section load phase (loading vs empty) and the stale-response guard |
//! | [`portable`] | Rich-text block → markup projection with paragraph fallback |
//! | [`config`] | `config.toml` loading and validation, color CSS generation |
//! | [`types`] | Shared types serialized between stages (`ContentSnapshot` and friends) |
//! | [`output`] | CLI output formatting — information-first display of both stages |
//!
//! # Design Decisions
//!
//! ## Degrade, Never Crash
//!
//! The CMS is the only remote collaborator and the only failure source. A
//! fetch that fails is logged and resolves that section to empty; the build
//! still succeeds and the page shows a "nothing to show" message. Loading
//! and empty are distinct states ([`store::LoadPhase`]) so a pending fetch
//! never masquerades as an empty result.
//!
//! ## Explicit Carousel State
//!
//! The carousel's rotation state lives in one owned struct mutated only
//! through guarded operations ([`carousel::Carousel`]), not in ambient
//! variables. The in-flight flag is advisory — cooperative, not a lock —
//! which is exactly why every mutation entry point funnels through it.
//! The generated page ships a small vanilla-JS shim that mirrors the same
//! rules in the browser.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, template variables
//! are Rust expressions, and all interpolation is auto-escaped.
//!
//! ## Snapshot as the Seam
//!
//! The generate stage never talks to the network. Everything it needs —
//! records and site config — is in the snapshot, so a CMS outage after a
//! successful fetch costs nothing.

pub mod carousel;
pub mod cms;
pub mod config;
pub mod generate;
pub mod output;
pub mod portable;
pub mod store;
pub mod types;
