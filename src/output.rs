//! CLI output formatting for both pipeline stages.
//!
//! Output is information-centric, not transport-centric: the primary display
//! for every record is its semantic identity — positional index + title —
//! with secondary context on indented lines. Sections whose fetch came back
//! empty say so explicitly instead of just vanishing from the listing.
//!
//! ## Fetch
//!
//! ```text
//! References
//! 001 Anna Novak
//!     Position: CEO, Novak s.r.o.
//! 002 Boris Kral
//!
//! Service cards
//! 001 Basic (4 features)
//!     Price: from €900
//!
//! Services section
//!     Design — End to end
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Generated 1 page: 2 testimonials, 1 service card
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::types::ContentSnapshot;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn format_fetch_output(snapshot: &ContentSnapshot) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("References".to_string());
    if snapshot.testimonials.is_empty() {
        lines.push("    (empty)".to_string());
    }
    for (pos, item) in snapshot.testimonials.iter().enumerate() {
        lines.push(format!("{} {}", format_index(pos + 1), item.name));
        if let Some(position) = &item.position {
            lines.push(format!("    Position: {position}"));
        }
    }

    lines.push(String::new());
    lines.push("Service cards".to_string());
    if snapshot.service_cards.is_empty() {
        lines.push("    (empty)".to_string());
    }
    for (pos, card) in snapshot.service_cards.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(pos + 1),
            card.title,
            plural(card.features.len(), "feature")
        ));
        lines.push(format!("    Price: {}", card.price));
    }

    lines.push(String::new());
    lines.push("Services section".to_string());
    match &snapshot.services_section {
        Some(section) => {
            lines.push(format!(
                "    {} — {}",
                section.main.heading, section.main.subheading
            ));
            if !section.levels.is_empty() {
                lines.push(format!(
                    "    {}",
                    plural(section.levels.len(), "collaboration level")
                ));
            }
        }
        None => lines.push("    (empty)".to_string()),
    }

    lines
}

pub fn print_fetch_output(snapshot: &ContentSnapshot) {
    for line in format_fetch_output(snapshot) {
        println!("{line}");
    }
}

pub fn format_generate_output(snapshot: &ContentSnapshot) -> Vec<String> {
    vec![
        "Home → index.html".to_string(),
        format!(
            "Generated 1 page: {}, {}",
            plural(snapshot.testimonials.len(), "testimonial"),
            plural(snapshot.service_cards.len(), "service card")
        ),
    ]
}

pub fn print_generate_output(snapshot: &ContentSnapshot) {
    for line in format_generate_output(snapshot) {
        println!("{line}");
    }
}
