//! Markdown body scanning.
//!
//! Walks the body's markdown events once and captures, per lower-cased
//! heading, either paragraph text or a bullet list. Capture semantics:
//!
//! - paragraph blocks contribute their text (appended when text was already
//!   captured),
//! - a list block REPLACES whatever was captured for the heading, and a
//!   later list under the same heading overwrites again — lists never merge,
//! - once a list is captured for a heading, paragraph text under it is
//!   dropped.
//!
//! The scan also collects ordered image references (markdown image syntax)
//! and video references (links whose visible text contains "video",
//! case-insensitive, wherever they appear in the body).

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::collections::BTreeMap;

/// Token a link's visible text must contain to count as a video reference.
const VIDEO_TOKEN: &str = "video";

/// Content captured under one heading.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// Accumulated paragraph text.
    Text(String),
    /// Items of the last list block under the heading.
    Items(Vec<String>),
}

impl Section {
    /// Captured text, if this section is a text capture.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Items(_) => None,
        }
    }

    /// Captured items, if this section is a list capture.
    pub fn as_items(&self) -> Option<&[String]> {
        match self {
            Self::Items(items) => Some(items),
            Self::Text(_) => None,
        }
    }

    /// Consume into an item sequence; text capture becomes a single item.
    pub fn into_items(self) -> Vec<String> {
        match self {
            Self::Items(items) => items,
            Self::Text(text) => vec![text],
        }
    }

    /// Consume into prose; a list capture joins its items line-wise.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Items(items) => items.join("\n"),
        }
    }
}

/// Result of scanning one body.
#[derive(Debug, Clone, Default)]
pub struct BodyScan {
    /// Lower-cased heading text → captured content.
    pub sections: BTreeMap<String, Section>,
    /// Image references in body order.
    pub images: Vec<String>,
    /// Video references in body order.
    pub videos: Vec<String>,
}

/// Scan a markdown body for sections, images, and video links.
pub fn scan_body(body: &str) -> BodyScan {
    let mut scan = BodyScan::default();

    let mut current: Option<String> = None;
    let mut heading_buf: Option<String> = None;
    let mut para_buf: Option<String> = None;
    let mut item_buf: Option<String> = None;
    let mut list_items: Vec<String> = Vec::new();
    let mut list_depth: usize = 0;
    let mut collecting_list = false;
    let mut link: Option<(String, String)> = None;
    let mut in_image = false;

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                heading_buf = Some(String::new());
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = heading_buf.take() {
                    current = Some(text.trim().to_lowercase());
                }
            }

            Event::Start(Tag::Paragraph) => {
                // Paragraphs inside loose list items belong to the item, not
                // the section text.
                if current.is_some() && list_depth == 0 {
                    para_buf = Some(String::new());
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if let Some(text) = para_buf.take() {
                    contribute_paragraph(&mut scan.sections, current.as_deref(), &text);
                }
            }

            Event::Start(Tag::List(_)) => {
                if list_depth == 0 && current.is_some() {
                    list_items = Vec::new();
                    collecting_list = true;
                }
                list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 && collecting_list {
                    collecting_list = false;
                    if let Some(heading) = current.clone() {
                        // A list replaces any previous capture for the heading.
                        scan.sections
                            .insert(heading, Section::Items(std::mem::take(&mut list_items)));
                    }
                }
            }
            Event::Start(Tag::Item) => {
                if collecting_list && list_depth == 1 {
                    item_buf = Some(String::new());
                }
            }
            Event::End(TagEnd::Item) => {
                if list_depth == 1 {
                    if let Some(text) = item_buf.take() {
                        let text = text.trim();
                        if !text.is_empty() {
                            list_items.push(text.to_string());
                        }
                    }
                }
            }

            Event::Start(Tag::Image { dest_url, .. }) => {
                scan.images.push(dest_url.to_string());
                in_image = true;
            }
            Event::End(TagEnd::Image) => {
                in_image = false;
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                link = Some((dest_url.to_string(), String::new()));
            }
            Event::End(TagEnd::Link) => {
                if let Some((dest, text)) = link.take() {
                    if text.to_lowercase().contains(VIDEO_TOKEN) {
                        scan.videos.push(dest);
                    }
                }
            }

            Event::Text(text) | Event::Code(text) => {
                if in_image {
                    continue;
                }
                if let Some((_, link_text)) = link.as_mut() {
                    link_text.push_str(&text);
                }
                push_visible(&mut heading_buf, &mut item_buf, &mut para_buf, &text);
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_image {
                    continue;
                }
                if let Some((_, link_text)) = link.as_mut() {
                    link_text.push(' ');
                }
                push_visible(&mut heading_buf, &mut item_buf, &mut para_buf, " ");
            }

            _ => {}
        }
    }

    scan
}

/// Route visible text into the innermost active collector.
fn push_visible(
    heading_buf: &mut Option<String>,
    item_buf: &mut Option<String>,
    para_buf: &mut Option<String>,
    text: &str,
) {
    if let Some(buf) = heading_buf.as_mut() {
        buf.push_str(text);
    } else if let Some(buf) = item_buf.as_mut() {
        buf.push_str(text);
    } else if let Some(buf) = para_buf.as_mut() {
        buf.push_str(text);
    }
}

/// Fold one paragraph's text into the section map.
fn contribute_paragraph(
    sections: &mut BTreeMap<String, Section>,
    heading: Option<&str>,
    text: &str,
) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    let Some(heading) = heading else {
        return;
    };
    match sections.get_mut(heading) {
        None => {
            sections.insert(heading.to_string(), Section::Text(text.to_string()));
        }
        Some(Section::Text(existing)) => {
            existing.push_str("\n\n");
            existing.push_str(text);
        }
        // A captured list wins over later paragraph text.
        Some(Section::Items(_)) => {}
    }
}

// ============================================================================
// Tests
// ============================================================================
