//! Host document
//!
//! The root HTML document the server returns for every navigable path.
//! It must contain exactly one mount anchor element (`<div id="app">` by
//! default); rendered views are written into that element.

use crate::app::error::{BootstrapError, BootstrapResult};

/// Root document with a located mount anchor
#[derive(Debug, Clone)]
pub struct HostDocument {
    html: String,
    anchor_id: String,
    /// Byte offset just past the anchor's opening tag
    content_start: usize,
    /// Byte offset of the placeholder text end (equal to `content_start` when
    /// the anchor holds nested markup)
    content_end: usize,
}

impl HostDocument {
    /// Locate the anchor element `id="<anchor_id>"` in `html`
    pub fn parse(html: impl Into<String>, anchor_id: &str) -> BootstrapResult<Self> {
        let html = html.into();
        let matches = find_anchor_attributes(&html, anchor_id);

        let attr_start = match matches.as_slice() {
            [] => return Err(BootstrapError::MissingAnchor(anchor_id.to_string())),
            [only] => *only,
            many => {
                return Err(BootstrapError::DuplicateAnchor {
                    anchor: anchor_id.to_string(),
                    count: many.len(),
                })
            }
        };

        let malformed = || BootstrapError::MalformedAnchor(anchor_id.to_string());

        let tag_open = html[..attr_start].rfind('<').ok_or_else(malformed)?;
        let tag_close = attr_start + html[attr_start..].find('>').ok_or_else(malformed)?;
        if html[..tag_close].ends_with('/') {
            return Err(malformed());
        }

        let tag_name: String = html[tag_open + 1..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        if tag_name.is_empty() {
            return Err(malformed());
        }

        let content_start = tag_close + 1;
        let content_end = match html[content_start..].find('<') {
            Some(offset) => {
                let next_tag = &html[content_start + offset..];
                if next_tag
                    .get(2..2 + tag_name.len())
                    .is_some_and(|name| next_tag.starts_with("</") && name.eq_ignore_ascii_case(&tag_name))
                {
                    content_start + offset
                } else {
                    content_start
                }
            }
            None => return Err(malformed()),
        };

        Ok(Self {
            html,
            anchor_id: anchor_id.to_string(),
            content_start,
            content_end,
        })
    }

    pub fn anchor_id(&self) -> &str {
        &self.anchor_id
    }

    /// The document as loaded
    pub fn as_html(&self) -> &str {
        &self.html
    }

    /// Document with `fragment` mounted inside the anchor, replacing any
    /// placeholder text
    pub fn render_with(&self, fragment: &str) -> String {
        let mut out = String::with_capacity(self.html.len() + fragment.len());
        out.push_str(&self.html[..self.content_start]);
        out.push_str(fragment);
        out.push_str(&self.html[self.content_end..]);
        out
    }
}

/// Byte offsets of `id="<anchor>"` attributes that sit inside a tag
fn find_anchor_attributes(html: &str, anchor: &str) -> Vec<usize> {
    let needles = [format!("id=\"{}\"", anchor), format!("id='{}'", anchor)];
    let mut found = Vec::new();

    for needle in &needles {
        for (idx, _) in html.match_indices(needle.as_str()) {
            let preceded_by_space = html[..idx]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_whitespace());
            let inside_tag = match (html[..idx].rfind('<'), html[..idx].rfind('>')) {
                (Some(open), Some(close)) => open > close,
                (Some(_), None) => true,
                _ => false,
            };
            if preceded_by_space && inside_tag {
                found.push(idx);
            }
        }
    }

    found.sort_unstable();
    found
}
