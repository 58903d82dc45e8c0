//! Detection of emails, URLs and phone numbers in output text

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Email,
    Url,
    Phone,
}

/// A run of output text, possibly a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
}

impl Segment<'_> {
    /// Link target for link segments
    pub fn href(&self) -> Option<String> {
        match self.kind {
            SegmentKind::Text => None,
            SegmentKind::Email => Some(format!("mailto:{}", self.text)),
            SegmentKind::Url => Some(self.text.to_string()),
            SegmentKind::Phone => {
                let digits: String = self
                    .text
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != '-')
                    .collect();
                Some(format!("tel:{}", digits))
            }
        }
    }
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?P<email>\S+@\S+\.\S+)|(?P<url>https?://\S+)|(?P<phone>\+?\d[\d\s\-]{10,})")
            .expect("link pattern is valid")
    })
}

/// Split `text` into plain and link segments. Empty segments are dropped.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in link_pattern().captures_iter(text) {
        let (m, kind) = if let Some(m) = caps.name("email") {
            (m, SegmentKind::Email)
        } else if let Some(m) = caps.name("url") {
            (m, SegmentKind::Url)
        } else if let Some(m) = caps.name("phone") {
            (m, SegmentKind::Phone)
        } else {
            continue;
        };

        if m.start() > last {
            out.push(Segment {
                text: &text[last..m.start()],
                kind: SegmentKind::Text,
            });
        }
        out.push(Segment {
            text: m.as_str(),
            kind,
        });
        last = m.end();
    }

    if last < text.len() {
        out.push(Segment {
            text: &text[last..],
            kind: SegmentKind::Text,
        });
    }
    out
}
