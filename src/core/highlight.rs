use regex::Regex;

use super::{
    classifier::UnlearnedKanji,
    MishuError,
};

pub const HIGHLIGHT_CLASS: &str = "highlight-kanji";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Unlearned { text: &'a str, kanji: UnlearnedKanji },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::Plain(text) => text,
            Segment::Unlearned { text, .. } => text,
        }
    }
}

/// Matches every unlearned kanji of a row in a single pass.
pub struct Highlighter<'r> {
    records: &'r [UnlearnedKanji],
    pattern: Option<Regex>,
}

impl<'r> Highlighter<'r> {
    pub fn new(records: &'r [UnlearnedKanji]) -> Result<Self, MishuError> {
        let pattern = if records.is_empty() {
            None
        } else {
            let alternation = records
                .iter()
                .map(|r| regex::escape(r.character.encode_utf8(&mut [0; 4])))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation)?)
        };

        Ok(Self { records, pattern })
    }

    /// Splits `text` into plain runs and highlighted kanji. Every occurrence is marked.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let Some(pattern) = &self.pattern else {
            return if text.is_empty() { Vec::new() } else { vec![Segment::Plain(text)] };
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::Plain(&text[last..m.start()]));
            }
            let kanji = self
                .records
                .iter()
                .find(|r| m.as_str().starts_with(r.character))
                .copied();
            match kanji {
                Some(kanji) => segments.push(Segment::Unlearned { text: m.as_str(), kanji }),
                None => segments.push(Segment::Plain(m.as_str())),
            }
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::Plain(&text[last..]));
        }

        segments
    }

    /// HTML with each unlearned kanji wrapped in a highlight span. Plain text is escaped.
    pub fn markup(&self, text: &str) -> String {
        let mut html = String::with_capacity(text.len());
        for segment in self.segments(text) {
            match segment {
                Segment::Plain(plain) => html.push_str(&escape_html(plain)),
                Segment::Unlearned { text, .. } => {
                    html.push_str(&format!(r#"<span class="{}">{}</span>"#, HIGHLIGHT_CLASS, text));
                }
            }
        }
        html
    }
}

pub fn highlight_markup(text: &str, records: &[UnlearnedKanji]) -> Result<String, MishuError> {
    Ok(Highlighter::new(records)?.markup(text))
}

/// One badge per unlearned kanji: the character plus its grade label.
pub fn badge_markup(records: &[UnlearnedKanji]) -> String {
    records
        .iter()
        .map(|r| {
            let label = r.label();
            format!(
                r#"<span class="unlearned-badge" title="{label}"><span class="kanji-char">{}</span><small>{label}</small></span>"#,
                r.character
            )
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
