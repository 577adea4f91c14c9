//! Sanitization gate over emitted HTML
//!
//! Last-line XSS defense: everything the emitter produces (and anything a
//! caller routes through `sanitize` directly) passes an allow-list filter
//! before it may touch a DOM. Historical BBS art abused pipe-code
//! translation to smuggle live markup into pages, so the gate assumes
//! hostile input.
//!
//! Two profiles exist. The strict profile is authoritative: it keeps only
//! the emitter's structural tags and pins attribute values to the emitter's
//! own grammar. The fallback profile is a deliberately narrower safety net
//! that entity-escapes everything else; it engages when the strict pass
//! fails, leaves a forbidden construct behind, or suspiciously changes
//! nothing on input that contained one. Fallback engagement is the one
//! security-relevant diagnostic and is always logged.

use crate::debug::{self, DebugLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Allow-list configuration for the gate
///
/// Attribute entries ending in `*` match by prefix (`on*`, `data-*`); tag
/// and attribute names compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SanitizationConfig {
    pub allowed_tags: Vec<String>,
    pub allowed_attributes: Vec<String>,
    pub forbidden_tags: Vec<String>,
    pub forbidden_attributes: Vec<String>,
}

impl Default for SanitizationConfig {
    fn default() -> Self {
        SanitizationConfig::strict()
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

impl SanitizationConfig {
    /// The authoritative profile used on all emitter output
    pub fn strict() -> Self {
        SanitizationConfig {
            allowed_tags: names(&["div", "i", "span"]),
            allowed_attributes: names(&["id", "class", "style"]),
            forbidden_tags: names(&["script", "style", "iframe", "img", "svg"]),
            forbidden_attributes: names(&["on*", "data-*"]),
        }
    }

    /// The narrower safety net: structural tags survive bare, everything
    /// else is entity-escaped
    pub fn fallback() -> Self {
        SanitizationConfig {
            allowed_attributes: Vec::new(),
            ..SanitizationConfig::strict()
        }
    }

    fn tag_allowed(&self, name: &str) -> bool {
        self.allowed_tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(name))
    }

    fn tag_forbidden(&self, name: &str) -> bool {
        self.forbidden_tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(name))
    }

    fn attribute_allowed(&self, name: &str) -> bool {
        self.allowed_attributes
            .iter()
            .any(|attr| attr.eq_ignore_ascii_case(name))
    }

    fn attribute_forbidden(&self, name: &str) -> bool {
        self.forbidden_attributes.iter().any(|entry| {
            if let Some(prefix) = entry.strip_suffix('*') {
                name.len() >= prefix.len() && name[..prefix.len()].eq_ignore_ascii_case(prefix)
            } else {
                entry.eq_ignore_ascii_case(name)
            }
        })
    }
}

/// Result of a sanitization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOutput {
    pub html: String,
    /// The strict profile was rejected and the escaping fallback ran
    pub used_fallback: bool,
}

/// Filter HTML through the allow-list; never errors, falls back to the
/// escaping profile instead. Idempotent: sanitizing sanitized output
/// returns it unchanged.
pub fn sanitize(html: &str, config: &SanitizationConfig) -> SanitizeOutput {
    if let Some(clean) = strict_pass(html, config) {
        let residue = contains_forbidden(&clean, config);
        let suspicious_noop = clean == html && contains_forbidden(html, config);
        if !residue && !suspicious_noop {
            return SanitizeOutput {
                html: clean,
                used_fallback: false,
            };
        }
    }
    debug::log(
        DebugLevel::Warn,
        "SANITIZE",
        "strict profile rejected the document; escaping fallback engaged",
    );
    SanitizeOutput {
        html: fallback_pass(html, config),
        used_fallback: true,
    }
}

fn tag_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<\s*(/?)\s*([a-zA-Z][a-zA-Z0-9-]*)((?:"[^"]*"|'[^']*'|[^>"'])*)>"#).ok()
    })
    .as_ref()
}

fn attribute_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([a-zA-Z_][a-zA-Z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).ok()
    })
    .as_ref()
}

fn id_value_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:row-[0-9]{1,6}|column-[0-9]{1,6}(?:-to-[0-9]{1,6})?)$").ok())
        .as_ref()
}

fn class_value_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9 _-]{1,120}$").ok()).as_ref()
}

fn style_value_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?:(?:color|background-color)\s*:\s*rgb\(\s*[0-9]{1,3}\s*,\s*[0-9]{1,3}\s*,\s*[0-9]{1,3}\s*\)\s*;?\s*)+$",
        )
        .ok()
    })
    .as_ref()
}

/// Attribute values must match the emitter's own grammar; anything else is
/// a potential CSS/attribute-injection vector and is dropped.
fn value_permitted(attribute: &str, value: &str) -> bool {
    let checker = match attribute {
        "id" => id_value_regex(),
        "class" => class_value_regex(),
        "style" => style_value_regex(),
        _ => None,
    };
    match checker {
        Some(regex) => regex.is_match(value),
        None => false,
    }
}

/// The strict allow-list pass. Returns None when the machinery itself is
/// unavailable, which routes the caller to the fallback profile.
fn strict_pass(html: &str, config: &SanitizationConfig) -> Option<String> {
    let tag_re = tag_regex()?;
    let attr_re = attribute_regex()?;
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for caps in tag_re.captures_iter(html) {
        let whole = caps.get(0)?;
        out.push_str(&html[last..whole.start()]);
        last = whole.end();
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        if config.tag_forbidden(&name) || !config.tag_allowed(&name) {
            continue; // tag removed, surrounding text survives
        }
        if closing {
            out.push_str("</");
            out.push_str(&name);
            out.push('>');
            continue;
        }
        out.push('<');
        out.push_str(&name);
        if let Some(attrs) = caps.get(3) {
            for attr in attr_re.captures_iter(attrs.as_str()) {
                let attr_name = attr[1].to_ascii_lowercase();
                if config.attribute_forbidden(&attr_name) || !config.attribute_allowed(&attr_name) {
                    continue;
                }
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .or_else(|| attr.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                if value_permitted(&attr_name, value) {
                    out.push(' ');
                    out.push_str(&attr_name);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
            }
        }
        out.push('>');
    }
    out.push_str(&html[last..]);
    Some(out)
}

/// Detect forbidden constructs, including unterminated tags the structured
/// pass cannot see (`<script src=` with no closing bracket).
fn contains_forbidden(html: &str, config: &SanitizationConfig) -> bool {
    if !html.contains('<') {
        return false;
    }
    if !config.forbidden_tags.is_empty() {
        let pattern = format!(
            r"(?i)<\s*/?\s*(?:{})\b",
            config
                .forbidden_tags
                .iter()
                .map(|tag| regex::escape(tag))
                .collect::<Vec<_>>()
                .join("|")
        );
        match Regex::new(&pattern) {
            Ok(regex) => {
                if regex.is_match(html) {
                    return true;
                }
            }
            Err(_) => return true, // unverifiable configuration, treat as dirty
        }
    }
    if !config.forbidden_attributes.is_empty() {
        let alternatives: Vec<String> = config
            .forbidden_attributes
            .iter()
            .map(|entry| match entry.strip_suffix('*') {
                Some(prefix) => format!("{}[a-zA-Z0-9_-]*", regex::escape(prefix)),
                None => regex::escape(entry),
            })
            .collect();
        let pattern = format!(r#"(?i)<[^>]*[\s"'](?:{})\s*="#, alternatives.join("|"));
        match Regex::new(&pattern) {
            Ok(regex) => {
                if regex.is_match(html) {
                    return true;
                }
            }
            Err(_) => return true,
        }
    }
    false
}

/// The escaping fallback: allowed structural tags survive with every
/// attribute stripped; all other markup, terminated or not, is
/// entity-escaped.
fn fallback_pass(html: &str, config: &SanitizationConfig) -> String {
    let Some(tag_re) = tag_regex() else {
        return escape_loose(html);
    };
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for caps in tag_re.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&escape_loose(&html[last..whole.start()]));
        last = whole.end();
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        if config.tag_allowed(&name) && !config.tag_forbidden(&name) {
            if closing {
                out.push_str("</");
            } else {
                out.push('<');
            }
            out.push_str(&name);
            out.push('>');
        } else {
            out.push_str(&escape_loose(whole.as_str()));
        }
    }
    out.push_str(&escape_loose(&html[last..]));
    out
}

fn entity_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^&(?:[a-zA-Z][a-zA-Z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6});").ok()
    })
    .as_ref()
}

/// Entity-aware escape: `<` and `>` always, `&` only when it does not
/// already introduce an entity. Applying it twice is a no-op.
fn escape_loose(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for (index, ch) in segment.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => {
                let is_entity = entity_regex()
                    .map(|regex| regex.is_match(&segment[index..]))
                    .unwrap_or(false);
                if is_entity {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            other => out.push(other),
        }
    }
    out
}
