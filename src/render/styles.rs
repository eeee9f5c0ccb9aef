//! Inline style sheets for the platform profile
//!
//! The target platform strips `<style>` blocks, classes, and external CSS
//! from pasted articles, so the platform profile must carry every style as
//! an inline `style="…"` attribute. A `StyleSheet` maps tag names to style
//! declarations; defaults are compiled in and the style editor pane can
//! override individual tags with a minimal `tag { prop: value; }` sheet.

use std::collections::BTreeMap;

use log::debug;
use regex::Regex;

// ─────────────────────────────────────────────────────────────────────────────
// Default Styles
// ─────────────────────────────────────────────────────────────────────────────

/// Tag → inline declaration pairs for the built-in platform look.
const PLATFORM_DEFAULTS: &[(&str, &str)] = &[
    (
        "section",
        "font-size: 16px; color: #3f3f3f; line-height: 1.75; letter-spacing: 0.05em; padding: 0 10px;",
    ),
    (
        "h1",
        "font-size: 24px; font-weight: bold; text-align: center; margin: 32px 0 16px;",
    ),
    (
        "h2",
        "font-size: 20px; font-weight: bold; border-bottom: 2px solid #4870ac; margin: 28px 0 14px;",
    ),
    ("h3", "font-size: 17px; font-weight: bold; margin: 24px 0 12px;"),
    ("p", "margin: 16px 0;"),
    (
        "blockquote",
        "border-left: 3px solid #dbdbdb; color: #6a737d; padding: 1px 0 1px 13px; margin: 16px 0;",
    ),
    ("ul", "margin: 8px 0; padding-left: 25px;"),
    ("ol", "margin: 8px 0; padding-left: 25px;"),
    ("li", "margin: 4px 0;"),
    ("a", "color: #4870ac; text-decoration: none; border-bottom: 1px solid #4870ac;"),
    ("strong", "font-weight: bold; color: #3f3f3f;"),
    ("em", "font-style: italic;"),
    (
        "code",
        "font-family: Menlo, monospace; font-size: 14px; background: #f8f8f8; padding: 2px 4px; border-radius: 2px;",
    ),
    (
        "pre",
        "background: #f8f8f8; padding: 10px; border-radius: 4px; overflow-x: auto; margin: 16px 0;",
    ),
    ("img", "max-width: 100%; display: block; margin: 16px auto;"),
    ("hr", "border: none; border-top: 1px solid #dbdbdb; margin: 24px 0;"),
    ("table", "border-collapse: collapse; margin: 16px 0; width: 100%;"),
    ("th", "border: 1px solid #dbdbdb; padding: 6px 12px; background: #f6f8fa;"),
    ("td", "border: 1px solid #dbdbdb; padding: 6px 12px;"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Style Sheet
// ─────────────────────────────────────────────────────────────────────────────

/// Tag-level inline styles applied by the platform render profile.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    rules: BTreeMap<String, String>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::platform_defaults()
    }
}

impl StyleSheet {
    /// The built-in platform look.
    pub fn platform_defaults() -> Self {
        let rules = PLATFORM_DEFAULTS
            .iter()
            .map(|(tag, style)| (tag.to_string(), style.to_string()))
            .collect();
        Self { rules }
    }

    /// Defaults plus the overrides parsed from the style editor's sheet.
    /// Returns the sheet and a warning per rule that could not be parsed.
    pub fn with_overrides(source: &str) -> (Self, Vec<String>) {
        let mut sheet = Self::platform_defaults();
        let (overrides, warnings) = parse_overrides(source);
        for (tag, style) in overrides {
            sheet.rules.insert(tag, style);
        }
        (sheet, warnings)
    }

    pub fn style_for(&self, tag: &str) -> Option<&str> {
        self.rules.get(tag).map(String::as_str)
    }

    /// Attach `style` attributes to every known tag in an HTML fragment and
    /// wrap it in the platform `<section>` container.
    ///
    /// Tags that already carry a style attribute (syntect-highlighted code
    /// blocks) are left alone.
    pub fn apply(&self, html: &str) -> String {
        let mut out = html.to_string();
        for (tag, style) in &self.rules {
            if tag == "section" {
                continue;
            }
            // <tag> or <tag attrs…>, but never </tag>
            let pattern = format!(r"<{}((?:\s[^>]*)?)>", regex::escape(tag));
            let re = match Regex::new(&pattern) {
                Ok(re) => re,
                Err(e) => {
                    debug!("skipping style rule for <{}>: {}", tag, e);
                    continue;
                }
            };
            out = re
                .replace_all(&out, |caps: &regex::Captures| {
                    let attrs = &caps[1];
                    if attrs.contains("style=") {
                        caps[0].to_string()
                    } else {
                        format!(r#"<{}{} style="{}">"#, tag, attrs, style)
                    }
                })
                .into_owned();
        }
        let section_style = self.style_for("section").unwrap_or("");
        format!(
            "<section id=\"pressmark\" style=\"{}\">\n{}</section>\n",
            section_style, out
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Override Sheet Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a minimal `tag { prop: value; … }` sheet.
///
/// Error-tolerant: malformed rules are skipped and reported as warnings so a
/// half-typed sheet in the style editor never breaks rendering.
pub fn parse_overrides(source: &str) -> (Vec<(String, String)>, Vec<String>) {
    let mut overrides = Vec::new();
    let mut warnings = Vec::new();

    let rule_re = Regex::new(r"(?s)([a-zA-Z][a-zA-Z0-9]*)\s*\{([^}]*)\}")
        .expect("static regex");
    let mut matched_any_span = false;

    for caps in rule_re.captures_iter(source) {
        matched_any_span = true;
        let tag = caps[1].to_lowercase();
        let body = &caps[2];

        let mut declarations = Vec::new();
        for decl in body.split(';') {
            let decl = decl.trim();
            if decl.is_empty() {
                continue;
            }
            match decl.split_once(':') {
                Some((prop, value)) if !prop.trim().is_empty() && !value.trim().is_empty() => {
                    declarations.push(format!("{}: {};", prop.trim(), value.trim()));
                }
                _ => warnings.push(format!("ignored declaration \"{}\" in {} rule", decl, tag)),
            }
        }

        if declarations.is_empty() {
            warnings.push(format!("rule for {} has no usable declarations", tag));
            continue;
        }
        overrides.push((tag, declarations.join(" ")));
    }

    // A non-empty sheet with no parseable rule at all deserves one warning.
    if !matched_any_span && !source.trim().is_empty() {
        warnings.push("style sheet contains no recognizable rules".to_string());
    }

    (overrides, warnings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_core_tags() {
        let sheet = StyleSheet::platform_defaults();
        for tag in ["h1", "h2", "p", "blockquote", "code", "pre", "img", "a"] {
            assert!(sheet.style_for(tag).is_some(), "missing default for {}", tag);
        }
    }

    #[test]
    fn test_apply_attaches_styles_and_wraps_section() {
        let sheet = StyleSheet::platform_defaults();
        let out = sheet.apply("<h1>Title</h1>\n<p>Body</p>\n");
        assert!(out.starts_with("<section id=\"pressmark\""));
        assert!(out.ends_with("</section>\n"));
        assert!(out.contains(r#"<h1 style=""#));
        assert!(out.contains(r#"<p style=""#));
        // Closing tags untouched
        assert!(out.contains("</h1>"));
        assert!(out.contains("</p>"));
    }

    #[test]
    fn test_apply_preserves_existing_attributes() {
        let sheet = StyleSheet::platform_defaults();
        let out = sheet.apply(r#"<a href="https://example.com">link</a>"#);
        assert!(out.contains(r#"<a href="https://example.com" style=""#));
    }

    #[test]
    fn test_apply_skips_tags_that_already_have_style() {
        let sheet = StyleSheet::platform_defaults();
        let input = r#"<pre style="background:#000"><span>x</span></pre>"#;
        let out = sheet.apply(input);
        // Exactly one style attribute on the pre tag.
        assert_eq!(out.matches(r#"<pre style="#).count(), 1);
        assert!(out.contains(r#"<pre style="background:#000">"#));
    }

    #[test]
    fn test_parse_well_formed_overrides() {
        let (overrides, warnings) =
            parse_overrides("h1 { color: red; font-size: 30px }\np { margin: 0; }");
        assert!(warnings.is_empty());
        assert_eq!(
            overrides,
            vec![
                ("h1".to_string(), "color: red; font-size: 30px;".to_string()),
                ("p".to_string(), "margin: 0;".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_skips_malformed_keeps_rest() {
        let source = "h1 { color red }\nh2 { color: blue; }";
        let (overrides, warnings) = parse_overrides(source);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].0, "h2");
        assert!(!warnings.is_empty());
    }

    #[test]
    fn test_parse_garbage_sheet_warns_once() {
        let (overrides, warnings) = parse_overrides("not a sheet at all");
        assert!(overrides.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_parse_empty_sheet_is_silent() {
        let (overrides, warnings) = parse_overrides("   \n  ");
        assert!(overrides.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let (sheet, warnings) = StyleSheet::with_overrides("h1 { color: rebeccapurple; }");
        assert!(warnings.is_empty());
        assert_eq!(sheet.style_for("h1"), Some("color: rebeccapurple;"));
        // Untouched tags keep their defaults.
        assert!(sheet.style_for("p").unwrap().contains("margin"));
    }
}
