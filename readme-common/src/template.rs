//! Literal `{{ key }}` substitution for SVG and Markdown templates.
//!
//! This is deliberately not a template language: no nesting, no conditionals,
//! no escaping. Each bound placeholder token is replaced by its value in a
//! single left-to-right pass, so text coming from a value is never scanned for
//! further placeholders.

use std::collections::{BTreeMap, HashMap};

/// Placeholder name → value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The exact token text for `key`, e.g. `{{ name }}`.
pub fn placeholder(key: &str) -> String {
    format!("{{{{ {} }}}}", key)
}

/// Whether `template` contains the placeholder for `key`.
pub fn has_placeholder(template: &str, key: &str) -> bool {
    template.contains(&placeholder(key))
}

/// Fill `template` with `bindings`.
///
/// Unbound placeholders are left as they are. `render(t, &Bindings::new())`
/// returns `t` unchanged.
pub fn render(template: &str, bindings: &Bindings) -> String {
    if bindings.is_empty() {
        return template.to_string();
    }

    let tokens: HashMap<String, &str> = bindings
        .iter()
        .map(|(key, value)| (placeholder(key), value))
        .collect();

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let matched = rest.find("}}").and_then(|end| {
            let token = &rest[..end + 2];
            tokens.get(token).map(|value| (token.len(), *value))
        });

        match matched {
            Some((token_len, value)) => {
                out.push_str(value);
                rest = &rest[token_len..];
            }
            None => {
                // Step past one brace only, `{{{ key }}` still has a token at +1
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_bindings_is_noop() {
        let template = "<svg>{{ name }} and {{ stars }}</svg>";
        assert_eq!(render(template, &Bindings::new()), template);
        assert_eq!(render("", &Bindings::new()), "");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let bindings = Bindings::new().with("name", "widget");
        let out = render("{{ name }}/{{ name }}-{{ name }}", &bindings);
        assert_eq!(out, "widget/widget-widget");
    }

    #[test]
    fn test_unbound_placeholders_untouched() {
        let bindings = Bindings::new().with("stars", 42);
        let out = render("{{ stars }} {{ forks }}", &bindings);
        assert_eq!(out, "42 {{ forks }}");
    }

    #[test]
    fn test_values_are_not_expanded_again() {
        let bindings = Bindings::new()
            .with("a", "{{ b }}")
            .with("b", "B");
        assert_eq!(render("{{ a }}|{{ b }}", &bindings), "{{ b }}|B");
    }

    #[test]
    fn test_token_must_match_exactly() {
        let bindings = Bindings::new().with("name", "x");
        assert_eq!(render("{{name}} {{  name }}", &bindings), "{{name}} {{  name }}");
    }

    #[test]
    fn test_stray_braces() {
        let bindings = Bindings::new().with("name", "x");
        assert_eq!(render("{{{ name }}}", &bindings), "{x}");
        assert_eq!(render("{{ open", &bindings), "{{ open");
        assert_eq!(render("}} {{ name }}", &bindings), "}} x");
    }

    #[test]
    fn test_multibyte_text_around_tokens() {
        let bindings = Bindings::new().with("label", "再生回数");
        assert_eq!(render("🎧 {{ label }} ✓", &bindings), "🎧 再生回数 ✓");
    }

    #[test]
    fn test_has_placeholder() {
        assert!(has_placeholder("x {{ description_line_1 }}", "description_line_1"));
        assert!(!has_placeholder("x {{ repo_description }}", "description_line_1"));
    }

    proptest! {
        #[test]
        fn empty_bindings_return_template(template in any::<String>()) {
            prop_assert_eq!(render(&template, &Bindings::new()), template);
        }

        #[test]
        fn brace_free_template_is_unchanged(template in "[^{]*", value in any::<String>()) {
            let bindings = Bindings::new().with("name", value);
            prop_assert_eq!(render(&template, &bindings), template);
        }
    }
}
