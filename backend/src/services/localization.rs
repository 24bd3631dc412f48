//! Localized message templates
//!
//! Templates are keyed by message key and language and use `%{name}`
//! placeholders. A missing language falls back to English; a missing key is
//! a configuration error because the template set is fixed at deployment.

use std::collections::HashMap;

use shared::Language;

use crate::error::{AppError, AppResult};

/// Keys every deployment must provide
pub const REQUIRED_KEYS: &[&str] = &[
    "irrigation.no_irrigate",
    "irrigation.irrigate_early",
    "irrigation.irrigate_normal",
    "season.advisory",
    "price.header",
    "price.rising_title",
    "price.falling_title",
    "price.trend_item",
    "price.below_msp",
    "price.no_data",
    "price.tip",
];

/// Template table loaded from the knowledge base
#[derive(Debug, Clone, Default)]
pub struct LocalizationTable {
    templates: HashMap<String, HashMap<Language, String>>,
}

impl LocalizationTable {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let templates: HashMap<String, HashMap<Language, String>> = serde_json::from_str(json)
            .map_err(|e| AppError::Configuration(format!("localization table: {}", e)))?;

        if let Some(key) = templates.iter().find_map(|(key, langs)| {
            (!langs.contains_key(&Language::En)).then_some(key)
        }) {
            return Err(AppError::Configuration(format!(
                "template '{}' has no English text",
                key
            )));
        }

        Ok(Self { templates })
    }

    /// Fail unless every key the advisories render is present
    pub fn ensure_required_keys(&self) -> AppResult<()> {
        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !self.templates.contains_key(*key))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Configuration(format!(
                "missing templates: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Raw template for a key, falling back to English
    pub fn template(&self, key: &str, lang: Language) -> AppResult<&str> {
        let langs = self
            .templates
            .get(key)
            .ok_or_else(|| AppError::Configuration(format!("missing template '{}'", key)))?;

        langs
            .get(&lang)
            .or_else(|| langs.get(&Language::En))
            .map(String::as_str)
            .ok_or_else(|| AppError::Configuration(format!("template '{}' has no English text", key)))
    }

    /// Render a template with `%{name}` placeholders replaced.
    ///
    /// The template is scanned once, so placeholder syntax inside an
    /// argument value is copied verbatim. Unknown placeholders are kept.
    pub fn render(&self, key: &str, lang: Language, args: &[(&str, &str)]) -> AppResult<String> {
        let template = self.template(key, lang)?;
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("%{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find('}') else {
                result.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let name = &after[..end];
            match args.iter().find(|(arg, _)| *arg == name) {
                Some((_, value)) => result.push_str(value),
                None => result.push_str(&rest[start..start + 2 + end + 1]),
            }
            rest = &after[end + 1..];
        }

        result.push_str(rest);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LocalizationTable {
        LocalizationTable::from_json(
            r#"{
                "greeting": {"en": "Hello %{name}", "hi": "नमस्ते %{name}"},
                "english.only": {"en": "Only English"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_with_args() {
        let t = table();
        assert_eq!(t.render("greeting", Language::En, &[("name", "Ravi")]).unwrap(), "Hello Ravi");
        assert_eq!(t.render("greeting", Language::Hi, &[("name", "Ravi")]).unwrap(), "नमस्ते Ravi");
    }

    #[test]
    fn test_argument_values_are_not_rescanned() {
        let t = LocalizationTable::from_json(
            r#"{"alert": {"en": "At %{place}: %{temp}C, %{rain}mm %{unknown} 100%{"}}"#,
        )
        .unwrap();
        let rendered = t
            .render(
                "alert",
                Language::En,
                &[("place", "Farm %{rain} %{temp}"), ("temp", "40.0"), ("rain", "0.0")],
            )
            .unwrap();
        assert_eq!(rendered, "At Farm %{rain} %{temp}: 40.0C, 0.0mm %{unknown} 100%{");
    }

    #[test]
    fn test_falls_back_to_english() {
        let t = table();
        assert_eq!(t.render("english.only", Language::Hi, &[]).unwrap(), "Only English");
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = table().render("no.such.key", Language::En, &[]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_entry_without_english_is_rejected() {
        let err = LocalizationTable::from_json(r#"{"k": {"hi": "केवल हिंदी"}}"#).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let err = LocalizationTable::from_json(r#"{"k": {"en": "x", "fr": "y"}}"#).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_required_keys() {
        let err = table().ensure_required_keys().unwrap_err();
        assert!(err.to_string().contains("irrigation.no_irrigate"));
    }
}
