//! Variable store and `{{name}}` template resolution

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Matches `{{identifier}}` where identifier is an ASCII word-character run.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder regex is valid")
});

/// Session variables, keyed by name
///
/// Names and values are stored verbatim; no validation is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableStore {
    variables: BTreeMap<String, String>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a variable
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Delete a variable; absent names are ignored
    pub fn remove(&mut self, name: &str) {
        self.variables.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variables sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Substitutes `{{name}}` placeholders in one left-to-right pass.
    ///
    /// Unknown names are left as written. Substituted values are not scanned
    /// again, so a value containing `{{other}}` comes through literally.
    pub fn resolve(&self, template: &str) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match self.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

impl<K, V> FromIterator<(K, V)> for VariableStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = VariableStore::new();
        for (name, value) in iter {
            store.set(name, value);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> VariableStore {
        pairs.iter().copied().collect()
    }

    #[test]
    fn resolves_known_variable() {
        let vars = store(&[("baseUrl", "https://api.example.com")]);
        assert_eq!(
            vars.resolve("{{baseUrl}}/users"),
            "https://api.example.com/users"
        );
    }

    #[test]
    fn leaves_unknown_placeholder_untouched() {
        let vars = VariableStore::new();
        assert_eq!(vars.resolve("{{missing}}/x"), "{{missing}}/x");
    }

    #[test]
    fn does_not_reexpand_substituted_values() {
        let vars = store(&[("a", "{{b}}"), ("b", "nope")]);
        assert_eq!(vars.resolve("/{{a}}/"), "/{{b}}/");
    }

    #[test]
    fn resolves_every_occurrence() {
        let vars = store(&[("id", "42")]);
        assert_eq!(vars.resolve("{{id}}-{{id}}-{{other}}"), "42-42-{{other}}");
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        let vars = store(&[("x", "y")]);
        let template = "https://example.com/{x}/{{ x }}/{{x-y}}";
        assert_eq!(vars.resolve(template), template);
    }

    #[test]
    fn empty_value_still_replaces() {
        let vars = store(&[("prefix", "")]);
        assert_eq!(vars.resolve("{{prefix}}/path"), "/path");
    }

    #[test]
    fn set_overwrites_and_remove_is_idempotent() {
        let mut vars = VariableStore::new();
        vars.set("token", "one");
        vars.set("token", "two");
        assert_eq!(vars.get("token"), Some("two"));
        assert_eq!(vars.len(), 1);

        vars.remove("token");
        vars.remove("token");
        vars.remove("never-set");
        assert!(vars.is_empty());
    }

    #[test]
    fn iterates_sorted_by_name() {
        let vars = store(&[("zeta", "1"), ("alpha", "2")]);
        let names: Vec<&str> = vars.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }
}
