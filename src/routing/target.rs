//! Route targets and default resolution.

use std::collections::BTreeMap;

use serde::Serialize;

/// Controller/action pair a route points at, as declared.
///
/// Either half may be absent; an empty mapping (`{}`) leaves both unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Target {
    pub controller: Option<String>,
    pub action: Option<String>,

    /// Extra attributes from the declaration (e.g. `format: 'json'`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, String>,
}

/// Fallbacks for targets that leave controller or action unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDefaults {
    pub controller: String,
    pub action: String,
}

impl Default for TargetDefaults {
    fn default() -> Self {
        Self {
            controller: "default".to_string(),
            action: "index".to_string(),
        }
    }
}

/// A target with both halves filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub controller: String,
    pub action: String,
}

impl Target {
    pub fn new(controller: Option<&str>, action: Option<&str>) -> Self {
        Self {
            controller: controller.map(str::to_string),
            action: action.map(str::to_string),
            defaults: BTreeMap::new(),
        }
    }

    /// Fill unset halves from `defaults`.
    pub fn resolve(&self, defaults: &TargetDefaults) -> ResolvedTarget {
        ResolvedTarget {
            controller: self
                .controller
                .clone()
                .unwrap_or_else(|| defaults.controller.clone()),
            action: self
                .action
                .clone()
                .unwrap_or_else(|| defaults.action.clone()),
        }
    }

    /// Short `controller.action` label used in logs; unset halves print as `_`.
    pub fn label(&self) -> String {
        format!(
            "{}.{}",
            self.controller.as_deref().unwrap_or("_"),
            self.action.as_deref().unwrap_or("_")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_explicit_values() {
        let target = Target::new(Some("blog"), Some("show"));
        let resolved = target.resolve(&TargetDefaults::default());
        assert_eq!(resolved.controller, "blog");
        assert_eq!(resolved.action, "show");
    }

    #[test]
    fn test_resolve_fills_missing_controller() {
        let target = Target::new(None, Some("about"));
        let resolved = target.resolve(&TargetDefaults {
            controller: "pages".into(),
            action: "index".into(),
        });
        assert_eq!(resolved.controller, "pages");
        assert_eq!(resolved.action, "about");
        // The declared target is untouched.
        assert_eq!(target.controller, None);
    }

    #[test]
    fn test_resolve_empty_mapping() {
        let resolved = Target::default().resolve(&TargetDefaults::default());
        assert_eq!(resolved.controller, "default");
        assert_eq!(resolved.action, "index");
    }

    #[test]
    fn test_label() {
        assert_eq!(Target::new(Some("blog"), Some("show")).label(), "blog.show");
        assert_eq!(Target::new(None, Some("about")).label(), "_.about");
    }
}
