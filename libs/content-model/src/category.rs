use serde::{Deserialize, Serialize};

/// A taxonomy category.
///
/// Categories are static configuration data: loaded once at startup,
/// immutable at runtime. Ids are lowercase slugs ("quran", "fiqh", ...)
/// and are what content items and tags reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon identifier for UI theming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Hex color for UI theming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Display names of subcategories, first entry is the default pick
    #[serde(default)]
    pub subcategories: Vec<String>,
    /// Keywords used by the keyword scorer and smart tag generation
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Ids of related categories (for cross-linking in the UI)
    #[serde(default)]
    pub related: Vec<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            icon: None,
            color: None,
            subcategories: Vec::new(),
            keywords: Vec::new(),
            related: Vec::new(),
        }
    }

    /// First subcategory name, the default when no better match is found
    pub fn default_subcategory(&self) -> Option<&str> {
        self.subcategories.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_subcategory() {
        let mut category = Category::new("quran", "Quran & Tafsir");
        assert!(category.default_subcategory().is_none());

        category.subcategories = vec!["Tafsir".to_string(), "Tajwid".to_string()];
        assert_eq!(category.default_subcategory(), Some("Tafsir"));
    }
}
