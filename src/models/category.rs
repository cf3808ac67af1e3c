use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static colour pattern"));

/// A user-defined category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
    /// Number of tasks created under this category and not yet deleted.
    #[serde(default)]
    pub task_count: i64,
}

impl Category {
    /// The copy embedded into a task when the category is assigned.
    pub fn snapshot(&self) -> CategoryRef {
        CategoryRef {
            id: self.id.clone(),
            name: self.name.clone(),
            color: self.color.clone(),
        }
    }
}

/// Denormalised category data carried by a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Payload for `POST /categories`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

/// Payload for `PUT /categories/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// Checks a name/colour pair, returning a message suitable for a 400.
pub fn validate_category(name: Option<&str>, color: Option<&str>) -> Result<(), String> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err("Category name must not be empty".to_string());
        }
    }
    if let Some(color) = color {
        if !HEX_COLOR.is_match(color) {
            return Err(format!("Invalid category color {:?}, expected #RRGGBB", color));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#FF5C5C", true)]
    #[case("#00aa11", true)]
    #[case("FF5C5C", false)]
    #[case("#FFF", false)]
    #[case("#GG0000", false)]
    fn checks_hex_colours(#[case] color: &str, #[case] ok: bool) {
        assert_eq!(validate_category(Some("Work"), Some(color)).is_ok(), ok);
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(validate_category(Some("   "), None).is_err());
        assert!(validate_category(None, None).is_ok());
    }

    #[test]
    fn snapshot_copies_identity_and_look() {
        let category = Category {
            id: "c1".into(),
            name: "Work".into(),
            color: "#FF5C5C".into(),
            description: "Day job".into(),
            task_count: 4,
        };
        let snap = category.snapshot();
        assert_eq!(snap.id, "c1");
        assert_eq!(snap.name, "Work");
        assert_eq!(snap.color, "#FF5C5C");
    }
}
