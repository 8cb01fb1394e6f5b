use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Number of recipes requested from the upstream API per page.
pub const PAGE_SIZE: u32 = 9;

/// Query string accepted by `GET /recipes`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[garde(range(min = 0))]
    #[serde(default, deserialize_with = "lenient_offset")]
    pub offset: i64,

    #[garde(skip)]
    pub query: Option<String>,

    #[garde(skip)]
    pub diet: Option<String>,

    #[garde(skip)]
    pub exclude_ingredients: Option<String>,

    #[garde(skip)]
    pub include_ingredients: Option<String>,
}

impl SearchQuery {
    pub fn query(&self) -> Option<&str> {
        non_empty(&self.query)
    }

    pub fn diet(&self) -> Option<&str> {
        non_empty(&self.diet)
    }

    pub fn exclude_ingredients(&self) -> Option<&str> {
        non_empty(&self.exclude_ingredients)
    }

    pub fn include_ingredients(&self) -> Option<&str> {
        non_empty(&self.include_ingredients)
    }
}

/// An empty or non-numeric offset means the first page.
fn lenient_offset<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Identifier of a recipe in the upstream catalog. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeId(u64);

impl RecipeId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for RecipeId {
    type Error = InvalidRecipeId;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value > 0 {
            Ok(Self(value as u64))
        } else {
            Err(InvalidRecipeId(value))
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid recipe ID: {0} (must be a positive integer)")]
pub struct InvalidRecipeId(pub i64);

/// One page of search results as returned to the browser.
///
/// Both fields are passed through from upstream without reshaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePage {
    pub results: serde_json::Value,
    #[serde(rename = "totalResults")]
    pub total_results: serde_json::Value,
}

impl Default for RecipePage {
    fn default() -> Self {
        Self {
            results: serde_json::Value::Array(Vec::new()),
            total_results: serde_json::Value::from(0),
        }
    }
}
