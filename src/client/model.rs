//! Records returned by the scoring service.
//!
//! Decoding is lenient the way the pages were: missing or `null` fields take
//! their default, and a group that is not an array is treated as empty.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A scored GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub default_branch_name: String,
    #[serde(rename = "hasCoC", deserialize_with = "null_as_default")]
    pub has_coc: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_political: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub orientation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stars: u64,
}

/// `repos.json`: repositories grouped by classification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RepoCatalog {
    #[serde(deserialize_with = "array_or_empty")]
    pub political: Vec<Repository>,
    #[serde(deserialize_with = "array_or_empty")]
    pub neutral: Vec<Repository>,
}

/// One entry of the news feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsItem {
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    pub current_orientation: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_political: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NewsFeed {
    #[serde(deserialize_with = "array_or_empty")]
    pub items: Vec<NewsItem>,
}

/// Reply to a news submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmitReply {
    pub success: bool,
    pub error: Option<String>,
}

/// A card of the home page carousel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Example {
    pub title: String,
    pub description: String,
    pub source: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn array_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_wire_names() {
        let repo: Repository = serde_json::from_str(
            r#"{
                "slug": "torvalds/linux",
                "url": "https://github.com/torvalds/linux",
                "description": null,
                "date": "2025-10-25T18:08:34.123991400Z",
                "defaultBranchName": "master",
                "hasCoC": true,
                "isPolitical": false,
                "orientation": "political",
                "stars": 205665
            }"#,
        )
        .unwrap();

        assert_eq!(repo.default_branch_name, "master");
        assert!(repo.has_coc);
        assert_eq!(repo.description, None);
        assert_eq!(repo.stars, 205665);
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let repo: Repository = serde_json::from_str(r#"{"slug": "a/b", "stars": null}"#).unwrap();
        assert_eq!(repo.stars, 0);
        assert_eq!(repo.orientation, "");
    }

    #[test]
    fn test_non_array_groups_are_empty() {
        let catalog: RepoCatalog =
            serde_json::from_str(r#"{"political": {"oops": 1}, "neutral": [{"slug": "x/y"}]}"#)
                .unwrap();
        assert!(catalog.political.is_empty());
        assert_eq!(catalog.neutral.len(), 1);

        let feed: NewsFeed = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(feed.items.is_empty());
    }
}
