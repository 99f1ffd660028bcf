//! Wire types of the card search API (`GET /api/cards?q=...`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ContentId, ContentReference, ContentResult, Properties};

const SOURCE_EXTENSIONS: [&str; 4] = ["tsx", "ts", "jsx", "js"];

/// One row of the card catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub id: i64,
    pub import_path: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub component_props: Value,
}

impl CardData {
    /// Content identifier named by the import path: its last segment without
    /// a source-file extension, e.g. `../CardContent/Clock.tsx` -> `Clock`.
    pub fn content_id(&self) -> ContentId {
        let segment = self
            .import_path
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        let stem = match segment.rsplit_once('.') {
            Some((stem, ext)) if SOURCE_EXTENSIONS.contains(&ext) => stem,
            _ => segment,
        };
        ContentId::new(stem)
    }

    /// Reference suitable for a "component selected" broadcast.
    pub fn content_reference(&self) -> ContentReference {
        let properties = match &self.component_props {
            Value::Object(map) => map.clone(),
            _ => Properties::new(),
        };
        ContentReference::with_properties(self.content_id(), properties)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardsResponse {
    pub success: bool,
    #[serde(default)]
    pub cards: Vec<CardData>,
}

impl CardsResponse {
    pub fn from_json(body: &str) -> ContentResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(import_path: &str) -> CardData {
        CardData {
            id: 1,
            import_path: import_path.to_owned(),
            title: None,
            height: None,
            component_props: Value::Null,
        }
    }

    #[test]
    fn content_id_from_import_path() {
        assert_eq!(card("../CardContent/Clock").content_id().as_str(), "Clock");
        assert_eq!(card("LocalContent/Notes.tsx").content_id().as_str(), "Notes");
        assert_eq!(card("TodoList").content_id().as_str(), "TodoList");
        assert_eq!(card("cards/v1.2/").content_id().as_str(), "v1.2");
        assert!(card("").content_id().is_empty());
    }

    #[test]
    fn parses_search_response() {
        let body = r#"{
            "success": true,
            "cards": [
                {
                    "id": 7,
                    "importPath": "../CardContent/YouTubePlayer",
                    "title": "Featured Video",
                    "height": "400px",
                    "componentProps": { "videoId": "HszHill46_M" }
                },
                { "id": 8, "importPath": "Clock", "componentProps": "not an object" }
            ]
        }"#;
        let response = CardsResponse::from_json(body).unwrap();
        assert!(response.success);
        assert_eq!(response.cards.len(), 2);

        let video = response.cards[0].content_reference();
        assert_eq!(video.id.as_str(), "YouTubePlayer");
        assert_eq!(video.properties["videoId"], "HszHill46_M");

        let clock = response.cards[1].content_reference();
        assert_eq!(clock.id.as_str(), "Clock");
        assert!(clock.properties.is_empty());
    }

    #[test]
    fn failed_response_without_cards() {
        let response = CardsResponse::from_json(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.cards.is_empty());
        assert!(CardsResponse::from_json("[]").is_err());
    }
}
