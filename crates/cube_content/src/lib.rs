pub mod card_data;
pub mod registration;
pub mod selection;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use card_data::{CardData, CardsResponse};
pub use selection::{ComponentSelected, SelectionBus, SelectionSubscription, SubscriberId};

pub type ContentResult<T> = std::result::Result<T, ContentError>;

/// Property bag handed to a card when it renders.
pub type Properties = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ContentId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ContentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a face should show: a content identifier plus arbitrary properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReference {
    #[serde(rename = "contentIdentifier")]
    pub id: ContentId,
    #[serde(default)]
    pub properties: Properties,
}

impl ContentReference {
    pub fn new(id: impl Into<ContentId>) -> Self {
        Self {
            id: id.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_properties(id: impl Into<ContentId>, properties: Properties) -> Self {
        Self {
            id: id.into(),
            properties,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// User-facing description provided by cards to populate selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDescriptor {
    pub id: ContentId,
    pub label: String,
    pub description: String,
}

impl CardDescriptor {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ContentId::new(id),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Rendered output of a card, ready to be placed inside a face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFragment {
    pub content_id: ContentId,
    pub title: String,
    pub lines: Vec<String>,
}

impl CardFragment {
    pub fn new(content_id: ContentId, title: impl Into<String>) -> Self {
        Self {
            content_id,
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Trait implemented by every card that can be hosted on a cube face.
pub trait CardContent: Send {
    /// Returns metadata describing this card.
    fn descriptor(&self) -> CardDescriptor;

    /// Renders the card for the given properties.
    fn render(&self, properties: &Properties) -> ContentResult<CardFragment>;
}

/// Seam between the compositor and whatever turns a reference into a fragment.
pub trait ContentResolver {
    fn resolve(&self, reference: &ContentReference) -> ContentResult<CardFragment>;
}

/// Closed set of content identifiers mapped to their cards, built at startup.
#[derive(Default)]
pub struct ContentRegistry {
    cards: HashMap<String, CardEntry>,
}

struct CardEntry {
    descriptor: CardDescriptor,
    card: Box<dyn CardContent>,
}

impl ContentRegistry {
    pub fn register(&mut self, card: Box<dyn CardContent>) -> ContentResult<()> {
        let descriptor = card.descriptor();
        if descriptor.id.is_empty() {
            return Err(ContentError::EmptyReference);
        }
        if self.cards.contains_key(descriptor.id.as_str()) {
            return Err(ContentError::CardExists(descriptor.id.as_str().to_owned()));
        }

        tracing::debug!(card = descriptor.id.as_str(), "registered card");
        self.cards
            .insert(descriptor.id.as_str().to_owned(), CardEntry { descriptor, card });

        Ok(())
    }

    pub fn contains(&self, id: &ContentId) -> bool {
        self.cards.contains_key(id.as_str())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Descriptors sorted by label.
    pub fn descriptors(&self) -> Vec<&CardDescriptor> {
        let mut descriptors: Vec<_> = self.cards.values().map(|entry| &entry.descriptor).collect();
        descriptors.sort_by(|a, b| a.label.cmp(&b.label));
        descriptors
    }

    pub fn card(&self, id: &ContentId) -> ContentResult<&dyn CardContent> {
        let entry = self
            .cards
            .get(id.as_str())
            .ok_or_else(|| ContentError::CardMissing(id.as_str().to_owned()))?;
        Ok(entry.card.as_ref())
    }

    pub fn resolve(&self, reference: &ContentReference) -> ContentResult<CardFragment> {
        if reference.is_empty() {
            return Err(ContentError::EmptyReference);
        }
        self.card(&reference.id)?.render(&reference.properties)
    }
}

impl ContentResolver for ContentRegistry {
    fn resolve(&self, reference: &ContentReference) -> ContentResult<CardFragment> {
        ContentRegistry::resolve(self, reference)
    }
}

/// Errors surfaced when registering or resolving card content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("card `{0}` already registered")]
    CardExists(String),
    #[error("card `{0}` is not registered")]
    CardMissing(String),
    #[error("no component specified")]
    EmptyReference,
    #[error("invalid properties for `{id}`: {reason}")]
    InvalidProperties { id: String, reason: String },
    #[error("card payload could not be decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ContentError {
    pub fn invalid(id: &ContentId, reason: impl Into<String>) -> Self {
        Self::InvalidProperties {
            id: id.as_str().to_owned(),
            reason: reason.into(),
        }
    }
}
