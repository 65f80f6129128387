use serde::{Deserialize, Serialize};

/// Kind of media asset attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Avatar,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Avatar => "avatar",
        }
    }
}

/// Preferred rendition of the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaVariant {
    #[default]
    Original,
    Thumbnail,
    Square,
}

impl MediaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Thumbnail => "thumbnail",
            Self::Square => "square",
        }
    }
}

/// Parameters for building (not fetching) a media URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRequest {
    pub entity_id: String,
    pub kind: MediaKind,
    #[serde(default)]
    pub variant: MediaVariant,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Append the media credential as a `token` query parameter.
    #[serde(default)]
    pub embed_credential: bool,
}

impl MediaRequest {
    pub fn new(entity_id: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            entity_id: entity_id.into(),
            kind,
            variant: MediaVariant::default(),
            width: None,
            height: None,
            embed_credential: false,
        }
    }

    pub fn variant(mut self, variant: MediaVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn embed_credential(mut self, embed: bool) -> Self {
        self.embed_credential = embed;
        self
    }
}
