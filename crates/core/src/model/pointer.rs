#![forbid(unsafe_code)]

use super::{ContentKind, OwnerKind};
use crate::ids::CollectionId;

/// A consumable content slot. One owner may host several slots (a sequence
/// item has both a frame and a clip), so lookups always carry the pointer type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointerType {
    LibraryCharacterPortrait,
    ProjectCharacterPortrait,
    LibraryScenePortrait,
    ProjectScenePortrait,
    ProjectPropPortrait,
    ItemFrame,
    ItemClip,
}

/// Static slot taxonomy: `(owner kind, content kind) -> pointer type`.
pub const POINTER_TYPES: &[(OwnerKind, ContentKind, PointerType)] = &[
    (
        OwnerKind::LibraryCharacter,
        ContentKind::Image,
        PointerType::LibraryCharacterPortrait,
    ),
    (
        OwnerKind::ProjectCharacter,
        ContentKind::Image,
        PointerType::ProjectCharacterPortrait,
    ),
    (
        OwnerKind::LibraryScene,
        ContentKind::Image,
        PointerType::LibraryScenePortrait,
    ),
    (
        OwnerKind::ProjectScene,
        ContentKind::Image,
        PointerType::ProjectScenePortrait,
    ),
    (
        OwnerKind::ProjectProp,
        ContentKind::Image,
        PointerType::ProjectPropPortrait,
    ),
    (
        OwnerKind::SequenceItem,
        ContentKind::Frame,
        PointerType::ItemFrame,
    ),
    (
        OwnerKind::SequenceItem,
        ContentKind::Clip,
        PointerType::ItemClip,
    ),
];

impl PointerType {
    pub fn as_str(self) -> &'static str {
        match self {
            PointerType::LibraryCharacterPortrait => "LIB_CHAR_CURRENT",
            PointerType::ProjectCharacterPortrait => "PCHAR_CURRENT",
            PointerType::LibraryScenePortrait => "LIB_SCENE_CURRENT",
            PointerType::ProjectScenePortrait => "PSCENE_CURRENT",
            PointerType::ProjectPropPortrait => "PPROP_CURRENT",
            PointerType::ItemFrame => "SHOT_IMG_CURRENT",
            PointerType::ItemClip => "SHOT_VIDEO_CURRENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        POINTER_TYPES
            .iter()
            .map(|(_, _, pointer)| *pointer)
            .find(|pointer| pointer.as_str() == value)
    }

    pub fn resolve(owner_kind: OwnerKind, content_kind: ContentKind) -> Option<Self> {
        POINTER_TYPES
            .iter()
            .find(|(owner, content, _)| *owner == owner_kind && *content == content_kind)
            .map(|(_, _, pointer)| *pointer)
    }

    pub fn owner_kind(self) -> OwnerKind {
        self.entry().0
    }

    pub fn content_kind(self) -> ContentKind {
        self.entry().1
    }

    fn entry(self) -> (OwnerKind, ContentKind) {
        match self {
            PointerType::LibraryCharacterPortrait => (OwnerKind::LibraryCharacter, ContentKind::Image),
            PointerType::ProjectCharacterPortrait => (OwnerKind::ProjectCharacter, ContentKind::Image),
            PointerType::LibraryScenePortrait => (OwnerKind::LibraryScene, ContentKind::Image),
            PointerType::ProjectScenePortrait => (OwnerKind::ProjectScene, ContentKind::Image),
            PointerType::ProjectPropPortrait => (OwnerKind::ProjectProp, ContentKind::Image),
            PointerType::ItemFrame => (OwnerKind::SequenceItem, ContentKind::Frame),
            PointerType::ItemClip => (OwnerKind::SequenceItem, ContentKind::Clip),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotError {
    UnsupportedCombination {
        owner_kind: OwnerKind,
        content_kind: ContentKind,
    },
}

impl SlotError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnsupportedCombination { .. } => {
                "owner kind does not host this content kind"
            }
        }
    }
}

/// Key of the current-pointer indirection: `(collection, pointer type, owner)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub collection_id: CollectionId,
    pub pointer_type: PointerType,
    pub owner_id: i64,
}

impl SlotKey {
    pub fn new(collection_id: CollectionId, pointer_type: PointerType, owner_id: i64) -> Self {
        Self {
            collection_id,
            pointer_type,
            owner_id,
        }
    }
}

/// Identity of a logical asset before it exists: who owns it and what it holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetScope {
    pub collection_id: CollectionId,
    pub owner_kind: OwnerKind,
    pub owner_id: i64,
    pub content_kind: ContentKind,
}

impl AssetScope {
    pub fn new(
        collection_id: CollectionId,
        owner_kind: OwnerKind,
        owner_id: i64,
        content_kind: ContentKind,
    ) -> Self {
        Self {
            collection_id,
            owner_kind,
            owner_id,
            content_kind,
        }
    }

    pub fn pointer_type(&self) -> Result<PointerType, SlotError> {
        PointerType::resolve(self.owner_kind, self.content_kind).ok_or(
            SlotError::UnsupportedCombination {
                owner_kind: self.owner_kind,
                content_kind: self.content_kind,
            },
        )
    }

    pub fn slot(&self) -> Result<SlotKey, SlotError> {
        Ok(SlotKey::new(
            self.collection_id.clone(),
            self.pointer_type()?,
            self.owner_id,
        ))
    }
}

impl From<&SlotKey> for AssetScope {
    fn from(key: &SlotKey) -> Self {
        Self {
            collection_id: key.collection_id.clone(),
            owner_kind: key.pointer_type.owner_kind(),
            owner_id: key.owner_id,
            content_kind: key.pointer_type.content_kind(),
        }
    }
}
