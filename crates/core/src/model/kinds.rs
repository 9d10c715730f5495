#![forbid(unsafe_code)]

/// Entity kind that hosts content slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OwnerKind {
    LibraryCharacter,
    ProjectCharacter,
    LibraryScene,
    ProjectScene,
    ProjectProp,
    SequenceItem,
}

impl OwnerKind {
    pub const ALL: [OwnerKind; 6] = [
        OwnerKind::LibraryCharacter,
        OwnerKind::ProjectCharacter,
        OwnerKind::LibraryScene,
        OwnerKind::ProjectScene,
        OwnerKind::ProjectProp,
        OwnerKind::SequenceItem,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OwnerKind::LibraryCharacter => "LIB_CHAR",
            OwnerKind::ProjectCharacter => "PCHAR",
            OwnerKind::LibraryScene => "LIB_SCENE",
            OwnerKind::ProjectScene => "PSCENE",
            OwnerKind::ProjectProp => "PPROP",
            OwnerKind::SequenceItem => "SHOT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    Image,
    Frame,
    Clip,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Image, ContentKind::Frame, ContentKind::Clip];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Image => "IMAGE",
            ContentKind::Frame => "SHOT_IMG",
            ContentKind::Clip => "VIDEO",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// MIME top-level type an upload of this kind must declare.
    pub fn media_prefix(self) -> &'static str {
        match self {
            ContentKind::Image | ContentKind::Frame => "image/",
            ContentKind::Clip => "video/",
        }
    }
}

/// Where a version's bytes came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VersionSource {
    Generated,
    Uploaded,
    Imported,
}

impl VersionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            VersionSource::Generated => "GENERATED",
            VersionSource::Uploaded => "UPLOADED",
            VersionSource::Imported => "IMPORTED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "GENERATED" => Some(VersionSource::Generated),
            "UPLOADED" => Some(VersionSource::Uploaded),
            "IMPORTED" => Some(VersionSource::Imported),
            _ => None,
        }
    }
}
