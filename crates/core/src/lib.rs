#![forbid(unsafe_code)]

pub mod blob;
pub mod model;

pub mod ids {
    /// Tenant/project scope every asset and ordered collection lives under.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct CollectionId(String);

    impl CollectionId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, CollectionIdError> {
            let value = value.into();
            validate_collection_id(&value)?;
            Ok(Self(value))
        }
    }

    impl std::fmt::Display for CollectionId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum CollectionIdError {
        Empty,
        TooLong,
        InvalidFirstChar,
        InvalidChar { ch: char, index: usize },
    }

    impl CollectionIdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "collection id must not be empty",
                Self::TooLong => "collection id is too long",
                Self::InvalidFirstChar => "collection id must start with an ascii alphanumeric",
                Self::InvalidChar { .. } => "collection id contains an invalid character",
            }
        }
    }

    const MAX_COLLECTION_ID_LEN: usize = 128;

    fn validate_collection_id(value: &str) -> Result<(), CollectionIdError> {
        if value.is_empty() {
            return Err(CollectionIdError::Empty);
        }
        if value.len() > MAX_COLLECTION_ID_LEN {
            return Err(CollectionIdError::TooLong);
        }
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return Err(CollectionIdError::Empty);
        };
        if !first.is_ascii_alphanumeric() {
            return Err(CollectionIdError::InvalidFirstChar);
        }
        for (offset, ch) in chars.enumerate() {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '/' | '-') {
                continue;
            }
            return Err(CollectionIdError::InvalidChar {
                ch,
                index: offset + 1,
            });
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn collection_id_validation() {
            assert_eq!(
                CollectionId::try_new("").unwrap_err(),
                CollectionIdError::Empty
            );
            assert_eq!(
                CollectionId::try_new("-proj").unwrap_err(),
                CollectionIdError::InvalidFirstChar
            );
            assert_eq!(
                CollectionId::try_new("proj 1").unwrap_err(),
                CollectionIdError::InvalidChar { ch: ' ', index: 4 }
            );
            assert_eq!(
                CollectionId::try_new("p".repeat(129)).unwrap_err(),
                CollectionIdError::TooLong
            );
            assert_eq!(
                CollectionId::try_new("proj-42/lib").unwrap().as_str(),
                "proj-42/lib"
            );
        }
    }
}
