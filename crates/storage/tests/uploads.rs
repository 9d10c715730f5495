use rusqlite::Connection;
use sl_core::blob::BlobStore;
use sl_core::ids::CollectionId;
use sl_core::model::{AssetScope, ContentKind, OwnerKind, VersionSource, VersionStatus};
use sl_storage::{SqliteStore, StoreConfig, StoreError, UploadRequest};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_storage_dir(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic enough for tests")
        .as_nanos();
    path.push(format!(
        "sl-storage-uploads-{label}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&path).expect("temp storage dir must be creatable");
    path
}

#[derive(Debug, thiserror::Error)]
#[error("object not found: {0}")]
struct MissingObject(String);

#[derive(Default)]
struct MemoryBlobs {
    objects: RefCell<BTreeMap<String, Vec<u8>>>,
    puts: RefCell<usize>,
}

impl BlobStore for MemoryBlobs {
    type Error = MissingObject;

    fn put(&self, bytes: &[u8], content_type_hint: &str) -> Result<String, Self::Error> {
        let mut puts = self.puts.borrow_mut();
        *puts += 1;
        let extension = content_type_hint.rsplit('/').next().unwrap_or("bin");
        let location = format!("https://blobs.example/uploads/{}.{extension}", *puts);
        self.objects
            .borrow_mut()
            .insert(location.clone(), bytes.to_vec());
        Ok(location)
    }

    fn get(&self, location: &str) -> Result<Vec<u8>, Self::Error> {
        self.objects
            .borrow()
            .get(location)
            .cloned()
            .ok_or_else(|| MissingObject(location.to_string()))
    }

    fn delete(&self, location: &str) -> Result<(), Self::Error> {
        self.objects
            .borrow_mut()
            .remove(location)
            .map(|_| ())
            .ok_or_else(|| MissingObject(location.to_string()))
    }
}

fn scene_scope() -> AssetScope {
    AssetScope::new(
        CollectionId::try_new("project-u").expect("collection id"),
        OwnerKind::ProjectScene,
        3,
        ContentKind::Image,
    )
}

#[test]
fn upload_records_a_ready_uploaded_version() {
    let dir = temp_storage_dir("ok");
    let mut store = SqliteStore::open(&dir).expect("open store");
    let blobs = MemoryBlobs::default();
    let scope = scene_scope();

    let recorded = store
        .record_upload(
            &blobs,
            UploadRequest {
                scope: scope.clone(),
                bytes: vec![0x89, b'P', b'N', b'G'],
                content_type: "image/png".to_string(),
                created_by: Some(17),
            },
        )
        .expect("record upload");
    assert!(recorded.adopted);

    let version = store
        .get_version(&scope.collection_id, recorded.version_id)
        .expect("get version");
    assert_eq!(version.source, VersionSource::Uploaded);
    assert_eq!(version.status, VersionStatus::Ready);
    assert_eq!(version.created_by, Some(17));
    assert_eq!(version.object_key.as_deref(), Some("uploads/1.png"));
    let location = version.location.expect("location");
    assert_eq!(blobs.get(&location).expect("stored bytes"), vec![0x89, b'P', b'N', b'G']);
}

#[test]
fn policy_violations_never_reach_the_blob_store() {
    let dir = temp_storage_dir("policy");
    let config = StoreConfig {
        max_upload_bytes: 4,
        ..StoreConfig::with_storage_dir(&dir)
    };
    let mut store = SqliteStore::open_with_config(config).expect("open store");
    let blobs = MemoryBlobs::default();

    for (bytes, content_type) in [
        (vec![1, 2, 3], "video/mp4"),
        (Vec::new(), "image/png"),
        (vec![1, 2, 3, 4, 5], "image/jpeg"),
    ] {
        let err = store
            .record_upload(
                &blobs,
                UploadRequest {
                    scope: scene_scope(),
                    bytes,
                    content_type: content_type.to_string(),
                    created_by: None,
                },
            )
            .expect_err("upload must be rejected");
        assert_eq!(err.code(), "UPLOAD_REJECTED");
    }
    assert_eq!(*blobs.puts.borrow(), 0);
    assert!(store.find_asset(&scene_scope().slot().expect("slot")).expect("find").is_none());
}

#[test]
fn failed_recording_deletes_the_uploaded_object() {
    let dir = temp_storage_dir("cleanup");
    let mut store = SqliteStore::open(&dir).expect("open store");
    let blobs = MemoryBlobs::default();

    {
        let conn = Connection::open(dir.join("storyledger.db")).expect("raw db must open");
        conn.execute_batch(
            "CREATE TRIGGER block_versions BEFORE INSERT ON asset_version \
             BEGIN SELECT RAISE(ABORT, 'versions are frozen'); END;",
        )
        .expect("install trigger");
    }

    let err = store
        .record_upload(
            &blobs,
            UploadRequest {
                scope: scene_scope(),
                bytes: vec![1, 2, 3],
                content_type: "image/webp".to_string(),
                created_by: None,
            },
        )
        .expect_err("recording must fail");
    assert!(!matches!(err, StoreError::UploadRejected(_)));
    assert_eq!(*blobs.puts.borrow(), 1);
    assert!(blobs.objects.borrow().is_empty());
    assert!(store.find_asset(&scene_scope().slot().expect("slot")).expect("find").is_none());
}
