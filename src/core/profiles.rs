use crate::domain::model::{DoctorProfiles, NewProfile, ProfileList};
use crate::domain::ports::{ProfileSource, Storage};
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::validate_non_empty_string;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde_json::Value;
use std::cmp::Ordering;

fn parse_json(path: &str, bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| MatchError::ProfileFormatError {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a profile file for the matcher. Any valid JSON document is kept as is.
pub fn parse_profiles(path: &str, bytes: &[u8]) -> Result<DoctorProfiles> {
    parse_json(path, bytes).map(DoctorProfiles)
}

/// Parses the store's file, which must be a JSON array so records can be appended.
pub fn parse_profile_list(path: &str, bytes: &[u8]) -> Result<ProfileList> {
    match parse_json(path, bytes)? {
        Value::Array(items) => Ok(ProfileList(items)),
        other => Err(MatchError::ProfileFormatError {
            path: path.to_string(),
            reason: format!("expected a JSON array, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Profiles read from a JSON file through [`Storage`].
pub struct FileProfiles<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> FileProfiles<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> ProfileSource for FileProfiles<S> {
    async fn load_profiles(&self) -> Result<DoctorProfiles> {
        let bytes = self.storage.read_file(&self.path).await?;
        let profiles = parse_profiles(&self.path, &bytes)?;
        tracing::info!(
            "Loaded doctor profiles from {} ({})",
            self.path,
            json_kind(&profiles.0)
        );
        Ok(profiles)
    }
}

/// Profiles handed over by the caller, e.g. in a request body.
pub struct InlineProfiles {
    profiles: DoctorProfiles,
}

impl InlineProfiles {
    pub fn new(profiles: impl Into<DoctorProfiles>) -> Self {
        Self {
            profiles: profiles.into(),
        }
    }
}

#[async_trait]
impl ProfileSource for InlineProfiles {
    async fn load_profiles(&self) -> Result<DoctorProfiles> {
        Ok(self.profiles.clone())
    }
}

/// Volunteer sign-ups kept in the same JSON file the matcher reads.
pub struct ProfileStore<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> ProfileStore<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    async fn load(&self) -> Result<ProfileList> {
        if !self.storage.exists(&self.path).await {
            tracing::debug!("{} does not exist yet, treating as empty", self.path);
            return Ok(ProfileList::default());
        }
        let bytes = self.storage.read_file(&self.path).await?;
        parse_profile_list(&self.path, &bytes)
    }

    /// Newest first; records without a readable `created_at` go last.
    pub async fn list(&self) -> Result<ProfileList> {
        let mut profiles = self.load().await?;
        profiles.0.sort_by(|a, b| match (created_at(a), created_at(b)) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(profiles)
    }

    pub async fn save(&self, profile: NewProfile) -> Result<Value> {
        validate_non_empty_string("fullname", &profile.fullname).map_err(|_| {
            MatchError::ValidationError {
                message: "fullname is required".to_string(),
            }
        })?;

        let mut profiles = self.load().await?;
        let next_id = profiles
            .iter()
            .filter_map(|p| p.get("id").and_then(Value::as_u64))
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| MatchError::ValidationError {
                message: format!("{} has no id left to assign", self.path),
            })?;

        let mut record = serde_json::to_value(&profile)?;
        if let Value::Object(map) = &mut record {
            map.insert("id".to_string(), Value::from(next_id));
            map.insert(
                "created_at".to_string(),
                Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }

        profiles.0.push(record.clone());
        let data = serde_json::to_vec_pretty(&profiles)?;
        self.storage.write_file(&self.path, &data).await?;

        tracing::info!(
            "Saved profile #{} ({}) to {}",
            next_id,
            profile.fullname,
            self.path
        );
        Ok(record)
    }
}

fn created_at(profile: &Value) -> Option<DateTime<FixedOffset>> {
    profile
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn with_file(self, path: &str, data: &[u8]) -> Self {
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.to_vec());
            self
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                MatchError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn exists(&self, path: &str) -> bool {
            self.files.lock().await.contains_key(path)
        }
    }

    #[test]
    fn test_matcher_parse_keeps_any_json_document() {
        let profiles =
            parse_profiles("profiles.json", br#"{"doctors": [{"name": "Dr. A"}]}"#).unwrap();
        assert_eq!(profiles.0["doctors"][0]["name"], "Dr. A");

        let err = parse_profiles("profiles.json", b"name: Dr. A").unwrap_err();
        assert!(matches!(err, MatchError::ProfileFormatError { .. }));
    }

    #[test]
    fn test_store_parse_rejects_non_array() {
        let err = parse_profile_list("profiles.json", br#"{"name": "Dr. A"}"#).unwrap_err();
        match err {
            MatchError::ProfileFormatError { reason, .. } => assert!(reason.contains("an object")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_profile_list("profiles.json", b"[{\"name\": ").unwrap_err();
        assert!(matches!(err, MatchError::ProfileFormatError { .. }));
    }

    #[tokio::test]
    async fn test_file_profiles_keep_records_opaque() {
        let storage = MockStorage::new()
            .with_file(
                "profiles.json",
                br#"[{"fullname": "Sara Ahmed", "languages": ["Arabic"]}, 42, "free text"]"#,
            )
            .await;
        let source = FileProfiles::new(storage, "profiles.json");

        let profiles = source.load_profiles().await.unwrap();
        assert_eq!(profiles.0.as_array().map(Vec::len), Some(3));
        assert_eq!(profiles.0[1], json!(42));
    }

    #[tokio::test]
    async fn test_file_profiles_accept_object_document() {
        let storage = MockStorage::new()
            .with_file(
                "profiles.json",
                br#"{"clinic": "Remote", "doctors": [{"name": "Dr. A"}]}"#,
            )
            .await;
        let source = FileProfiles::new(storage, "profiles.json");

        let profiles = source.load_profiles().await.unwrap();
        assert_eq!(profiles.0["clinic"], "Remote");
        assert!(!profiles.is_empty());
    }

    #[test]
    fn test_empty_documents() {
        assert!(DoctorProfiles(json!(null)).is_empty());
        assert!(DoctorProfiles(json!([])).is_empty());
        assert!(DoctorProfiles(json!({})).is_empty());
        assert!(!DoctorProfiles(json!("Dr. A, pediatrics")).is_empty());
    }

    #[tokio::test]
    async fn test_save_refuses_to_overflow_ids() {
        let storage = MockStorage::new()
            .with_file(
                "profiles.json",
                format!(r#"[{{"id": {}, "fullname": "Last"}}]"#, u64::MAX).as_bytes(),
            )
            .await;
        let store = ProfileStore::new(storage.clone(), "profiles.json");

        let err = store
            .save(NewProfile {
                fullname: "Sara Ahmed".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MatchError::ValidationError { .. }));
        let untouched = storage.get_file("profiles.json").await.unwrap();
        assert_eq!(parse_profile_list("profiles.json", &untouched).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_profiles_missing_file() {
        let source = FileProfiles::new(MockStorage::new(), "profiles.json");
        let err = source.load_profiles().await.unwrap_err();
        assert!(matches!(err, MatchError::IoError(_)));
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let storage = MockStorage::new()
            .with_file(
                "profiles.json",
                br#"[
                    {"fullname": "Old", "created_at": "2025-01-01T00:00:00Z"},
                    {"fullname": "Undated"},
                    {"fullname": "New", "created_at": "2025-06-01T12:00:00+02:00"}
                ]"#,
            )
            .await;
        let store = ProfileStore::new(storage, "profiles.json");

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|p| p["fullname"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["New", "Old", "Undated"]);
    }

    #[tokio::test]
    async fn test_list_missing_file_is_empty() {
        let store = ProfileStore::new(MockStorage::new(), "profiles.json");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_timestamp() {
        let storage = MockStorage::new()
            .with_file("profiles.json", br#"[{"id": 7, "fullname": "Existing"}]"#)
            .await;
        let store = ProfileStore::new(storage.clone(), "profiles.json");

        let saved = store
            .save(NewProfile {
                fullname: "Sara Ahmed".to_string(),
                phone: "+970 59 000 0000".to_string(),
                bio: "Pediatrician".to_string(),
                languages: vec!["Arabic".to_string(), "English".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(saved["id"], json!(8));
        assert!(created_at(&saved).is_some());

        let written = storage.get_file("profiles.json").await.unwrap();
        let stored = parse_profile_list("profiles.json", &written).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.0[1]["languages"], json!(["Arabic", "English"]));
    }

    #[tokio::test]
    async fn test_save_requires_fullname() {
        let store = ProfileStore::new(MockStorage::new(), "profiles.json");
        let err = store
            .save(NewProfile {
                fullname: "   ".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::ValidationError { .. }));
    }
}
