use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::PathBuf,
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// Generic JSON file-backed document.
///
/// The whole document is read from disk at the start of every operation and
/// written back in full after every mutation; nothing is cached between calls.
/// A per-document mutex keeps read-modify-write cycles from interleaving within
/// the process.
pub struct JsonDocument<T> {
    file_path: PathBuf,
    lock: Mutex<()>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), lock: Mutex::new(()), _doc: PhantomData }
    }

    /// Load the document. Missing, empty or unparsable files yield `T::default()`.
    pub async fn load(&self) -> T {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Overwrite the file with the given document.
    pub async fn save(&self, doc: &T) -> Result<(), ServiceError> {
        let _guard = self.lock.lock().await;
        self.write(doc).await
    }

    /// Load fresh state, apply `f`, and persist the result if `f` succeeds.
    /// When `f` fails nothing is written.
    pub async fn update<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<ServiceError>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.read().await;
        let out = f(&mut doc)?;
        self.write(&doc).await?;
        Ok(out)
    }

    async fn read(&self) -> T {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "cannot read document; using empty default");
                return T::default();
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return T::default();
        }
        match serde_json::from_slice(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "malformed document; using empty default");
                T::default()
            }
        }
    }

    async fn write(&self, doc: &T) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }
        let data = serde_json::to_vec_pretty(doc).map_err(ServiceError::storage)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
        fs::rename(&tmp, &self.file_path).await.map_err(ServiceError::storage)?;
        debug!(path = %self.file_path.display(), "document saved");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tmp_file(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("json_document_{tag}_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_empty_and_malformed_files_load_as_default() -> Result<(), anyhow::Error> {
        let path = tmp_file("defaults");
        let doc = JsonDocument::<HashMap<String, Vec<String>>>::new(&path);
        assert!(doc.load().await.is_empty());
        assert!(tokio::fs::metadata(&path).await.is_err());

        tokio::fs::write(&path, b"   \n").await?;
        assert!(doc.load().await.is_empty());

        tokio::fs::write(&path, b"{not json").await?;
        assert!(doc.load().await.is_empty());

        // a list where a map is expected is also treated as empty
        tokio::fs::write(&path, b"[1, 2, 3]").await?;
        assert!(doc.load().await.is_empty());

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_round_trips_and_creates_parents() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("json_document_dir_{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("doc.json");
        let doc = JsonDocument::<HashMap<String, Vec<String>>>::new(&path);

        let mut data = HashMap::new();
        data.insert("alice".to_string(), vec!["a".to_string(), "b".to_string()]);
        data.insert("bob".to_string(), vec![]);
        doc.save(&data).await?;

        let reopened = JsonDocument::<HashMap<String, Vec<String>>>::new(&path);
        assert_eq!(reopened.load().await, data);
        assert!(!doc.tmp_path().exists());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_leaves_file_untouched() -> Result<(), anyhow::Error> {
        let path = tmp_file("update");
        let doc = JsonDocument::<Vec<u32>>::new(&path);

        let len = doc
            .update(|v| -> Result<usize, ServiceError> {
                v.push(1);
                v.push(2);
                Ok(v.len())
            })
            .await?;
        assert_eq!(len, 2);

        let before = tokio::fs::read(&path).await?;
        let res = doc
            .update(|v| -> Result<(), ServiceError> {
                v.clear();
                Err(ServiceError::not_found("item"))
            })
            .await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(tokio::fs::read(&path).await?, before);
        assert_eq!(doc.load().await, vec![1, 2]);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_updates_are_not_lost() -> Result<(), anyhow::Error> {
        let path = tmp_file("concurrent");
        let doc = std::sync::Arc::new(JsonDocument::<Vec<u32>>::new(&path));

        let mut handles = Vec::new();
        for i in 0..16u32 {
            let doc = doc.clone();
            handles.push(tokio::spawn(async move {
                doc.update(|v| -> Result<(), ServiceError> {
                    v.push(i);
                    Ok(())
                })
                .await
            }));
        }
        for h in handles {
            h.await??;
        }
        let mut all = doc.load().await;
        all.sort();
        assert_eq!(all, (0..16).collect::<Vec<_>>());

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
