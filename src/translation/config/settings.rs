//! 持久化设置存储
//!
//! 对应浏览器扩展的 `storage.local`：以字符串为键、JSON 值为值的异步键值存储。
//! 核心只读取 `translationMode`；`groqApiKey` 由宿主端传输层读取，
//! 其余键（风格、级别、主题）属于设置界面。

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::constants;
use crate::translation::error::{TranslationError, TranslationResult};

/// 异步键值设置存储
#[async_trait(?Send)]
pub trait SettingsStore {
    /// 读取键值，不存在时返回 `None`
    async fn get(&self, key: &str) -> TranslationResult<Option<Value>>;

    /// 写入键值
    async fn set(&self, key: &str, value: Value) -> TranslationResult<()>;

    /// 删除键
    async fn remove(&self, key: &str) -> TranslationResult<()>;

    /// 读取字符串类型的键值；非字符串值视为不存在
    async fn get_string(&self, key: &str) -> TranslationResult<Option<String>> {
        Ok(self
            .get(key)
            .await?
            .and_then(|value| value.as_str().map(str::to_string)))
    }
}

/// 共享同一个存储
#[async_trait(?Send)]
impl<S: SettingsStore + ?Sized> SettingsStore for Rc<S> {
    async fn get(&self, key: &str) -> TranslationResult<Option<Value>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> TranslationResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> TranslationResult<()> {
        (**self).remove(key).await
    }
}

/// 风格与语言级别设置（`translationSettings`）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationSettings {
    pub style: String,
    pub level: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            style: "hinglish".to_string(),
            level: "balanced".to_string(),
        }
    }
}

impl TranslationSettings {
    /// 从设置存储读取，缺失或格式不符时使用默认值
    pub async fn load<S: SettingsStore + ?Sized>(store: &S) -> TranslationResult<Self> {
        let value = store.get(constants::SETTING_TRANSLATION_SETTINGS).await?;
        Ok(value
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default())
    }
}

/// 内存设置存储，可从 JSON 文件载入或保存到 JSON 文件
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象构建
    pub fn from_json(content: &str) -> TranslationResult<Self> {
        let entries: HashMap<String, Value> = serde_json::from_str(content)?;
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// 从 JSON 文件载入
    pub async fn from_json_file(path: &Path) -> TranslationResult<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            TranslationError::SettingsError(format!(
                "读取设置文件失败 {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// 保存为 JSON 文件
    pub async fn save_to_json_file(&self, path: &Path) -> TranslationResult<()> {
        let content = {
            let entries = self.read_entries()?;
            serde_json::to_string_pretty(&*entries)?
        };
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    fn read_entries(
        &self,
    ) -> TranslationResult<std::sync::RwLockReadGuard<'_, HashMap<String, Value>>> {
        self.entries
            .read()
            .map_err(|_| TranslationError::SettingsError("设置存储锁已损坏".to_string()))
    }

    fn write_entries(
        &self,
    ) -> TranslationResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Value>>> {
        self.entries
            .write()
            .map_err(|_| TranslationError::SettingsError("设置存储锁已损坏".to_string()))
    }
}

#[async_trait(?Send)]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> TranslationResult<Option<Value>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> TranslationResult<()> {
        self.write_entries()?.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> TranslationResult<()> {
        self.write_entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_set_remove() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.get("translationMode").await.unwrap(), None);

        store
            .set("translationMode", json!("paragraphs"))
            .await
            .unwrap();
        assert_eq!(
            store.get_string("translationMode").await.unwrap().as_deref(),
            Some("paragraphs")
        );

        store.remove("translationMode").await.unwrap();
        assert_eq!(store.get_string("translationMode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_string_values_are_not_strings() {
        let store = MemorySettingsStore::from_json(r#"{"translationMode": 3}"#).unwrap();
        assert_eq!(store.get_string("translationMode").await.unwrap(), None);
        assert_eq!(
            store.get("translationMode").await.unwrap(),
            Some(json!(3))
        );
    }

    #[tokio::test]
    async fn test_translation_settings_defaults_and_stored_values() {
        let store = MemorySettingsStore::new();
        assert_eq!(
            TranslationSettings::load(&store).await.unwrap(),
            TranslationSettings::default()
        );

        let store = MemorySettingsStore::from_json(
            r#"{"translationSettings": {"style": "hinglish", "level": "casual"}}"#,
        )
        .unwrap();
        let settings = TranslationSettings::load(&store).await.unwrap();
        assert_eq!(settings.level, "casual");
    }

    #[tokio::test]
    async fn test_shared_store_sees_writes() {
        let store = Rc::new(MemorySettingsStore::new());
        let shared = Rc::clone(&store);

        shared.set("themeMode", json!("dark")).await.unwrap();
        assert_eq!(
            store.get_string("themeMode").await.unwrap().as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn test_json_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "hinglish-settings-{}.json",
            std::process::id()
        ));
        let store = MemorySettingsStore::new();
        store.set("groqApiKey", json!("gsk_test")).await.unwrap();
        store.save_to_json_file(&path).await.unwrap();

        let loaded = MemorySettingsStore::from_json_file(&path).await.unwrap();
        assert_eq!(
            loaded.get_string("groqApiKey").await.unwrap().as_deref(),
            Some("gsk_test")
        );
        let _ = std::fs::remove_file(&path);
    }
}
