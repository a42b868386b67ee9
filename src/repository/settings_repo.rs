// ==========================================
// 后厨计时系统 - 偏好/配置键值仓储
// ==========================================
// 存储: kitchen_kv 表 (key → JSON/文本 value)
// 红线: Repository 不做业务逻辑, 只做数据映射
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::preferences::{KitchenPreferences, KITCHEN_STORAGE_KEY};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct SettingsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SettingsRepository {
    /// 打开数据库文件并创建仓储
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 基于已有连接创建仓储（连接需已建表）
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 原始键值读写
    // ==========================================

    pub fn get_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kitchen_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn put_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO kitchen_kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 按前缀列出键值 (例如 "config/")
    pub fn list_prefixed(&self, prefix: &str) -> RepositoryResult<HashMap<String, String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT key, value FROM kitchen_kv WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;
        let rows = stmt.query_map(params![prefix], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut map = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            map.insert(key, value);
        }
        Ok(map)
    }

    // ==========================================
    // 偏好快照 (kitchen-storage)
    // ==========================================

    /// 读取偏好快照; 不存在时返回 None
    pub fn load_preferences(&self) -> RepositoryResult<Option<KitchenPreferences>> {
        match self.get_value(KITCHEN_STORAGE_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save_preferences(&self, prefs: &KitchenPreferences) -> RepositoryResult<()> {
        let raw = serde_json::to_string(prefs)?;
        self.put_value(KITCHEN_STORAGE_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preferences::ViewMode;

    fn setup_repo() -> SettingsRepository {
        let conn = crate::db::open_in_memory().unwrap();
        SettingsRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_preferences_round_trip() {
        let repo = setup_repo();
        assert!(repo.load_preferences().unwrap().is_none());

        let mut prefs = KitchenPreferences::default();
        prefs.view_mode = ViewMode::List;
        prefs.audio.volume = 35;
        repo.save_preferences(&prefs).unwrap();

        let loaded = repo.load_preferences().unwrap().unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_upsert_overwrites_value() {
        let repo = setup_repo();
        repo.put_value("config/rush_queue_threshold", "8").unwrap();
        repo.put_value("config/rush_queue_threshold", "12").unwrap();

        assert_eq!(
            repo.get_value("config/rush_queue_threshold").unwrap(),
            Some("12".to_string())
        );
    }

    #[test]
    fn test_list_prefixed_only_returns_matching_keys() {
        let repo = setup_repo();
        repo.put_value("config/a", "1").unwrap();
        repo.put_value("config/b", "2").unwrap();
        repo.put_value(KITCHEN_STORAGE_KEY, "{}").unwrap();

        let map = repo.list_prefixed("config/").unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("config/a"));
    }

    #[test]
    fn test_corrupt_snapshot_is_serialization_error() {
        let repo = setup_repo();
        repo.put_value(KITCHEN_STORAGE_KEY, "{not json").unwrap();

        let err = repo.load_preferences().unwrap_err();
        assert!(matches!(err, RepositoryError::SerializationError(_)));
    }
}
