// ==========================================
// 商品目录导入系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope，目前仅使用 'global')
// ==========================================

use crate::config::upload_config_trait::{ConfigResult, UploadConfigReader};
use crate::db::{ensure_config_schema, open_sqlite_connection};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（自动建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 并建表（均幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
            ensure_config_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 配置（存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global', ?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON，按键排序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

// ==========================================
// UploadConfigReader Trait 实现
// ==========================================
#[async_trait]
impl UploadConfigReader for ConfigManager {
    async fn get_ingest_endpoint(&self) -> ConfigResult<String> {
        let value =
            self.get_config_or_default(config_keys::INGEST_ENDPOINT, defaults::INGEST_ENDPOINT)?;
        let value = value.trim();
        if value.is_empty() {
            warn!(config_key = config_keys::INGEST_ENDPOINT, "接口地址为空，使用默认值");
            return Ok(defaults::INGEST_ENDPOINT.to_string());
        }
        Ok(value.to_string())
    }

    async fn get_batch_timeout_secs(&self) -> ConfigResult<u64> {
        let value = self.get_config_or_default(
            config_keys::BATCH_TIMEOUT_SECS,
            &defaults::BATCH_TIMEOUT_SECS.to_string(),
        )?;
        match value.trim().parse::<i64>() {
            Ok(secs) if secs > 0 => Ok(secs as u64),
            _ => {
                warn!(
                    config_key = config_keys::BATCH_TIMEOUT_SECS,
                    raw_value = %value,
                    "批次超时配置无效，使用默认值"
                );
                Ok(defaults::BATCH_TIMEOUT_SECS)
            }
        }
    }

    async fn get_failure_sample_limit(&self) -> ConfigResult<usize> {
        let value = self.get_config_or_default(
            config_keys::FAILURE_SAMPLE_LIMIT,
            &defaults::FAILURE_SAMPLE_LIMIT.to_string(),
        )?;
        match value.trim().parse::<usize>() {
            Ok(limit) => Ok(limit),
            Err(_) => {
                warn!(
                    config_key = config_keys::FAILURE_SAMPLE_LIMIT,
                    raw_value = %value,
                    "失败展示条数配置格式错误，使用默认值"
                );
                Ok(defaults::FAILURE_SAMPLE_LIMIT)
            }
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 目录服务
    pub const INGEST_ENDPOINT: &str = "ingest_endpoint";
    pub const BATCH_TIMEOUT_SECS: &str = "batch_timeout_secs";

    // 汇总展示
    pub const FAILURE_SAMPLE_LIMIT: &str = "failure_sample_limit";
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const INGEST_ENDPOINT: &str = "http://localhost:3000/api/products/bulk";
    pub const BATCH_TIMEOUT_SECS: u64 = 60;
    pub const FAILURE_SAMPLE_LIMIT: usize = 10;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn manager() -> (NamedTempFile, ConfigManager) {
        let temp_file = NamedTempFile::new().unwrap();
        let manager = ConfigManager::new(temp_file.path().to_str().unwrap()).unwrap();
        (temp_file, manager)
    }

    #[tokio::test]
    async fn test_defaults_when_empty() {
        let (_tmp, config) = manager();

        assert_eq!(
            config.get_ingest_endpoint().await.unwrap(),
            defaults::INGEST_ENDPOINT
        );
        assert_eq!(config.get_batch_timeout_secs().await.unwrap(), 60);
        assert_eq!(config.get_failure_sample_limit().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_set_and_read_back() {
        let (_tmp, config) = manager();

        config
            .set_config_value(config_keys::INGEST_ENDPOINT, "http://catalog.local/bulk")
            .unwrap();
        config
            .set_config_value(config_keys::BATCH_TIMEOUT_SECS, "15")
            .unwrap();
        config
            .set_config_value(config_keys::BATCH_TIMEOUT_SECS, "20")
            .unwrap();

        assert_eq!(
            config.get_ingest_endpoint().await.unwrap(),
            "http://catalog.local/bulk"
        );
        assert_eq!(config.get_batch_timeout_secs().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn test_invalid_values_fall_back() {
        let (_tmp, config) = manager();

        config
            .set_config_value(config_keys::BATCH_TIMEOUT_SECS, "0")
            .unwrap();
        config
            .set_config_value(config_keys::FAILURE_SAMPLE_LIMIT, "ten")
            .unwrap();
        config.set_config_value(config_keys::INGEST_ENDPOINT, "  ").unwrap();

        assert_eq!(config.get_batch_timeout_secs().await.unwrap(), 60);
        assert_eq!(config.get_failure_sample_limit().await.unwrap(), 10);
        assert_eq!(
            config.get_ingest_endpoint().await.unwrap(),
            defaults::INGEST_ENDPOINT
        );
    }

    #[test]
    fn test_snapshot_sorted_by_key() {
        let (_tmp, config) = manager();
        config
            .set_config_value(config_keys::FAILURE_SAMPLE_LIMIT, "5")
            .unwrap();
        config
            .set_config_value(config_keys::BATCH_TIMEOUT_SECS, "30")
            .unwrap();

        let snapshot = config.get_config_snapshot().unwrap();
        assert_eq!(
            snapshot,
            r#"{"batch_timeout_secs":"30","failure_sample_limit":"5"}"#
        );
    }
}
