// ==========================================
// 商品目录导入系统 - 上传配置读取 Trait
// ==========================================
// 职责: 定义上传流程所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// 约定常量（批大小 50 / 默认库存 / 默认标签）不在此处
// ==========================================

use async_trait::async_trait;
use std::error::Error;

/// 配置读取结果
pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// UploadConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait UploadConfigReader: Send + Sync {
    /// 获取目录服务批量写入接口地址
    ///
    /// # 默认值
    /// - http://localhost:3000/api/products/bulk
    async fn get_ingest_endpoint(&self) -> ConfigResult<String>;

    /// 获取单批超时（秒）
    ///
    /// # 默认值
    /// - 60（≤ 0 或无法解析时回退）
    async fn get_batch_timeout_secs(&self) -> ConfigResult<u64>;

    /// 获取汇总中展示的失败条数
    ///
    /// # 默认值
    /// - 10
    async fn get_failure_sample_limit(&self) -> ConfigResult<usize>;
}
