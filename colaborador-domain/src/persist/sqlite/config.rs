use bon::Builder;
use serde::Deserialize;

/// SQLite 存储配置
#[derive(Debug, Clone, Builder, Deserialize)]
#[serde(default)]
pub struct SqliteStoreConfig {
    /// 连接串，如 `sqlite::memory:`、`sqlite://data/colaborador.db`
    #[builder(into, default = String::from(MEMORY_URL))]
    pub url: String,
    /// 连接池上限；内存库只能使用 1 个连接
    #[builder(default = 1)]
    pub max_connections: u32,
    /// 连接后是否执行建表语句
    #[builder(default = true)]
    pub create_schema: bool,
}

pub(crate) const MEMORY_URL: &str = "sqlite::memory:";

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SqliteStoreConfig {
    pub(crate) fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}
