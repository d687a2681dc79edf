use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 键不存在
    NotFound,
    /// 键存在但取值失败（如后端连接异常）
    ExistsButNoValue,
}

/// 对象缓存后端
///
/// 以字符串键值对为粒度，序列化由调用方负责。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}
