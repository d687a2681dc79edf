//! 缓存层
//!
//! 通过 `ObjectCache` trait 抽象缓存后端，Moka（内存）与 Redis 两种实现
//! 在编译期通过 `declare_object_cache_plugin!` 宏注册到插件表，
//! 启动时按配置选择并在失败时回退到内存缓存。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存插件
///
/// 在插件模块中调用，进程启动时（ctor）将构造函数登记到插件表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ty) => {
        #[ctor::ctor]
        fn register_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    let future: $crate::cache::register::BoxedObjectCacheFuture =
                        Box::pin(async {
                            let cache = <$plugin>::new()
                                .map_err($crate::errors::ClassHubError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        });
                    future
                }),
            );
        }
    };
}
