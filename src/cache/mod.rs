//! 对象缓存
//!
//! 后端通过 `declare_object_cache_plugin!` 在进程启动前注册到插件表，
//! 启动流程按 `cache.type` 选择具体实现。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存后端
///
/// 类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            let constructor: $crate::cache::register::ObjectCacheConstructor =
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::AaieError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    }) as $crate::cache::register::BoxedObjectCacheFuture
                });
            $crate::cache::register::register_object_cache_plugin($name, constructor);
        }
    };
}
