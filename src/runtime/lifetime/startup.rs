use crate::cache::register::{FALLBACK_CACHE_PLUGIN, get_object_cache_plugin};
use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::errors::{AaieError, Result};
use crate::evaluator::{Evaluator, MockEvaluator};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub evaluator: Arc<dyn Evaluator>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        AaieError::cache_plugin_not_found(format!("Cache backend '{name}' not found in registry"))
    })?;
    let cache = constructor().await?;
    Ok(Arc::from(cache))
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let config = AppConfig::get();
    let cache_type = config.cache.cache_type.as_str();

    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != FALLBACK_CACHE_PLUGIN => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            warn!("Falling back to {} cache", FALLBACK_CACHE_PLUGIN);
            let cache = build_cache(FALLBACK_CACHE_PLUGIN).await?;
            warn!("Successfully created fallback {} cache backend", FALLBACK_CACHE_PLUGIN);
            Ok(cache)
        }
        Err(e) => Err(e),
    }
}

fn create_evaluator() -> Arc<dyn Evaluator> {
    let evaluator = MockEvaluator::new();
    warn!("Using {} evaluator", evaluator.name());
    Arc::new(evaluator)
}

/// 准备服务器启动的上下文
/// 包括存储、缓存与评估器
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let config = AppConfig::get();
    if config.uses_default_jwt_secret() {
        if config.is_production() {
            return Err(AaieError::authentication(
                "JWT_SECRET must be set in production",
            ));
        }
        warn!("Using the built-in development JWT secret, set JWT_SECRET before deploying");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    let evaluator = create_evaluator();

    Ok(StartupContext {
        storage,
        cache,
        evaluator,
    })
}
