use thiserror::Error;

use super::config::ConfigError;
use crate::db::repository::RepoError;
use crate::db::store::StoreError;

/// 服务器启动与运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("存储初始化失败: {0}")]
    Store(#[from] StoreError),

    #[error("仓储错误: {0}")]
    Repository(#[from] RepoError),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
