//! Employee Directory Server - 员工目录 HTTP 服务
//!
//! # 架构概述
//!
//! - **HTTP API** (`api`): 员工增删改查与搜索
//! - **数据库** (`db`): 文档存储 (嵌入式 SurrealDB 或内存)
//! - **核心** (`core`): 配置、状态、服务器
//!
//! # 模块结构
//!
//! ```text
//! employee-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! ├── utils/         # 错误类型、日志
//! └── db/            # 存储、文档模型、仓储
//! ```
//!
//! Field validation and search matching live in the `shared` crate.

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::init_logger_with_file;

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> Result<Config, ServerError> {
    // .env is optional
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir(),
    );
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ______                 __
   / ____/___ ___  ____  / /___  __  _____  ___  _____
  / __/ / __ `__ \/ __ \/ / __ \/ / / / _ \/ _ \/ ___/
 / /___/ / / / / / /_/ / / /_/ / /_/ /  __/  __(__  )
/_____/_/ /_/ /_/ .___/_/\____/\__, /\___/\___/____/
               /_/            /____/
    "#
    );
}
