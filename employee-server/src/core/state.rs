//! Server State
//!
//! 持有所有处理器共享的资源。克隆开销很小 (内部为 `Arc`)。

use std::sync::Arc;

use shared::EmailPattern;

use crate::core::{Config, Result};
use crate::db::{self, repository::EmployeeRepository, store::DocumentStore};

/// 服务器状态
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub employees: EmployeeRepository,
}

impl ServerState {
    /// Open the configured store and prepare the employee collection
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store = db::open_store(config).await?;
        Self::with_store(config.clone(), store).await
    }

    /// Build state around an existing store handle
    pub async fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let employees = EmployeeRepository::new(store, config.collection_name.as_str());
        if config.unique_employee_id {
            employees.ensure_unique_id().await?;
        }

        tracing::info!(
            collection = employees.collection(),
            email_validation = %config.email_pattern,
            unique_employee_id = config.unique_employee_id,
            "Server state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            employees,
        })
    }

    pub fn email_pattern(&self) -> EmailPattern {
        self.config.email_pattern
    }
}
