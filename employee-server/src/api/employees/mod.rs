//! Employee API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/employees | POST | 新增员工 |
//! | /api/employees?id= | PUT | 按 id 覆盖员工 |
//! | /api/employees?id= | DELETE | 按 id 删除员工 |
//! | /api/employees | GET | 全部员工 |
//! | /api/employees/search | GET | 多字段搜索 |
//!
//! The function-style paths (`/AddEmployee`, `/DeleteEmployee`, ...) stay
//! mounted for existing callers.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/employees",
            get(handler::list)
                .post(handler::create)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/api/employees/search", get(handler::search))
        .merge(legacy_routes())
}

fn legacy_routes() -> Router<ServerState> {
    Router::new()
        .route("/AddEmployee", post(handler::create))
        .route(
            "/DeleteEmployee",
            delete(handler::delete)
                .post(handler::delete)
                .get(handler::delete),
        )
        .route("/UpdateEmployee", put(handler::update).post(handler::update))
        .route("/SearchEmployee", get(handler::search))
        .route("/ViewAllEmployee", get(handler::list))
}
