//! Employee API Handlers
//!
//! Success bodies are a JSON string message (add, update, delete) or a
//! JSON array of employees (list, search).

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use shared::validation::validate_employee;
use shared::{Employee, SearchCriteria};

use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::utils::{AppError, AppResult};

/// `?id=` as sent by the caller, parsed per handler
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

fn decode_employee(body: &Bytes) -> AppResult<Employee> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected employee body");
        AppError::invalid("Invalid request body")
    })
}

/// Unwrap the query string, answering `message` when it cannot be decoded
/// (for example a repeated parameter)
fn query_or<T>(query: Result<Query<T>, QueryRejection>, message: &str) -> AppResult<T> {
    query.map(|Query(q)| q).map_err(|e| {
        tracing::debug!(error = %e, "Rejected query string");
        AppError::invalid(message)
    })
}

/// Create a new employee
pub async fn create(State(state): State<ServerState>, body: Bytes) -> AppResult<Json<String>> {
    let employee = decode_employee(&body)?;
    validate_employee(&employee, state.email_pattern())?;

    let repo = &state.employees;
    let unique = repo
        .is_id_unique(employee.id)
        .await
        .map_err(|e| AppError::database("Failed to check employee ID", e))?;
    if !unique {
        return Err(AppError::conflict("ID already in use. Provide a unique ID"));
    }

    match repo.create(&employee).await {
        Ok(_) => {}
        // Lost the race against a concurrent insert of the same id
        Err(RepoError::Duplicate(_)) => {
            return Err(AppError::conflict("ID already in use. Provide a unique ID"));
        }
        Err(e) => return Err(AppError::database("Failed to add employee", e)),
    }

    tracing::info!(employee_id = employee.id, "Employee added");
    Ok(Json("Employee added successfully".to_string()))
}

/// Delete the first employee with `?id=`
pub async fn delete(
    State(state): State<ServerState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> AppResult<Json<String>> {
    let query = query_or(query, "Invalid employee id in the query string")?;
    let raw = query
        .id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::invalid("Missing employee id in the query string"))?;
    let id: i64 = raw
        .parse()
        .map_err(|_| AppError::invalid("Invalid employee id in the query string"))?;

    let deleted = state
        .employees
        .delete_by_id(id)
        .await
        .map_err(|e| AppError::database("Failed to delete employee", e))?;
    if !deleted {
        return Err(AppError::not_found("employee not found"));
    }

    tracing::info!(employee_id = id, "Employee deleted");
    Ok(Json("Employee Deleted Successfully".to_string()))
}

/// Overwrite every field of the employee with `?id=`
pub async fn update(
    State(state): State<ServerState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    body: Bytes,
) -> AppResult<Json<String>> {
    let query = query_or(query, "Invalid ID format")?;
    let id: i64 = query
        .id
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| AppError::invalid("Invalid ID format"))?;

    let repo = &state.employees;
    let present = repo
        .is_present(id)
        .await
        .map_err(|e| AppError::database("Failed to check employee ID", e))?;
    if !present {
        return Err(AppError::not_found("Employee with given id not found"));
    }

    let mut employee = decode_employee(&body)?;
    if employee.id != 0 && employee.id != id {
        return Err(AppError::invalid(format!(
            "Employee ID in the request body ({}) does not match the id in the query string ({id})",
            employee.id
        )));
    }
    employee.normalize_for_update();
    validate_employee(&employee, state.email_pattern())?;

    let updated = match repo.update_by_id(id, &employee).await {
        Ok(updated) => updated,
        Err(RepoError::Duplicate(_)) => {
            return Err(AppError::conflict("ID already in use. Provide a unique ID"));
        }
        Err(e) => return Err(AppError::database("Failed to update employee", e)),
    };
    if !updated {
        return Err(AppError::not_found(format!("Employee not found with ID: {id}")));
    }

    tracing::info!(employee_id = id, "Employee updated");
    Ok(Json(format!(
        "Employee with ID {id} has been updated successfully"
    )))
}

/// Employees matching every supplied criterion
pub async fn search(
    State(state): State<ServerState>,
    criteria: Result<Query<SearchCriteria>, QueryRejection>,
) -> AppResult<Json<Vec<Employee>>> {
    let criteria = query_or(criteria, "Invalid search query parameter")?;
    if criteria.is_empty() {
        return Err(AppError::invalid("Missing search query parameter"));
    }

    let employees = state
        .employees
        .search(&criteria)
        .await
        .map_err(|e| AppError::database("Failed to retrieve employee details", e))?;
    Ok(Json(employees))
}

/// List all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = state
        .employees
        .find_all()
        .await
        .map_err(|e| AppError::database("Failed to retrieve employees", e))?;
    Ok(Json(employees))
}
