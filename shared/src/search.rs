//! Employee search criteria and record matcher

use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// Optional search filters
///
/// Deserializes straight from the query string
/// (`?id=&firstName=&lastName=&email=&role=`). Blank values are treated
/// the same as absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCriteria {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl SearchCriteria {
    /// True when no filter carries a value
    pub fn is_empty(&self) -> bool {
        [
            &self.id,
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.role,
        ]
        .into_iter()
        .all(|v| present(v).is_none())
    }

    /// Every present filter must match (AND).
    ///
    /// `id` compares against the decimal text of the record id; the text
    /// filters are case-insensitive substring matches.
    pub fn matches(&self, employee: &Employee) -> bool {
        if let Some(id) = present(&self.id)
            && employee.id.to_string() != id
        {
            return false;
        }

        [
            (&self.first_name, employee.first_name.as_str()),
            (&self.last_name, employee.last_name.as_str()),
            (&self.email, employee.email.as_str()),
            (&self.role, employee.role.as_str()),
        ]
        .into_iter()
        .all(|(needle, haystack)| match present(needle) {
            Some(needle) => contains_ignore_case(haystack, needle),
            None => true,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
