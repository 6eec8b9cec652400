//! Employee Model

use serde::{Deserialize, Serialize};

use super::Salary;

/// Employee record
///
/// `id` is the business key chosen by the caller. It is unrelated to the
/// document key the store assigns on insert.
///
/// Missing JSON fields decode to their zero value so that the validators
/// (not the decoder) report them. The lowercase names used by the legacy
/// functions (`firstname`, `lastname`, `phone`) are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    #[serde(alias = "firstname")]
    pub first_name: String,
    #[serde(alias = "lastname")]
    pub last_name: String,
    pub email: String,
    /// Stored as provided (no hashing)
    pub password: String,
    pub role: String,
    pub salary: Salary,
    #[serde(alias = "phone")]
    pub phone_number: String,
}

impl Employee {
    /// Apply the Update-path normalization.
    ///
    /// Names become "Capitalized", role becomes lowercase, email and phone
    /// lose surrounding whitespace. The Add path stores values exactly as
    /// received.
    pub fn normalize_for_update(&mut self) {
        self.first_name = format_name(&self.first_name);
        self.last_name = format_name(&self.last_name);
        self.email = self.email.trim().to_string();
        self.role = self.role.trim().to_lowercase();
        self.phone_number = self.phone_number.trim().to_string();
    }
}

/// Upper-case the first character and lower-case the rest
fn format_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_decode_accepts_legacy_field_names() {
        let json = r#"{
            "id": 7,
            "firstname": "Jane",
            "lastname": "Doe",
            "email": "jane.doe@example.com",
            "password": "secret",
            "role": "developer",
            "salary": 50000,
            "phone": "1234567890"
        }"#;
        let emp: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(emp.id, 7);
        assert_eq!(emp.first_name, "Jane");
        assert_eq!(emp.last_name, "Doe");
        assert_eq!(emp.phone_number, "1234567890");
        assert_eq!(emp.salary, Salary::Amount(Decimal::from(50000)));
    }

    #[test]
    fn test_missing_fields_default_to_zero_values() {
        let emp: Employee = serde_json::from_str(r#"{"firstName":"Jane"}"#).unwrap();
        assert_eq!(emp.id, 0);
        assert_eq!(emp.first_name, "Jane");
        assert!(emp.last_name.is_empty());
        assert!(emp.salary.is_zero());
    }

    #[test]
    fn test_encode_uses_camel_case() {
        let emp = Employee {
            id: 1,
            first_name: "Jane".into(),
            phone_number: "1234567890".into(),
            salary: Decimal::new(12345, 1).into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&emp).unwrap();
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["phoneNumber"], "1234567890");
        assert_eq!(value["salary"], 1234.5);
        assert!(value.get("firstname").is_none());
    }

    #[test]
    fn test_normalize_for_update() {
        let mut emp = Employee {
            first_name: "jOHN".into(),
            last_name: "  mcDONALD ".into(),
            email: " jane@x.com ".into(),
            role: " DEVELOPER".into(),
            phone_number: "1234567890\n".into(),
            password: " keep me ".into(),
            ..Default::default()
        };
        emp.normalize_for_update();
        assert_eq!(emp.first_name, "John");
        assert_eq!(emp.last_name, "Mcdonald");
        assert_eq!(emp.email, "jane@x.com");
        assert_eq!(emp.role, "developer");
        assert_eq!(emp.phone_number, "1234567890");
        assert_eq!(emp.password, " keep me ");
    }

    #[test]
    fn test_normalize_keeps_empty_names_empty() {
        let mut emp = Employee {
            first_name: "   ".into(),
            ..Default::default()
        };
        emp.normalize_for_update();
        assert!(emp.first_name.is_empty());
        assert!(emp.last_name.is_empty());
    }
}
