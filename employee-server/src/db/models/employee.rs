//! Employee Document Model

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use shared::{Employee, Salary};

/// Field holding the business id inside a stored document
pub const EMPLOYEE_ID_FIELD: &str = "employee_id";

/// Employee as persisted in the document store
///
/// Field names follow the legacy collection layout. The business id is
/// kept under `employee_id` because `id` is reserved for the store's own
/// document key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDocument {
    pub employee_id: i64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub phone: String,
}

/// Salary that cannot be represented in the stored format
#[derive(Debug, thiserror::Error)]
#[error("salary {0} is not representable")]
pub struct SalaryOutOfRange(pub String);

impl TryFrom<&Employee> for EmployeeDocument {
    type Error = SalaryOutOfRange;

    fn try_from(emp: &Employee) -> Result<Self, Self::Error> {
        let salary = emp
            .salary
            .amount()
            .and_then(|amount| amount.to_f64())
            .ok_or_else(|| SalaryOutOfRange(emp.salary.to_string()))?;
        Ok(Self {
            employee_id: emp.id,
            firstname: emp.first_name.clone(),
            lastname: emp.last_name.clone(),
            email: emp.email.clone(),
            password: emp.password.clone(),
            role: emp.role.clone(),
            salary,
            phone: emp.phone_number.clone(),
        })
    }
}

impl TryFrom<EmployeeDocument> for Employee {
    type Error = SalaryOutOfRange;

    fn try_from(doc: EmployeeDocument) -> Result<Self, Self::Error> {
        let salary = match Salary::from_f64(doc.salary) {
            Salary::OutOfRange(value) => return Err(SalaryOutOfRange(value.to_string())),
            salary => salary,
        };
        Ok(Self {
            id: doc.employee_id,
            first_name: doc.firstname,
            last_name: doc.lastname,
            email: doc.email,
            password: doc.password,
            role: doc.role,
            salary,
            phone_number: doc.phone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_document_layout() {
        let emp = Employee {
            id: 3,
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@corp.io".into(),
            password: "pw".into(),
            role: "tester".into(),
            salary: Decimal::new(4250, 1).into(),
            phone_number: "5551234567".into(),
        };
        let doc = EmployeeDocument::try_from(&emp).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json[EMPLOYEE_ID_FIELD], 3);
        assert_eq!(json["firstname"], "Ann");
        assert_eq!(json["phone"], "5551234567");
        assert_eq!(json["salary"], 425.0);

        let back = Employee::try_from(doc).unwrap();
        assert_eq!(back, emp);
    }

    #[test]
    fn test_non_finite_salary_is_rejected() {
        let doc = EmployeeDocument {
            employee_id: 1,
            firstname: String::new(),
            lastname: String::new(),
            email: String::new(),
            password: String::new(),
            role: String::new(),
            salary: f64::NAN,
            phone: String::new(),
        };
        assert!(Employee::try_from(doc.clone()).is_err());

        let doc = EmployeeDocument { salary: 1e29, ..doc };
        assert!(Employee::try_from(doc).is_err());
    }

    #[test]
    fn test_out_of_range_salary_is_not_stored() {
        let emp = Employee {
            salary: Salary::OutOfRange(1e-30),
            ..Default::default()
        };
        assert!(EmployeeDocument::try_from(&emp).is_err());
    }
}
