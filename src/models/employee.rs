//! Employee model used by the database walkthrough

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Employee document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    /// "Major", "Minor", or empty until classified
    pub legal_status: String,
}

/// Insert payload for an employee
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub age: i32,
    pub legal_status: String,
}

impl NewEmployee {
    pub fn new(name: &str, age: i32) -> Self {
        Self {
            name: name.to_string(),
            age,
            legal_status: String::new(),
        }
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "id: {} - name: {:<20} - age: {} - Legal status: {}",
            self.id, self.name, self.age, self.legal_status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_the_name_column() {
        let employee = Employee {
            id: Uuid::nil(),
            name: "Diana".into(),
            age: 18,
            legal_status: "Major".into(),
        };
        assert_eq!(
            employee.to_string(),
            format!(
                "id: {} - name: Diana                - age: 18 - Legal status: Major",
                Uuid::nil()
            )
        );
    }
}
