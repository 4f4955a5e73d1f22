/*
 * Responsibility
 * - Request/response DTOs for the error-demonstration routes
 * - validate() holds the format checks (field-level errors for the client)
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProbeRequest {
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl ProbeRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.is_empty() || self.name.len() > 50 {
            errors.push(FieldError {
                field: "name",
                message: "name must be between 1 and 50 characters".to_string(),
            });
        }

        if !email_looks_valid(&self.email) {
            errors.push(FieldError {
                field: "email",
                message: "email must look like an address".to_string(),
            });
        }

        if self.age > 150 {
            errors.push(FieldError {
                field: "age",
                message: "age must be between 0 and 150".to_string(),
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Shape check only; real address validation is out of scope for a demo.
fn email_looks_valid(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(name: &str, email: &str, age: u32) -> ProbeRequest {
        ProbeRequest {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[test]
    fn accepts_a_sane_payload() {
        assert!(probe("Alice", "alice@example.com", 30).validate().is_ok());
    }

    #[test]
    fn rejects_each_bad_field() {
        let errors = probe("", "nope", 200).validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "age"]);
    }

    #[test]
    fn name_length_bounds() {
        assert!(probe(&"x".repeat(50), "a@b.c", 0).validate().is_ok());
        assert!(probe(&"x".repeat(51), "a@b.c", 0).validate().is_err());
    }

    #[test]
    fn email_shape() {
        for bad in ["plain", "@example.com", "user@nodot"] {
            assert!(
                probe("Alice", bad, 30).validate().is_err(),
                "{} should be rejected",
                bad
            );
        }
        assert!(probe("Alice", "user@sub.example.com", 30).validate().is_ok());
    }
}
