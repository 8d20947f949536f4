use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use super::domain::{
    ApplicationStatus, ApplicationSubmission, Gender, GolfParticipation, StatusUpdate, TaxInvoice,
};
use super::messages;

/// `010-XXXX-XXXX`, ASCII digits only.
pub const PHONE_PATTERN: &str = r"^010-[0-9]{4}-[0-9]{4}$";

pub const NAME_MAX_CHARS: usize = 50;
pub const COMPANY_POSITION_MAX_CHARS: usize = 200;
pub const ADDRESS_MAX_CHARS: usize = 300;
pub const REFERRER_MAX_CHARS: usize = 100;
pub const INTERESTS_MAX: usize = 10;
pub const GENERATION_MIN: u16 = 1;
pub const GENERATION_MAX: u16 = 100;

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"))
}

/// A single rejected field. `field` is the dotted path into the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every violation found in a payload, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|violation| violation.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.0.len())?;
        for violation in &self.0 {
            write!(f, "; {}: {}", violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a submission payload against the creation schema.
pub fn validate_submission(payload: &Value) -> Result<ApplicationSubmission, ValidationErrors> {
    let mut reader = FieldReader::new(payload)?;

    let name = reader.required_text(
        "name",
        NAME_MAX_CHARS,
        messages::NAME_REQUIRED,
        messages::NAME_TOO_LONG,
    );
    let phone = reader.phone("phone");
    let birth_date = reader.optional_text("birthDate", None);
    let gender = reader.optional_choice("gender", Gender::from_label, messages::GENDER_INVALID);
    let company_position = reader.required_text(
        "companyPosition",
        COMPANY_POSITION_MAX_CHARS,
        messages::COMPANY_POSITION_REQUIRED,
        messages::COMPANY_POSITION_TOO_LONG,
    );
    let address = reader.optional_text(
        "address",
        Some((ADDRESS_MAX_CHARS, messages::ADDRESS_TOO_LONG)),
    );
    let interests = reader.interests("interests");
    let golf = reader.required_choice(
        "golf",
        GolfParticipation::from_label,
        messages::GOLF_REQUIRED,
    );
    let referrer = reader.optional_text(
        "referrer",
        Some((REFERRER_MAX_CHARS, messages::REFERRER_TOO_LONG)),
    );
    let tax_invoice = reader.required_choice(
        "taxInvoice",
        TaxInvoice::from_label,
        messages::TAX_INVOICE_REQUIRED,
    );
    let generation = reader.generation("generation");

    let violations = reader.into_violations();
    match (
        name,
        phone,
        company_position,
        interests,
        golf,
        tax_invoice,
        generation,
    ) {
        (
            Some(name),
            Some(phone),
            Some(company_position),
            Some(interests),
            Some(golf),
            Some(tax_invoice),
            Some(generation),
        ) if violations.is_empty() => Ok(ApplicationSubmission {
            name,
            phone,
            birth_date,
            gender,
            company_position,
            address,
            interests,
            golf,
            referrer,
            tax_invoice,
            generation,
        }),
        _ => Err(ValidationErrors(violations)),
    }
}

/// Validate a reviewer payload against the update schema.
pub fn validate_status_update(payload: &Value) -> Result<StatusUpdate, ValidationErrors> {
    let mut reader = FieldReader::new(payload)?;

    let status = reader.required_choice(
        "status",
        ApplicationStatus::from_label,
        messages::STATUS_INVALID,
    );
    let admin_notes = reader.optional_text("adminNotes", None);
    let reviewed_by = reader.optional_text("reviewedBy", None);

    let violations = reader.into_violations();
    match status {
        Some(status) if violations.is_empty() => Ok(StatusUpdate {
            status,
            admin_notes,
            reviewed_by,
        }),
        _ => Err(ValidationErrors(violations)),
    }
}

/// Walks a JSON object field by field, recording violations instead of stopping at the
/// first one. Keys outside the schema are ignored.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    fn new(payload: &'a Value) -> Result<Self, ValidationErrors> {
        match payload.as_object() {
            Some(object) => Ok(Self {
                object,
                violations: Vec::new(),
            }),
            None => Err(ValidationErrors(vec![FieldViolation::new(
                "",
                messages::INVALID_INPUT,
            )])),
        }
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.object.get(name)
    }

    fn reject(&mut self, field: impl Into<String>, message: &str) {
        self.violations.push(FieldViolation::new(field, message));
    }

    fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    fn required_text(
        &mut self,
        field: &str,
        max_chars: usize,
        required: &str,
        too_long: &str,
    ) -> Option<String> {
        match self.field(field) {
            Some(Value::String(text)) if text.is_empty() => {
                self.reject(field, required);
                None
            }
            Some(Value::String(text)) if text.chars().count() > max_chars => {
                self.reject(field, too_long);
                None
            }
            Some(Value::String(text)) => Some(text.clone()),
            _ => {
                self.reject(field, required);
                None
            }
        }
    }

    fn optional_text(&mut self, field: &str, limit: Option<(usize, &str)>) -> Option<String> {
        match self.field(field) {
            None => None,
            Some(Value::String(text)) => match limit {
                Some((max_chars, too_long)) if text.chars().count() > max_chars => {
                    self.reject(field, too_long);
                    None
                }
                _ => Some(text.clone()),
            },
            Some(_) => {
                self.reject(field, messages::TEXT_EXPECTED);
                None
            }
        }
    }

    fn phone(&mut self, field: &str) -> Option<String> {
        match self.field(field) {
            Some(Value::String(text)) if phone_regex().is_match(text) => Some(text.clone()),
            _ => {
                self.reject(field, messages::PHONE_FORMAT);
                None
            }
        }
    }

    fn required_choice<T>(
        &mut self,
        field: &str,
        parse: fn(&str) -> Option<T>,
        message: &str,
    ) -> Option<T> {
        let parsed = self.field(field).and_then(Value::as_str).and_then(parse);
        if parsed.is_none() {
            self.reject(field, message);
        }
        parsed
    }

    fn optional_choice<T>(
        &mut self,
        field: &str,
        parse: fn(&str) -> Option<T>,
        message: &str,
    ) -> Option<T> {
        let raw = self.field(field)?;
        let parsed = raw.as_str().and_then(parse);
        if parsed.is_none() {
            self.reject(field, message);
        }
        parsed
    }

    fn interests(&mut self, field: &str) -> Option<Vec<String>> {
        let Some(Value::Array(items)) = self.field(field) else {
            self.reject(field, messages::INTERESTS_REQUIRED);
            return None;
        };

        let mut interests = Vec::with_capacity(items.len());
        let mut valid = true;
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(text) => interests.push(text.to_string()),
                None => {
                    self.reject(format!("{field}.{index}"), messages::INTEREST_NOT_TEXT);
                    valid = false;
                }
            }
        }

        if items.is_empty() {
            self.reject(field, messages::INTERESTS_REQUIRED);
            valid = false;
        } else if items.len() > INTERESTS_MAX {
            self.reject(field, messages::INTERESTS_TOO_MANY);
            valid = false;
        }

        valid.then_some(interests)
    }

    fn generation(&mut self, field: &str) -> Option<u16> {
        let Some(value) = self.field(field).and_then(Value::as_f64) else {
            self.reject(field, messages::GENERATION_REQUIRED);
            return None;
        };

        let mut valid = true;
        if value.fract() != 0.0 {
            self.reject(field, messages::GENERATION_NOT_INTEGER);
            valid = false;
        }
        if value < f64::from(GENERATION_MIN) {
            self.reject(field, messages::GENERATION_REQUIRED);
            valid = false;
        } else if value > f64::from(GENERATION_MAX) {
            self.reject(field, messages::GENERATION_OUT_OF_RANGE);
            valid = false;
        }

        // Range checked above, so the cast cannot truncate.
        valid.then_some(value as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "name": "박서준",
            "phone": "010-5555-0101",
            "companyPosition": "(주)한빛물산 / 대표이사",
            "interests": ["리더십"],
            "golf": "No",
            "taxInvoice": "미발행",
            "generation": 3,
        })
    }

    #[test]
    fn accepts_minimal_submission() {
        let submission = validate_submission(&payload()).expect("valid payload");
        assert_eq!(submission.generation, 3);
        assert_eq!(submission.golf, GolfParticipation::No);
        assert_eq!(submission.tax_invoice, TaxInvoice::DoNotIssue);
        assert!(submission.gender.is_none());
        assert!(submission.address.is_none());
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut body = payload();
        body["name"] = json!("가".repeat(NAME_MAX_CHARS));
        assert!(validate_submission(&body).is_ok());

        body["name"] = json!("가".repeat(NAME_MAX_CHARS + 1));
        let errors = validate_submission(&body).expect_err("name too long");
        assert_eq!(errors.violations()[0].message, messages::NAME_TOO_LONG);
    }

    #[test]
    fn phone_rejects_unicode_digits() {
        let mut body = payload();
        body["phone"] = json!("010-١٢٣٤-5678");
        let errors = validate_submission(&body).expect_err("non-ascii digits");
        assert_eq!(errors.fields(), vec!["phone"]);
    }

    #[test]
    fn fractional_generation_reports_integer_violation() {
        let mut body = payload();
        body["generation"] = json!(2.5);
        let errors = validate_submission(&body).expect_err("fractional generation");
        assert_eq!(
            errors.violations(),
            &[FieldViolation::new(
                "generation",
                messages::GENERATION_NOT_INTEGER
            )]
        );

        body["generation"] = json!(2.0);
        assert_eq!(validate_submission(&body).expect("integral float").generation, 2);
    }

    #[test]
    fn null_optional_field_is_a_type_violation() {
        let mut body = payload();
        body["referrer"] = Value::Null;
        let errors = validate_submission(&body).expect_err("null referrer");
        assert_eq!(
            errors.violations(),
            &[FieldViolation::new("referrer", messages::TEXT_EXPECTED)]
        );
    }

    #[test]
    fn non_object_payload_is_rejected_as_a_whole() {
        let errors = validate_submission(&json!(["not", "an", "object"])).expect_err("array");
        assert_eq!(errors.fields(), vec![""]);
        assert!(validate_status_update(&json!("APPROVED")).is_err());
    }

    #[test]
    fn status_update_requires_known_status() {
        let update = validate_status_update(&json!({
            "status": "WAITLIST",
            "adminNotes": "정원 초과",
            "reviewedBy": "admin-01",
        }))
        .expect("valid update");
        assert_eq!(update.status, ApplicationStatus::Waitlist);
        assert_eq!(update.reviewed_by.as_deref(), Some("admin-01"));

        let errors =
            validate_status_update(&json!({ "status": "approved" })).expect_err("lowercase");
        assert_eq!(
            errors.violations(),
            &[FieldViolation::new("status", messages::STATUS_INVALID)]
        );
    }
}
