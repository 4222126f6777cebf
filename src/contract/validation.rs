//! Form input validation for contract create/update.
//!
//! Errors carry the field, a human-readable message and a fix suggestion,
//! and are accumulated so the caller sees every problem at once instead of
//! fixing them one round-trip at a time.

use std::fmt;

use super::models::{ContractInput, ContractRecord, TAX_PERCENTAGES};

/// Record fields that must be non-empty before a document is generated.
/// The generator itself only re-checks the numeric fields; this checklist
/// is the caller's obligation, enforced on form input through
/// [`ContractInput::validate`].
pub const REQUIRED_FIELDS: [&str; 26] = [
    "contract_number",
    "project_title",
    "organization_name",
    "party_a_name",
    "party_a_position",
    "party_a_address",
    "registration_number",
    "registration_date",
    "party_b_full_name_with_title",
    "party_b_position",
    "party_b_phone",
    "party_b_email",
    "party_b_address",
    "focal_person_a_name",
    "focal_person_a_position",
    "focal_person_a_phone",
    "focal_person_a_email",
    "agreement_start_date",
    "agreement_end_date",
    "total_fee_usd",
    "tax_percentage",
    "total_fee_words",
    "payment_installment_desc",
    "deliverables",
    "party_a_signature_name",
    "party_b_signature_name",
];

/// Validation error with a field reference and a fix suggestion.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Error for an empty required field.
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label} must not be empty"))
            .with_suggestion(format!("Fill in {label} with a valid value"))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// One message listing every error, suitable for an API response body.
    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Validation failed: {} error(s) found\n",
            self.errors.len()
        )];
        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }
        parts.push(String::new());
        parts.push("Please correct the fields above and try again.".to_string());
        parts.join("\n")
    }

    /// Ok if no errors, Err with the formatted summary otherwise.
    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.summary())
        }
    }
}

/// Validate that a string is not empty after trimming.
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

impl ContractInput {
    /// Validate form input before a record is written.
    ///
    /// Checks every required text field, the tax rate against the allowed
    /// set, the fee sign, and the date ordering invariant.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        let required: [(&str, &str, &str); 19] = [
            (&self.contract_number, "contract_number", "Contract Number"),
            (&self.project_title, "project_title", "Project Title"),
            (&self.organization_name, "organization_name", "Organization Name"),
            (&self.party_a_name, "party_a_name", "Party A Name"),
            (&self.party_a_position, "party_a_position", "Party A Position"),
            (&self.party_a_address, "party_a_address", "Party A Address"),
            (&self.registration_number, "registration_number", "Registration Number"),
            (
                &self.party_a_signature_name,
                "party_a_signature_name",
                "Party A Signature Name",
            ),
            (
                &self.party_b_signature_name,
                "party_b_signature_name",
                "Party B Signature Name",
            ),
            (&self.party_b_position, "party_b_position", "Party B Position"),
            (&self.party_b_phone, "party_b_phone", "Party B Phone"),
            (&self.party_b_email, "party_b_email", "Party B Email"),
            (&self.party_b_address, "party_b_address", "Party B Address"),
            (&self.focal_person_a_name, "focal_person_a_name", "Focal Person A Name"),
            (
                &self.focal_person_a_position,
                "focal_person_a_position",
                "Focal Person A Position",
            ),
            (&self.focal_person_a_phone, "focal_person_a_phone", "Focal Person A Phone"),
            (&self.focal_person_a_email, "focal_person_a_email", "Focal Person A Email"),
            (
                &self.payment_installment_desc,
                "payment_installment_desc",
                "Payment Installment Description",
            ),
            (&self.deliverables, "deliverables", "Deliverables"),
        ];
        for (value, field, label) in required {
            validate_required(value, field, label, &mut errors);
        }

        if !TAX_PERCENTAGES.contains(&self.tax_percentage) {
            errors.add(
                ValidationError::new(
                    "tax_percentage",
                    format!("Tax percentage {}% is not an allowed rate", self.tax_percentage),
                )
                .with_suggestion("Choose one of: 0, 5, 10, 15, 20"),
            );
        }

        if !self.total_fee_usd.is_finite() || self.total_fee_usd < 0.0 {
            errors.add(
                ValidationError::new("total_fee_usd", "Total fee must be a non-negative amount")
                    .with_suggestion("Enter the gross contracted amount in USD, e.g. 1234.50"),
            );
        }

        if self.agreement_end_date < self.agreement_start_date {
            errors.add(
                ValidationError::new("agreement_end_date", "End date cannot be before start date")
                    .with_suggestion("Pick an end date on or after the agreement start date"),
            );
        }

        errors.into_result()
    }
}

/// Names from [`REQUIRED_FIELDS`] that are empty on a stored record.
pub fn missing_required_fields(record: &ContractRecord) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| record_field(record, field).trim().is_empty())
        .collect()
}

fn record_field<'a>(record: &'a ContractRecord, field: &str) -> &'a str {
    match field {
        "contract_number" => &record.contract_number,
        "project_title" => &record.project_title,
        "organization_name" => &record.organization_name,
        "party_a_name" => &record.party_a_name,
        "party_a_position" => &record.party_a_position,
        "party_a_address" => &record.party_a_address,
        "registration_number" => &record.registration_number,
        "registration_date" => &record.registration_date,
        "party_b_full_name_with_title" => &record.party_b_full_name_with_title,
        "party_b_position" => &record.party_b_position,
        "party_b_phone" => &record.party_b_phone,
        "party_b_email" => &record.party_b_email,
        "party_b_address" => &record.party_b_address,
        "focal_person_a_name" => &record.focal_person_a_name,
        "focal_person_a_position" => &record.focal_person_a_position,
        "focal_person_a_phone" => &record.focal_person_a_phone,
        "focal_person_a_email" => &record.focal_person_a_email,
        "agreement_start_date" => &record.agreement_start_date,
        "agreement_end_date" => &record.agreement_end_date,
        "total_fee_usd" => &record.total_fee_usd,
        "tax_percentage" => &record.tax_percentage,
        "total_fee_words" => &record.total_fee_words,
        "payment_installment_desc" => &record.payment_installment_desc,
        "deliverables" => &record.deliverables,
        "party_a_signature_name" => &record.party_a_signature_name,
        "party_b_signature_name" => &record.party_b_signature_name,
        _ => "",
    }
}
