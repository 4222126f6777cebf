use chrono::NaiveDate;
use contract_desk_server::contract::models::{ContractInput, ContractRecord};
use contract_desk_server::contract::validation::{
    missing_required_fields, ValidationError, ValidationErrors, REQUIRED_FIELDS,
};
use uuid::Uuid;

fn sample_input() -> ContractInput {
    ContractInput {
        contract_number: "NGOF/2025-002".into(),
        project_title: "Budget Analysis".into(),
        output_description: "Budget Analysis Report".into(),
        workshop_description: "multi-stakeholder workshop".into(),
        organization_name: "The NGO Forum on Cambodia".into(),
        party_a_name: "Mr. Soeung Saroeun".into(),
        party_a_position: "Executive Director".into(),
        party_a_address: "#9-11, Street 476, Phnom Penh".into(),
        registration_number: "#304".into(),
        registration_date: NaiveDate::from_ymd_opt(2012, 3, 7).unwrap(),
        party_a_signature_name: "Mr. SOEUNG Saroeun".into(),
        party_b_signature_name: "Mr. SEAN Bunrith".into(),
        party_b_position: "Freelance Consultant".into(),
        party_b_phone: "(+855) 11 535 354".into(),
        party_b_email: "seanbunrith@example.com".into(),
        party_b_address: "#F22 st. 113 Phnom Penh".into(),
        focal_person_a_name: "Mr. Mar Sophal".into(),
        focal_person_a_position: "Program Manager".into(),
        focal_person_a_phone: "012 845 091".into(),
        focal_person_a_email: "sophal@example.org".into(),
        agreement_start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        agreement_end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        total_fee_usd: 1234.5,
        tax_percentage: 15,
        payment_installment_desc: "Installment #1 (100%)".into(),
        deliverables: "Sign Agreement\nSubmit invoice".into(),
        custom_article_sentences: None,
    }
}

#[test]
fn test_valid_input_passes() {
    assert!(sample_input().validate().is_ok());
}

#[test]
fn test_empty_required_field_is_reported_with_field_name() {
    let mut input = sample_input();
    input.project_title = "   ".into();

    let message = input.validate().unwrap_err();
    assert!(message.contains("project_title"), "{message}");
    assert!(message.contains("Project Title must not be empty"), "{message}");
}

#[test]
fn test_all_problems_reported_at_once() {
    let mut input = sample_input();
    input.contract_number = "".into();
    input.party_b_email = "".into();
    input.tax_percentage = 7;

    let message = input.validate().unwrap_err();
    assert!(message.contains("3 error(s) found"), "{message}");
    assert!(message.contains("contract_number"), "{message}");
    assert!(message.contains("party_b_email"), "{message}");
    assert!(message.contains("tax_percentage"), "{message}");
}

#[test]
fn test_tax_percentage_outside_allowed_set() {
    let mut input = sample_input();
    input.tax_percentage = 12;

    let message = input.validate().unwrap_err();
    assert!(message.contains("12% is not an allowed rate"), "{message}");
    assert!(message.contains("Choose one of: 0, 5, 10, 15, 20"), "{message}");
}

#[test]
fn test_every_allowed_tax_rate_passes() {
    for rate in [0u8, 5, 10, 15, 20] {
        let mut input = sample_input();
        input.tax_percentage = rate;
        assert!(input.validate().is_ok(), "rate {rate} should be accepted");
    }
}

#[test]
fn test_negative_fee_rejected() {
    let mut input = sample_input();
    input.total_fee_usd = -100.0;
    assert!(input.validate().is_err());
}

#[test]
fn test_nan_fee_rejected() {
    let mut input = sample_input();
    input.total_fee_usd = f64::NAN;
    assert!(input.validate().is_err());
}

#[test]
fn test_zero_fee_allowed() {
    let mut input = sample_input();
    input.total_fee_usd = 0.0;
    assert!(input.validate().is_ok());
}

#[test]
fn test_end_date_before_start_date_rejected() {
    let mut input = sample_input();
    input.agreement_end_date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

    let message = input.validate().unwrap_err();
    assert!(message.contains("End date cannot be before start date"), "{message}");
}

#[test]
fn test_same_day_agreement_allowed() {
    let mut input = sample_input();
    input.agreement_end_date = input.agreement_start_date;
    assert!(input.validate().is_ok());
}

#[test]
fn test_validation_error_display_includes_suggestion() {
    let error = ValidationError::new("total_fee_usd", "Total fee must be a non-negative amount")
        .with_suggestion("Enter the gross contracted amount in USD");

    let text = error.to_string();
    assert!(text.starts_with("[total_fee_usd]"));
    assert!(text.ends_with("Enter the gross contracted amount in USD"));
}

#[test]
fn test_validation_errors_into_result() {
    let empty = ValidationErrors::new();
    assert!(empty.into_result().is_ok());

    let mut errors = ValidationErrors::new();
    errors.add(ValidationError::empty_field("project_title", "Project Title"));
    assert_eq!(errors.len(), 1);
    assert!(errors.into_result().is_err());
}

#[test]
fn test_required_checklist_covers_generated_fields() {
    // Spot-check the checklist contents rather than re-listing all of them.
    assert_eq!(REQUIRED_FIELDS.len(), 26);
    assert!(REQUIRED_FIELDS.contains(&"contract_number"));
    assert!(REQUIRED_FIELDS.contains(&"party_b_full_name_with_title"));
    assert!(REQUIRED_FIELDS.contains(&"total_fee_words"));
    // Fields persisted but never read by the generator stay off the checklist.
    assert!(!REQUIRED_FIELDS.contains(&"output_description"));
    assert!(!REQUIRED_FIELDS.contains(&"workshop_description"));
}

#[test]
fn test_missing_required_fields_on_record() {
    let record = ContractRecord::from_input(Uuid::new_v4(), &sample_input());
    assert!(missing_required_fields(&record).is_empty());

    let mut broken = record.clone();
    broken.total_fee_words = "".into();
    broken.party_b_phone = "  ".into();
    let missing = missing_required_fields(&broken);
    assert_eq!(missing, vec!["party_b_phone", "total_fee_words"]);
}
