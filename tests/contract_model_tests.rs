use std::collections::BTreeMap;

use chrono::NaiveDate;
use contract_desk_server::contract::export::{contracts_to_csv, CSV_HEADERS};
use contract_desk_server::contract::models::{ContractInput, ContractRecord, TAX_PERCENTAGES};
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
fn test_from_input_formats_dates() {
    let record = ContractRecord::from_input(Uuid::new_v4(), &sample_input());

    assert_eq!(record.agreement_start_date, "1st March 2025");
    assert_eq!(record.agreement_end_date, "30th June 2025");
    // Registration date keeps the zero-padded, suffix-free form.
    assert_eq!(record.registration_date, "07 March 2012");
}

#[test]
fn test_from_input_computes_financials() {
    let record = ContractRecord::from_input(Uuid::new_v4(), &sample_input());

    assert_eq!(record.total_fee_usd, "1234.50");
    assert_eq!(record.gross_amount_usd, "1234.50");
    assert_eq!(record.tax_percentage, "15");
    assert_eq!(record.payment_gross, "USD 1,234.50");
    assert_eq!(record.payment_net, "USD 1,049.33");
    assert_eq!(
        record.total_fee_words,
        "One Thousand Two Hundred Thirty Four US Dollars and Fifty Cents Only"
    );
}

#[test]
fn test_net_amount_for_every_tax_rate() {
    let cases = [
        (0u8, "USD 1,000.00"),
        (5, "USD 950.00"),
        (10, "USD 900.00"),
        (15, "USD 850.00"),
        (20, "USD 800.00"),
    ];
    assert_eq!(cases.len(), TAX_PERCENTAGES.len());

    for (rate, expected_net) in cases {
        let mut input = sample_input();
        input.total_fee_usd = 1000.0;
        input.tax_percentage = rate;
        let record = ContractRecord::from_input(Uuid::new_v4(), &input);
        assert_eq!(record.payment_net, expected_net, "rate {rate}");
    }
}

#[test]
fn test_full_name_is_derived_from_position_and_signature_name() {
    let record = ContractRecord::from_input(Uuid::new_v4(), &sample_input());
    assert_eq!(
        record.party_b_full_name_with_title,
        "Freelance Consultant Mr. SEAN Bunrith"
    );
}

#[test]
fn test_update_recomputes_derived_fields() {
    let id = Uuid::new_v4();
    let first = ContractRecord::from_input(id, &sample_input());

    let mut changed = sample_input();
    changed.total_fee_usd = 2000.0;
    changed.tax_percentage = 5;
    let second = ContractRecord::from_input(id, &changed);

    assert_eq!(second.id, first.id);
    assert_eq!(second.payment_gross, "USD 2,000.00");
    assert_eq!(second.payment_net, "USD 1,900.00");
    assert_eq!(second.total_fee_words, "Two Thousand US Dollars Only");
}

#[test]
fn test_custom_sentences_survive_the_round_trip() {
    let mut input = sample_input();
    input.custom_article_sentences = Some(BTreeMap::from([
        (3, "Fees are renegotiated annually.".to_string()),
        (7, "Extra confidentiality clause.".to_string()),
    ]));

    let record = ContractRecord::from_input(Uuid::new_v4(), &input);
    assert_eq!(record.custom_sentence(3), Some("Fees are renegotiated annually."));
    assert_eq!(record.custom_sentence(7), Some("Extra confidentiality clause."));
    assert_eq!(record.custom_sentence(4), None);
}

#[test]
fn test_record_serde_round_trip() {
    let mut input = sample_input();
    input.custom_article_sentences =
        Some(BTreeMap::from([(9, "Policy annex attached.".to_string())]));
    let record = ContractRecord::from_input(Uuid::new_v4(), &input);

    let json = serde_json::to_string(&record).unwrap();
    let parsed: ContractRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.id, record.id);
    assert_eq!(parsed.contract_number, record.contract_number);
    assert_eq!(parsed.custom_sentence(9), Some("Policy annex attached."));
}

#[test]
fn test_input_defaults_for_optional_descriptions() {
    // output_description and workshop_description may be omitted from the
    // request body entirely.
    let json = serde_json::json!({
        "contract_number": "NGOF/2025-009",
        "project_title": "Review",
        "organization_name": "The NGO Forum on Cambodia",
        "party_a_name": "Mr. Soeung Saroeun",
        "party_a_position": "Executive Director",
        "party_a_address": "#9-11, Street 476, Phnom Penh",
        "registration_number": "#304",
        "registration_date": "2012-03-07",
        "party_a_signature_name": "Mr. SOEUNG Saroeun",
        "party_b_signature_name": "Ms. CHAN Dara",
        "party_b_position": "Consultant",
        "party_b_phone": "012 000 111",
        "party_b_email": "dara@example.com",
        "party_b_address": "Phnom Penh",
        "focal_person_a_name": "Mr. Mar Sophal",
        "focal_person_a_position": "Program Manager",
        "focal_person_a_phone": "012 845 091",
        "focal_person_a_email": "sophal@example.org",
        "agreement_start_date": "2025-03-01",
        "agreement_end_date": "2025-06-30",
        "total_fee_usd": 500.0,
        "tax_percentage": 10,
        "payment_installment_desc": "Installment #1 (100%)",
        "deliverables": "Final report"
    });

    let input: ContractInput = serde_json::from_value(json).unwrap();
    assert_eq!(input.output_description, "");
    assert_eq!(input.workshop_description, "");
    assert_eq!(input.custom_article_sentences, None);
    assert!(input.validate().is_ok());
}

#[test]
fn test_csv_export_layout() {
    let records = vec![
        ContractRecord::from_input(Uuid::new_v4(), &sample_input()),
        ContractRecord::from_input(Uuid::new_v4(), &{
            let mut input = sample_input();
            input.contract_number = "NGOF/2025-003".into();
            input.party_b_signature_name = "Ms. CHAN Dara".into();
            input
        }),
    ];

    let bytes = contracts_to_csv(&records).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let mut lines = text.lines();

    let header = lines.next().unwrap();
    assert_eq!(header.split(',').count(), CSV_HEADERS.len());
    assert!(header.starts_with("id,contract_number,project_title"));
    assert!(header.ends_with("custom_article_sentences"));

    let first_row = lines.next().unwrap();
    assert!(first_row.contains("NGOF/2025-002"));
    assert!(first_row.contains("USD 1,049.33"));
}

#[test]
fn test_csv_export_empty_table_still_has_header() {
    let bytes = contracts_to_csv(&[]).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 1);
}
