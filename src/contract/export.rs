//! Spreadsheet export of the contract table.
//!
//! Writes every record as one CSV row in a fixed column order matching the
//! record layout, so re-exports of unchanged data are identical files.

use anyhow::Result;

use super::models::ContractRecord;

pub const CSV_HEADERS: [&str; 33] = [
    "id",
    "contract_number",
    "project_title",
    "output_description",
    "workshop_description",
    "organization_name",
    "party_a_name",
    "party_a_position",
    "party_a_address",
    "registration_number",
    "registration_date",
    "party_a_signature_name",
    "party_b_signature_name",
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
    "gross_amount_usd",
    "payment_installment_desc",
    "payment_gross",
    "payment_net",
    "total_fee_words",
    "deliverables",
    "custom_article_sentences",
];

pub fn contracts_to_csv(records: &[ContractRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for record in records {
        let id = record.id.to_string();
        let sentences = record
            .custom_article_sentences
            .as_ref()
            .map(|json| serde_json::to_string(&json.0).unwrap_or_default())
            .unwrap_or_default();
        writer.write_record([
            id.as_str(),
            &record.contract_number,
            &record.project_title,
            &record.output_description,
            &record.workshop_description,
            &record.organization_name,
            &record.party_a_name,
            &record.party_a_position,
            &record.party_a_address,
            &record.registration_number,
            &record.registration_date,
            &record.party_a_signature_name,
            &record.party_b_signature_name,
            &record.party_b_full_name_with_title,
            &record.party_b_position,
            &record.party_b_phone,
            &record.party_b_email,
            &record.party_b_address,
            &record.focal_person_a_name,
            &record.focal_person_a_position,
            &record.focal_person_a_phone,
            &record.focal_person_a_email,
            &record.agreement_start_date,
            &record.agreement_end_date,
            &record.total_fee_usd,
            &record.tax_percentage,
            &record.gross_amount_usd,
            &record.payment_installment_desc,
            &record.payment_gross,
            &record.payment_net,
            &record.total_fee_words,
            &record.deliverables,
            &sentences,
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("finalizing csv export: {err}"))
}
