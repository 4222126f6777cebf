use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::docgen::{dates, words};

/// Tax percentages the form accepts.
pub const TAX_PERCENTAGES: [u8; 5] = [0, 5, 10, 15, 20];

/// One stored contract, as a flat row.
///
/// Dates are persisted as display strings (`"1st March 2025"` with ordinal
/// for the agreement term, `"07 March 2012"` without for the registration
/// date) and the financial fields as raw strings; the generator re-parses
/// them at render time. The `payment_*` and `total_fee_words` fields are
/// derived on every write and are never edited independently.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ContractRecord {
    pub id: Uuid,
    #[schema(example = "NGOF/2025-002")]
    pub contract_number: String,
    pub project_title: String,
    pub output_description: String,
    pub workshop_description: String,
    #[schema(example = "The NGO Forum on Cambodia")]
    pub organization_name: String,
    pub party_a_name: String,
    pub party_a_position: String,
    pub party_a_address: String,
    #[schema(example = "#304 \u{179f}\u{1787}\u{178e}")]
    pub registration_number: String,
    #[schema(example = "07 March 2012")]
    pub registration_date: String,
    pub party_a_signature_name: String,
    pub party_b_signature_name: String,
    pub party_b_full_name_with_title: String,
    pub party_b_position: String,
    pub party_b_phone: String,
    pub party_b_email: String,
    pub party_b_address: String,
    pub focal_person_a_name: String,
    pub focal_person_a_position: String,
    pub focal_person_a_phone: String,
    pub focal_person_a_email: String,
    #[schema(example = "1st March 2025")]
    pub agreement_start_date: String,
    #[schema(example = "30th June 2025")]
    pub agreement_end_date: String,
    #[schema(example = "1234.50")]
    pub total_fee_usd: String,
    #[schema(example = "15")]
    pub tax_percentage: String,
    pub gross_amount_usd: String,
    #[schema(example = "Installment #1 (100%)")]
    pub payment_installment_desc: String,
    #[schema(example = "USD 1,234.50")]
    pub payment_gross: String,
    #[schema(example = "USD 1,049.33")]
    pub payment_net: String,
    pub total_fee_words: String,
    pub deliverables: String,
    #[schema(value_type = Option<std::collections::HashMap<String, String>>)]
    pub custom_article_sentences: Option<Json<BTreeMap<u8, String>>>,
}

impl ContractRecord {
    /// Sentence registered for an article number, if any.
    pub fn custom_sentence(&self, article: u8) -> Option<&str> {
        self.custom_article_sentences
            .as_ref()
            .and_then(|sentences| sentences.0.get(&article))
            .map(String::as_str)
    }

    /// Build a record from validated form input, computing every derived
    /// field from its source fields.
    pub fn from_input(id: Uuid, input: &ContractInput) -> Self {
        let gross = input.total_fee_usd;
        let tax_amount = gross * (f64::from(input.tax_percentage) / 100.0);
        let net = gross - tax_amount;

        ContractRecord {
            id,
            contract_number: input.contract_number.clone(),
            project_title: input.project_title.clone(),
            output_description: input.output_description.clone(),
            workshop_description: input.workshop_description.clone(),
            organization_name: input.organization_name.clone(),
            party_a_name: input.party_a_name.clone(),
            party_a_position: input.party_a_position.clone(),
            party_a_address: input.party_a_address.clone(),
            registration_number: input.registration_number.clone(),
            registration_date: dates::format_without_ordinal(input.registration_date),
            party_a_signature_name: input.party_a_signature_name.clone(),
            party_b_signature_name: input.party_b_signature_name.clone(),
            party_b_full_name_with_title: format!(
                "{} {}",
                input.party_b_position, input.party_b_signature_name
            ),
            party_b_position: input.party_b_position.clone(),
            party_b_phone: input.party_b_phone.clone(),
            party_b_email: input.party_b_email.clone(),
            party_b_address: input.party_b_address.clone(),
            focal_person_a_name: input.focal_person_a_name.clone(),
            focal_person_a_position: input.focal_person_a_position.clone(),
            focal_person_a_phone: input.focal_person_a_phone.clone(),
            focal_person_a_email: input.focal_person_a_email.clone(),
            agreement_start_date: dates::format_with_ordinal(input.agreement_start_date),
            agreement_end_date: dates::format_with_ordinal(input.agreement_end_date),
            total_fee_usd: format!("{:.2}", input.total_fee_usd),
            tax_percentage: input.tax_percentage.to_string(),
            gross_amount_usd: format!("{:.2}", gross),
            payment_installment_desc: input.payment_installment_desc.clone(),
            payment_gross: words::format_usd(gross),
            payment_net: words::format_usd(net),
            total_fee_words: words::amount_to_words(input.total_fee_usd),
            deliverables: input.deliverables.clone(),
            custom_article_sentences: input.custom_article_sentences.clone().map(Json),
        }
    }
}

/// Form input for both create and update. Update is a full rewrite: every
/// field except `id` is replaced and the derived fields recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContractInput {
    #[schema(example = "NGOF/2025-002")]
    pub contract_number: String,
    pub project_title: String,
    #[serde(default)]
    pub output_description: String,
    #[serde(default)]
    pub workshop_description: String,
    pub organization_name: String,
    pub party_a_name: String,
    pub party_a_position: String,
    pub party_a_address: String,
    pub registration_number: String,
    #[schema(value_type = String, example = "2012-03-07")]
    pub registration_date: NaiveDate,
    pub party_a_signature_name: String,
    pub party_b_signature_name: String,
    pub party_b_position: String,
    pub party_b_phone: String,
    pub party_b_email: String,
    pub party_b_address: String,
    pub focal_person_a_name: String,
    pub focal_person_a_position: String,
    pub focal_person_a_phone: String,
    pub focal_person_a_email: String,
    #[schema(value_type = String, example = "2025-03-01")]
    pub agreement_start_date: NaiveDate,
    #[schema(value_type = String, example = "2025-06-30")]
    pub agreement_end_date: NaiveDate,
    pub total_fee_usd: f64,
    #[schema(example = 15)]
    pub tax_percentage: u8,
    pub payment_installment_desc: String,
    pub deliverables: String,
    #[serde(default)]
    pub custom_article_sentences: Option<BTreeMap<u8, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_derived_fields_recomputed_on_write() {
        let record = ContractRecord::from_input(Uuid::new_v4(), &sample_input());
        assert_eq!(record.total_fee_usd, "1234.50");
        assert_eq!(record.gross_amount_usd, "1234.50");
        assert_eq!(record.payment_gross, "USD 1,234.50");
        assert_eq!(record.payment_net, "USD 1,049.33");
        assert_eq!(record.tax_percentage, "15");
        assert_eq!(
            record.party_b_full_name_with_title,
            "Freelance Consultant Mr. SEAN Bunrith"
        );
        assert_eq!(record.agreement_start_date, "1st March 2025");
        assert_eq!(record.agreement_end_date, "30th June 2025");
        assert_eq!(record.registration_date, "07 March 2012");
    }

    #[test]
    fn test_custom_sentence_lookup() {
        let mut input = sample_input();
        input.custom_article_sentences =
            Some(BTreeMap::from([(7, "Extra confidentiality clause.".to_string())]));
        let record = ContractRecord::from_input(Uuid::new_v4(), &input);
        assert_eq!(record.custom_sentence(7), Some("Extra confidentiality clause."));
        assert_eq!(record.custom_sentence(8), None);
    }
}
