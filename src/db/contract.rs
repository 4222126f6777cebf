//! Contract record database operations

use super::AppState;
use crate::contract::models::ContractRecord;
use uuid::Uuid;

pub const CONTRACTS_CACHE_KEY: &str = "all_contracts";

/// Column list shared by every contract query, in `ContractRecord` field order.
const CONTRACT_COLUMNS: &str = "id, contract_number, project_title, output_description, \
     workshop_description, organization_name, party_a_name, party_a_position, party_a_address, \
     registration_number, registration_date, party_a_signature_name, party_b_signature_name, \
     party_b_full_name_with_title, party_b_position, party_b_phone, party_b_email, \
     party_b_address, focal_person_a_name, focal_person_a_position, focal_person_a_phone, \
     focal_person_a_email, agreement_start_date, agreement_end_date, total_fee_usd, \
     tax_percentage, gross_amount_usd, payment_installment_desc, payment_gross, payment_net, \
     total_fee_words, deliverables, custom_article_sentences";

impl AppState {
    /// Get all contracts ordered by contract number.
    ///
    /// Results are cached; call [`AppState::invalidate_contract_cache`] after
    /// any write so the next read hits the database again.
    pub async fn get_all_contracts(&self) -> Result<Vec<ContractRecord>, sqlx::Error> {
        if let Some(cached) = self.contract_cache.get(CONTRACTS_CACHE_KEY).await {
            return Ok(cached);
        }

        let query = format!("SELECT {CONTRACT_COLUMNS} FROM contracts ORDER BY contract_number");
        let contracts = sqlx::query_as::<_, ContractRecord>(&query)
            .fetch_all(&self.pool)
            .await?;

        self.contract_cache
            .insert(CONTRACTS_CACHE_KEY.to_string(), contracts.clone())
            .await;
        log::debug!("Contract cache refreshed with {} records", contracts.len());

        Ok(contracts)
    }

    /// Get contract by id
    pub async fn get_contract_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<ContractRecord>, sqlx::Error> {
        let query = format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, ContractRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a new contract record
    pub async fn insert_contract(&self, record: &ContractRecord) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts ({CONTRACT_COLUMNS}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
              $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32, $33)"
        );
        bind_record_fields(sqlx::query(&query), record)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Replace every stored field of an existing contract.
    ///
    /// Returns `false` when no contract with that id exists.
    pub async fn update_contract(&self, record: &ContractRecord) -> Result<bool, sqlx::Error> {
        let result = bind_record_fields(
            sqlx::query(
                r#"
                UPDATE contracts SET
                    contract_number = $2,
                    project_title = $3,
                    output_description = $4,
                    workshop_description = $5,
                    organization_name = $6,
                    party_a_name = $7,
                    party_a_position = $8,
                    party_a_address = $9,
                    registration_number = $10,
                    registration_date = $11,
                    party_a_signature_name = $12,
                    party_b_signature_name = $13,
                    party_b_full_name_with_title = $14,
                    party_b_position = $15,
                    party_b_phone = $16,
                    party_b_email = $17,
                    party_b_address = $18,
                    focal_person_a_name = $19,
                    focal_person_a_position = $20,
                    focal_person_a_phone = $21,
                    focal_person_a_email = $22,
                    agreement_start_date = $23,
                    agreement_end_date = $24,
                    total_fee_usd = $25,
                    tax_percentage = $26,
                    gross_amount_usd = $27,
                    payment_installment_desc = $28,
                    payment_gross = $29,
                    payment_net = $30,
                    total_fee_words = $31,
                    deliverables = $32,
                    custom_article_sentences = $33
                WHERE id = $1
                "#,
            ),
            record,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete contract by id
    pub async fn delete_contract(&self, id: &Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Drop the cached contract list after a write.
    pub async fn invalidate_contract_cache(&self) {
        self.contract_cache.invalidate(CONTRACTS_CACHE_KEY).await;
    }
}

/// Bind every `ContractRecord` field in column order, id first.
fn bind_record_fields<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    record: &'q ContractRecord,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(record.id)
        .bind(&record.contract_number)
        .bind(&record.project_title)
        .bind(&record.output_description)
        .bind(&record.workshop_description)
        .bind(&record.organization_name)
        .bind(&record.party_a_name)
        .bind(&record.party_a_position)
        .bind(&record.party_a_address)
        .bind(&record.registration_number)
        .bind(&record.registration_date)
        .bind(&record.party_a_signature_name)
        .bind(&record.party_b_signature_name)
        .bind(&record.party_b_full_name_with_title)
        .bind(&record.party_b_position)
        .bind(&record.party_b_phone)
        .bind(&record.party_b_email)
        .bind(&record.party_b_address)
        .bind(&record.focal_person_a_name)
        .bind(&record.focal_person_a_position)
        .bind(&record.focal_person_a_phone)
        .bind(&record.focal_person_a_email)
        .bind(&record.agreement_start_date)
        .bind(&record.agreement_end_date)
        .bind(&record.total_fee_usd)
        .bind(&record.tax_percentage)
        .bind(&record.gross_amount_usd)
        .bind(&record.payment_installment_desc)
        .bind(&record.payment_gross)
        .bind(&record.payment_net)
        .bind(&record.total_fee_words)
        .bind(&record.deliverables)
        .bind(&record.custom_article_sentences)
}
