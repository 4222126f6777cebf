//! The Service Agreement renderer.
//!
//! The agreement is an ordered list of fixed sections: title block, party
//! blocks, recitals, sixteen articles, date line and signature table. The
//! legal text is business content and is reproduced verbatim; record fields
//! are interpolated at fixed points. Article bodies live in one function
//! each, composed through the `ARTICLES` table.

use super::docx::{DocxBuilder, Paragraph, Run, Table, TableCell};
use super::GeneratorError;
use crate::contract::models::ContractRecord;

/// Blue used for e-mail addresses.
const EMAIL_COLOR: &str = "0000FF";

/// Fee amounts recomputed from the raw stored strings at render time, so a
/// stale persisted breakdown can never leak into a freshly generated
/// document.
struct FeeBreakdown {
    total: f64,
    tax_rate: f64,
    tax_amount: f64,
    net: f64,
}

impl FeeBreakdown {
    fn from_record(record: &ContractRecord) -> Result<Self, GeneratorError> {
        let total = parse_amount(&record.total_fee_usd, "total_fee_usd")?;
        let tax_rate = parse_amount(&record.tax_percentage, "tax_percentage")?;
        let tax_amount = total * (tax_rate / 100.0);
        Ok(FeeBreakdown {
            total,
            tax_rate,
            tax_amount,
            net: total - tax_amount,
        })
    }
}

fn parse_amount(raw: &str, field: &'static str) -> Result<f64, GeneratorError> {
    raw.trim().parse::<f64>().map_err(|_| GeneratorError::Formatting {
        field,
        value: raw.to_string(),
    })
}

struct Context<'a> {
    record: &'a ContractRecord,
    fee: &'a FeeBreakdown,
}

/// Render a contract record into DOCX bytes.
///
/// Pure and deterministic: no clock, no randomness, no I/O beyond the
/// returned buffer.
pub fn render(record: &ContractRecord) -> Result<Vec<u8>, GeneratorError> {
    let fee = FeeBreakdown::from_record(record)?;
    let ctx = Context { record, fee: &fee };
    let mut doc = DocxBuilder::new();

    title_block(record, &mut doc);
    party_a_block(record, &mut doc);
    doc.paragraph(Paragraph::plain("AND").center().space_after(12));
    party_b_block(record, &mut doc);
    recitals(record, &mut doc);

    for (number, title, body) in ARTICLES {
        doc.paragraph(article_heading(number, title));
        body(&ctx, &mut doc);
        if let Some(sentence) = record.custom_sentence(number) {
            doc.paragraph(Paragraph::plain(sentence));
        }
    }

    date_line(record, &mut doc);
    signature_table(record, &mut doc);
    doc.page_break();
    doc.finish()
}

type ArticleBody = fn(&Context, &mut DocxBuilder);

const ARTICLES: [(u8, &str, ArticleBody); 16] = [
    (1, "TERMS OF REFERENCE", terms_of_reference),
    (2, "TERM OF AGREEMENT", term_of_agreement),
    (3, "PROFESSIONAL FEE", professional_fee),
    (4, "TERM OF PAYMENT", term_of_payment),
    (5, "NO OTHER PERSONS", no_other_persons),
    (6, "MONITORING and COORDINATION", monitoring_and_coordination),
    (7, "CONFIDENTIALITY", confidentiality),
    (8, "ANTI-CORRUPTION and CONFLICT OF INTEREST", anti_corruption),
    (
        9,
        "OBLIGATION TO COMPLY WITH THE NGOF\u{2019}S POLICIES AND CODE OF CONDUCT",
        policy_compliance,
    ),
    (10, "ANTI-TERRORISM FINANCING AND FINANCIAL CRIME", anti_terrorism),
    (11, "INSURANCE", insurance),
    (12, "ASSIGNMENT", assignment),
    (13, "RESOLUTION OF CONFLICTS/DISPUTES", dispute_resolution),
    (14, "TERMINATION", termination),
    (15, "MODIFICATION OR AMENDMENT", amendment),
    (16, "CONTROLLING OF LAW", controlling_law),
];

fn article_heading(number: u8, title: &str) -> Paragraph {
    Paragraph::heading2()
        .run(Run::text(format!("ARTICLE {number}")).bold().underline().size(11))
        .run(Run::text(format!(": {title}")).bold().size(11))
}

/// Bold in-text reference to one of the parties.
fn party(name: &str) -> Run {
    Run::text(name).bold()
}

fn title_block(record: &ContractRecord, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .center()
            .space_after(12)
            .run(Run::text("The Service Agreement").bold().size(14)),
    );
    doc.paragraph(
        Paragraph::new()
            .center()
            .space_after(12)
            .run(Run::text("ON").bold()),
    );
    doc.paragraph(
        Paragraph::new()
            .center()
            .space_after(12)
            .run(Run::text(record.project_title.as_str()).bold().size(14)),
    );
    doc.paragraph(
        Paragraph::new()
            .center()
            .space_after(12)
            .run(Run::text(format!("No.: {}", record.contract_number)).bold().size(14)),
    );
    doc.paragraph(Paragraph::plain("BETWEEN").center().space_after(12));
}

fn party_a_block(record: &ContractRecord, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .center()
            .space_after(12)
            .run(Run::text(format!("{}, represented by ", record.organization_name)).bold())
            .run(Run::text(format!("{}, ", record.party_a_name)).bold())
            .run(Run::text(format!("{}.\n", record.party_a_position)))
            .run(Run::text(format!("Address: {}.\n", record.party_a_address)))
            .run(Run::text("hereinafter called the \u{201c}"))
            .run(party("Party A"))
            .run(Run::text("\u{201d}")),
    );
}

fn party_b_block(record: &ContractRecord, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .center()
            .space_after(12)
            .run(Run::text(format!("{},\n", record.party_b_full_name_with_title)).bold())
            .run(Run::text(format!("Address: {}\n", record.party_b_address)))
            .run(Run::text(format!("H/P: {}, E-mail: ", record.party_b_phone)))
            .run(Run::text(record.party_b_email.as_str()).color(EMAIL_COLOR))
            .run(Run::text("\nhereinafter called the \u{201c}"))
            .run(party("Party B"))
            .run(Run::text("\u{201d}")),
    );
}

fn recitals(record: &ContractRecord, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::plain(format!(
            "Whereas {} is a legal entity registered with the Ministry of Interior (MOI) {} dated {}.",
            record.organization_name, record.registration_number, record.registration_date
        ))
        .space_after(12),
    );
    doc.paragraph(
        Paragraph::new()
            .space_after(12)
            .run(Run::text("Whereas NGOF will engage the services of \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} which accept the engagement under the following term and conditions.",
            )),
    );
    doc.paragraph(
        Paragraph::new()
            .center()
            .space_after(12)
            .run(Run::text("Both Parties Agreed as follows:").bold()),
    );
}

fn terms_of_reference(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(Run::text("\u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} shall perform tasks as stated in the attached TOR (annex-1) to \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text("\u{201d}, and deliver each milestone as stipulated in article 4.\n"))
            .run(Run::text(
                "The work shall be of good quality and well performed with the acceptance by \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text(".\u{201d}")),
    );
}

fn term_of_agreement(ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(
                Run::text(format!(
                    "The agreement is effective from {} \u{2013} {}.",
                    ctx.record.agreement_start_date, ctx.record.agreement_end_date
                ))
                .bold(),
            )
            .run(Run::text(
                " This Agreement is terminated automatically after the due date of the Agreement \
                 Term unless otherwise, both Parties agree to extend the Term with a written \
                 agreement.",
            )),
    );
}

fn professional_fee(ctx: &Context, doc: &mut DocxBuilder) {
    let fee = ctx.fee;
    doc.paragraph(
        Paragraph::new().run(
            Run::text(format!(
                "The professional fee is the total amount of USD {:.2} ({}) including tax for \
                 the whole assignment period.",
                fee.total, ctx.record.total_fee_words
            ))
            .bold(),
        ),
    );
    doc.paragraph(
        Paragraph::new()
            .run(Run::text(format!("    Total Service Fee:        USD {:.2}", fee.total)).bold()),
    );
    doc.paragraph(
        Paragraph::new().run(
            Run::text(format!(
                "    Withholding Tax {:.1}%:    USD {:.2}",
                fee.tax_rate, fee.tax_amount
            ))
            .bold(),
        ),
    );
    doc.paragraph(
        Paragraph::new()
            .run(Run::text(format!("    Net amount:            USD {:.2}", fee.net)).bold()),
    );
    doc.paragraph(
        Paragraph::new()
            .run(Run::text("\u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} is responsible to issue the Invoice (net amount) and receipt (when \
                 receiving the payment) with the total amount as stipulated in each instalment \
                 as in the Article 4 after having done the agreed deliverable tasks, for payment \
                 request. ",
            ))
            .run(Run::text("The payment will be processed after the satisfaction from \u{201c}"))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} as of the required deliverable tasks as stated in Article 4.",
            )),
    );
    doc.paragraph(
        Paragraph::new()
            .run(Run::text("\u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} is responsible for all related taxes payable to the government \
                 department.",
            )),
    );
}

fn term_of_payment(ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(Paragraph::plain(
        "The payment will be made based on the following schedules:",
    ));

    let fee = ctx.fee;
    let amounts = format!(
        "\u{b7} Gross: ${:.2}\n\u{b7} Tax {:.1}%: ${:.2}\n\u{b7} Net pay: ${:.2}",
        fee.total, fee.tax_rate, fee.tax_amount, fee.net
    );
    let header =
        |text: &str| TableCell::new(Paragraph::new().center().run(Run::text(text).bold().size(12)));

    doc.table(
        Table::with_column_widths_in(&[1.2, 1.5, 3.5, 1.2])
            .row(vec![
                header("Installment"),
                header("Total Amount (USD)"),
                header("Deliverable"),
                header("Due date"),
            ])
            .row(vec![
                TableCell::new(Paragraph::plain(ctx.record.payment_installment_desc.as_str())),
                TableCell::new(Paragraph::new().run(Run::text(amounts).bold())),
                TableCell::new(Paragraph::plain(deliverable_bullets(&ctx.record.deliverables))),
                TableCell::new(Paragraph::plain(ctx.record.agreement_end_date.as_str())),
            ]),
    );
}

/// Deliverable lines as a bulleted block: blanks dropped, entries trimmed,
/// source order kept.
pub fn deliverable_bullets(deliverables: &str) -> String {
    deliverables
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("\u{b7} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn no_other_persons(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(Paragraph::plain(
        "No person or entity, which is not a party to this agreement, has any rights to \
         enforce, take any action, or claim it is owed any benefit under this agreement.",
    ));
}

fn monitoring_and_coordination(ctx: &Context, doc: &mut DocxBuilder) {
    let record = ctx.record;
    doc.paragraph(
        Paragraph::new()
            .run(Run::text("\u{201c}"))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} shall monitor and evaluate the progress of the agreement toward its \
                 objective, including the activities implemented. ",
            ))
            .run(Run::text(format!("{}, ", record.focal_person_a_name)).bold())
            .run(Run::text(format!("{} ", record.focal_person_a_position)).bold())
            .run(Run::text("(Telephone "))
            .run(Run::text(format!("{} ", record.focal_person_a_phone)).bold())
            .run(Run::text("Email: "))
            .run(Run::text(record.focal_person_a_email.as_str()).color(EMAIL_COLOR))
            .run(Run::text(") is the focal contact person of \u{201c}"))
            .run(party("Party A"))
            .run(Run::text("\u{201d} and "))
            .run(Run::text(format!("{} ", record.party_b_full_name_with_title)).bold())
            .run(Run::text("(HP. "))
            .run(Run::text(format!("{}, ", record.party_b_phone)).bold())
            .run(Run::text("E-mail: "))
            .run(Run::text(record.party_b_email.as_str()).color(EMAIL_COLOR))
            .run(Run::text(") the focal contact person of \u{201c}"))
            .run(party("Party B"))
            .run(Run::text("\u{201d}. The focal contact person of \u{201c}"))
            .run(party("Party A"))
            .run(Run::text("\u{201d} and \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} will work together for overall coordination including reviewing and \
                 meeting discussions during the assignment process.",
            )),
    );
}

fn confidentiality(ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(Run::text(format!(
                "All outputs produced, with the exception of the \u{201c}{}\u{201d}, which is a \
                 contribution from, and to be claimed as a public document by the main author \
                 and co-author in associated, and/or under this agreement, shall be the \
                 property of \u{201c}",
                ctx.record.output_description
            )))
            .run(party("Party A"))
            .run(Run::text("\u{201d}. "))
            .run(Run::text("The \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} agrees to not disclose any confidential information, of which he/she \
                 may take cognizance in the performance under this contract, except with the \
                 prior written approval of the \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text("\u{201d}.")),
    );
}

fn anti_corruption(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(Run::text("\u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} shall not participate in any practice that is or could be construed \
                 as an illegal or corrupt practice in Cambodia. ",
            ))
            .run(Run::text("The \u{201c}"))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} is committed to fighting all types of corruption and expects this \
                 same commitment from the consultant it reserves the rights and believes based \
                 on the declaration of \u{201c}",
            ))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} that it is an independent social enterprise firm operating in \
                 Cambodia and it does not involve any conflict of interest with other parties \
                 that may be affected to the \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text("\u{201d}.")),
    );
}

fn policy_compliance(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(Run::text("By signing this agreement, \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} is obligated to comply with and respect all existing policies and \
                 code of conduct of \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d}, such as Gender Mainstreaming, Child Protection, Disability policy, \
                 Environmental Mainstreaming, etc. and the \u{201c}",
            ))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} declared themselves that s/he will perform the assignment in the \
                 neutral position, professional manner, and not be involved in any political \
                 affiliation.",
            )),
    );
}

fn anti_terrorism(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(Paragraph::plain(
        "NGOF is determined that all its funds and resources should only be used to further \
         its mission and shall not be subject to illicit use by any third party nor used or \
         abused for any illicit purpose. In order to achieve this objective, NGOF will not \
         knowingly or recklessly provide funds, economic goods, or material support to any \
         entity or individual designated as a \u{201c}terrorist\u{201d} by the international \
         community or affiliate domestic governments and will take all reasonable steps to \
         safeguard and protect its assets from such illicit use and to comply with host \
         government laws.\n\
         NGOF respects its contracts with its donors and puts procedures in place for \
         compliance with these contracts.\n\
         \u{201c}Illicit use\u{201d} refers to terrorist financing, sanctions, money \
         laundering, and export control regulations.",
    ));
}

fn insurance(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(Run::text("\u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} is responsible for any health and life insurance of its team \
                 members. \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} will not be held responsible for any medical expenses or \
                 compensation incurred during or after this contract.",
            )),
    );
}

fn assignment(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(Run::text("\u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} shall have the right to assign individuals within its organization \
                 to carry out the tasks herein named in the attached Technical Proposal. ",
            ))
            .run(Run::text("The \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} shall not assign, or transfer any of its rights or obligations under \
                 this agreement hereunder without the prior written consent of \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text("\u{201d}. "))
            .run(Run::text("Any attempt by \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} to assign or transfer any of its rights and obligations without the \
                 prior written consent of \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} shall render this agreement subject to immediate termination by \
                 \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text("\u{201d}.")),
    );
}

fn dispute_resolution(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(Run::text(
                "Conflicts between any of these agreements shall be resolved by the following \
                 methods:\n",
            ))
            .run(Run::text("In the case of a disagreement arising between \u{201c}"))
            .run(party("Party A"))
            .run(Run::text("\u{201d} and the \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} regarding the implementation of any part of, or any other \
                 substantive question arising under or relating to this agreement, the parties \
                 shall use their best efforts to arrive at an agreeable resolution by mutual \
                 consultation.\n",
            ))
            .run(Run::text(
                "Unresolved issues may, upon the option of either party and written notice to \
                 the other party, be referred to for arbitration. ",
            ))
            .run(Run::text("Failure by the \u{201c}"))
            .run(party("Party B"))
            .run(Run::text("\u{201d} or \u{201c}"))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} to dispute a decision arising from such arbitration in writing \
                 within thirty (30) calendar days of receipt of a final decision shall result \
                 in such final decision being deemed binding upon either the \u{201c}",
            ))
            .run(party("Party B"))
            .run(Run::text("\u{201d} and/or \u{201c}"))
            .run(party("Party A"))
            .run(Run::text("\u{201d}. "))
            .run(Run::text(
                "All expenses related to arbitration will be shared equally between both \
                 parties.",
            )),
    );
}

fn termination(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(Run::text("The \u{201c}"))
            .run(party("Party A"))
            .run(Run::text("\u{201d} or the \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} may, by notice in writing, terminate this agreement under the \
                 following conditions:\n",
            ))
            .run(Run::text("1. \u{201c}"))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} may terminate this agreement at any time with a week notice if \
                 \u{201c}",
            ))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} fails to comply with the terms and conditions of this agreement.\n",
            ))
            .run(Run::text(
                "2. For gross professional misconduct (as defined in the NGOF Human Resource \
                 Policy), \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} may terminate this agreement immediately without prior notice. ",
            ))
            .run(Run::text("\u{201c}"))
            .run(party("Party A"))
            .run(Run::text("\u{201d} will notify \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} in a letter that will indicate the reason for termination as well as \
                 the effective date of termination.\n",
            ))
            .run(Run::text("3. \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} may terminate this agreement at any time with a one-week notice if \
                 \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} fails to comply with the terms and conditions of this agreement. ",
            ))
            .run(Run::text("\u{201c}"))
            .run(party("Party B"))
            .run(Run::text("\u{201d} will notify \u{201c}"))
            .run(party("Party A"))
            .run(Run::text(
                "\u{201d} in a letter that will indicate the reason for termination as well as \
                 the effective date of termination. ",
            ))
            .run(Run::text("But if \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} intended to terminate this agreement by itself without any \
                 appropriate reason or fails of implementing the assignment, \u{201c}",
            ))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} has to refund the full amount of fees received to \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text("\u{201d}.\n"))
            .run(Run::text("4. If for any reason either \u{201c}"))
            .run(party("Party A"))
            .run(Run::text("\u{201d} or the \u{201c}"))
            .run(party("Party B"))
            .run(Run::text("\u{201d} decides to terminate this agreement, \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} shall be paid pro-rata for the work already completed by \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text("\u{201d}. "))
            .run(Run::text(
                "This payment will require the submission of a timesheet that demonstrates \
                 work completed as well as the handing over of any deliverables completed or \
                 partially completed. ",
            ))
            .run(Run::text("In case \u{201c}"))
            .run(party("Party B"))
            .run(Run::text(
                "\u{201d} has received payment for services under the agreement which have not \
                 yet been performed; the appropriate portion of these fees would be refunded \
                 by \u{201c}",
            ))
            .run(party("Party B"))
            .run(Run::text("\u{201d} to \u{201c}"))
            .run(party("Party A"))
            .run(Run::text("\u{201d}.")),
    );
}

fn amendment(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .run(Run::text(
                "No modification or amendment of this agreement shall be valid unless in \
                 writing and signed by an authorized person of \u{201c}",
            ))
            .run(party("Party A"))
            .run(Run::text("\u{201d} and \u{201c}"))
            .run(party("Party B"))
            .run(Run::text("\u{201d}.")),
    );
}

fn controlling_law(_ctx: &Context, doc: &mut DocxBuilder) {
    doc.paragraph(Paragraph::plain(
        "This agreement shall be governed and construed following the law of the Kingdom of \
         Cambodia. The Simultaneous Interpretation Agreement is prepared in two original \
         copies.",
    ));
}

fn date_line(record: &ContractRecord, doc: &mut DocxBuilder) {
    doc.paragraph(
        Paragraph::new()
            .center()
            .space_before(12)
            .run(Run::text(format!("Date: {}", record.agreement_start_date)).bold()),
    );
}

fn signature_table(record: &ContractRecord, doc: &mut DocxBuilder) {
    let signature = |label: &str, line: &str, name: &str, position: &str| {
        TableCell::new(
            Paragraph::new()
                .center()
                .run(Run::text(format!("For \u{201c}{label}\u{201d}\n\n\n{line}\n")).bold())
                .run(Run::text(format!("{name}\n")).bold())
                .run(Run::text(position).bold()),
        )
    };
    doc.table(
        Table::with_column_widths_in(&[3.0, 3.0])
            .borderless()
            .row(vec![
                signature(
                    "Party A",
                    "_________________",
                    &record.party_a_signature_name,
                    &record.party_a_position,
                ),
                signature(
                    "Party B",
                    "____________________",
                    &record.party_b_signature_name,
                    &record.party_b_position,
                ),
            ]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deliverable_bullets_skips_blank_lines() {
        let bullets = deliverable_bullets("Inception report\n\n  Final report  \n");
        assert_eq!(bullets, "\u{b7} Inception report\n\u{b7} Final report");
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        let err = parse_amount("12,5", "total_fee_usd").unwrap_err();
        assert!(err.to_string().contains("total_fee_usd"));
        assert!(err.to_string().contains("12,5"));
    }
}
