use chrono::{Local, NaiveDate};
use clap::Args;
use insurance_desk::affiliate::{
    AffiliateSegment, CommissionCalculator, ReferralRequest, SeededVariants,
};
use insurance_desk::claims::{ClaimAdvisor, ClaimStatus, NewClaim, ScriptedAdvisor};
use insurance_desk::coverage::{self, CostInputs};
use insurance_desk::error::AppError;
use insurance_desk::partners::PartnerId;
use insurance_desk::policy::{NewPolicy, Relationship, VerificationStatus};
use insurance_desk::{DeskError, OperationsDesk};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed for the A/B variant stream so repeated runs print the same arms
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
    /// Partner used for the referral portion of the demo
    #[arg(long, default_value = "c1")]
    pub(crate) partner: String,
    /// Skip the affiliate referral portion of the demo.
    #[arg(long)]
    pub(crate) skip_affiliates: bool,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Customer segment (individual, therapist, corporate, education, healthcare, defense, hni)
    #[arg(long)]
    pub(crate) segment: AffiliateSegment,
    /// Partner commission tier (1-4)
    #[arg(long)]
    pub(crate) tier: u8,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let quote = CommissionCalculator::default()
        .quote(args.segment, args.tier)
        .map_err(DeskError::from)?;

    println!("Commission quote for {} at tier {}", args.segment, args.tier);
    println!("- original price   {}", quote.original_price);
    println!("- discount         {}", quote.discount_amount);
    println!("- final price      {}", quote.final_price);
    println!(
        "- commission       {} ({}%)",
        quote.commission_amount, quote.commission_percent
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seed,
        partner,
        skip_affiliates,
    } = args;

    let mut desk = OperationsDesk::default().with_variants(SeededVariants::from_seed(seed));
    let today = Local::now().date_naive();

    println!("Insurance operations desk demo");

    println!("\nPolicy auto-audit");
    let linked = desk.link_policy(demo_policy(today))?;
    println!(
        "- Linked {} ({}) for {}",
        linked.policy_number, linked.id, linked.policy_holder_name
    );

    let mut revised = linked.clone();
    revised.sessions_remaining = revised.sessions_remaining.saturating_sub(1);
    revised.copay_amount = 650;
    revised.group_number = Some("GRP-CORP-12".to_string());
    let stored = desk.update_policy(&linked.id, revised)?;
    println!("  History (newest first):");
    for entry in &stored.history {
        match (&entry.old_value, &entry.new_value) {
            (Some(old), Some(new)) => println!("    - {}: {old} -> {new}", entry.event),
            _ => println!("    - {}", entry.event),
        }
    }

    if let Some(verified) = desk.verify_benefits(&linked.policy_number)? {
        println!(
            "- Benefits verified for {} -> {}",
            verified.policy_number,
            verified.verification_status.label()
        );
    }

    println!("\nClaims");
    let advisor = ClaimAdvisor::new(Arc::new(ScriptedAdvisor::helpful()));
    let claim = desk.file_claim(demo_claim(today));
    println!(
        "- Filed {} for {} ({})",
        claim.claim_number,
        claim.billed_amount,
        claim.status.label()
    );

    let mut denied = claim.clone();
    denied.status = ClaimStatus::Denied;
    denied.denial_reason = Some("Service not covered under outpatient benefit".to_string());
    denied.denial_code = Some("CO-96".to_string());
    desk.update_claim(denied)?;

    match desk.explain_denial(&claim.id, &advisor)?.ready() {
        Some(explanation) => {
            println!("  Denial explained: {}", explanation.explanation);
            for step in &explanation.steps {
                println!("    - {step}");
            }
            if let Some(letter) = desk
                .draft_appeal_letter(&claim.id, &explanation, &advisor)?
                .ready()
            {
                println!("  Appeal letter drafted ({} characters)", letter.len());
            }
        }
        None => println!("  Denial explanation unavailable"),
    }

    let appealed = desk.submit_appeal(&claim.id, Some("Continuity of care".to_string()))?;
    println!("  Appeal submitted -> {}", appealed.status.label());

    let summary = desk.claim_summary();
    println!(
        "- Dashboard: {} paid | {} pending | {} open",
        summary.total_paid, summary.total_pending, summary.open_claims
    );

    let estimate = coverage::estimate(CostInputs {
        session_fee: 3_000,
        coverage_percent: stored.coverage_percent,
        deductible: stored.deductible_amount,
        deductible_met: stored
            .deductible_amount
            .saturating_sub(stored.deductible_remaining),
    });
    println!(
        "- Next session estimate: insurer {} | patient {} ({} toward deductible)",
        estimate.insurer_pays, estimate.patient_pays, estimate.applied_to_deductible
    );

    if !skip_affiliates {
        println!("\nAffiliate referrals via partner {partner}");
        for segment in AffiliateSegment::ordered() {
            let receipt = desk.verify_referral(ReferralRequest {
                partner_id: PartnerId(partner.clone()),
                segment: segment.as_str().to_string(),
                policy_number: format!("REF-{}", segment.as_str().to_uppercase()),
                patient_email: format!("{}@example.com", segment.as_str()),
            })?;
            let tx = &receipt.transaction;
            println!(
                "  - {segment}: {} -> {} | commission {} ({}%) | variant {:?}",
                tx.original_price,
                tx.final_price,
                tx.commission_amount,
                tx.commission_percent,
                tx.variant
            );
        }
        let stats = desk.affiliate_stats(Some(&PartnerId(partner)));
        println!(
            "- Partner totals: {} transactions | revenue {} | commission {}",
            stats.transactions, stats.revenue, stats.commission
        );
    }

    println!("\nAudit log (newest first)");
    for entry in desk.audit_log().entries() {
        println!(
            "  [{}] {} ({}): {}",
            entry.status.label(),
            entry.action,
            entry.category.label(),
            entry.details
        );
    }

    Ok(())
}

fn demo_policy(today: NaiveDate) -> NewPolicy {
    NewPolicy {
        patient_id: "u1".to_string(),
        insurance_company_id: "c1".to_string(),
        policy_number: "BAJ-992211".to_string(),
        member_id: Some("MBR-101".to_string()),
        group_number: None,
        policy_holder_name: "Asha Menon".to_string(),
        relationship: Relationship::PolicyHolder,
        start_date: today - chrono::Duration::days(120),
        end_date: None,
        verification_status: VerificationStatus::Pending,
        sessions_remaining: 10,
        max_sessions_per_year: 12,
        copay_amount: 500,
        coverage_percent: 80,
        deductible_amount: 5_000,
        deductible_remaining: 1_200,
        requires_pre_auth: false,
        pre_auth_obtained: false,
        pre_auth_number: None,
    }
}

fn demo_claim(today: NaiveDate) -> NewClaim {
    NewClaim {
        service_date: today - chrono::Duration::days(3),
        diagnosis_code: "F41.1".to_string(),
        procedure_code: "90834".to_string(),
        billed_amount: 3_500,
        service_type: "psychotherapy".to_string(),
    }
}
