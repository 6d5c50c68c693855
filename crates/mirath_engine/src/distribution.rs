//! The distribution pipeline.
//!
//! validate → exception → blocking → fixed shares → residuary →
//! reduction or redistribution → one entry per present category.

use mirath_config::DistributionConfig;
use mirath_heirs::{
    ALL_CATEGORIES, AsabaDistribution, BlockingMap, ExceptionShares, FixedShare, HeirCategory,
    HeirComposition, ShareRule, all_blockings, applicable_shares, calculate_asaba, check_awl,
    check_radd, check_umariyyatan, descriptor, resolve_asaba,
};
use mirath_rational::Rational;
use tracing::{debug, instrument, trace};

use crate::error::EngineError;
use crate::types::{AllocationEntry, AllocationResult, CorrectionOutcome, ShareBasis};

/// Distribute `total_estate` with default settings.
pub fn compute_distribution(
    composition: &HeirComposition,
    total_estate: f64,
) -> Result<AllocationResult, EngineError> {
    compute_distribution_with(composition, total_estate, &DistributionConfig::default())
}

fn validate_estate(total_estate: f64) -> Result<(), EngineError> {
    if !total_estate.is_finite() {
        return Err(EngineError::InvalidEstate("must be finite"));
    }
    if total_estate < 0.0 {
        return Err(EngineError::InvalidEstate("must not be negative"));
    }
    Ok(())
}

#[instrument(skip(composition, config), fields(spouse_radd = config.spouse_radd))]
pub fn compute_distribution_with(
    composition: &HeirComposition,
    total_estate: f64,
    config: &DistributionConfig,
) -> Result<AllocationResult, EngineError> {
    composition.validate()?;
    validate_estate(total_estate)?;
    config.validate()?;

    let blockings = all_blockings(composition);
    for outcome in blockings.values() {
        if let Some(by) = outcome.blocked_by.filter(|_| composition.is_present(outcome.category)) {
            trace!(category = outcome.category.key(), blocker = %by, "blocked");
        }
    }

    if let Some(exception) = check_umariyyatan(composition) {
        debug!(case = exception.case.key(), "exception applies");
        return exception_result(composition, &blockings, exception, total_estate, config);
    }

    let shares = applicable_shares(composition, &blockings);
    let fixed: Vec<(HeirCategory, Rational)> = shares
        .iter()
        .map(|s| (s.category, s.rule.fixed_part()))
        .filter(|(_, r)| !r.is_zero())
        .collect();
    let fixed_total: Rational = fixed.iter().map(|(_, r)| *r).sum();
    let remainder = Rational::ONE.checked_sub(fixed_total)?;

    let residuary = resolve_asaba(composition, &blockings);
    let asaba = residuary.and_then(|info| calculate_asaba(remainder, &info));
    let absorber = residuary.map(|r| r.category.key());
    debug!(%fixed_total, %remainder, residuary = ?absorber, "fixed shares summed");

    let correction = if let Some(reduction) = check_awl(&fixed) {
        debug!(
            ratio = %reduction.ratio,
            base = reduction.original_base,
            raised = reduction.raised_base,
            "reduction applies"
        );
        CorrectionOutcome::Reduction(reduction)
    } else if let Some(radd) =
        check_radd(&fixed, remainder, residuary.is_some(), config.spouse_radd)
    {
        debug!(
            recipients = radd.recipients.len(),
            to_spouse = radd.to_spouse,
            "redistribution applies"
        );
        CorrectionOutcome::Redistribution(radd)
    } else {
        CorrectionOutcome::NotApplied
    };

    let mut entries = Vec::new();
    for category in ALL_CATEGORIES {
        if !composition.is_present(category) {
            continue;
        }
        let entry = match shares.iter().find(|s| s.category == category) {
            Some(share) => {
                let raw = raw_fraction(share, asaba.as_ref());
                let adjusted = match &correction {
                    CorrectionOutcome::Reduction(r) => {
                        share.rule.fixed_part().checked_mul(r.ratio)?
                    }
                    CorrectionOutcome::Redistribution(r) => {
                        raw.checked_add(r.addend_for(category))?
                    }
                    _ => raw,
                };
                let basis = basis_of(share.rule);
                allocated_entry(share, basis, raw, adjusted, total_estate, config)?
            }
            None => blocked_entry(composition, &blockings, category),
        };
        entries.push(entry);
    }

    finish(entries, correction, total_estate)
}

fn raw_fraction(share: &FixedShare, asaba: Option<&AsabaDistribution>) -> Rational {
    let residual = asaba.map_or(Rational::ZERO, |a| a.total_for(share.category));
    share.rule.fixed_part() + residual
}

const fn basis_of(rule: ShareRule) -> ShareBasis {
    match rule {
        ShareRule::Fixed(_) => ShareBasis::Fixed,
        ShareRule::Residuary => ShareBasis::Residuary,
        ShareRule::FixedAndResiduary(_) => ShareBasis::FixedAndResiduary,
    }
}

fn allocated_entry(
    share: &FixedShare,
    basis: ShareBasis,
    raw: Rational,
    final_fraction: Rational,
    total_estate: f64,
    config: &DistributionConfig,
) -> Result<AllocationEntry, EngineError> {
    let per_head = final_fraction.checked_div(Rational::from(share.count))?;
    let decimal = final_fraction.to_f64();
    Ok(AllocationEntry {
        category: share.category,
        count: share.count,
        basis,
        raw_fraction: raw,
        final_fraction,
        per_head,
        percentage: config.round(decimal * 100.0),
        amount: config.round(decimal * total_estate),
        blocked: false,
        blocked_by: None,
        citation: descriptor(share.category).citation,
    })
}

fn blocked_entry(
    composition: &HeirComposition,
    blockings: &BlockingMap,
    category: HeirCategory,
) -> AllocationEntry {
    AllocationEntry {
        category,
        count: composition.count(category),
        basis: ShareBasis::Blocked,
        raw_fraction: Rational::ZERO,
        final_fraction: Rational::ZERO,
        per_head: Rational::ZERO,
        percentage: 0.0,
        amount: 0.0,
        blocked: true,
        blocked_by: blockings.get(&category).and_then(|o| o.blocked_by),
        citation: descriptor(category).citation,
    }
}

fn exception_result(
    composition: &HeirComposition,
    blockings: &BlockingMap,
    exception: ExceptionShares,
    total_estate: f64,
    config: &DistributionConfig,
) -> Result<AllocationResult, EngineError> {
    let spouse = exception.case.spouse();
    let mut entries = Vec::new();
    for category in ALL_CATEGORIES {
        if !composition.is_present(category) {
            continue;
        }
        let fraction = match category {
            c if c == spouse => exception.spouse,
            HeirCategory::Mother => exception.mother,
            HeirCategory::Father => exception.father,
            _ => {
                entries.push(blocked_entry(composition, blockings, category));
                continue;
            }
        };
        let share = FixedShare {
            category,
            count: composition.count(category),
            rule: ShareRule::Fixed(fraction),
        };
        entries.push(allocated_entry(
            &share,
            ShareBasis::Exception,
            fraction,
            fraction,
            total_estate,
            config,
        )?);
    }
    finish(entries, CorrectionOutcome::Exception(exception), total_estate)
}

fn finish(
    entries: Vec<AllocationEntry>,
    correction: CorrectionOutcome,
    total_estate: f64,
) -> Result<AllocationResult, EngineError> {
    let allocated: Rational = entries.iter().map(|e| e.final_fraction).sum();
    let unallocated = Rational::ONE.checked_sub(allocated)?;
    if correction.is_applied() {
        debug!(correction = correction.key(), "shares corrected");
    }
    if !unallocated.is_zero() {
        debug!(%unallocated, "part of the estate has no heir");
    }
    Ok(AllocationResult {
        entries,
        correction,
        unallocated,
        estate: total_estate,
    })
}

/// Bridge a decimal share into an exact fraction using the configured
/// denominator limit.
pub fn fraction_from_decimal(
    value: f64,
    config: &DistributionConfig,
) -> Result<Rational, EngineError> {
    config.validate()?;
    Ok(Rational::from_decimal(value, config.max_denominator)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_estate() {
        let c = HeirComposition::builder().sons(1).build().unwrap();
        assert_eq!(
            compute_distribution(&c, -1.0),
            Err(EngineError::InvalidEstate("must not be negative"))
        );
        assert!(matches!(
            compute_distribution(&c, f64::NAN),
            Err(EngineError::InvalidEstate(_))
        ));
        assert!(compute_distribution(&c, 0.0).is_ok());
    }

    #[test]
    fn rejects_bad_composition() {
        let c = HeirComposition::builder().husband().wife().build_unchecked();
        assert!(matches!(
            compute_distribution(&c, 100.0),
            Err(EngineError::Composition(_))
        ));
    }

    #[test]
    fn rejects_bad_config() {
        let c = HeirComposition::builder().sons(1).build().unwrap();
        let config = DistributionConfig::default().with_max_denominator(0);
        assert!(matches!(
            compute_distribution_with(&c, 100.0, &config),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn empty_composition_leaves_everything_unallocated() {
        let r = compute_distribution(&HeirComposition::default(), 100.0).unwrap();
        assert!(r.entries.is_empty());
        assert_eq!(r.unallocated, Rational::ONE);
        assert_eq!(r.correction, CorrectionOutcome::NotApplied);
    }

    #[test]
    fn raw_and_final_fractions_under_reduction() {
        let c = HeirComposition::builder()
            .husband()
            .full_sisters(2)
            .mother()
            .build()
            .unwrap();
        let r = compute_distribution(&c, 800.0).unwrap();
        let husband = r.entry(HeirCategory::Husband).unwrap();
        assert_eq!(husband.raw_fraction, Rational::frac(1, 2));
        assert_eq!(husband.final_fraction, Rational::frac(3, 8));
        assert_eq!(husband.amount, 300.0);
        let sisters = r.entry(HeirCategory::FullSister).unwrap();
        assert_eq!(sisters.per_head, Rational::frac(1, 4));
    }

    #[test]
    fn decimal_bridge_uses_config_limit() {
        let tight = DistributionConfig::default().with_max_denominator(10);
        assert_eq!(
            fraction_from_decimal(std::f64::consts::PI, &tight),
            Ok(Rational::frac(22, 7))
        );
        assert_eq!(
            fraction_from_decimal(0.125, &DistributionConfig::default()),
            Ok(Rational::frac(1, 8))
        );
        assert!(matches!(
            fraction_from_decimal(f64::INFINITY, &tight),
            Err(EngineError::Rational(_))
        ));
    }
}
