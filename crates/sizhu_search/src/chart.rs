//! Four-pillar derivation.
//!
//! Each pillar is computed independently from the birth moment; only the
//! hour depends on another pillar (the day stem), and the month stem on the
//! year stem.

use sizhu_base::{
    HourPillar, Pillar, day_pillar, hour_pillar, month_pillar_from_branch, resolve_month_branch,
    resolve_year,
};
use sizhu_time::BirthMoment;
use tracing::debug;

use crate::chart_types::{
    ChartConfig, Discrepancy, FourPillarChart, FourPillars, HourPolicy, HourSource, PillarField,
    Provenance, ReferencePillars,
};
use crate::error::ChartError;

/// Derive the four pillars of `moment` under `config`.
pub fn derive_chart(moment: &BirthMoment, config: &ChartConfig) -> FourPillarChart {
    let date = moment.date;
    let day = day_pillar(date, moment.hour());

    let year = resolve_year(date, &config.solar_terms);
    let month_res = resolve_month_branch(date, config.manual_month_branch, &config.solar_terms);
    let month = month_pillar_from_branch(year.pillar.stem(), month_res.branch);

    let hour = hour_pillar(day.stem(), moment.time);
    let hour_source = if hour.is_known() {
        HourSource::Rule
    } else {
        HourSource::Unknown
    };

    let chart = FourPillarChart {
        moment: *moment,
        pillars: FourPillars::new(year.pillar, month, day, hour),
        provenance: Provenance {
            year: year.source,
            month: month_res.source,
            hour: hour_source,
        },
        effective_year: year.effective_year,
        month_term: month_res.term,
        discrepancies: Vec::new(),
    };
    debug!(
        moment = %moment,
        pillars = %chart.pillars,
        provenance = %chart.provenance,
        "derived four pillars"
    );
    chart
}

/// Validate raw parts, then derive. An invalid date fails before any pillar
/// arithmetic runs.
pub fn derive_chart_from_parts(
    year: i32,
    month: u32,
    day: u32,
    hour: Option<u32>,
    minute: Option<u32>,
    config: &ChartConfig,
) -> Result<FourPillarChart, ChartError> {
    let moment = BirthMoment::from_parts(year, month, day, hour, minute)?;
    Ok(derive_chart(&moment, config))
}

/// Derive, then compare against pillars from an external calendar service.
///
/// Differences are recorded in [`FourPillarChart::discrepancies`]; the
/// computed day pillar always stands. With [`HourPolicy::PreferReference`]
/// a reference hour pillar replaces the rule-derived one.
pub fn derive_chart_with_reference(
    moment: &BirthMoment,
    config: &ChartConfig,
    reference: &ReferencePillars,
) -> FourPillarChart {
    let mut chart = derive_chart(moment, config);
    chart.discrepancies = compare_with_reference(&chart.pillars, reference);
    for d in &chart.discrepancies {
        debug!(%d, "reference chart disagrees");
    }

    if config.hour_policy == HourPolicy::PreferReference && moment.time.is_some() {
        if let Some(hour) = reference.hour {
            chart.pillars.hour = HourPillar::Known(hour);
            chart.provenance.hour = HourSource::Reference;
        }
    }
    chart
}

/// Pillars where `reference` has a value that differs from `computed`.
///
/// The hour is only compared when both sides know it.
pub fn compare_with_reference(
    computed: &FourPillars,
    reference: &ReferencePillars,
) -> Vec<Discrepancy> {
    let pairs: [(PillarField, Option<Pillar>, Option<Pillar>); 4] = [
        (PillarField::Year, Some(computed.year), reference.year),
        (PillarField::Month, Some(computed.month), reference.month),
        (PillarField::Day, Some(computed.day), reference.day),
        (PillarField::Hour, computed.hour.pillar(), reference.hour),
    ];
    pairs
        .into_iter()
        .filter_map(|(field, c, r)| match (c, r) {
            (Some(computed), Some(reference)) if computed != reference => Some(Discrepancy {
                field,
                computed,
                reference,
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizhu_base::{BoundarySource, Branch, MajorTerm};

    fn pillar(s: &str) -> Pillar {
        s.parse().unwrap()
    }

    #[test]
    fn derives_1990_05_18_0800() {
        let chart =
            derive_chart_from_parts(1990, 5, 18, Some(8), Some(0), &ChartConfig::approximate())
                .unwrap();
        assert_eq!(chart.pillars.year, pillar("庚午"));
        assert_eq!(chart.pillars.month, pillar("辛巳"));
        assert_eq!(chart.pillars.day, pillar("癸未"));
        assert_eq!(chart.pillars.hour, HourPillar::Known(pillar("丙辰")));
        assert_eq!(chart.effective_year, 1990);
        assert_eq!(chart.month_term, Some(MajorTerm::StartOfSummer));
        assert_eq!(
            chart.provenance.to_string(),
            "approx_year;approx_month;rule_hour"
        );
    }

    #[test]
    fn invalid_date_fails_fast() {
        let err = derive_chart_from_parts(2023, 4, 31, None, None, &ChartConfig::default())
            .unwrap_err();
        assert!(matches!(err, ChartError::Time(_)));
    }

    #[test]
    fn unknown_hour_propagates() {
        let chart =
            derive_chart_from_parts(1990, 5, 18, None, None, &ChartConfig::default()).unwrap();
        assert_eq!(chart.pillars.hour, HourPillar::Unknown);
        assert_eq!(chart.provenance.hour, HourSource::Unknown);
        assert_eq!(chart.pillars.present().len(), 3);
    }

    #[test]
    fn manual_month_uses_effective_year_stem() {
        let config = ChartConfig::approximate().with_manual_month_branch(Branch::Yin);
        // 1990-02-01 counts as 1989 (己巳); 己 year's 寅 month is 丙寅.
        let chart = derive_chart_from_parts(1990, 2, 1, None, None, &config).unwrap();
        assert_eq!(chart.pillars.year, pillar("己巳"));
        assert_eq!(chart.pillars.month, pillar("丙寅"));
        assert_eq!(chart.provenance.month, BoundarySource::Manual);
    }

    #[test]
    fn late_rat_hour_uses_next_day() {
        let chart =
            derive_chart_from_parts(1990, 5, 18, Some(23), Some(30), &ChartConfig::default())
                .unwrap();
        // Day rolls to 1990-05-19 (甲申); 甲 day's 子 hour is 甲子.
        assert_eq!(chart.pillars.day, pillar("甲申"));
        assert_eq!(chart.pillars.hour, HourPillar::Known(pillar("甲子")));
    }

    #[test]
    fn reference_discrepancies_are_informational() {
        let moment = BirthMoment::from_parts(1990, 5, 18, Some(8), None).unwrap();
        let reference = ReferencePillars {
            year: Some(pillar("庚午")),
            month: None,
            day: Some(pillar("甲申")),
            hour: Some(pillar("丁巳")),
        };
        let chart = derive_chart_with_reference(&moment, &ChartConfig::default(), &reference);
        assert_eq!(chart.pillars.day, pillar("癸未"));
        assert_eq!(chart.pillars.hour, HourPillar::Known(pillar("丙辰")));
        let fields: Vec<PillarField> = chart.discrepancies.iter().map(|d| d.field).collect();
        assert_eq!(fields, vec![PillarField::Day, PillarField::Hour]);
    }

    #[test]
    fn preferred_reference_hour_replaces_rule() {
        let moment = BirthMoment::from_parts(1990, 5, 18, Some(8), None).unwrap();
        let reference = ReferencePillars {
            hour: Some(pillar("丁巳")),
            ..ReferencePillars::default()
        };
        let config = ChartConfig::default().with_hour_policy(HourPolicy::PreferReference);
        let chart = derive_chart_with_reference(&moment, &config, &reference);
        assert_eq!(chart.pillars.hour, HourPillar::Known(pillar("丁巳")));
        assert_eq!(chart.provenance.hour, HourSource::Reference);
    }

    #[test]
    fn preferred_reference_hour_ignored_without_birth_time() {
        let moment = BirthMoment::from_parts(1990, 5, 18, None, None).unwrap();
        let reference = ReferencePillars {
            hour: Some(pillar("丁巳")),
            ..ReferencePillars::default()
        };
        let config = ChartConfig::default().with_hour_policy(HourPolicy::PreferReference);
        let chart = derive_chart_with_reference(&moment, &config, &reference);
        assert_eq!(chart.pillars.hour, HourPillar::Unknown);
        assert!(chart.discrepancies.is_empty());
    }
}
