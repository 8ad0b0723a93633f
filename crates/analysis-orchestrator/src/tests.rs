use crate::{generate_property_id, AnalysisOrchestrator};
use analysis_core::{
    AnalysisError, CompetitiveRating, MarketTrend, PropertyInput, PropertySubmission, RiskLevel,
};
use approx::assert_relative_eq;
use chrono::{DateTime, TimeZone, Utc};
use market_comparator::{MarketTable, SegmentProfile};

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
}

fn springfield() -> PropertyInput {
    PropertyInput {
        address: "123 Main St, Springfield".to_string(),
        price: 350_000.0,
        monthly_rent: 2_800.0,
        monthly_expenses: 1_200.0,
        down_payment: 70_000.0,
        square_feet: None,
        bedrooms: Some(3.0),
        bathrooms: Some(2.0),
        year_built: None,
    }
}

#[test]
fn full_pipeline_on_reference_property() {
    let orchestrator = AnalysisOrchestrator::new();
    let result = orchestrator
        .analyze_at(springfield(), "prop_test".to_string(), fixed_time())
        .unwrap();

    assert_eq!(result.property_id, "prop_test");
    assert_eq!(result.address, "123 Main St, Springfield");
    assert_eq!(result.input_data, springfield());
    assert_eq!(result.timestamp, fixed_time());

    let m = &result.calculated_metrics;
    assert_relative_eq!(m.annual_income, 19_200.0);
    assert_relative_eq!(m.cap_rate, 5.485714, epsilon = 1e-5);
    assert_relative_eq!(m.cash_on_cash, 27.428571, epsilon = 1e-5);
    assert_relative_eq!(m.monthly_cash_flow, 1_600.0);
    assert!(!m.one_percent_rule);

    // 5.49 sits just under the default segment's 6.5 - 1
    assert_eq!(result.market_comparison.average_cap_rate, 6.5);
    assert_eq!(result.market_comparison.market_trend, MarketTrend::Stable);
    assert_eq!(
        result.market_comparison.competitive_rating,
        CompetitiveRating::BelowAverage
    );

    // DSCR ~0.90 is the only risk trigger
    assert_eq!(result.risk_assessment.score, 65);
    assert_eq!(result.risk_assessment.level, RiskLevel::Medium);
    assert_eq!(result.risk_assessment.factors.len(), 1);

    assert_eq!(result.recommendations.len(), 3);
    assert!(result.recommendations[0].starts_with("Strong positive cash flow"));
    assert!(result.recommendations[1].contains("1% rule"));
    assert!(result.recommendations[2].contains("debt service coverage"));
}

#[test]
fn repeated_analysis_is_deterministic() {
    let orchestrator = AnalysisOrchestrator::new();
    let first = orchestrator
        .analyze_at(springfield(), "prop_a".to_string(), fixed_time())
        .unwrap();
    let second = orchestrator
        .analyze_at(springfield(), "prop_a".to_string(), fixed_time())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn city_address_uses_urban_segment() {
    let mut input = springfield();
    input.address = "9 Harbor Rd, Ocean city".to_string();

    let result = AnalysisOrchestrator::new()
        .analyze_at(input, "prop_city".to_string(), fixed_time())
        .unwrap();
    assert_eq!(result.market_comparison.average_cap_rate, 5.5);
    assert_eq!(result.market_comparison.market_trend, MarketTrend::Rising);
    assert_eq!(result.market_comparison.competitive_rating, CompetitiveRating::Average);
}

#[test]
fn injected_market_table_is_used() {
    let mut table = MarketTable::default();
    table.default = SegmentProfile {
        average_cap_rate: 3.0,
        trend: MarketTrend::Rising,
    };

    let result = AnalysisOrchestrator::new()
        .with_market_table(table)
        .analyze_at(springfield(), "prop_t".to_string(), fixed_time())
        .unwrap();
    assert_eq!(result.market_comparison.competitive_rating, CompetitiveRating::Excellent);
}

#[test]
fn invalid_input_never_produces_a_result() {
    let orchestrator = AnalysisOrchestrator::new();

    let mut bad_price = springfield();
    bad_price.price = 0.0;
    let mut bad_rent = springfield();
    bad_rent.monthly_rent = -1.0;
    let mut no_address = springfield();
    no_address.address = String::new();
    let mut zero_down = springfield();
    zero_down.down_payment = 0.0;

    for input in [bad_price, bad_rent, no_address, zero_down] {
        let err = orchestrator
            .analyze_at(input, "prop_x".to_string(), fixed_time())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
    }
}

#[test]
fn extreme_amounts_fail_validation_before_metrics() {
    let orchestrator = AnalysisOrchestrator::new();

    let mut tiny = springfield();
    tiny.price = 1e-310;
    tiny.down_payment = 1e-311;
    tiny.monthly_rent = 1.0;
    tiny.monthly_expenses = 0.0;
    let mut huge = springfield();
    huge.price = 1e308;
    huge.down_payment = 1e307;
    huge.monthly_rent = 1e308;

    for input in [tiny, huge] {
        let err = orchestrator
            .analyze_at(input, "prop_x".to_string(), fixed_time())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)), "got {err:?}");
    }
}

#[test]
fn year_built_validated_against_analysis_year() {
    let mut input = springfield();
    input.year_built = Some(2027);
    let err = AnalysisOrchestrator::new()
        .analyze_at(input, "prop_y".to_string(), fixed_time())
        .unwrap_err();
    assert_eq!(err.field_errors()[0].field, "yearBuilt");
}

#[test]
fn old_property_adds_age_factor() {
    let mut input = springfield();
    input.year_built = Some(1950);
    let result = AnalysisOrchestrator::new()
        .analyze_at(input, "prop_old".to_string(), fixed_time())
        .unwrap();
    assert_eq!(result.risk_assessment.score, 75);
    assert_eq!(result.risk_assessment.level, RiskLevel::High);
}

#[test]
fn submission_missing_fields_is_validation_error() {
    let submission = PropertySubmission {
        address: Some("1 Main St".to_string()),
        price: Some(100_000.0),
        ..Default::default()
    };
    let err = AnalysisOrchestrator::new()
        .analyze_submission(submission)
        .unwrap_err();

    let fields: Vec<&str> = err.field_errors().iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, vec!["monthlyRent", "monthlyExpenses", "downPayment"]);
}

#[test]
fn submission_happy_path_assigns_id_and_time() {
    let submission = PropertySubmission {
        address: Some("77 Lake Dr".to_string()),
        price: Some(200_000.0),
        monthly_rent: Some(2_200.0),
        monthly_expenses: Some(700.0),
        down_payment: Some(40_000.0),
        square_feet: Some(1_100.0),
        ..Default::default()
    };

    let before = Utc::now();
    let result = AnalysisOrchestrator::new()
        .analyze_submission(submission)
        .unwrap();

    assert!(result.property_id.starts_with("prop_"));
    assert!(result.timestamp >= before);
    assert!(result.calculated_metrics.one_percent_rule);
    assert!(result.calculated_metrics.price_per_square_foot.is_some());
}

#[test]
fn serialized_result_keeps_wire_shape() {
    let result = AnalysisOrchestrator::new()
        .analyze_at(springfield(), "prop_json".to_string(), fixed_time())
        .unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["propertyId"], "prop_json");
    assert_eq!(value["inputData"]["monthlyRent"], 2800.0);
    assert!(value["inputData"].get("squareFeet").is_none());
    assert!(value["calculatedMetrics"].get("pricePerSquareFoot").is_none());
    assert_eq!(value["calculatedMetrics"]["onePercentRule"], false);
    assert_eq!(value["marketComparison"]["competitiveRating"], "below-average");
    assert_eq!(value["riskAssessment"]["level"], "medium");
    assert_eq!(value["riskAssessment"]["score"], 65);
    assert!(value["timestamp"].as_str().unwrap().starts_with("2026-03-14T09:30:00"));
}

#[test]
fn property_ids_are_distinct_within_the_same_millisecond() {
    let now = fixed_time();
    let a = generate_property_id(now);
    let b = generate_property_id(now);

    assert_ne!(a, b);
    assert!(a.starts_with(&format!("prop_{}_", now.timestamp_millis())));
    assert_eq!(a.rsplit('_').next().unwrap().len(), 9);
}

#[test]
fn analyze_stamps_current_time() {
    let before = Utc::now();
    let result = AnalysisOrchestrator::new().analyze(springfield()).unwrap();
    let after = Utc::now();

    assert!(result.timestamp >= before && result.timestamp <= after);
    assert!(result.property_id.starts_with("prop_"));
    assert_eq!(result.risk_assessment.score, 65);
}
