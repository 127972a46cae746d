//! Technical indicator engine tests
//!
//! Exercises the full five-indicator engine on synthetic series:
//! - flat, trending and short histories
//! - per-indicator degradation on insufficient data
//! - whole-engine fallback on empty or corrupt input

use sibyl::services::signals::{overall_score, FallbackPolicy, TechnicalAnalyzer};
use sibyl::services::{analyze_technical, DemoMarketData};
use sibyl::types::*;

fn series(prices: Vec<f64>) -> PriceSeries {
    let volumes = vec![1_000.0; prices.len()];
    PriceSeries::from_prices_and_volumes(prices, volumes).unwrap()
}

fn rising(count: usize) -> PriceSeries {
    series((0..count).map(|i| 100.0 + i as f64).collect())
}

#[test]
fn test_constant_price_has_no_nan() {
    let analysis = analyze_technical(&series(vec![100.0; 60]));
    assert!(!analysis.is_fallback());

    let score = analysis.result();
    assert!(score.overall_score.is_finite());

    let rsi = &score.indicators.rsi;
    assert_eq!(rsi.value, None);
    assert_eq!(rsi.signal, IndicatorSignal::Neutral);

    let macd = &score.indicators.macd;
    assert_eq!(macd.value, Some(IndicatorValue::Number(0.0)));
    assert_eq!(macd.signal, IndicatorSignal::Bearish);

    let bands = &score.indicators.bollinger_bands;
    assert_eq!(bands.value.as_ref().and_then(|v| v.as_label()), Some("Middle"));
    assert_eq!(bands.signal, IndicatorSignal::Neutral);

    assert_eq!(score.indicators.moving_averages.signal, IndicatorSignal::Neutral);
    assert_eq!(
        score.indicators.volume_trend.value,
        Some(IndicatorValue::label("Normal"))
    );

    // one bearish vote out of five
    assert_eq!(score.overall_score, 46.0);
}

#[test]
fn test_rising_series() {
    let analysis = analyze_technical(&rising(60));
    let indicators = &analysis.result().indicators;

    assert_eq!(indicators.rsi.value, Some(IndicatorValue::Number(100.0)));
    assert_eq!(indicators.rsi.signal, IndicatorSignal::Bearish);

    assert_eq!(
        indicators.bollinger_bands.value,
        Some(IndicatorValue::label("Upper"))
    );
    assert_eq!(indicators.bollinger_bands.signal, IndicatorSignal::Neutral);

    // sma20 = 149.5, sma50 = 134.5
    assert_eq!(
        indicators.moving_averages.value,
        Some(IndicatorValue::Number(15.0))
    );
    assert_eq!(indicators.moving_averages.signal, IndicatorSignal::Bullish);

    assert_eq!(indicators.volume_trend.signal, IndicatorSignal::Neutral);
}

#[test]
fn test_short_series_degrades_per_indicator() {
    let analysis = analyze_technical(&rising(30));
    assert!(!analysis.is_fallback());

    let indicators = &analysis.result().indicators;
    assert!(indicators.rsi.value.is_some());
    assert!(indicators.bollinger_bands.value.is_some());
    assert!(indicators.volume_trend.value.is_some());

    assert_eq!(indicators.macd, IndicatorResult::undefined());
    assert_eq!(indicators.moving_averages, IndicatorResult::undefined());
}

#[test]
fn test_single_sample_is_all_neutral() {
    let analysis = analyze_technical(&series(vec![42.0]));
    assert!(!analysis.is_fallback());
    assert_eq!(analysis.result().overall_score, 50.0);
    for signal in analysis.result().indicators.signals() {
        assert_eq!(signal, IndicatorSignal::Neutral);
    }
}

#[test]
fn test_empty_series_falls_back() {
    let analysis = analyze_technical(&PriceSeries::default());
    assert!(analysis.is_fallback());
    assert!(analysis.reason().unwrap().contains("empty"));

    let score = analysis.result();
    assert_eq!(score.overall_score, 70.0);
    assert_eq!(score.indicators.rsi.value, Some(IndicatorValue::Number(55.0)));
    assert_eq!(score.indicators.macd.signal, IndicatorSignal::Bullish);
    assert_eq!(
        score.indicators.volume_trend.value,
        Some(IndicatorValue::label("High"))
    );
}

#[test]
fn test_non_finite_price_falls_back() {
    let mut prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    prices[40] = f64::NAN;

    let analysis = analyze_technical(&series(prices));
    assert!(analysis.is_fallback());
    assert!(analysis.reason().unwrap().contains("non-finite"));
}

#[test]
fn test_seeded_fallback_is_reproducible() {
    let analyzer = TechnicalAnalyzer::new(FallbackPolicy::Seeded(7));
    let first = analyzer.analyze(&PriceSeries::default());
    let second = analyzer.analyze(&PriceSeries::default());
    assert_eq!(first, second);

    let score = first.result();
    assert!((60.0..=80.0).contains(&score.overall_score));
    let rsi = score.indicators.rsi.value.as_ref().and_then(|v| v.as_number()).unwrap();
    assert!((40.0..=70.0).contains(&rsi));
}

#[test]
fn test_demo_history_scores_in_range() {
    let demo = DemoMarketData::new(Some(42));
    let history = demo.price_history_at(30, 1_700_000_000_000);
    assert_eq!(history.len(), 720);

    let analysis = analyze_technical(&history);
    assert!(!analysis.is_fallback());

    let score = analysis.result();
    assert!((30.0..=70.0).contains(&score.overall_score));
    assert!(score.indicators.macd.value.is_some());
    assert!(score.indicators.moving_averages.value.is_some());
}

#[test]
fn test_overall_score_matches_votes() {
    let analysis = analyze_technical(&rising(60));
    let score = analysis.result();
    assert_eq!(score.overall_score, overall_score(&score.indicators.signals()));
}

#[test]
fn test_required_samples() {
    assert_eq!(TechnicalAnalyzer::default().required_samples(), 50);
}
