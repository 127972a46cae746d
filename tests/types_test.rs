//! Unit tests for types module

use sibyl::types::*;
use serde_json::json;

#[test]
fn test_indicator_result_serialization() {
    let result = IndicatorResult::new(IndicatorValue::rounded(64.26), IndicatorSignal::Bullish);
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({ "value": 64.3, "signal": "Bullish", "signal_class": "bullish" })
    );
}

#[test]
fn test_undefined_indicator_serialization() {
    let value = serde_json::to_value(IndicatorResult::undefined()).unwrap();
    assert_eq!(
        value,
        json!({ "value": null, "signal": "Neutral", "signal_class": "neutral-signal" })
    );
}

#[test]
fn test_label_indicator_serialization() {
    let result = IndicatorResult::new(IndicatorValue::label("Lower"), IndicatorSignal::Bearish);
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["value"], "Lower");
    assert_eq!(value["signal_class"], "bearish");
}

#[test]
fn test_indicator_signal_values() {
    assert_eq!(IndicatorSignal::Bullish.value(), 1);
    assert_eq!(IndicatorSignal::Neutral.value(), 0);
    assert_eq!(IndicatorSignal::Bearish.value(), -1);
    assert_eq!(IndicatorSignal::default(), IndicatorSignal::Neutral);
}

#[test]
fn test_indicator_set_field_names() {
    let set = IndicatorSet {
        rsi: IndicatorResult::undefined(),
        macd: IndicatorResult::undefined(),
        bollinger_bands: IndicatorResult::undefined(),
        moving_averages: IndicatorResult::undefined(),
        volume_trend: IndicatorResult::undefined(),
    };
    let value = serde_json::to_value(&set).unwrap();
    for key in ["rsi", "macd", "bollinger_bands", "moving_averages", "volume_trend"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn test_signal_direction_serialization() {
    assert_eq!(
        serde_json::to_string(&SignalDirection::StrongBuy).unwrap(),
        "\"strong_buy\""
    );
    assert_eq!(
        serde_json::to_string(&SignalDirection::StrongSell).unwrap(),
        "\"strong_sell\""
    );

    let parsed: SignalDirection = serde_json::from_str("\"sell\"").unwrap();
    assert_eq!(parsed, SignalDirection::Sell);
}

#[test]
fn test_signal_direction_labels() {
    assert_eq!(SignalDirection::StrongBuy.label(), "Strong Buy");
    assert_eq!(SignalDirection::Neutral.as_str(), "neutral");
}

#[test]
fn test_price_source_serialization() {
    assert_eq!(serde_json::to_string(&PriceSource::CoinGecko).unwrap(), "\"coingecko\"");
    let parsed: PriceSource = serde_json::from_str("\"demo\"").unwrap();
    assert_eq!(parsed, PriceSource::Demo);
}

#[test]
fn test_sentiment_label_from_polarity() {
    assert_eq!(SentimentLabel::from_polarity(0.5), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_polarity(0.1), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_polarity(-0.1), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_polarity(-0.4), SentimentLabel::Negative);
}

#[test]
fn test_analysis_accessors() {
    let ok: Analysis<u8> = Analysis::Ok(1);
    assert!(!ok.is_fallback());
    assert_eq!(ok.reason(), None);

    let fallback = Analysis::fallback(2u8, "upstream down");
    assert!(fallback.is_fallback());
    assert_eq!(fallback.reason(), Some("upstream down"));
    assert_eq!(*fallback.result(), 2);
    assert_eq!(fallback.into_inner(), 2);
}

#[test]
fn test_fallback_tags_omit_empty_reasons() {
    let tags = FallbackTags::default();
    let value = serde_json::to_value(&tags).unwrap();
    assert_eq!(value, json!({ "technical": false, "prediction": false }));
}
