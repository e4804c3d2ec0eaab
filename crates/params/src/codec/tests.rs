use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::*;
use crate::fields;

fn transfer_scenario() -> NavigationParams {
	NavigationParams::new()
		.with(fields::SENDER, "A")
		.with(fields::RECEIVER, "B")
		.with(fields::AMOUNT, "50.0")
		.with(fields::SYMBOL, "Bond RTL")
		.with(fields::IS_FUNGIBLE, true)
		.with(fields::REFERENCE, ParamValue::Null)
}

#[test]
fn legacy_encoding_matches_link_format() {
	assert_eq!(
		encode_legacy(&transfer_scenario()),
		"?sender=A&receiver=B&amount=50.0&symbol=Bond RTL&isFungible=true&reference=null"
	);
}

#[test]
fn legacy_decoding_yields_typed_fields_with_canonical_null() {
	let raw = decode_legacy(&encode_legacy(&transfer_scenario()));
	assert_eq!(raw.get("reference").map(String::as_str), Some("null"));

	let decoded = DecodedParams::from_legacy(raw);
	assert!(decoded.flag(fields::IS_FUNGIBLE));
	assert_eq!(decoded.optional_text(fields::REFERENCE), None);
	assert_eq!(decoded.text(fields::SYMBOL), "Bond RTL");
	assert_eq!(decoded.number(fields::AMOUNT), Some(Decimal::new(500, 1)));
}

#[test]
fn canonical_encoding_escapes_and_uses_bare_key_for_null() {
	assert_eq!(
		encode(&transfer_scenario()),
		"?sender=A&receiver=B&amount=50.0&symbol=Bond+RTL&isFungible=true&reference"
	);
}

#[test]
fn canonical_null_is_distinct_from_the_word_null() {
	let params = NavigationParams::new()
		.with("absent", ParamValue::Null)
		.with("word", "null")
		.with("empty", "");
	let decoded = decode(&encode(&params));
	assert!(decoded.is_null("absent"));
	assert_eq!(decoded.raw("word"), Some("null"));
	assert_eq!(decoded.raw("empty"), Some(""));
	assert!(!decoded.is_null("empty"));
}

#[test]
fn undefined_fields_are_omitted() {
	let params = NavigationParams::new().with("a", "1").with("b", ParamValue::Undefined).with("c", "3");
	assert_eq!(encode(&params), "?a=1&c=3");
	assert_eq!(encode_legacy(&params), "?a=1&b=undefined&c=3");
}

#[test]
fn reserved_characters_survive_canonical_round_trip() {
	let params = NavigationParams::new()
		.with("party", "custodian_party::1220ab")
		.with("memo", "a&b=c?d#e+f%20")
		.with("unicode", "Grüße €");
	let decoded = decode(&encode(&params));
	assert_eq!(decoded.raw("party"), Some("custodian_party::1220ab"));
	assert_eq!(decoded.raw("memo"), Some("a&b=c?d#e+f%20"));
	assert_eq!(decoded.raw("unicode"), Some("Grüße €"));
}

#[test]
fn legacy_ampersand_corrupts_following_fields() {
	let params = NavigationParams::new().with("memo", "x&y").with("after", "z");
	let raw = decode_legacy(&encode_legacy(&params));
	assert_eq!(raw.get("memo").map(String::as_str), Some("x"));
	assert_eq!(raw.get("y").map(String::as_str), Some(""));
}

#[test]
fn decode_accepts_percent_escaped_browser_links() {
	let decoded = decode("?symbol=Bond%20RTL&duration=1%20year&reference=null");
	assert_eq!(decoded.text("symbol"), "Bond RTL");
	assert_eq!(decoded.text("duration"), "1 year");
	assert_eq!(decoded.optional_text("reference").as_deref(), Some("null"));
}

#[test]
fn decode_without_leading_question_mark_and_empty_segments() {
	let decoded = decode("a=1&&b=2&");
	assert_eq!(decoded.len(), 2);
	assert_eq!(decoded.raw("a"), Some("1"));
	assert_eq!(decoded.raw("b"), Some("2"));
}

#[test]
fn repeated_keys_keep_last_value() {
	let decoded = decode("?a=1&a=2");
	assert_eq!(decoded.raw("a"), Some("2"));
	assert_eq!(decode_legacy("?a=1&a=2").get("a").map(String::as_str), Some("2"));
}

#[test]
fn empty_params_encode_to_bare_question_mark() {
	assert_eq!(encode(&NavigationParams::new()), "?");
	assert_eq!(encode_legacy(&NavigationParams::new()), "?");
	assert!(decode("?").is_empty());
}

fn arb_value() -> impl Strategy<Value = ParamValue> {
	prop_oneof![
		"[a-zA-Z0-9._~-]{0,12}".prop_map(ParamValue::Text),
		any::<bool>().prop_map(ParamValue::Bool),
		(any::<i64>(), 0u32..8).prop_map(|(mantissa, scale)| ParamValue::Number(Decimal::new(mantissa, scale))),
	]
}

fn arb_params() -> impl Strategy<Value = NavigationParams> {
	proptest::collection::vec(("[a-zA-Z][a-zA-Z0-9]{0,8}", arb_value()), 0..8).prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
	/// Unreserved values survive the legacy codec as their string coercion.
	#[test]
	fn prop_legacy_round_trip(params in arb_params()) {
		let decoded = decode_legacy(&encode_legacy(&params));
		prop_assert_eq!(decoded.len(), params.len());
		for (key, value) in params.iter() {
			prop_assert_eq!(decoded.get(key), Some(&value.legacy_text()));
		}
	}

	/// Arbitrary text, including reserved characters, survives the canonical codec.
	#[test]
	fn prop_canonical_round_trip(pairs in proptest::collection::vec(("[a-z]{1,6}", proptest::option::of(any::<String>())), 0..8)) {
		let params: NavigationParams = pairs
			.iter()
			.map(|(key, value)| (key.clone(), ParamValue::from(value.clone())))
			.collect();
		let decoded = decode(&encode(&params));
		for (key, value) in params.iter() {
			prop_assert_eq!(decoded.raw(key).map(str::to_string), value.text());
			prop_assert_eq!(decoded.is_null(key), matches!(value, ParamValue::Null));
		}
	}
}
