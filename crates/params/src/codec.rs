//! Query-string wire formats.
//!
//! # Canonical form
//!
//! ```text
//! ?sender=A&symbol=Bond+RTL&isFungible=true&reference
//! ```
//!
//! Keys and values are `application/x-www-form-urlencoded`. A key written
//! without `=` is the null sentinel: an empty string encodes as `key=`, so no
//! string value can collide with it. `Undefined` fields are omitted.
//!
//! # Legacy form
//!
//! ```text
//! ?sender=A&symbol=Bond RTL&isFungible=true&reference=null
//! ```
//!
//! Values are written unescaped, so `&` or `=` inside a value corrupts the
//! following fields, and null collapses into the word `null`. Only kept to
//! read and reproduce links minted by older pages.

use indexmap::IndexMap;
use url::form_urlencoded;

use crate::decoded::DecodedParams;
use crate::value::{NavigationParams, ParamValue};

/// Encodes `params` in the canonical percent-encoded form.
pub fn encode(params: &NavigationParams) -> String {
	let mut out = String::from("?");
	let mut first = true;
	for (key, value) in params.iter() {
		if matches!(value, ParamValue::Undefined) {
			continue;
		}
		if !first {
			out.push('&');
		}
		first = false;
		out.extend(form_urlencoded::byte_serialize(key.as_bytes()));
		if let Some(text) = value.text() {
			out.push('=');
			out.extend(form_urlencoded::byte_serialize(text.as_bytes()));
		}
	}
	out
}

/// Decodes a canonical query string. A leading `?` is optional.
///
/// Bare keys decode to an explicit null; repeated keys keep the last value.
pub fn decode(query: &str) -> DecodedParams {
	let query = query.strip_prefix('?').unwrap_or(query);
	let mut fields = IndexMap::new();
	for segment in query.split('&').filter(|segment| !segment.is_empty()) {
		let (key, value) = match segment.split_once('=') {
			Some((key, value)) => (unescape(key), Some(unescape(value))),
			None => (unescape(segment), None),
		};
		fields.insert(key, value);
	}
	DecodedParams::from_fields(fields)
}

/// Encodes `params` in the legacy unescaped form.
pub fn encode_legacy(params: &NavigationParams) -> String {
	let pairs: Vec<String> = params.iter().map(|(key, value)| format!("{key}={}", value.legacy_text())).collect();
	format!("?{}", pairs.join("&"))
}

/// Decodes a legacy query string to plain strings, the way a browser's query
/// parser would: escapes and `+` are decoded, bare keys become `""`.
///
/// Every value arrives as text; per-field typing is left to
/// [`DecodedParams`].
pub fn decode_legacy(query: &str) -> IndexMap<String, String> {
	let query = query.strip_prefix('?').unwrap_or(query);
	form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

fn unescape(component: &str) -> String {
	// `parse` splits at the first raw `=` only, so the dummy key keeps any
	// `=` inside `component` in the value.
	let pair = format!("_={component}");
	form_urlencoded::parse(pair.as_bytes())
		.next()
		.map(|(_, value)| value.into_owned())
		.unwrap_or_default()
}

#[cfg(test)]
mod tests;
