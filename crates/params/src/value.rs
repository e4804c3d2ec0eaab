use std::fmt;

use custody_primitives::{ContractId, Party};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// A single navigation parameter value before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
	Text(String),
	Bool(bool),
	Number(Decimal),
	/// Explicitly no value.
	Null,
	/// Field not supplied; the canonical codec omits it.
	Undefined,
}

impl ParamValue {
	/// String coercion used by the legacy link format.
	///
	/// `Null` and `Undefined` become the literal words `null`/`undefined`,
	/// which is exactly the ambiguity the canonical codec removes.
	pub fn legacy_text(&self) -> String {
		match self {
			Self::Text(text) => text.clone(),
			Self::Bool(flag) => flag.to_string(),
			Self::Number(number) => number.to_string(),
			Self::Null => "null".to_string(),
			Self::Undefined => "undefined".to_string(),
		}
	}

	/// Text form of a present value, `None` for `Null`/`Undefined`.
	pub fn text(&self) -> Option<String> {
		match self {
			Self::Null | Self::Undefined => None,
			other => Some(other.legacy_text()),
		}
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.legacy_text())
	}
}

impl From<&str> for ParamValue {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<&String> for ParamValue {
	fn from(text: &String) -> Self {
		Self::Text(text.clone())
	}
}

impl From<bool> for ParamValue {
	fn from(flag: bool) -> Self {
		Self::Bool(flag)
	}
}

impl From<Decimal> for ParamValue {
	fn from(number: Decimal) -> Self {
		Self::Number(number)
	}
}

impl From<&Party> for ParamValue {
	fn from(party: &Party) -> Self {
		Self::Text(party.as_str().to_string())
	}
}

impl From<&ContractId> for ParamValue {
	fn from(id: &ContractId) -> Self {
		Self::Text(id.as_str().to_string())
	}
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

/// Ordered field name to value mapping serialized into a query string.
///
/// Encoding follows insertion order; re-inserting a key keeps its original
/// position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
	fields: IndexMap<String, ParamValue>,
}

impl NavigationParams {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
		self.fields.insert(key.into(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.fields.get(key)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.fields.iter().map(|(key, value)| (key.as_str(), value))
	}
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for NavigationParams {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::new();
		for (key, value) in iter {
			params.insert(key, value);
		}
		params
	}
}
