use std::str::FromStr;

use custody_primitives::{BondData, ContractId, Party};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::debug;

use crate::fields;

/// Decoded query fields with typed accessors.
///
/// Each field maps to `Some(text)` or `None` for an explicit null. Accessors
/// never fail: the navigation source is trusted but not verified, so a missing
/// or malformed field yields the accessor's default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedParams {
	fields: IndexMap<String, Option<String>>,
	/// Fields came from the unescaped encoder, which spells null as a word.
	legacy: bool,
}

impl DecodedParams {
	pub(crate) fn from_fields(fields: IndexMap<String, Option<String>>) -> Self {
		Self { fields, legacy: false }
	}

	/// Adopts the output of [`crate::decode_legacy`]; every field is present.
	pub fn from_legacy(fields: IndexMap<String, String>) -> Self {
		Self {
			fields: fields.into_iter().map(|(key, value)| (key, Some(value))).collect(),
			legacy: true,
		}
	}

	pub fn is_legacy(&self) -> bool {
		self.legacy
	}

	pub fn contains(&self, key: &str) -> bool {
		self.fields.contains_key(key)
	}

	/// True when the field was sent as an explicit null.
	pub fn is_null(&self, key: &str) -> bool {
		matches!(self.fields.get(key), Some(None))
	}

	/// Raw text of a present, non-null field.
	pub fn raw(&self, key: &str) -> Option<&str> {
		self.fields.get(key).and_then(|value| value.as_deref())
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Text field; missing or null reads as `""`.
	pub fn text(&self, key: &str) -> String {
		self.raw(key).unwrap_or_default().to_string()
	}

	/// Optional text field.
	///
	/// Missing and null read as `None`. For legacy fields the words
	/// `"null"`/`"undefined"` also read as `None`; canonical fields keep them
	/// as text, since the canonical null is a bare key.
	pub fn optional_text(&self, key: &str) -> Option<String> {
		match self.raw(key) {
			Some("null" | "undefined") if self.legacy => None,
			text => text.map(str::to_string),
		}
	}

	/// Boolean field: only the exact text `"true"` is true.
	pub fn flag(&self, key: &str) -> bool {
		self.raw(key) == Some("true")
	}

	/// Decimal field; `None` when missing, null or unparseable.
	pub fn number(&self, key: &str) -> Option<Decimal> {
		let text = self.raw(key)?;
		match Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
			Ok(number) => Some(number),
			Err(error) => {
				debug!(field = key, value = text, %error, "ignoring unparseable numeric parameter");
				None
			}
		}
	}

	pub fn party(&self, key: &str) -> Party {
		Party::new(self.text(key))
	}

	pub fn contract_id(&self, key: &str) -> ContractId {
		ContractId::new(self.text(key))
	}

	/// Bond attributes, `None` unless at least one bond field carries a value.
	pub fn bond(&self) -> Option<BondData> {
		let keys = [fields::PRICE, fields::INTEREST_RATE, fields::AMOUNT_ISSUED, fields::DURATION, fields::BOND_ISSUER];
		if keys.iter().all(|key| self.optional_text(key).is_none()) {
			return None;
		}
		let text = |key| self.optional_text(key).unwrap_or_default();
		Some(BondData {
			price: text(fields::PRICE),
			interest_rate: text(fields::INTEREST_RATE),
			amount_issued: text(fields::AMOUNT_ISSUED),
			duration: text(fields::DURATION),
			bond_issuer: Party::new(text(fields::BOND_ISSUER)),
		})
	}
}
