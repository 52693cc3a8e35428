//! Numeric money values as reported by the page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A money value exactly as the page reported it.
///
/// The page works in whole pesos, but the wire format is a plain JSON number,
/// so fractional values are kept rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub f64);

impl Amount {
	/// The zero amount reported by an empty cart.
	pub const ZERO: Amount = Amount(0.0);

	/// Renders the amount with `,` thousands separators (`2000` -> `"2,000"`).
	pub fn grouped(self) -> String {
		let raw = self.to_string();
		let (sign, unsigned) = match raw.strip_prefix('-') {
			Some(rest) => ("-", rest),
			None => ("", raw.as_str()),
		};
		let (int_part, frac_part) = match unsigned.split_once('.') {
			Some((int_part, frac)) => (int_part, Some(frac)),
			None => (unsigned, None),
		};

		let mut out = String::with_capacity(raw.len() + int_part.len() / 3);
		out.push_str(sign);
		for (i, ch) in int_part.chars().enumerate() {
			if i > 0 && (int_part.len() - i) % 3 == 0 {
				out.push(',');
			}
			out.push(ch);
		}
		if let Some(frac) = frac_part {
			out.push('.');
			out.push_str(frac);
		}
		out
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_finite() && self.0.fract() == 0.0 {
			write!(f, "{:.0}", self.0)
		} else {
			write!(f, "{}", self.0)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn whole_amounts_display_without_decimals() {
		assert_eq!(Amount(2000.0).to_string(), "2000");
		assert_eq!(Amount(2.5).to_string(), "2.5");
	}

	#[test]
	fn grouped_inserts_thousands_separators() {
		assert_eq!(Amount(0.0).grouped(), "0");
		assert_eq!(Amount(999.0).grouped(), "999");
		assert_eq!(Amount(2000.0).grouped(), "2,000");
		assert_eq!(Amount(1234567.0).grouped(), "1,234,567");
		assert_eq!(Amount(-45000.0).grouped(), "-45,000");
		assert_eq!(Amount(12500.75).grouped(), "12,500.75");
	}

	#[test]
	fn deserializes_from_integer_and_float() {
		let a: Amount = serde_json::from_str("3500").unwrap();
		let b: Amount = serde_json::from_str("3500.0").unwrap();
		assert_eq!(a, b);
	}
}
