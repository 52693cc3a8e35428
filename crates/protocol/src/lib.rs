//! Data model shared by the cafeteria automation controller.
//!
//! This crate holds the shapes of data that cross the page boundary (menu and
//! cart payloads produced by the page's automation accessors) and the delivery
//! records produced by the message dispatcher.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No browser access, no I/O
//! - **Strict**: Payloads decode against a fixed schema or not at all
//! - **Explicit about failure**: [`try_decode_menu`] and [`try_decode_cart`]
//!   say why a payload was rejected; the controller decides to read it as empty
//!
//! The controller built on top of these types lives in `cafe-rs`.

pub mod amount;
pub mod cart;
pub mod delivery;
pub mod menu;

pub use amount::*;
pub use cart::*;
pub use delivery::*;
pub use menu::*;

use thiserror::Error;

/// Why a page payload could not be decoded.
///
/// Returned by the `try_decode_*` functions.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// The accessor returned nothing (missing function, `null`, or blank text).
	#[error("accessor returned no data")]
	Empty,

	/// The payload was present but did not match the schema.
	#[error("malformed payload: {0}")]
	Malformed(#[from] serde_json::Error),
}

fn non_blank(text: Option<&str>) -> Result<&str, DecodeError> {
	match text {
		Some(t) if !t.trim().is_empty() => Ok(t),
		_ => Err(DecodeError::Empty),
	}
}
