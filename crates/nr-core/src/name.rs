//! City-name validation.
//!
//! A valid name is non-empty and contains neither ASCII control characters
//! (bytes 0–31) nor the field separator `;`.

use crate::{MapError, MapResult};

/// Field separator of route descriptions; forbidden inside names.
pub const SEPARATOR: char = ';';

/// `true` if `name` may be used as a city name.
pub fn is_valid_city_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b > 31 && b != SEPARATOR as u8)
}

/// Like [`is_valid_city_name`] but returns [`MapError::InvalidCityName`].
pub fn validate_city_name(name: &str) -> MapResult<()> {
    if is_valid_city_name(name) {
        Ok(())
    } else {
        Err(MapError::InvalidCityName(name.to_owned()))
    }
}
