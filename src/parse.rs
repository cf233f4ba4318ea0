//! Extraction of a catalog service id from free-text oracle output.

use crate::catalog::{Catalog, ServiceId};
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Longest digit run that can name a service.
const MAX_ID_DIGITS: usize = 3;

static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();

fn digit_run() -> &'static Regex {
    // ASCII only; `\d` would also match other scripts' digits.
    DIGIT_RUN.get_or_init(|| Regex::new(r"[0-9]+").expect("digit run regex"))
}

/// Parse the first digit run in `raw` as a catalog id.
///
/// Surrounding text is tolerated ("A resposta é 4." yields 4). The run must be
/// 1 to 3 digits long; a longer run such as "0004" is not an id. Values that
/// are not catalog members are rejected, never clamped.
pub fn parse_service_id(raw: &str, catalog: &Catalog) -> Result<ServiceId> {
    let text = raw.trim();
    let Some(found) = digit_run()
        .find(text)
        .filter(|run| run.len() <= MAX_ID_DIGITS)
    else {
        return Err(Error::NoDigits {
            raw: raw.to_string(),
        });
    };

    let digits = found.as_str();
    let value: u64 = digits.parse().map_err(|e: std::num::ParseIntError| Error::InvalidInteger {
        digits: digits.to_string(),
        raw: raw.to_string(),
        message: e.to_string(),
    })?;

    match ServiceId::try_from(value) {
        Ok(id) if catalog.contains(id) => Ok(id),
        _ => Err(Error::OutOfRange {
            value,
            raw: raw.to_string(),
        }),
    }
}
