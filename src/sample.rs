//! Labeled intent samples and the `;`-delimited loader.

use crate::catalog::{Catalog, ServiceId};
use crate::error::{Error, Result};
use std::io::Read;
use std::path::Path;

/// One labeled evaluation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub service_id: ServiceId,
    /// Always the catalog's canonical name, whatever the file declared.
    pub service_name: String,
    pub intent: String,
}

/// Load samples from a file, validating every id against `catalog`.
///
/// Any malformed or unknown id rejects the whole file.
pub fn load_samples(path: &Path, catalog: &Catalog) -> Result<Vec<Sample>> {
    let file = std::fs::File::open(path).map_err(|e| {
        Error::load(path.display().to_string(), 0, format!("cannot open file: {e}"))
    })?;
    let samples = read_samples(file, &path.display().to_string(), catalog)?;
    tracing::info!(path = %path.display(), samples = samples.len(), "Loaded samples");
    Ok(samples)
}

/// Parse samples from any reader. `origin` names the source in errors.
pub fn read_samples<R: Read>(reader: R, origin: &str, catalog: &Catalog) -> Result<Vec<Sample>> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut samples = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut first = true;
    loop {
        match csv.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                let line = e.position().map_or(0, |pos| pos.line());
                return Err(Error::load(origin, to_line(line), e.to_string()));
            }
        }
        let line = to_line(record.position().map_or(0, csv::Position::line));
        let leading = std::mem::replace(&mut first, false);

        if record.len() < 3 {
            continue;
        }
        if leading && is_header(&record) {
            continue;
        }

        let raw_id = record[0].trim();
        let service_id: ServiceId = raw_id.parse().map_err(|e| {
            Error::load(origin, line, format!("invalid service_id {raw_id:?}: {e}"))
        })?;
        let Some(canonical) = catalog.lookup(service_id) else {
            return Err(Error::load(
                origin,
                line,
                format!(
                    "service_id {service_id} is not in the catalog (1..{})",
                    catalog.len()
                ),
            ));
        };

        let declared = record[1].trim();
        if !declared.is_empty() && declared.to_lowercase() != canonical.to_lowercase() {
            tracing::warn!(
                origin,
                line,
                declared,
                canonical,
                "Service name differs from catalog; using catalog name"
            );
        }

        samples.push(Sample {
            service_id,
            service_name: canonical.to_string(),
            intent: record[2].trim().to_string(),
        });
    }

    Ok(samples)
}

fn to_line(line: u64) -> usize {
    usize::try_from(line).unwrap_or(usize::MAX)
}

fn is_header(record: &csv::StringRecord) -> bool {
    record[0].trim().eq_ignore_ascii_case("service_id")
        || record[2].trim().eq_ignore_ascii_case("intent")
}
