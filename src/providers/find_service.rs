//! Client for the local `/api/find-service` classification endpoint.

use crate::error::{Error, Result};
use crate::http::client::Client;
use crate::provider::{Classification, ClassificationOracle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:16081/api/find-service";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Classification-service client.
pub struct FindServiceClient {
    client: Client,
    endpoint: String,
}

impl FindServiceClient {
    pub fn new(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl ClassificationOracle for FindServiceClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(&self, intent: &str) -> Result<Classification> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&FindServiceRequest { intent })?
            .send()?;
        parse_find_service(response.status(), response.text())
    }
}

/// Interpret a find-service response.
///
/// The service reports failures in-band (`success=false`), so the body is
/// decoded whatever the status; a non-2xx status only wins when the body is
/// not the expected JSON.
pub fn parse_find_service(status: u16, body: &str) -> Result<Classification> {
    let parsed: FindServiceResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !(200..300).contains(&status) => return Err(Error::status(status, body)),
        Err(e) => return Err(Error::decode(format!("find-service body: {e}"))),
    };

    if !parsed.success {
        return Err(Error::service_failure(parsed.error));
    }

    let Some(data) = parsed.data else {
        return Err(Error::decode("find-service reported success without data"));
    };
    Ok(Classification {
        service_id: data.service_id,
        service_name: data.service_name,
    })
}

#[derive(Debug, Serialize)]
struct FindServiceRequest<'a> {
    intent: &'a str,
}

#[derive(Debug, Deserialize)]
struct FindServiceResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<FindServiceData>,
    #[serde(default)]
    error: String,
}

#[derive(Debug, Deserialize)]
struct FindServiceData {
    service_id: i64,
    #[serde(default)]
    service_name: String,
}
