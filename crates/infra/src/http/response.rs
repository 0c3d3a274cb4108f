//! Response normalization

use std::collections::BTreeMap;

use reqwest::Response;
use restsdk_domain::ApiResponse;

/// Read the whole body as text and capture status and headers verbatim.
///
/// No JSON decoding happens here; callers decode with [`ApiResponse::json`].
pub async fn normalize(response: Response) -> Result<ApiResponse, reqwest::Error> {
    let status = response.status().as_u16();

    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in response.headers() {
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    let body = response.text().await?;

    Ok(ApiResponse::new(status, body, headers))
}
