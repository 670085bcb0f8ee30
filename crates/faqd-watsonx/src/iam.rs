//! IAM token exchange shared by the generation and embedding clients

use reqwest::Client;
use serde::{Deserialize, Serialize};

use faqd_core::{Error, Result};

use crate::config::WatsonxConfig;

#[derive(Serialize)]
struct TokenRequest {
    grant_type: String,
    apikey: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange the API key for a bearer token
pub(crate) async fn request_access_token(client: &Client, config: &WatsonxConfig) -> Result<String> {
    let token_request = TokenRequest {
        grant_type: "urn:ibm:params:oauth:grant-type:apikey".to_string(),
        apikey: config.api_key.clone(),
    };

    let url = format!("https://{}/identity/token", config.iam_url);

    let response = client
        .post(&url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .form(&token_request)
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::Authentication(format!(
            "authentication failed: {}",
            response.status()
        )));
    }

    let token_response: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::Serialization(e.to_string()))?;

    Ok(token_response.access_token)
}
