//! Access-token acquisition against the platform's OAuth endpoint.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// One-time passcode from the authenticator app.
    pub otp: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchange username/password/OTP for a bearer token. The OTP travels in
/// its own header, not the body.
pub async fn fetch_access_token(
    token_url: &str,
    client_id: &str,
    scope: &str,
    credentials: &Credentials,
) -> Result<String> {
    let body = json!({
        "grant_type": "password",
        "username": credentials.username,
        "password": credentials.password,
        "client_id": client_id,
        "scope": scope,
    });

    let client = reqwest::Client::new();
    let response = client
        .post(token_url)
        .header("x-wealthsimple-otp", &credentials.otp)
        .json(&body)
        .send()
        .await
        .context("sending token request")?;

    let status = response.status();
    if !status.is_success() {
        bail!(
            "access token could not be retrieved (status {status}); check username, password and OTP"
        );
    }
    let text = response.text().await.context("reading token response")?;
    if text.is_empty() {
        bail!("empty body received from auth endpoint");
    }

    let token: TokenResponse = serde_json::from_str(&text).context("decoding token response")?;
    token.access_token.context("auth response carried no access_token")
}
