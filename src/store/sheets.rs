//! Google Sheets v4 REST adapter for `AccountStore`. Authenticates as a
//! service account: an RS256-signed JWT assertion is exchanged for a
//! bearer token, which is cached and refreshed shortly before expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::store::{AccountStore, StoreError};
use crate::utils::logging::log_store_operation;

const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const HTTP_TIMEOUT_SECS: u64 = 30;
/// Refresh the cached token this long before it actually expires.
const TOKEN_SLACK_SECS: u64 = 60;

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// The fields we need from a service-account JSON key file.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// REST client for one spreadsheet.
pub struct SheetsClient {
    http: reqwest::Client,
    spreadsheet_id: String,
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    token: Mutex<Option<CachedToken>>,
    /// Tab title -> numeric sheet id, filled lazily for row deletion.
    sheet_ids: Mutex<HashMap<String, i64>>,
}

impl SheetsClient {
    /// Builds a client from the spreadsheet id and the service-account
    /// key JSON (the content of the key file, not a path).
    pub fn new(spreadsheet_id: &str, creds_json: &str) -> Result<Self> {
        let key: ServiceAccountKey =
            serde_json::from_str(creds_json).context("invalid service account JSON")?;
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .context("invalid service account private key")?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            spreadsheet_id: spreadsheet_id.to_string(),
            key,
            signing_key,
            token: Mutex::new(None),
            sheet_ids: Mutex::new(HashMap::new()),
        })
    }

    async fn bearer_token(&self) -> Result<String, StoreError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + 3600,
        };
        let assertion = jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.signing_key,
        )
        .map_err(|e| StoreError::Auth(e.to_string()))?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!("token endpoint {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Auth(e.to_string()))?;
        let lifetime = token.expires_in.saturating_sub(TOKEN_SLACK_SECS);

        let value = token.access_token.clone();
        *cached = Some(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        });
        Ok(value)
    }

    async fn api_error(tab: &str, response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body["error"]["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string(),
            Err(e) => e.to_string(),
        };
        // A range the API cannot parse means the tab title does not exist.
        if message.contains("Unable to parse range") {
            StoreError::TabNotFound(tab.to_string())
        } else {
            StoreError::Api { status, message }
        }
    }

    async fn sheet_id_for(&self, tab: &str) -> Result<i64, StoreError> {
        let mut ids = self.sheet_ids.lock().await;
        if let Some(id) = ids.get(tab) {
            return Ok(*id);
        }

        let token = self.bearer_token().await?;
        let url = format!(
            "{SHEETS_BASE}/{}?fields=sheets(properties(sheetId,title))",
            self.spreadsheet_id
        );
        let response = self.http.get(&url).bearer_auth(&token).send().await?;
        if !response.status().is_success() {
            return Err(Self::api_error(tab, response).await);
        }

        let meta: SpreadsheetMeta = response.json().await?;
        for sheet in meta.sheets {
            ids.insert(sheet.properties.title, sheet.properties.sheet_id);
        }

        ids.get(tab)
            .copied()
            .ok_or_else(|| StoreError::TabNotFound(tab.to_string()))
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{SHEETS_BASE}/{}/values/{range}{suffix}",
            self.spreadsheet_id
        )
    }
}

/// 1-based column index to A1 letters (1 -> A, 27 -> AA).
fn column_letters(mut column: usize) -> String {
    let mut letters = String::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        column = (column - 1) / 26;
    }
    letters
}

#[async_trait]
impl AccountStore for SheetsClient {
    async fn read_table(&self, tab: &str) -> Result<Vec<Vec<String>>, StoreError> {
        log_store_operation("read_table", tab, None);
        let token = self.bearer_token().await?;
        let response = self
            .http
            .get(self.values_url(tab, ""))
            .bearer_auth(&token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(tab, response).await);
        }

        let range: ValueRange = response.json().await?;
        Ok(range.values)
    }

    async fn append_row(&self, tab: &str, cells: Vec<String>) -> Result<(), StoreError> {
        log_store_operation("append_row", tab, None);
        let token = self.bearer_token().await?;
        let response = self
            .http
            .post(self.values_url(tab, ":append?valueInputOption=USER_ENTERED"))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "values": [cells] }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(tab, response).await);
        }
        Ok(())
    }

    async fn update_cell(
        &self,
        tab: &str,
        row: usize,
        column: usize,
        value: &str,
    ) -> Result<(), StoreError> {
        let a1 = format!("{}{row}", column_letters(column));
        log_store_operation("update_cell", tab, Some(&a1));
        let token = self.bearer_token().await?;
        let range = format!("{tab}!{a1}");
        let response = self
            .http
            .put(self.values_url(&range, "?valueInputOption=USER_ENTERED"))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "values": [[value]] }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(tab, response).await);
        }
        Ok(())
    }

    async fn delete_row(&self, tab: &str, row: usize) -> Result<(), StoreError> {
        log_store_operation("delete_row", tab, Some(&row.to_string()));
        let sheet_id = self.sheet_id_for(tab).await?;
        let token = self.bearer_token().await?;
        let url = format!("{SHEETS_BASE}/{}:batchUpdate", self.spreadsheet_id);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&serde_json::json!({
                "requests": [{
                    "deleteDimension": {
                        "range": {
                            "sheetId": sheet_id,
                            "dimension": "ROWS",
                            "startIndex": row - 1,
                            "endIndex": row,
                        }
                    }
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(tab, response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(11), "K");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(52), "AZ");
    }
}
