//! Minimal JSON-RPC 2.0 client for token account reads.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{FlowError, Result};
use crate::rest::FlowHttpClient;
use crate::types::ParsedTokenAccountInfo;

/// SPL Token program.
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// `{ context, value }` wrapper used by account queries.
#[derive(Debug, Deserialize)]
pub struct RpcContextValue<T> {
    pub value: T,
}

#[derive(Debug, Deserialize)]
pub struct KeyedAccount {
    pub pubkey: String,
    pub account: ParsedAccount,
}

#[derive(Debug, Deserialize)]
pub struct ParsedAccount {
    pub data: ParsedAccountData,
}

#[derive(Debug, Deserialize)]
pub struct ParsedAccountData {
    pub parsed: ParsedPayload,
}

#[derive(Debug, Deserialize)]
pub struct ParsedPayload {
    pub info: ParsedTokenAccountInfo,
}

/// JSON-RPC client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: FlowHttpClient,
}

impl RpcClient {
    pub fn new(http: FlowHttpClient) -> Self {
        Self { http }
    }

    /// Invoke `method` and unwrap the result or error object.
    pub async fn call<T: serde::de::DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let resp: RpcResponse<T> = self.http.post_json("", &request).await?;

        if let Some(err) = resp.error {
            return Err(FlowError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        resp.result.ok_or_else(|| FlowError::Rpc {
            code: 0,
            message: format!("{method}: empty result"),
        })
    }

    /// `getParsedTokenAccountsByOwner` filtered by token program.
    pub async fn get_parsed_token_accounts_by_owner(
        &self,
        owner: &str,
        program_id: &str,
        commitment: &str,
    ) -> Result<Vec<ParsedTokenAccountInfo>> {
        let params = json!([
            owner,
            { "programId": program_id },
            { "encoding": "jsonParsed", "commitment": commitment }
        ]);
        let resp: RpcContextValue<Vec<KeyedAccount>> =
            self.call("getParsedTokenAccountsByOwner", params).await?;

        Ok(resp
            .value
            .into_iter()
            .map(|keyed| keyed.account.data.parsed.info)
            .collect())
    }
}
