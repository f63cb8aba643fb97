use crate::error::Result;
use crate::rest::FlowHttpClient;
use crate::types::*;

impl FlowHttpClient {
    // --- Streams ---

    /// GET /streams?wallet= - Streams where the wallet is sender or recipient.
    pub async fn get_streams(&self, wallet: &str) -> Result<Vec<(String, StreamRecord)>> {
        self.get("/streams", &[("wallet", wallet)]).await
    }

    /// GET /streams/{id} - A single stream.
    pub async fn get_stream(&self, id: &str) -> Result<StreamRecord> {
        self.get(&format!("/streams/{id}"), &[]).await
    }

    /// POST /streams - Submit a signed creation request.
    pub async fn post_stream(&self, request: &SignedRequest) -> Result<CreateStreamResponse> {
        self.post_json("/streams", request).await
    }
}
