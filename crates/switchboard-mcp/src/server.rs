use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use serde::Serialize;
use switchboard_llm::{ChatCompletionArgs, Gateway};
use tokio_util::sync::CancellationToken;

use crate::error::McpError;

/// MCP server exposing `chat_completion`, `list_models` and `test_providers`
#[derive(Clone)]
pub struct GatewayServer {
    gateway: Arc<Gateway>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GatewayServer {
    /// Create a tool server backed by the shared gateway
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            gateway,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Create a chat completion. Tries the primary provider first and falls back to the secondary on failure."
    )]
    async fn chat_completion(
        &self,
        Parameters(args): Parameters<ChatCompletionArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let reply = self.gateway.chat_completion(args).await;
        json_result(&reply)
    }

    #[tool(description = "List the models of the configured providers in priority order")]
    async fn list_models(&self) -> Result<CallToolResult, ErrorData> {
        json_result(&self.gateway.list_models())
    }

    #[tool(description = "Test connectivity to every configured provider")]
    async fn test_providers(&self) -> Result<CallToolResult, ErrorData> {
        let reports = self.gateway.test_providers().await;
        json_result(&reports)
    }
}

#[tool_handler]
impl ServerHandler for GatewayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "OpenAI-compatible chat completions with automatic fallback between providers".to_owned(),
            ),
        }
    }
}

/// Encode a reply as the tool's single text content
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(value)
        .map_err(McpError::from)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Serve the tools over stdin/stdout until the client disconnects or
/// `shutdown` is cancelled
pub async fn serve_stdio(gateway: Arc<Gateway>, shutdown: CancellationToken) -> Result<(), McpError> {
    let running = GatewayServer::new(gateway)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| McpError::Transport(e.to_string()))?;

    tracing::info!("MCP server listening on stdio");

    tokio::select! {
        result = running.waiting() => {
            let reason = result.map_err(|e| McpError::Transport(e.to_string()))?;
            tracing::info!(?reason, "MCP client disconnected");
        }
        () = shutdown.cancelled() => {
            tracing::info!("MCP server shutting down");
        }
    }

    Ok(())
}
