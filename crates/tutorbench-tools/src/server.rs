//! MCP server exposing the tutoring resources as callable tools.

use std::future::Future;
use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    schemars, tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};

use crate::notes::NotesStore;
use crate::solver::MathSolver;

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SolveMathParams {
    /// The math problem to solve.
    pub problem: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RetrieveNotesParams {
    /// The grade level of the notes. Ex: 7th or 8th.
    pub grade: String,
    /// The section to retrieve notes from. Ex: 1.1, 4.3, etc.
    pub section: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ListSectionsParams {
    /// The grade level to retrieve sections for. Ex: 7th or 8th.
    pub grade: String,
}

/// The tool server handed to MCP clients.
#[derive(Clone)]
pub struct TutorToolServer {
    notes: Arc<NotesStore>,
    solver: Arc<MathSolver>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TutorToolServer {
    pub fn new(notes: NotesStore, solver: MathSolver) -> Self {
        Self {
            notes: Arc::new(notes),
            solver: Arc::new(solver),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Solve a math problem using WolframAlpha. Does not give step-by-step, only the final answer. Does not work for word problems."
    )]
    async fn solve_math(
        &self,
        Parameters(SolveMathParams { problem }): Parameters<SolveMathParams>,
    ) -> Result<CallToolResult, McpError> {
        let solution = self.solver.solve(&problem).await;
        Ok(CallToolResult::success(vec![Content::text(solution)]))
    }

    #[tool(description = "Retrieve notes from a specific section.")]
    fn retrieve_notes(
        &self,
        Parameters(RetrieveNotesParams { grade, section }): Parameters<RetrieveNotesParams>,
    ) -> Result<CallToolResult, McpError> {
        let notes = self.notes.retrieve(&grade, &section);
        Ok(CallToolResult::success(vec![Content::text(notes)]))
    }

    #[tool(description = "Get all section identifiers and their titles for a specific grade.")]
    fn list_sections(
        &self,
        Parameters(ListSectionsParams { grade }): Parameters<ListSectionsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.notes.sections(&grade) {
            Ok(listing) => Ok(CallToolResult::success(vec![Content::text(listing)])),
            Err(e) => Err(McpError::internal_error(format!("{e:#}"), None)),
        }
    }
}

#[tool_handler]
impl ServerHandler for TutorToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Math tutoring resources: section note lookup and a WolframAlpha solving proxy."
                    .to_string(),
            ),
        }
    }
}

/// Serve the tools over stdio until the client disconnects.
pub async fn serve_stdio(server: TutorToolServer) -> anyhow::Result<()> {
    tracing::info!("serving tutoring tools over stdio");
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
