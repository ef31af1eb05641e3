use anyhow::Result;
use clap::ValueEnum;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::pdf::split::{
    planned_outputs, split_pages_with_report, LoadFailurePolicy, PagePolicy, SplitOptions,
    SplitReport,
};
use crate::pdf::PdfDocument;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the PDF file to split")]
    pub path: String,
    #[schemars(
        description = "'skip-single' (default) leaves one-page documents alone, 'always' splits every document"
    )]
    #[serde(default)]
    pub policy: Option<String>,
    #[schemars(
        description = "Result when the file cannot be parsed: 'source' (default) returns the input path, 'empty' returns nothing"
    )]
    #[serde(default)]
    pub on_load_failure: Option<String>,
}

impl PdfSplitRequest {
    fn options(&self) -> Result<SplitOptions, String> {
        let mut options = SplitOptions::default();
        if let Some(policy) = &self.policy {
            options.page_policy = PagePolicy::from_str(policy, true)?;
        }
        if let Some(on_load_failure) = &self.on_load_failure {
            options.on_load_failure = LoadFailurePolicy::from_str(on_load_failure, true)?;
        }
        Ok(options)
    }
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get PDF metadata, page count, and the single-page files a split would produce")]
    async fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        let loaded = tokio::task::spawn_blocking(move || {
            PdfDocument::open(&path).map(|doc| {
                let info = doc.get_info();
                PdfInfoResult {
                    planned_outputs: planned_outputs(&doc.path, info.page_count)
                        .into_iter()
                        .map(|p| p.display().to_string())
                        .collect(),
                    path,
                    page_count: info.page_count,
                    title: info.title,
                    author: info.author,
                    creator: info.creator,
                    producer: info.producer,
                    creation_date: info.creation_date,
                    mod_date: info.mod_date,
                    subject: info.subject,
                    keywords: info.keywords,
                }
            })
        })
        .await;

        match loaded {
            Ok(Ok(result)) => {
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Ok(Err(e)) => format!("Error: {:#}", e),
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Split a PDF into one single-page PDF per page, written next to the source as <stem>_Page_<n>.pdf. Existing outputs are reused.")]
    async fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let options = match req.options() {
            Ok(o) => o,
            Err(e) => return format!("Error: {}", e),
        };

        let path = req.path;
        match tokio::task::spawn_blocking(move || split_pages_with_report(&path, &options)).await {
            Ok(report) => serde_json::to_string_pretty(&SplitResult::from(report))
                .unwrap_or_else(|e| format!("Error: {}", e)),
            Err(e) => format!("Error: {}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub planned_outputs: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub outputs: Vec<String>,
    pub written: Vec<u32>,
    pub reused: Vec<u32>,
    pub skipped: Vec<u32>,
    pub passthrough: bool,
}

impl From<SplitReport> for SplitResult {
    fn from(report: SplitReport) -> Self {
        SplitResult {
            outputs: report
                .outputs
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            written: report.written,
            reused: report.reused,
            skipped: report.skipped,
            passthrough: report.passthrough,
        }
    }
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page splitting tools. Use pdf_info to get document metadata and the files a \
                 split would produce, and pdf_split to write one single-page PDF per page next \
                 to the source."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();

    log::info!("Serving MCP on stdio");
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
