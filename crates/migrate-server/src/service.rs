//! MCP tool server for GLIDE migration analysis.
//!
//! The `MigrationService` exposes seven tools:
//! 1. `parse_declarations` - Parse method declarations into signatures
//! 2. `categorize_methods` - Assign command families to method names
//! 3. `find_equivalent` - Look up the GLIDE equivalent of a client symbol
//! 4. `diff_symbol` - Compare a client symbol against its GLIDE equivalents
//! 5. `validate_mappings` - Check the built-in mappings against the GLIDE surface
//! 6. `ingest_commands` - Add one slice of the command list to the catalog
//! 7. `get_command_catalog` - Read the stored command catalog

use crate::error::{ToolError, respond};
use crate::types::{
    CategorizeMethodsParams, CategorizeMethodsResult, CommandCatalogView, DiffSymbolParams,
    FindEquivalentParams, FindEquivalentResult, GetCommandCatalogParams, IngestCommandsParams,
    MethodCategory, ParseDeclarationsParams, ParseDeclarationsResult, ValidateMappingsParams,
    ValidateMappingsResult,
};
use glide_migrate_core::{
    ClientKind, CommandFamily, Error, HttpFetcher, MigrationConfig, TextFetcher, fetch_all,
};
use glide_migrate_ingest::{
    CatalogStore, DEFAULT_BATCH_SIZE, FileCatalogStore, IngestOutcome, IngestRequest, ingest,
    resolve_family_filter,
};
use glide_migrate_mapping::{
    DiffReport, MappingCatalog, SignatureIndex, diff_symbol, surface_from_sources,
    validate_mappings, write_validation_artifacts,
};
use glide_migrate_surface::{categorize, categorize_all, parse_declarations};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, tool, tool_handler, tool_router};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

type ToolResult<T> = Result<T, ToolError>;

const DEFAULT_DECLARING_FILE: &str = "input";

/// MCP server for GLIDE migration analysis.
///
/// Every tool call derives its working data from its arguments, the
/// configured sources, or the stored catalog. Nothing is cached between
/// calls apart from the embedded mapping datasets.
///
/// # Examples
///
/// ```no_run
/// use glide_migrate_core::MigrationConfig;
/// use glide_migrate_server::MigrationService;
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
///
/// # async fn example() -> anyhow::Result<()> {
/// let service = MigrationService::new(MigrationConfig::default())?;
/// service.serve(stdio()).await?.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MigrationService {
    /// Source URLs and output locations
    config: Arc<MigrationConfig>,

    /// Retrieves declaration, source and documentation text
    fetcher: Arc<dyn TextFetcher>,

    /// Command catalog persistence
    store: Arc<dyn CatalogStore>,

    /// Built-in mapping datasets
    mappings: Arc<MappingCatalog>,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,
}

impl MigrationService {
    /// Creates a service that fetches over HTTP and stores the catalog in
    /// the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the embedded
    /// mapping datasets fail to load.
    pub fn new(config: MigrationConfig) -> glide_migrate_core::Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config)?);
        let store = Arc::new(FileCatalogStore::new(config.output_dir.clone()));
        Self::with_parts(config, fetcher, store)
    }

    /// Creates a service from explicit fetcher and store implementations.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded mapping datasets fail to load.
    pub fn with_parts(
        config: MigrationConfig,
        fetcher: Arc<dyn TextFetcher>,
        store: Arc<dyn CatalogStore>,
    ) -> glide_migrate_core::Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            fetcher,
            store,
            mappings: Arc::new(MappingCatalog::load_builtin()?),
            tool_router: Self::tool_router(),
        })
    }

    /// Returns inline text if given, otherwise fetches `url`.
    async fn resolve_text(
        &self,
        text: Option<String>,
        url: Option<&str>,
        field: &str,
    ) -> ToolResult<String> {
        if let Some(text) = text {
            return Ok(text);
        }
        let url = url.ok_or_else(|| Error::ValidationError {
            field: field.to_string(),
            reason: "provide inline text, a URL or a client".to_string(),
        })?;
        Ok(self.fetcher.fetch_text(url).await?)
    }

    /// Returns inline GLIDE sources if given, otherwise fetches the
    /// configured ones.
    async fn resolve_sources(&self, texts: Option<Vec<String>>) -> ToolResult<Vec<String>> {
        match texts {
            Some(texts) => Ok(texts),
            None => Ok(fetch_all(self.fetcher.as_ref(), &self.config.glide_source_urls).await?),
        }
    }

    async fn run_parse_declarations(
        &self,
        params: ParseDeclarationsParams,
    ) -> ToolResult<ParseDeclarationsResult> {
        let client = params.client.as_deref().map(ClientKind::from_str).transpose()?;
        let url = params
            .url
            .as_deref()
            .or_else(|| client.map(|c| self.config.declaration_url(c)));
        let text = self.resolve_text(params.text, url, "text").await?;

        let declaring_file = params
            .declaring_file
            .unwrap_or_else(|| DEFAULT_DECLARING_FILE.to_string());
        let mut methods = parse_declarations(&text, &declaring_file);
        categorize_all(&mut methods);

        Ok(ParseDeclarationsResult {
            declaring_file,
            method_count: methods.len(),
            methods,
        })
    }

    async fn run_diff_symbol(&self, params: DiffSymbolParams) -> ToolResult<DiffReport> {
        let client = ClientKind::from_str(&params.client)?;
        if !client.is_source() {
            return Err(Error::InvalidArgument(format!(
                "diff_symbol compares a source client against GLIDE, got '{client}'"
            ))
            .into());
        }

        let source_url = params
            .source_url
            .as_deref()
            .unwrap_or_else(|| self.config.declaration_url(client));
        let glide_url = params
            .glide_url
            .as_deref()
            .unwrap_or_else(|| self.config.declaration_url(ClientKind::Glide));

        let source_text = self
            .resolve_text(params.source_text, Some(source_url), "source_text")
            .await?;
        let glide_text = self
            .resolve_text(params.glide_text, Some(glide_url), "glide_text")
            .await?;

        let source = SignatureIndex::new(parse_declarations(&source_text, client.as_str()));
        let target = SignatureIndex::new(parse_declarations(&glide_text, ClientKind::Glide.as_str()));
        Ok(diff_symbol(&self.mappings, client, &params.symbol, &source, &target))
    }

    async fn run_validate_mappings(
        &self,
        params: ValidateMappingsParams,
    ) -> ToolResult<ValidateMappingsResult> {
        let sources = self.resolve_sources(params.source_texts).await?;
        let surface = surface_from_sources(&sources);
        let report = validate_mappings(self.mappings.datasets(), &surface);

        if !params.write_artifacts.unwrap_or(true) {
            return Ok(ValidateMappingsResult {
                report,
                artifacts: None,
            });
        }

        let dir = params
            .output_dir
            .unwrap_or_else(|| self.config.output_dir.clone());
        let (report, artifacts) = tokio::task::spawn_blocking(move || {
            write_validation_artifacts(&dir, &report, &surface).map(|a| (report, a))
        })
        .await??;

        Ok(ValidateMappingsResult {
            report,
            artifacts: Some(artifacts),
        })
    }

    async fn run_ingest_commands(&self, params: IngestCommandsParams) -> ToolResult<IngestOutcome> {
        let request = IngestRequest {
            start: params.start.unwrap_or(0),
            count: params.count.unwrap_or(DEFAULT_BATCH_SIZE),
            refresh: params.refresh,
        };
        request.check_count()?;

        let doc_text = self
            .resolve_text(params.doc_text, Some(self.config.commands_doc_url.as_str()), "doc_text")
            .await?;
        let sources = self.resolve_sources(params.source_texts).await?;

        let store = Arc::clone(&self.store);
        let outcome =
            tokio::task::spawn_blocking(move || ingest(&doc_text, &sources, &request, store.as_ref()))
                .await??;
        Ok(outcome)
    }

    async fn run_get_command_catalog(
        &self,
        params: GetCommandCatalogParams,
    ) -> ToolResult<CommandCatalogView> {
        let family = params.family.as_deref().map(resolve_family_filter).transpose()?;

        let store = Arc::clone(&self.store);
        let catalog = tokio::task::spawn_blocking(move || store.load()).await??;

        let families: BTreeMap<String, usize> = catalog
            .by_family()
            .into_iter()
            .map(|(family, entries)| (family, entries.len()))
            .collect();
        let entries = catalog
            .entries()
            .filter(|e| family.is_none_or(|f| e.family == f))
            .filter(|e| !params.validated_only || e.validated)
            .cloned()
            .collect();

        Ok(CommandCatalogView {
            total_entries: catalog.len(),
            validated_count: catalog.validated_count(),
            families,
            entries,
        })
    }
}

#[tool_router]
impl MigrationService {
    /// Parse method declarations into signatures.
    #[tool(
        description = "Parse interface/class method declarations into signatures with arity, return type and command family. Provide inline text, a URL, or a client name to fetch its configured declarations."
    )]
    async fn parse_declarations(
        &self,
        Parameters(params): Parameters<ParseDeclarationsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.run_parse_declarations(params).await)
    }

    /// Categorize method names into command families.
    #[tool(description = "Assign a command family to each method name using the fixed keyword table.")]
    async fn categorize_methods(
        &self,
        Parameters(params): Parameters<CategorizeMethodsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut by_family: BTreeMap<CommandFamily, Vec<String>> = BTreeMap::new();
        let categories = params
            .names
            .into_iter()
            .map(|name| {
                let category = categorize(&name);
                by_family.entry(category).or_default().push(name.clone());
                MethodCategory { name, category }
            })
            .collect();

        respond(Ok(CategorizeMethodsResult {
            categories,
            by_family,
        }))
    }

    /// Look up the GLIDE equivalent of a client symbol.
    #[tool(
        description = "Look up the curated GLIDE equivalent of an ioredis or node-redis symbol. Matching is exact."
    )]
    async fn find_equivalent(
        &self,
        Parameters(params): Parameters<FindEquivalentParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = ClientKind::from_str(&params.client)
            .map(|client| {
                let entries: Vec<_> = self
                    .mappings
                    .find_equivalent(client, &params.symbol)
                    .into_iter()
                    .cloned()
                    .collect();
                FindEquivalentResult {
                    client,
                    found: !entries.is_empty(),
                    symbol: params.symbol,
                    entries,
                }
            })
            .map_err(ToolError::from);
        respond(outcome)
    }

    /// Diff a client symbol against its GLIDE equivalents.
    #[tool(
        description = "Compare the arity and parameter types of an ioredis or node-redis method against the GLIDE methods its mapping references."
    )]
    async fn diff_symbol(
        &self,
        Parameters(params): Parameters<DiffSymbolParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.run_diff_symbol(params).await)
    }

    /// Validate the built-in mappings against the current GLIDE surface.
    #[tool(
        description = "Check that every GLIDE method referenced by the built-in mappings exists in the current GLIDE sources, and write JSON and Markdown reports."
    )]
    async fn validate_mappings(
        &self,
        Parameters(params): Parameters<ValidateMappingsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.run_validate_mappings(params).await)
    }

    /// Ingest one slice of the command list into the catalog.
    #[tool(
        description = "Map a slice of the documented command list to GLIDE methods and merge it into the stored command catalog. Use nextStart from the result to continue."
    )]
    async fn ingest_commands(
        &self,
        Parameters(params): Parameters<IngestCommandsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.run_ingest_commands(params).await)
    }

    /// Read the stored command catalog.
    #[tool(description = "Read the stored command catalog, optionally filtered by family or to validated entries.")]
    async fn get_command_catalog(
        &self,
        Parameters(params): Parameters<GetCommandCatalogParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.run_get_command_catalog(params).await)
    }
}

#[tool_handler]
impl ServerHandler for MigrationService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Analyze migration from ioredis and node-redis to Valkey GLIDE. \
                 Use find_equivalent and diff_symbol for individual calls, \
                 validate_mappings to detect drift, and ingest_commands with \
                 get_command_catalog to build the command catalog."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_migrate_core::StaticFetcher;
    use glide_migrate_ingest::MemoryCatalogStore;
    use serde_json::Value;

    const GLIDE_SOURCE: &str = r#"
export class BaseClient {
    public async get(key: GlideString): Promise<GlideString | null> {
        return this.createWritePromise(createGet(key));
    }
    public async set(key: GlideString, value: GlideString, options?: SetOptions): Promise<"OK" | null> {
        return this.createWritePromise(createSet(key, value, options));
    }
    public async hget(key: GlideString, field: GlideString): Promise<GlideString | null> {
        return this.createWritePromise(createHGet(key, field));
    }
    public async xgroupCreate(key: GlideString, groupName: GlideString, id: string): Promise<"OK"> {
        return this.createWritePromise(createXGroupCreate(key, groupName, id));
    }
}
"#;

    const IOREDIS_DECLARATIONS: &str = r"
interface RedisCommander<Context> {
    hget(key: RedisKey, field: string | Buffer, callback?: Callback<string | null>): Result<string | null, Context>;
    get(key: RedisKey, callback?: Callback<string | null>): Result<string | null, Context>;
}
";

    fn service_with(fetcher: StaticFetcher) -> MigrationService {
        let config = MigrationConfig {
            commands_doc_url: "mem://commands".to_string(),
            glide_source_urls: vec!["mem://base-client".to_string()],
            ioredis_declaration_url: "mem://ioredis".to_string(),
            glide_declaration_url: "mem://glide".to_string(),
            ..Default::default()
        };
        MigrationService::with_parts(config, Arc::new(fetcher), Arc::new(MemoryCatalogStore::new()))
            .unwrap()
    }

    fn service() -> MigrationService {
        service_with(
            StaticFetcher::new()
                .with("mem://commands", "<code>GET</code> <code>XGROUP CREATE</code> <code>OBJECT HELP</code>")
                .with("mem://base-client", GLIDE_SOURCE)
                .with("mem://ioredis", IOREDIS_DECLARATIONS)
                .with("mem://glide", GLIDE_SOURCE),
        )
    }

    fn structured(result: &CallToolResult) -> &Value {
        result.structured_content.as_ref().unwrap()
    }

    #[test]
    fn test_get_info() {
        let info = service().get_info();
        assert_eq!(info.protocol_version, ProtocolVersion::V_2024_11_05);
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_router_lists_all_tools() {
        let names: Vec<String> = MigrationService::tool_router()
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        for tool in [
            "parse_declarations",
            "categorize_methods",
            "find_equivalent",
            "diff_symbol",
            "validate_mappings",
            "ingest_commands",
            "get_command_catalog",
        ] {
            assert!(names.iter().any(|n| n == tool), "missing {tool}");
        }
    }

    #[tokio::test]
    async fn test_parse_inline_text() {
        let params = ParseDeclarationsParams {
            text: Some("public async xadd(key: string, entries: string[][]): Promise<string>".to_string()),
            url: Some("mem://never-fetched".to_string()),
            ..Default::default()
        };
        let result = service().parse_declarations(Parameters(params)).await.unwrap();
        let value = structured(&result);

        assert_eq!(value["methodCount"], 1);
        assert_eq!(value["declaringFile"], "input");
        let xadd = &value["methods"][0];
        assert_eq!(xadd["name"], "xadd");
        assert_eq!(xadd["minArity"], 2);
        assert_eq!(xadd["maxArity"], 2);
        assert_eq!(xadd["isAsync"], true);
        assert_eq!(xadd["returnTypeText"], "string");
        assert_eq!(xadd["category"], "streams");
    }

    #[tokio::test]
    async fn test_parse_client_fetches_configured_url() {
        let params = ParseDeclarationsParams {
            client: Some("ioredis".to_string()),
            ..Default::default()
        };
        let result = service().parse_declarations(Parameters(params)).await.unwrap();
        assert_eq!(structured(&result)["methodCount"], 2);
    }

    #[tokio::test]
    async fn test_parse_without_input_is_error_payload() {
        let result = service()
            .parse_declarations(Parameters(ParseDeclarationsParams::default()))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(structured(&result)["error"].as_str().unwrap().contains("text"));
    }

    #[tokio::test]
    async fn test_parse_fetch_failure_is_internal_error() {
        let params = ParseDeclarationsParams {
            url: Some("mem://missing".to_string()),
            ..Default::default()
        };
        let err = service().parse_declarations(Parameters(params)).await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_categorize_methods() {
        let params = CategorizeMethodsParams {
            names: vec!["hget".to_string(), "xadd".to_string(), "flushall".to_string()],
        };
        let result = service().categorize_methods(Parameters(params)).await.unwrap();
        let value = structured(&result);

        assert_eq!(value["categories"][0]["category"], "strings");
        assert_eq!(value["categories"][1]["category"], "streams");
        assert_eq!(value["byFamily"]["streams"][0], "xadd");
        assert_eq!(value["categories"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_find_equivalent() {
        let params = FindEquivalentParams {
            client: "ioredis".to_string(),
            symbol: "zrangebyscore".to_string(),
        };
        let result = service().find_equivalent(Parameters(params)).await.unwrap();
        let value = structured(&result);
        assert_eq!(value["found"], true);
        assert!(value["entries"][0]["glide"].as_str().unwrap().contains("zrange"));
    }

    #[tokio::test]
    async fn test_find_equivalent_unknown_client() {
        let params = FindEquivalentParams {
            client: "jedis".to_string(),
            symbol: "get".to_string(),
        };
        let result = service().find_equivalent(Parameters(params)).await.unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_diff_symbol_from_configured_sources() {
        let params = DiffSymbolParams {
            client: "ioredis".to_string(),
            symbol: "hget".to_string(),
            source_text: None,
            source_url: None,
            glide_text: None,
            glide_url: None,
        };
        let result = service().diff_symbol(Parameters(params)).await.unwrap();
        let value = structured(&result);

        assert_eq!(value["known"], true);
        let comparison = &value["candidates"][0]["comparisons"][0];
        assert_eq!(comparison["method"], "hget");
        assert_eq!(comparison["found"], true);
        assert_eq!(comparison["arityMismatch"], false);
    }

    #[tokio::test]
    async fn test_diff_symbol_rejects_glide_client() {
        let params = DiffSymbolParams {
            client: "glide".to_string(),
            symbol: "get".to_string(),
            source_text: Some(String::new()),
            source_url: None,
            glide_text: Some(String::new()),
            glide_url: None,
        };
        let result = service().diff_symbol(Parameters(params)).await.unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_validate_without_artifacts() {
        let params = ValidateMappingsParams {
            source_texts: Some(vec![GLIDE_SOURCE.to_string()]),
            write_artifacts: Some(false),
            output_dir: None,
        };
        let result = service().validate_mappings(Parameters(params)).await.unwrap();
        let value = structured(&result);

        assert!(value.get("artifacts").is_none());
        let results = value["report"]["results"].as_array().unwrap();
        let get = results
            .iter()
            .find(|r| r["client"] == "ioredis" && r["symbol"] == "get")
            .unwrap();
        assert_eq!(get["validated"], true);
        assert!(value["report"]["validatedCount"].as_u64().unwrap() < value["report"]["totalEntries"].as_u64().unwrap());
    }

    #[tokio::test]
    async fn test_validate_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let params = ValidateMappingsParams {
            source_texts: None,
            write_artifacts: None,
            output_dir: Some(dir.path().to_path_buf()),
        };
        let result = service().validate_mappings(Parameters(params)).await.unwrap();

        assert!(structured(&result)["artifacts"]["report"].is_string());
        assert!(dir.path().join("glide-validation.json").exists());
        assert!(dir.path().join("glide-validation.md").exists());
        assert!(dir.path().join("glide-methods.json").exists());
    }

    #[tokio::test]
    async fn test_ingest_then_read_catalog() {
        let service = service();
        let params = IngestCommandsParams {
            count: Some(2),
            ..Default::default()
        };
        let result = service.ingest_commands(Parameters(params)).await.unwrap();
        let value = structured(&result);
        assert_eq!(value["totalCommands"], 3);
        assert_eq!(value["nextStart"], 2);

        let params = IngestCommandsParams {
            start: Some(2),
            count: Some(2),
            ..Default::default()
        };
        let result = service.ingest_commands(Parameters(params)).await.unwrap();
        assert!(structured(&result)["nextStart"].is_null());

        let params = GetCommandCatalogParams {
            family: Some("streams".to_string()),
            validated_only: true,
        };
        let result = service.get_command_catalog(Parameters(params)).await.unwrap();
        let value = structured(&result);
        assert_eq!(value["totalEntries"], 3);
        assert_eq!(value["validatedCount"], 2);
        assert_eq!(value["families"]["general"], 1);
        assert_eq!(value["entries"][0]["command"], "XGROUP CREATE");
        assert_eq!(value["entries"][0]["method"], "xgroupCreate");
    }

    #[tokio::test]
    async fn test_catalog_family_filter_ignores_case_and_padding() {
        let service = service();
        let params = IngestCommandsParams::default();
        let result = service.ingest_commands(Parameters(params)).await.unwrap();
        assert_eq!(structured(&result)["totalCommands"], 3);

        for family in ["Streams", " streams"] {
            let params = GetCommandCatalogParams {
                family: Some(family.to_string()),
                validated_only: false,
            };
            let result = service.get_command_catalog(Parameters(params)).await.unwrap();
            let entries = structured(&result)["entries"].as_array().unwrap();
            assert_eq!(entries.len(), 1, "family filter {family:?}");
            assert_eq!(entries[0]["family"], "streams");
        }
    }

    #[tokio::test]
    async fn test_ingest_bad_count_is_error_payload() {
        let params = IngestCommandsParams {
            count: Some(500),
            ..Default::default()
        };
        let result = service().ingest_commands(Parameters(params)).await.unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_catalog_rejects_unknown_family() {
        let params = GetCommandCatalogParams {
            family: Some("widgets".to_string()),
            validated_only: false,
        };
        let result = service().get_command_catalog(Parameters(params)).await.unwrap();
        assert_eq!(result.is_error, Some(true));

        let params = GetCommandCatalogParams {
            family: Some("other".to_string()),
            validated_only: false,
        };
        let result = service().get_command_catalog(Parameters(params)).await.unwrap();
        assert_eq!(structured(&result)["totalEntries"], 0);
    }
}
