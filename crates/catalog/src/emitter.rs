use crate::aspects::{build_aspect, domain_bootstrap, Aspect, MetadataChangeProposal};
use crate::error::{CatalogError, Result};
use notehub_discovery::{Note, Vault};
use serde_json::json;

pub const DEFAULT_GMS_URL: &str = "http://localhost:8080";

/// Catalog connection and identity settings.
///
/// Built by the boundary component (the CLI sources env vars); the emitter
/// itself never reads the process environment.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog's metadata service.
    pub gms_url: String,

    /// Optional bearer token.
    pub token: Option<String>,

    /// Owner URN stamped onto ownership and property aspects.
    pub owner_urn: String,

    /// User name used to qualify dataset names.
    pub user: String,

    /// Domain datasets are assigned to, when set.
    pub domain_urn: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            gms_url: DEFAULT_GMS_URL.to_string(),
            token: None,
            owner_urn: "urn:li:corpuser:local".to_string(),
            user: "local".to_string(),
            domain_urn: None,
        }
    }
}

/// REST client for the catalog's ingestion endpoint.
pub struct RestEmitter {
    config: CatalogConfig,
    client: reqwest::Client,
}

impl RestEmitter {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        log::info!("Using catalog GMS at {}", config.gms_url);
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Send one change proposal. Non-2xx responses become
    /// [`CatalogError::Api`] with the response body attached.
    pub async fn emit(&self, mcp: &MetadataChangeProposal) -> Result<()> {
        let url = format!(
            "{}/aspects?action=ingestProposal",
            self.config.gms_url.trim_end_matches('/')
        );
        // the generic ingestion shape wraps the aspect as a JSON string
        let payload = json!({
            "proposal": {
                "entityType": mcp.entity_type,
                "entityUrn": mcp.entity_urn,
                "changeType": "UPSERT",
                "aspectName": mcp.aspect_name,
                "aspect": {
                    "contentType": "application/json",
                    "value": serde_json::to_string(&mcp.aspect)?,
                },
            },
        });

        let mut request = self
            .client
            .post(&url)
            .header("X-RestLi-Protocol-Version", "2.0.0")
            .json(&payload);
        if let Some(token) = self.config.token.as_deref().filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Emit the selected aspects for one note.
    ///
    /// Properties and status failures propagate (without them the entity is
    /// invisible); ownership, schema, browse and domain degrade to warnings
    /// so one bad aspect never loses the note.
    pub async fn emit_note(&self, vault: &Vault, note: &Note, aspects: &[Aspect]) -> Result<()> {
        for aspect in crate::aspects::ASPECT_EMIT_ORDER {
            if !aspects.contains(&aspect) {
                continue;
            }
            let Some(mcp) = build_aspect(aspect, vault, note, &self.config) else {
                continue;
            };

            log::info!("Emitting {} for {}", mcp.aspect_name, mcp.entity_urn);
            match aspect {
                Aspect::Properties | Aspect::Status => self.emit(&mcp).await?,
                _ => {
                    if let Err(e) = self.emit(&mcp).await {
                        log::warn!(
                            "Emitting {} failed for {}: {e} -- continuing",
                            mcp.aspect_name,
                            mcp.entity_urn
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// Create the configured domain if it does not exist (key aspect, then
    /// display properties).
    pub async fn ensure_domain(&self) -> Result<()> {
        let domain_urn = self
            .config
            .domain_urn
            .as_deref()
            .ok_or(CatalogError::NoDomain)?;

        log::info!("Ensuring domain exists: {domain_urn}");
        for mcp in domain_bootstrap(domain_urn) {
            self.emit(&mcp).await?;
        }
        Ok(())
    }
}
