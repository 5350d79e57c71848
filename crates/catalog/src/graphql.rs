use crate::emitter::CatalogConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const DOMAIN_QUERY: &str = r#"query dataset($urn: String!) {
  dataset(urn: $urn) {
    urn
    domain {
      associatedUrn
      domain {
        urn
        id
        properties { name description }
      }
    }
  }
}"#;

/// Domain association read back from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainAssociation {
    pub urn: String,
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Lookup outcome for one dataset URN.
#[derive(Debug, Clone, Serialize)]
pub struct DomainReport {
    pub urn: String,
    pub domain: Option<DomainAssociation>,
    pub error: Option<String>,
}

/// Fetch the domain association for each URN via the catalog's GraphQL API.
///
/// Network failures are retried with a fixed delay; per-URN failures end up
/// in that URN's report rather than failing the batch.
pub async fn check_domains(
    config: &CatalogConfig,
    urns: &[String],
    retries: u32,
    delay: Duration,
) -> Result<Vec<DomainReport>> {
    let client = reqwest::Client::builder().build()?;
    let url = format!(
        "{}/api/graphql",
        config.gms_url.trim_end_matches('/')
    );

    let mut reports = Vec::with_capacity(urns.len());
    for urn in urns {
        reports.push(fetch_domain(&client, &url, config, urn, retries, delay).await);
    }
    Ok(reports)
}

async fn fetch_domain(
    client: &reqwest::Client,
    url: &str,
    config: &CatalogConfig,
    urn: &str,
    retries: u32,
    delay: Duration,
) -> DomainReport {
    let mut last_error = String::new();

    for attempt in 0..=retries {
        if attempt > 0 {
            tokio::time::sleep(delay).await;
            log::debug!("Retrying domain lookup for {urn} (attempt {})", attempt + 1);
        }

        match query_once(client, url, config, urn).await {
            Ok(report) => return report,
            Err(e) => last_error = e.to_string(),
        }
    }

    DomainReport {
        urn: urn.to_string(),
        domain: None,
        error: Some(last_error),
    }
}

async fn query_once(
    client: &reqwest::Client,
    url: &str,
    config: &CatalogConfig,
    urn: &str,
) -> Result<DomainReport> {
    let mut request = client.post(url).json(&json!({
        "query": DOMAIN_QUERY,
        "variables": { "urn": urn },
    }));
    if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
        request = request.bearer_auth(token);
    }

    let body: serde_json::Value = request.send().await?.error_for_status()?.json().await?;

    if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
        if !errors.is_empty() {
            return Ok(DomainReport {
                urn: urn.to_string(),
                domain: None,
                error: Some(format!("graphql errors: {}", json!(errors))),
            });
        }
    }

    let domain = body
        .pointer("/data/dataset/domain/domain")
        .filter(|d| !d.is_null())
        .map(|d| DomainAssociation {
            urn: d["urn"].as_str().unwrap_or_default().to_string(),
            id: d["id"].as_str().unwrap_or_default().to_string(),
            name: d
                .pointer("/properties/name")
                .and_then(|v| v.as_str())
                .map(String::from),
            description: d
                .pointer("/properties/description")
                .and_then(|v| v.as_str())
                .map(String::from),
        });

    Ok(DomainReport {
        urn: urn.to_string(),
        domain,
        error: None,
    })
}
