//! CLI runner - executes commands

use crate::cheermote::{CheermoteCatalog, CheermoteFormat, HelixCheermoteList, MessagePart};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{Caller, RawPage};
use crate::pagination::PaginatedRequest;
use crate::request::RequestDescriptor;
use crate::types::JsonValue;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Pages {
                endpoint,
                query,
                scope,
                max_pages,
                with_total,
            } => {
                let request = describe(endpoint, query, scope.as_deref());
                self.pages(request, *max_pages, *with_total).await
            }
            Commands::Total {
                endpoint,
                query,
                scope,
            } => {
                let request = describe(endpoint, query, scope.as_deref());
                self.total(request).await
            }
            Commands::Cheers {
                catalog,
                message,
                background,
                state,
                scale,
                transform,
            } => {
                let format = CheermoteFormat::new(*background, *state, *scale);
                self.cheers(catalog, message, &format, *transform)
            }
        }
    }

    /// Load the client config, falling back to defaults plus environment
    fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        Ok(config.apply_env())
    }

    fn caller(&self, config: &ClientConfig) -> Result<Arc<dyn Caller>> {
        Ok(Arc::new(config.build_client()?))
    }

    // ========================================================================
    // Commands
    // ========================================================================

    async fn pages(
        &self,
        request: RequestDescriptor,
        max_pages: Option<usize>,
        with_total: bool,
    ) -> Result<()> {
        let config = self.load_config()?;
        let caller = self.caller(&config)?;

        let mut paginator = PaginatedRequest::<JsonValue>::new(request, caller)?;
        if with_total {
            paginator = paginator.track_total(config.stale_total);
        }

        let start = Instant::now();
        let mut pages = 0usize;
        while !paginator.is_exhausted() && max_pages.map_or(true, |max| pages < max) {
            let records = paginator.get_next_page().await?;
            pages += 1;
            for record in &records {
                self.output(record);
            }
        }

        info!(
            pages,
            records = paginator.fetched(),
            total = ?paginator.total(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Listing finished"
        );
        Ok(())
    }

    async fn total(&self, request: RequestDescriptor) -> Result<()> {
        let config = self.load_config()?;
        let caller = self.caller(&config)?;

        let mut paginator =
            PaginatedRequest::<JsonValue>::new(request, caller)?.track_total(config.stale_total);
        let total = paginator.total_count().await?;
        self.output(&json!({ "total": total }));
        Ok(())
    }

    fn cheers(
        &self,
        catalog_path: &Path,
        message: &str,
        format: &CheermoteFormat,
        transform: bool,
    ) -> Result<()> {
        let catalog = load_catalog(catalog_path)?;

        if !transform {
            let cheermotes = catalog.parse_message(message, format)?;
            self.output(&serde_json::to_value(cheermotes)?);
            return Ok(());
        }

        let parts = catalog.transform_message(message, format, |cheermote| {
            json!({
                "name": cheermote.name,
                "amount": cheermote.amount,
                "url": cheermote.display_info.url,
                "color": cheermote.display_info.color,
            })
        })?;

        let parts: Vec<JsonValue> = parts
            .into_iter()
            .map(|part| match part {
                MessagePart::Text(text) => json!({ "type": "text", "text": text }),
                MessagePart::Cheermote { source, rendered } => {
                    json!({ "type": "cheermote", "text": source, "cheermote": rendered })
                }
            })
            .collect();
        self.output(&JsonValue::Array(parts));
        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn output(&self, value: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

fn describe(endpoint: &str, query: &[(String, String)], scope: Option<&str>) -> RequestDescriptor {
    let mut request = RequestDescriptor::get(endpoint);
    for key in unique_keys(query) {
        let values: Vec<&str> = query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect();
        request = match values.as_slice() {
            [single] => request.query(key, *single),
            many => request.query_multi(key, many.iter().copied()),
        };
    }
    match scope {
        Some(scope) => request.scope(scope),
        None => request,
    }
}

fn unique_keys(query: &[(String, String)]) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for (key, _) in query {
        if !keys.contains(&key.as_str()) {
            keys.push(key);
        }
    }
    keys
}

/// Load a catalog from a saved `bits/cheermotes` response or a bare `data` array
fn load_catalog(path: &Path) -> Result<HelixCheermoteList> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    let body: JsonValue = serde_json::from_str(&content)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    match body {
        JsonValue::Array(_) => HelixCheermoteList::from_json(body),
        other => {
            let page = RawPage::from_json(other)?;
            HelixCheermoteList::from_json(JsonValue::Array(page.data))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::QueryValue;
    use std::io::Write;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_describe_groups_repeated_keys() {
        let request = describe(
            "subscriptions",
            &pairs(&[("broadcaster_id", "1"), ("user_id", "2"), ("user_id", "3")]),
            Some("channel:read:subscriptions"),
        );

        assert_eq!(request.endpoint, "subscriptions");
        assert_eq!(request.scope.as_deref(), Some("channel:read:subscriptions"));
        assert_eq!(
            request.query.get("broadcaster_id"),
            Some(&QueryValue::Single("1".to_string()))
        );
        assert_eq!(
            request.query.get("user_id"),
            Some(&QueryValue::Multiple(vec!["2".to_string(), "3".to_string()]))
        );
    }

    #[test]
    fn test_load_catalog_accepts_both_shapes() {
        let cheermote = json!({
            "prefix": "Cheer",
            "tiers": [{
                "min_bits": 1,
                "color": "#979797",
                "images": {"dark": {"animated": {"1": "a.gif"}}}
            }]
        });

        let mut envelope = tempfile::NamedTempFile::new().unwrap();
        write!(envelope, "{}", json!({ "data": [cheermote.clone()] })).unwrap();
        assert_eq!(load_catalog(envelope.path()).unwrap().len(), 1);

        let mut bare = tempfile::NamedTempFile::new().unwrap();
        write!(bare, "{}", json!([cheermote])).unwrap();
        assert!(load_catalog(bare.path()).unwrap().get("CHEER").is_some());

        let err = load_catalog(Path::new("/nonexistent/cheermotes.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
