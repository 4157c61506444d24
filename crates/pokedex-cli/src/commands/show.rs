//! `pokedex show` command implementation
//!
//! Every target is looked up through one cached catalog, so an entity
//! addressed twice (by id and by name, or found by an earlier lookup) is
//! fetched only once.

use crate::commands::connect;
use crate::config::Config;
use crate::error::Result;
use crate::output::{print_entity, print_json, EntityDetail, OutputFormat};
use crate::progress::with_spinner;
use crate::service::CatalogService;
use pokedex_common::CatalogEntity;
use tracing::debug;

/// How the entity is addressed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(i64),
    Name(String),
}

impl Target {
    /// A numeric argument is an id, anything else a name
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Name(raw.to_string()),
        }
    }
}

/// Look up each target in order, stopping at the first failure
pub async fn fetch_targets(service: &CatalogService, targets: &[Target]) -> Result<Vec<CatalogEntity>> {
    let mut entities = Vec::with_capacity(targets.len());
    for target in targets {
        debug!(target = ?target, "Fetching entity");
        let entity = match target {
            Target::Id(id) => service.get_by_id(*id).await?,
            Target::Name(name) => service.get_by_name(name).await?,
        };
        entities.push(entity);
    }
    Ok(entities)
}

/// Run the show command
pub async fn run(config: &Config, targets: Vec<String>, format: OutputFormat) -> Result<()> {
    let service = CatalogService::new(connect(config)?);
    let targets: Vec<Target> = targets.iter().map(|raw| Target::parse(raw)).collect();

    let entities = with_spinner("Fetching details...", fetch_targets(&service, &targets)).await?;

    match entities.as_slice() {
        [entity] => print_entity(entity, format),
        _ if format == OutputFormat::Json => {
            let details: Vec<_> = entities.iter().map(EntityDetail::new).collect();
            print_json(&details)
        },
        _ => entities.iter().try_for_each(|entity| print_entity(entity, format)),
    }
}
