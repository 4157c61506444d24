//! Rendering of catalog data for the terminal

use crate::error::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use pokedex_common::display::{format_name, format_stats, EntityStats};
use pokedex_common::CatalogEntity;
use serde::Serialize;

/// Output format of listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Bordered table
    #[default]
    Table,
    /// One entity per line
    Compact,
    /// Pretty-printed JSON
    Json,
}

/// Print a list of entities in the requested format
pub fn print_entities(entities: &[CatalogEntity], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!();
            println!("{}", entity_table(entities));
            println!();
        },
        OutputFormat::Compact => {
            for entity in entities {
                println!("{}", compact_line(entity));
            }
        },
        OutputFormat::Json => print_json(entities)?,
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// `#0025 pikachu`
pub fn compact_line(entity: &CatalogEntity) -> String {
    format!("#{:04} {}", entity.id, entity.name)
}

pub fn entity_table(entities: &[CatalogEntity]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["#", "Name", "Height", "Weight", "Types"]);

    for entity in entities {
        let (height, weight, types) = if entity.is_stub() {
            ("-".to_string(), "-".to_string(), "-".to_string())
        } else {
            let stats = format_stats(entity);
            (stats.height, stats.weight, stats.types.join(", "))
        };

        table.add_row(vec![
            format!("{:04}", entity.id),
            format_name(&entity.name),
            height,
            weight,
            types,
        ]);
    }
    table
}

/// JSON form of a detail lookup: the entity plus its display stats
#[derive(Debug, Serialize)]
pub struct EntityDetail<'a> {
    #[serde(flatten)]
    pub entity: &'a CatalogEntity,
    pub stats: EntityStats,
}

impl<'a> EntityDetail<'a> {
    pub fn new(entity: &'a CatalogEntity) -> Self {
        Self {
            entity,
            stats: format_stats(entity),
        }
    }
}

/// Detailed view of a single entity
pub fn print_entity(entity: &CatalogEntity, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&EntityDetail::new(entity));
    }

    if format == OutputFormat::Compact {
        println!("{}", compact_line(entity));
        return Ok(());
    }

    let stats = format_stats(entity);
    let title = format!("  {} #{:04}", format_name(&entity.name), entity.id);

    println!();
    println!("{}", "═".repeat(50).blue());
    println!("{}", title.bold());
    println!("{}", "═".repeat(50).blue());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);

    table.add_row(vec!["Height", &stats.height]);
    table.add_row(vec!["Weight", &stats.weight]);
    table.add_row(vec!["Base experience".to_string(), stats.experience.to_string()]);
    table.add_row(vec!["Types".to_string(), stats.types.join(", ")]);
    table.add_row(vec!["Front sprite", &entity.sprites.front_default]);
    table.add_row(vec!["Back sprite", &entity.sprites.back_default]);

    println!("{}", table);
    println!();
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pokedex_common::projection::project;
    use pokedex_common::EntityRef;

    #[test]
    fn test_compact_line() {
        let entity = project(&EntityRef::new("pikachu", "https://pokeapi.co/api/v2/pokemon/25/")).unwrap();
        assert_eq!(compact_line(&entity), "#0025 pikachu");
    }

    #[test]
    fn test_stub_rows_hide_unknown_stats() {
        let entity = project(&EntityRef::new("mr-mime", "https://pokeapi.co/api/v2/pokemon/122/")).unwrap();
        let rendered = entity_table(&[entity]).to_string();
        assert!(rendered.contains("Mr mime"));
        assert!(rendered.contains("0122"));
        assert!(!rendered.contains("0 kg"));
    }

    #[test]
    fn test_format_value_names() {
        assert_eq!(OutputFormat::from_str("compact", true).unwrap(), OutputFormat::Compact);
        assert!(OutputFormat::from_str("interactive", true).is_err());
    }
}
