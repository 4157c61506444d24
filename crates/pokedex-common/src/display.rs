//! Human-readable formatting of catalog entities

use crate::types::CatalogEntity;
use serde::Serialize;

/// Formatted stats of an entity, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityStats {
    /// Height in metres, e.g. "0.7 m"
    pub height: String,
    /// Weight in kilograms, e.g. "6.9 kg"
    pub weight: String,
    pub experience: u32,
    pub types: Vec<String>,
}

/// Capitalize the first letter and replace hyphens with spaces
///
/// `"mr-mime"` becomes `"Mr mime"`.
pub fn format_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.map(|c| if c == '-' { ' ' } else { c }))
            .collect(),
        None => String::new(),
    }
}

pub fn format_stats(entity: &CatalogEntity) -> EntityStats {
    EntityStats {
        height: format!("{} m", f64::from(entity.height) / 10.0),
        weight: format!("{} kg", f64::from(entity.weight) / 10.0),
        experience: entity.base_experience,
        types: entity
            .types
            .iter()
            .map(|t| format_name(t.type_name()))
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        assert_eq!(format_name("bulbasaur"), "Bulbasaur");
        assert_eq!(format_name("mr-mime"), "Mr mime");
        assert_eq!(format_name("ho-oh"), "Ho oh");
        assert_eq!(format_name(""), "");
    }

    #[test]
    fn test_format_stats() {
        let entity: CatalogEntity = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "bulbasaur",
                "height": 7,
                "weight": 69,
                "base_experience": 64,
                "types": [
                    {"slot": 1, "type": {"name": "grass", "url": ""}},
                    {"slot": 2, "type": {"name": "poison", "url": ""}}
                ],
                "sprites": {"front_default": "", "back_default": ""}
            }"#,
        )
        .unwrap();

        let stats = format_stats(&entity);
        assert_eq!(stats.height, "0.7 m");
        assert_eq!(stats.weight, "6.9 kg");
        assert_eq!(stats.experience, 64);
        assert_eq!(stats.types, vec!["Grass", "Poison"]);
    }

    #[test]
    fn test_format_stats_whole_numbers() {
        let entity: CatalogEntity =
            serde_json::from_str(r#"{"id": 143, "name": "snorlax", "height": 21, "weight": 4600}"#)
                .unwrap();
        let stats = format_stats(&entity);
        assert_eq!(stats.height, "2.1 m");
        assert_eq!(stats.weight, "460 kg");
    }
}
