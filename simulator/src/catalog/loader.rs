use crate::catalog::builtin::{default_companies, default_plants};
use anyhow::Context;
use offsetcore::model::{Company, PowerPlant};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlantDocument {
    power_plants: Vec<PowerPlant>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CompanyDocument {
    companies: Vec<Company>,
}

/// Plant and company catalogs for one refresh cycle.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub plants: Vec<PowerPlant>,
    pub companies: Vec<Company>,
}

fn read_document<T: for<'de> Deserialize<'de>>(path: &Path) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing catalog {}", path.display()))
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            plants: default_plants(),
            companies: default_companies(),
        }
    }

    /// Reads whichever documents are given and falls back to the built-in set for the rest.
    pub fn load(plants: Option<&Path>, companies: Option<&Path>) -> anyhow::Result<Self> {
        let plants = match plants {
            Some(path) => read_document::<PlantDocument>(path)?.power_plants,
            None => default_plants(),
        };
        let companies = match companies {
            Some(path) => read_document::<CompanyDocument>(path)?.companies,
            None => default_companies(),
        };
        Ok(Self { plants, companies })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_reads_plant_document() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            br#"{"powerPlants": [{
                "id": "pp_custom", "name": "Custom", "type": "nuclear",
                "capacity": 1400, "currentOutput": 1300, "efficiency": 34,
                "emissionFactor": 0.01, "status": "maintenance"
            }]}"#,
        )
        .unwrap();
        let path = temp.into_temp_path();
        let catalog = Catalog::load(Some(&path), None).unwrap();
        assert_eq!(catalog.plants.len(), 1);
        assert_eq!(catalog.plants[0].id, "pp_custom");
        assert_eq!(catalog.companies.len(), default_companies().len());
    }

    #[test]
    fn load_reports_malformed_document() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{\"companies\": 3}").unwrap();
        let path = temp.into_temp_path();
        let err = Catalog::load(None, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("parsing catalog"));
    }
}
