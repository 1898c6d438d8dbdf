//! Addon manifest served at `/manifest.json`.

use serde::Serialize;

use crate::config::AddonConfig;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<&'static str>,
    pub types: Vec<String>,
    pub id_prefixes: Vec<String>,
    pub catalogs: Vec<ManifestCatalog>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestCatalog {
    #[serde(rename = "type")]
    pub content_type: String,
    pub id: String,
    pub name: String,
    pub extra_supported: Vec<&'static str>,
}

impl From<&AddonConfig> for Manifest {
    fn from(addon: &AddonConfig) -> Self {
        Self {
            id: addon.id.clone(),
            version: addon.version.clone(),
            name: addon.name.clone(),
            description: addon.description.clone(),
            resources: vec!["catalog", "stream", "meta"],
            types: vec![addon.content_type.clone()],
            id_prefixes: addon.id_prefixes.clone(),
            catalogs: vec![ManifestCatalog {
                content_type: addon.content_type.clone(),
                id: addon.catalog_id.clone(),
                name: addon.catalog_name.clone(),
                extra_supported: vec!["search"],
            }],
        }
    }
}
