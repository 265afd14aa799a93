use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::Jurisdiction;
use crate::model::GeometryThresholds;
use crate::util::read_json;

pub mod inventory;
pub mod profile;
pub mod segment;
pub mod status;
pub mod tag;

pub(crate) fn jurisdiction_dir(cache_root: &Path, jurisdiction: Jurisdiction) -> PathBuf {
    cache_root.join(jurisdiction.dir_name())
}

pub(crate) fn document_dir(cache_root: &Path, jurisdiction: Jurisdiction) -> PathBuf {
    jurisdiction_dir(cache_root, jurisdiction).join("documents")
}

pub(crate) fn manifest_dir(cache_root: &Path) -> PathBuf {
    cache_root.join("manifests")
}

pub(crate) fn default_geometry_path(cache_root: &Path, jurisdiction: Jurisdiction) -> PathBuf {
    jurisdiction_dir(cache_root, jurisdiction).join("geometry.json")
}

pub(crate) fn inventory_manifest_path(cache_root: &Path, jurisdiction: Jurisdiction) -> PathBuf {
    manifest_dir(cache_root).join(format!(
        "document_inventory_{}.json",
        jurisdiction.dir_name()
    ))
}

pub(crate) fn load_geometry(path: &Path) -> Result<GeometryThresholds> {
    read_json(path).with_context(|| {
        format!(
            "no usable geometry at {}; run `plenary profile` first",
            path.display()
        )
    })
}
