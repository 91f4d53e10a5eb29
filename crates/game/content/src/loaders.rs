//! Catalog loader for RON content files.
//!
//! A catalog file is a serialized [`ContentCatalog`]. Loading validates
//! cross-references so a bad file fails at startup instead of surfacing
//! as a missing definition mid-game.

use std::path::Path;

use anyhow::{Context, bail};

use crate::ContentCatalog;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Loader for content catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a content catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ContentCatalog> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        let catalog: ContentCatalog = ron::from_str(&content)
            .with_context(|| format!("failed to parse catalog RON {}", path.display()))?;
        validate(&catalog)?;
        Ok(catalog)
    }
}

/// Check that every by-name and by-id reference inside the catalog
/// resolves.
pub fn validate(catalog: &ContentCatalog) -> LoadResult<()> {
    use sim_core::env::CatalogOracle;

    for gun in catalog.guns() {
        if let Some(bullet) = &gun.bullet {
            if catalog.bullet(bullet).is_none() {
                bail!("gun {:?} references unknown bullet {:?}", gun.name, bullet);
            }
        }
        if let Some(ammo) = gun.ammo {
            if catalog.ammo(ammo).is_none() {
                bail!("gun {:?} references unknown ammo id {}", gun.name, ammo.0);
            }
        }
        if !gun.can_shoot && gun.bullet.is_none() {
            bail!("melee gun {:?} has no bullet for its damage", gun.name);
        }
    }
    for character in catalog.characters() {
        if catalog.gun(character.gun).is_none() {
            bail!(
                "character {:?} references unknown gun id {}",
                character.name,
                character.gun.0
            );
        }
    }
    for ammo in catalog.ammo_defs() {
        if ammo.max < ammo.amount {
            bail!("ammo {:?} pickup amount exceeds its cap", ammo.name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use sim_core::env::CatalogOracle;
    use sim_core::state::GunId;

    use super::*;

    #[test]
    fn load_reads_back_a_saved_catalog() {
        let catalog = ContentCatalog::builtin();
        let text = ron::to_string(&catalog).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let loaded = CatalogLoader::load(file.path()).unwrap();
        assert_eq!(loaded, catalog);
        assert!(loaded.gun_by_name("machine_gun").is_some());
    }

    #[test]
    fn load_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"(guns: oops").unwrap();
        assert!(CatalogLoader::load(file.path()).is_err());
    }

    #[test]
    fn validate_catches_dangling_references() {
        let mut catalog = ContentCatalog::builtin();
        let mut bad_gun = catalog.gun(GunId(0)).unwrap().clone();
        bad_gun.bullet = Some("no_such_bullet".into());
        let bad = ContentCatalog::new(
            vec![bad_gun],
            Vec::new(),
            catalog.ammo_defs().to_vec(),
            Vec::new(),
        );
        assert!(validate(&bad).is_err());
        // The untouched builtin set passes.
        catalog = ContentCatalog::builtin();
        assert!(validate(&catalog).is_ok());
    }
}
