//! Vector-backed catalog oracle and the stock content set.

use sim_core::env::{AmmoDef, BotProfile, BulletDef, CatalogOracle, CharacterDef, GunDef};
use sim_core::state::{ActorFlags, AmmoId, CharId, GunId};

/// A complete content set: every definition the simulation can resolve.
///
/// Handles (`GunId`, `AmmoId`, `CharId`) are indices into the backing
/// vectors, so they are only meaningful within one catalog; cross-process
/// references go by name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentCatalog {
    guns: Vec<GunDef>,
    bullets: Vec<BulletDef>,
    ammo: Vec<AmmoDef>,
    characters: Vec<CharacterDef>,
}

impl ContentCatalog {
    pub fn new(
        guns: Vec<GunDef>,
        bullets: Vec<BulletDef>,
        ammo: Vec<AmmoDef>,
        characters: Vec<CharacterDef>,
    ) -> Self {
        Self {
            guns,
            bullets,
            ammo,
            characters,
        }
    }

    /// The stock content set: a spread of shooters, a melee weapon, and
    /// character templates for players, hostiles, and civilians.
    pub fn builtin() -> Self {
        let ammo = vec![
            AmmoDef {
                name: "bullets".into(),
                max: 300,
                amount: 30,
            },
            AmmoDef {
                name: "shells".into(),
                max: 60,
                amount: 6,
            },
            AmmoDef {
                name: "fuel".into(),
                max: 200,
                amount: 50,
            },
        ];
        let bullets = vec![
            BulletDef {
                name: "mg".into(),
                power: 10,
                special: None,
                hit_sound_flesh: Some("hit_flesh".into()),
                hit_sound_object: Some("hit_hard".into()),
            },
            BulletDef {
                name: "shot".into(),
                power: 15,
                special: None,
                hit_sound_flesh: Some("hit_flesh".into()),
                hit_sound_object: Some("hit_hard".into()),
            },
            BulletDef {
                name: "laser".into(),
                power: 20,
                special: None,
                hit_sound_flesh: Some("hit_flesh".into()),
                hit_sound_object: Some("hit_hard".into()),
            },
            BulletDef {
                name: "flame".into(),
                power: 2,
                special: Some(sim_core::combat::SpecialDamage::Flame),
                hit_sound_flesh: Some("hit_fire".into()),
                hit_sound_object: Some("hit_fire".into()),
            },
            BulletDef {
                name: "gas".into(),
                power: 0,
                special: Some(sim_core::combat::SpecialDamage::Poison),
                hit_sound_flesh: None,
                hit_sound_object: None,
            },
            BulletDef {
                name: "knife_slash".into(),
                power: 2,
                special: None,
                hit_sound_flesh: Some("knife_flesh".into()),
                hit_sound_object: Some("knife_hard".into()),
            },
        ];
        let guns = vec![
            GunDef {
                name: "machine_gun".into(),
                bullet: Some("mg".into()),
                can_shoot: true,
                ammo: Some(AmmoId(0)),
                cost: 1,
                lock: 6,
                reload_lead: 0,
                sound: Some("machine_gun".into()),
                reload_sound: None,
                switch_sound: Some("switch".into()),
                sound_lock: 0,
                spread_count: 1,
                spread_width: 0.0,
                angle_offset: 0.0,
                recoil: 0.1,
                muzzle_flash: Some("muzzle_flash".into()),
            },
            GunDef {
                name: "shotgun".into(),
                bullet: Some("shot".into()),
                can_shoot: true,
                ammo: Some(AmmoId(1)),
                cost: 5,
                lock: 50,
                reload_lead: 10,
                sound: Some("shotgun".into()),
                reload_sound: Some("shotgun_reload".into()),
                switch_sound: Some("switch".into()),
                sound_lock: 0,
                spread_count: 5,
                spread_width: 0.12,
                angle_offset: 0.0,
                recoil: 0.0,
                muzzle_flash: Some("muzzle_flash".into()),
            },
            GunDef {
                name: "flamer".into(),
                bullet: Some("flame".into()),
                can_shoot: true,
                ammo: Some(AmmoId(2)),
                cost: 1,
                lock: 6,
                reload_lead: 0,
                sound: Some("flamer".into()),
                reload_sound: None,
                switch_sound: Some("switch".into()),
                sound_lock: 0,
                spread_count: 1,
                spread_width: 0.0,
                angle_offset: 0.0,
                recoil: 0.0,
                muzzle_flash: None,
            },
            GunDef {
                name: "powergun".into(),
                bullet: Some("laser".into()),
                can_shoot: true,
                ammo: Some(AmmoId(0)),
                cost: 2,
                lock: 20,
                reload_lead: 0,
                sound: Some("powergun".into()),
                reload_sound: None,
                switch_sound: Some("switch".into()),
                sound_lock: 0,
                spread_count: 1,
                spread_width: 0.0,
                angle_offset: 0.0,
                recoil: 0.05,
                muzzle_flash: Some("muzzle_flash".into()),
            },
            GunDef {
                name: "knife".into(),
                bullet: Some("knife_slash".into()),
                can_shoot: false,
                ammo: None,
                cost: 0,
                lock: 0,
                reload_lead: 0,
                sound: None,
                reload_sound: None,
                switch_sound: Some("switch".into()),
                sound_lock: 20,
                spread_count: 1,
                spread_width: 0.0,
                angle_offset: 0.0,
                recoil: 0.0,
                muzzle_flash: None,
            },
        ];
        let characters = vec![
            CharacterDef {
                name: "jones".into(),
                max_health: 60,
                speed: 256,
                flags: ActorFlags::empty(),
                gun: GunId(0),
                bot: None,
            },
            CharacterDef {
                name: "grunt".into(),
                max_health: 40,
                speed: 192,
                flags: ActorFlags::empty(),
                gun: GunId(0),
                bot: Some(BotProfile {
                    probability_to_shoot: 50,
                }),
            },
            CharacterDef {
                name: "officer".into(),
                max_health: 60,
                speed: 224,
                flags: ActorFlags::AWAKE_ALWAYS,
                gun: GunId(1),
                bot: Some(BotProfile {
                    probability_to_shoot: 75,
                }),
            },
            CharacterDef {
                name: "pyro".into(),
                max_health: 40,
                speed: 224,
                flags: ActorFlags::ASBESTOS,
                gun: GunId(2),
                bot: Some(BotProfile {
                    probability_to_shoot: 60,
                }),
            },
            CharacterDef {
                name: "civilian".into(),
                max_health: 20,
                speed: 192,
                flags: ActorFlags::empty(),
                gun: GunId(4),
                bot: Some(BotProfile {
                    probability_to_shoot: 0,
                }),
            },
        ];
        Self::new(guns, bullets, ammo, characters)
    }

    pub fn gun_id(&self, name: &str) -> Option<GunId> {
        self.guns
            .iter()
            .position(|g| g.name == name)
            .map(|i| GunId(i as u32))
    }

    pub fn ammo_id(&self, name: &str) -> Option<AmmoId> {
        self.ammo
            .iter()
            .position(|a| a.name == name)
            .map(|i| AmmoId(i as u32))
    }

    pub fn char_id(&self, name: &str) -> Option<CharId> {
        self.characters
            .iter()
            .position(|c| c.name == name)
            .map(|i| CharId(i as u16))
    }

    pub fn guns(&self) -> &[GunDef] {
        &self.guns
    }

    pub fn bullets(&self) -> &[BulletDef] {
        &self.bullets
    }

    pub fn characters(&self) -> &[CharacterDef] {
        &self.characters
    }

    pub fn ammo_defs(&self) -> &[AmmoDef] {
        &self.ammo
    }
}

impl CatalogOracle for ContentCatalog {
    fn gun(&self, id: GunId) -> Option<&GunDef> {
        self.guns.get(id.0 as usize)
    }

    fn gun_by_name(&self, name: &str) -> Option<(GunId, &GunDef)> {
        self.guns
            .iter()
            .position(|g| g.name == name)
            .map(|i| (GunId(i as u32), &self.guns[i]))
    }

    fn bullet(&self, name: &str) -> Option<&BulletDef> {
        self.bullets.iter().find(|b| b.name == name)
    }

    fn ammo(&self, id: AmmoId) -> Option<&AmmoDef> {
        self.ammo.get(id.0 as usize)
    }

    fn ammo_count(&self) -> usize {
        self.ammo.len()
    }

    fn character(&self, id: CharId) -> Option<&CharacterDef> {
        self.characters.get(id.0 as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_references_resolve() {
        let catalog = ContentCatalog::builtin();
        for gun in catalog.guns() {
            if let Some(bullet) = &gun.bullet {
                assert!(
                    catalog.bullet(bullet).is_some(),
                    "gun {} has unknown bullet {}",
                    gun.name,
                    bullet
                );
            }
            if let Some(ammo) = gun.ammo {
                assert!(
                    catalog.ammo(ammo).is_some(),
                    "gun {} has unknown ammo class",
                    gun.name
                );
            }
        }
        for character in catalog.characters() {
            assert!(
                catalog.gun(character.gun).is_some(),
                "character {} has unknown gun",
                character.name
            );
        }
    }

    #[test]
    fn lookups_by_name_and_id_agree() {
        let catalog = ContentCatalog::builtin();
        let id = catalog.gun_id("shotgun").unwrap();
        let (by_name_id, def) = catalog.gun_by_name("shotgun").unwrap();
        assert_eq!(id, by_name_id);
        assert_eq!(catalog.gun(id).unwrap().name, def.name);

        assert!(catalog.gun_id("bfg").is_none());
        assert!(catalog.char_id("jones").is_some());
        assert_eq!(catalog.ammo_id("shells"), Some(AmmoId(1)));
    }

    #[test]
    fn melee_weapon_is_flagged_unshootable() {
        let catalog = ContentCatalog::builtin();
        let (_, knife) = catalog.gun_by_name("knife").unwrap();
        assert!(!knife.can_shoot);
        assert!(knife.bullet.is_some());
        assert!(knife.ammo.is_none());
    }
}
