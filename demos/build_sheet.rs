//! Build sheet example: import an inventory, save a build, print its stats
//!
//! This example demonstrates:
//! - Loading game tables and a GOOD database
//! - Saving and duplicating builds in a library
//! - Resolving a stat sheet with its breakdown
//!
//! Run with `RUST_LOG=buildstat=debug` to see the library's logging.

use buildstat::*;

const TABLES: &str = r#"{
    "artifacts": {
        "5": {
            "20": {
                "hp": 4780, "atk": 311, "atk_": 0.466, "pyro_dmg_": 0.466,
                "critRate_": 0.311, "critDMG_": 0.622
            }
        }
    },
    "characters": {
        "Diluc": {
            "weapon_type": "claymore",
            "base": { "hp": 1011.0, "atk": 26.0, "def_": 61.0 },
            "scalings": {
                "level_multipliers": [{ "hp": 1.0, "atk": 1.0, "def_": 1.0 }],
                "ascension_values": { "0": { "hp": 0.0, "atk": 0.0, "def_": 0.0 } }
            }
        }
    },
    "weapons": {
        "Rainslasher": {
            "weapon_type": "claymore",
            "base_atk": { "base_value": 42.0, "curve": [1.0] },
            "ascension_base_atk": [0.0],
            "secondary": { "key": "eleMas", "base_value": 36.0, "curve": [1.0] }
        }
    }
}"#;

const DATABASE: &str = r#"{
    "format": "GOOD",
    "version": 1,
    "source": "demo",
    "characters": [{ "key": "Diluc", "level": 1, "constellation": 0, "ascension": 0 }],
    "artifacts": [
        { "setKey": "CrimsonWitchOfFlames", "slotKey": "flower", "level": 20, "rarity": 5,
          "mainStatKey": "hp", "substats": [{ "key": "critRate_", "value": 10.5 }] },
        { "setKey": "CrimsonWitchOfFlames", "slotKey": "plume", "level": 20, "rarity": 5,
          "mainStatKey": "atk", "substats": [{ "key": "critDMG_", "value": 21.0 }] },
        { "setKey": "CrimsonWitchOfFlames", "slotKey": "sands", "level": 20, "rarity": 5,
          "mainStatKey": "atk_", "substats": [{ "key": "atk", "value": 33.0 }] },
        { "setKey": "Gladiator", "slotKey": "goblet", "level": 20, "rarity": 5,
          "mainStatKey": "pyro_dmg_", "substats": [] },
        { "setKey": "Gladiator", "slotKey": "circlet", "level": 20, "rarity": 5,
          "mainStatKey": "critRate_", "substats": [{ "key": "eleMas", "value": 40.0 }] }
    ],
    "weapons": [{ "key": "Rainslasher", "level": 1, "ascension": 0, "refinement": 1 }]
}"#;

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let tables = GameTables::from_json(TABLES)?;
    let mut library = BuildLibrary::new(MemoryStore::new());
    let database = library.import_database(DATABASE)?;

    let mut build = Build::new("Diluc Vape")
        .with_character("Diluc")
        .with_weapon(database.weapons.first().cloned());
    for slot in SlotKey::ALL {
        if let Some(artifact) = database.artifacts_for_slot(slot).first() {
            build = build.with_artifact(artifact);
        }
    }
    library.save(&build, None)?;
    library.duplicate("Diluc Vape")?;

    println!("Saved builds:");
    for saved in library.builds()? {
        println!("  - {}", saved.label);
    }

    let sheet = library.sheet(&tables, "Diluc Vape")?;

    println!("\n=== {} ===", build.label);
    for (stat, resolved) in sheet.iter() {
        if resolved.value != 0.0 {
            println!("{:>14}: {:.2}", stat.label(), resolved.value);
        }
    }

    if let Some(bonus) = sheet.active_elemental_bonus() {
        println!("\nActive elemental bonus: {} {:.2}", bonus.stat.label(), bonus.value);
    }

    if let Some(atk) = sheet.get(StatKey::Atk) {
        println!("\nATK breakdown:");
        for (desc, value) in &atk.sources {
            println!("  {}: {:.2}", desc, value);
        }
        for (desc, value) in &atk.transforms {
            println!("  {}: {:.2}", desc, value);
        }
    }

    Ok(())
}
