use craft_core::{DropChance, FuelEfficiency, Station};
use craft_data::{DataError, RecipeDb, RecipeSource, ToolRequirement};

fn base() -> RecipeDb {
    RecipeDb::embedded().expect("embedded dataset loads")
}

#[test]
fn embedded_dataset_indexes_recipes_by_result() {
    let db = base();

    let sticks = db.recipes_for("stick");
    assert_eq!(sticks.len(), 3);
    assert!(sticks.iter().all(|r| r.result.count == 4));
    assert!(sticks.iter().all(|r| r.station == Station::Inventory));

    let pickaxe = &db.recipes_for("wooden_pickaxe")[0];
    assert_eq!(pickaxe.station, Station::Table);
    let names: Vec<&str> = pickaxe.ingredients.iter().map(|i| i.item.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted, "ingredients are sorted by item name");

    assert!(db.recipes_for("oak_log").is_empty());
}

#[test]
fn families_keep_declaration_order() {
    let db = base();
    assert_eq!(
        db.family_members("planks"),
        ["oak_planks", "spruce_planks", "birch_planks"]
    );
    assert_eq!(db.family_of("spruce_log"), Some("log"));
    assert_eq!(db.canonical_name("spruce_log", true), "log");
    assert_eq!(db.canonical_name("spruce_log", false), "spruce_log");
    assert_eq!(db.member_for_species("planks", "birch"), Some("birch_planks"));
    assert!(db.is_species_specific("oak_fence"));
    assert!(!db.is_species_specific("stick"));
}

#[test]
fn tools_are_sorted_by_tier() {
    let db = base();
    let req = ToolRequirement {
        kind: "pickaxe".into(),
        min_tier: 2,
    };
    let tools: Vec<&str> = db
        .tools_satisfying(&req)
        .into_iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(tools, ["stone_pickaxe", "iron_pickaxe"]);
}

#[test]
fn sources_and_fuels() {
    let db = base();

    let iron: Vec<&str> = db
        .block_sources("raw_iron")
        .iter()
        .map(|b| b.block.as_str())
        .collect();
    assert_eq!(iron, ["iron_ore", "deepslate_iron_ore"]);
    assert_eq!(
        db.block_sources("oak_log")[0].tool,
        None,
        "logs break by hand"
    );

    let string = &db.mob_sources("string")[0];
    assert_eq!(string.mob, "spider");
    assert_eq!(string.chance, DropChance(6_667));

    assert_eq!(db.fuels()[0].item, "coal");
    assert_eq!(db.fuel_efficiency("oak_planks"), Some(FuelEfficiency(1_500)));
    assert_eq!(db.fuel_efficiency("cobblestone"), None);

    let charcoal: Vec<&str> = db
        .smelt_inputs_for("charcoal")
        .iter()
        .map(|s| s.input.as_str())
        .collect();
    assert_eq!(charcoal, ["oak_log", "spruce_log", "birch_log"]);
}

#[test]
fn persistent_items_come_from_catalogue() {
    let db = base();
    let persistent = db.persistent_items();
    assert!(persistent.contains("crafting_table"));
    assert!(persistent.contains("furnace"));
    assert!(persistent.contains("stone_pickaxe"));
    assert!(!persistent.contains("stick"));
}

#[test]
fn inline_sources_default_optional_tables() {
    let db = RecipeDb::load(RecipeSource::Str {
        items: "- { name: log }\n- { name: plank }\n",
        recipes: "- { result: plank, count: 4, ingredients: { log: 1 } }\n",
        smelting: None,
        fuels: None,
        blocks: Some("- { name: log }\n"),
        mobs: None,
    })
    .expect("inline dataset loads");

    assert_eq!(db.len(), 2);
    assert_eq!(db.recipes_for("plank")[0].station, Station::Inventory);
    assert_eq!(db.block_sources("log")[0].drop, "log");
    assert!(db.fuels().is_empty());
}

#[test]
fn unknown_ingredient_is_rejected() {
    let err = RecipeDb::load(RecipeSource::Str {
        items: "- { name: plank }\n",
        recipes: "- { result: plank, ingredients: { log: 1 } }\n",
        smelting: None,
        fuels: None,
        blocks: None,
        mobs: None,
    })
    .unwrap_err();

    match err {
        DataError::MissingItem { item, .. } => assert_eq!(item, "log"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_yaml_names_the_file() {
    let err = RecipeDb::load(RecipeSource::Str {
        items: "- { name: plank }\n",
        recipes: "- { result: [",
        smelting: None,
        fuels: None,
        blocks: None,
        mobs: None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("recipes.yaml"));
}

#[test]
fn zero_drop_chance_is_invalid() {
    let err = RecipeDb::load(RecipeSource::Str {
        items: "- { name: bone }\n",
        recipes: "",
        smelting: None,
        fuels: None,
        blocks: None,
        mobs: Some("- { name: skeleton, drops: [ { item: bone, chance: 0 } ] }\n"),
    })
    .unwrap_err();
    assert!(matches!(err, DataError::Invalid(_)));
}

#[test]
fn path_source_reads_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    std::fs::write(dir.join("items.yaml"), "- { name: sand }\n- { name: glass }\n").unwrap();
    std::fs::write(dir.join("recipes.yaml"), "[]\n").unwrap();
    std::fs::write(dir.join("smelting.yaml"), "- { input: sand, result: glass }\n").unwrap();

    let db = RecipeDb::load(RecipeSource::Path(dir.to_path_buf())).expect("directory loads");
    assert_eq!(db.smelt_inputs_for("glass")[0].input, "sand");
}
