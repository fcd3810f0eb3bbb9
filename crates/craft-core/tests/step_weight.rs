use craft_core::{
    weight, ActionKind, ActionPath, ActionStep, CraftStep, DropChance, HuntStep, Ingredient,
    ItemRef, MineStep, SmeltStep, Station, VariantGroup, VariantMode,
};

fn craft(station: Station, item: &str, count: u32) -> ActionStep {
    ActionStep::Craft(CraftStep {
        what: VariantGroup::single(station),
        count,
        result: VariantGroup::single(ItemRef::new(item, 4)),
        ingredients: VariantGroup::single(vec![Ingredient::new("oak_log", 1)]),
    })
}

fn mine(block: &str, count: u32) -> ActionStep {
    ActionStep::Mine(MineStep {
        what: VariantGroup::single(block.to_string()),
        target_item: VariantGroup::single(block.to_string()),
        tool: None,
        count,
    })
}

#[test]
fn weights_follow_the_cost_hierarchy() {
    let smelt = ActionStep::Smelt(SmeltStep {
        input: ItemRef::new("raw_iron", 1),
        result: ItemRef::new("iron_ingot", 1),
        fuel: Some("coal".into()),
        fuel_count: 1,
        count: 3,
    });
    let hunt = ActionStep::Hunt(HuntStep {
        what: VariantGroup::from_values(VariantMode::AnyOf, ["cow".to_string()]),
        target_item: "leather".into(),
        drop_chance: DropChance(5_000),
        count: 2,
    });

    assert_eq!(craft(Station::Inventory, "oak_planks", 2).weight(), 2 * weight::CRAFT_IN_PLACE);
    assert_eq!(craft(Station::Table, "wooden_pickaxe", 1).weight(), weight::CRAFT_AT_TABLE);
    assert_eq!(smelt.weight(), 3 * weight::SMELT);
    assert_eq!(mine("oak_log", 2).weight(), 2 * weight::MINE);
    assert_eq!(hunt.weight(), 2 * weight::HUNT);

    let path = ActionPath::new(vec![mine("spruce_log", 1), craft(Station::Inventory, "spruce_planks", 1)]);
    assert_eq!(path.weight(), 1_001);
    assert_eq!(path.count_kind(ActionKind::Mine), 1);
}

#[test]
fn outputs_scale_with_count() {
    assert_eq!(
        craft(Station::Inventory, "stick", 2).output(),
        Some(("stick", 8))
    );
    let hunt = ActionStep::Hunt(HuntStep {
        what: VariantGroup::single("cow".to_string()),
        target_item: "leather".into(),
        drop_chance: DropChance(5_000),
        count: 4,
    });
    assert_eq!(hunt.output(), Some(("leather", 2)));
}

#[test]
fn display_lists_variants() {
    let step = ActionStep::Mine(MineStep {
        what: VariantGroup::from_values(
            VariantMode::AnyOf,
            ["iron_ore".to_string(), "deepslate_iron_ore".to_string()],
        ),
        target_item: VariantGroup::single("raw_iron".to_string()),
        tool: Some("stone_pickaxe".into()),
        count: 2,
    });
    assert_eq!(
        step.to_string(),
        "mine iron_ore|deepslate_iron_ore x2 for raw_iron (with stone_pickaxe)"
    );
}
