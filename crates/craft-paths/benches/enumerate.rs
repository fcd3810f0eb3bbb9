use craft_core::Ledger;
use craft_data::RecipeDb;
use craft_paths::{enumerate, Strategy};
use craft_tree::{BuildContext, RecipeTreeBuilder};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_enumerate(c: &mut Criterion) {
    let db = RecipeDb::embedded().expect("embedded dataset");
    let inventory = Ledger::new();
    let ctx = BuildContext::new(inventory.clone());
    let tree = RecipeTreeBuilder::new(&db).build("stone_pickaxe", 1, &ctx);
    let persistent = db.persistent_items();

    for strategy in Strategy::ALL {
        c.bench_function(&format!("craft-paths/{strategy}(stone_pickaxe, take=10)"), |b| {
            b.iter(|| {
                let found = enumerate(strategy, &tree, &inventory, &persistent)
                    .take(10)
                    .count();
                black_box(found);
            })
        });
    }
}

criterion_group!(benches, bench_enumerate);
criterion_main!(benches);
