use avl_tree::{AvlTree, avl};
use rand::prelude::*;
use std::time::Instant;

const TREE_SIZE: i32 = 100_000;
const LOOKUPS: i32 = 1_000_000;

const SEED: u64 = 54783;

fn main() {
    println!("*** AVL Tree ***");

    println!("\n--- Removing duplicates ---");
    let mut tree: AvlTree<i32> = [1, 2, 3, 4, 5, 2].into_iter().collect();
    println!("{tree}");
    for value in [2, 2, 2] {
        match tree.remove(value) {
            Ok(removed) => println!("{tree} (removed {removed})"),
            Err(err) => println!("{tree} {err}"),
        }
    }
    if let Err(err) = tree.find(8) {
        println!("{err}");
    }

    println!("\n--- Timing with {TREE_SIZE} shuffled i32 keys ---");
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut keys: Vec<i32> = (0..TREE_SIZE).collect();
    keys.shuffle(&mut rng);

    let start = Instant::now();
    let mut root = avl::create(keys.iter().copied());
    let insert_duration = start.elapsed();
    let height = root.as_ref().map_or(-1, |n| n.height());
    println!("  -> Insert took: {:?} (height {height})", insert_duration);

    let lookup_keys: Vec<i32> = (0..LOOKUPS)
        .map(|_| rng.random_range(0..TREE_SIZE * 2))
        .collect();
    let start = Instant::now();
    let hits = lookup_keys
        .iter()
        .filter(|&&key| avl::find(&root, key).is_ok())
        .count();
    let lookup_duration = start.elapsed();
    println!(
        "  -> {LOOKUPS} lookups took: {:?} ({hits} hits)",
        lookup_duration
    );

    keys.shuffle(&mut rng);
    let start = Instant::now();
    let mut misses = 0;
    for &key in keys.iter().take(TREE_SIZE as usize / 2) {
        let (new_root, removed) = avl::remove_with(root, key);
        root = new_root;
        if removed.is_err() {
            misses += 1;
        }
    }
    let remove_duration = start.elapsed();
    let height = root.as_ref().map_or(-1, |n| n.height());
    println!(
        "  -> Removing half took: {:?} (height {height}, {misses} misses)",
        remove_duration
    );

    println!("\n--- Summary ---");
    println!("Insert: {:>18.2?}", insert_duration);
    println!("Lookup: {:>18.2?}", lookup_duration);
    println!("Remove: {:>18.2?}", remove_duration);
}
