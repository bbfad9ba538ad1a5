mod common;

use std::thread;

use logtree::{Level, Logger, Registry};

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Logger>();
    assert_send_sync::<Registry>();
};

const THREADS: usize = 8;
const ROUNDS: usize = 50;

#[test]
fn parallel_lookups_share_one_tree() {
    let (registry, capture) = common::registry();
    registry.root().set_format("{name}");

    thread::scope(|scope| {
        for i in 0..THREADS {
            let registry = &registry;
            scope.spawn(move || {
                for round in 0..ROUNDS {
                    let leaf = registry
                        .get_logger(&format!("shared/{}/leaf{}", i % 2, i))
                        .unwrap();
                    leaf.error("tick");

                    match round % 3 {
                        0 => registry.root().push_properties(),
                        1 => {
                            registry.root().prune();
                        }
                        _ => leaf.child("..").unwrap().set_level(Level::Error).unwrap(),
                    }
                }
            });
        }
    });

    let lines = capture.lines();
    assert_eq!(lines.len(), THREADS * ROUNDS);
    for i in 0..THREADS {
        let name = format!("shared/{}/leaf{}", i % 2, i);
        assert_eq!(lines.iter().filter(|line| **line == name).count(), ROUNDS);
    }

    let leaves: Vec<Logger> = (0..THREADS)
        .map(|i| {
            registry
                .get_logger(&format!("shared/{}/leaf{}", i % 2, i))
                .unwrap()
        })
        .collect();
    assert_eq!(registry.root().children(), vec!["shared"]);
    assert_eq!(registry.get_logger("shared").unwrap().children(), vec!["0", "1"]);
    assert_eq!(
        registry.get_logger("shared/0").unwrap().children(),
        vec!["leaf0", "leaf2", "leaf4", "leaf6"]
    );

    drop(leaves);
    assert_eq!(registry.root().prune(), 2 + 1 + THREADS);
    assert_eq!(registry.root().children_count(), 0);
}

#[test]
fn parallel_pushes_converge() {
    let (registry, _) = common::registry();
    let leaves: Vec<Logger> = (0..THREADS)
        .map(|i| registry.get_logger(&format!("p/{}", i)).unwrap())
        .collect();

    registry.root().set_level(Level::Critical).unwrap();
    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| registry.root().push_properties());
        }
    });

    for leaf in &leaves {
        assert_eq!(leaf.level(), Level::Critical);
    }
}
