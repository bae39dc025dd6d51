//! Property tests for cart invariants.

use std::collections::HashSet;

use glow_cache::MemoryStore;
use glow_commerce::prelude::*;
use proptest::prelude::*;

const IDS: [&str; 4] = ["serum", "cream", "toner", "mask"];

#[derive(Debug, Clone)]
enum Op {
    Add { id: usize, cents: i64, quantity: i64 },
    Remove { id: usize },
    SetQuantity { id: usize, quantity: i64 },
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..IDS.len(), 0i64..200_000, 1i64..5)
            .prop_map(|(id, cents, quantity)| Op::Add { id, cents, quantity }),
        2 => (0..IDS.len()).prop_map(|id| Op::Remove { id }),
        3 => (0..IDS.len(), -3i64..8).prop_map(|(id, quantity)| Op::SetQuantity { id, quantity }),
        1 => Just(Op::Clear),
    ]
}

fn apply(store: &mut CartStore<MemoryStore>, op: &Op) {
    match *op {
        Op::Add { id, cents, quantity } => {
            store
                .add_item(IDS[id], IDS[id], Money::new(cents), quantity)
                .unwrap();
        }
        Op::Remove { id } => {
            store.remove_item(&ProductId::new(IDS[id]));
        }
        Op::SetQuantity { id, quantity } => {
            store
                .set_quantity(&ProductId::new(IDS[id]), quantity)
                .unwrap();
        }
        Op::Clear => {
            store.clear();
        }
    }
}

fn build(ops: &[Op]) -> CartStore<MemoryStore> {
    let mut store = CartStore::open(MemoryStore::new());
    for op in ops {
        apply(&mut store, op);
    }
    store
}

proptest! {
    #[test]
    fn test_total_matches_line_sum(ops in prop::collection::vec(op(), 0..40)) {
        let store = build(&ops);
        let expected: i64 = store
            .items()
            .iter()
            .map(|i| i.unit_price.amount_cents * i.quantity)
            .sum();
        prop_assert_eq!(store.get_total().amount_cents, expected);
        if store.is_empty() {
            prop_assert!(store.get_total().is_zero());
        }
    }

    #[test]
    fn test_ids_unique_and_quantities_positive(ops in prop::collection::vec(op(), 0..40)) {
        let store = build(&ops);
        let mut seen = HashSet::new();
        for item in store.items() {
            prop_assert!(seen.insert(item.id.clone()));
            prop_assert!(item.quantity >= 1);
        }
    }

    #[test]
    fn test_removal_is_idempotent(ops in prop::collection::vec(op(), 0..30), id in 0..IDS.len()) {
        let mut once = build(&ops);
        let mut twice = build(&ops);
        let id = ProductId::new(IDS[id]);

        once.remove_item(&id);
        twice.remove_item(&id);
        prop_assert!(!twice.remove_item(&id));
        prop_assert_eq!(once.items(), twice.items());
    }

    #[test]
    fn test_non_positive_quantity_equals_removal(
        ops in prop::collection::vec(op(), 0..30),
        id in 0..IDS.len(),
        quantity in -5i64..=0,
    ) {
        let mut by_quantity = build(&ops);
        let mut by_removal = build(&ops);
        let id = ProductId::new(IDS[id]);

        by_quantity.set_quantity(&id, quantity).unwrap();
        by_removal.remove_item(&id);
        prop_assert_eq!(by_quantity.items(), by_removal.items());
    }

    #[test]
    fn test_persistence_round_trips(ops in prop::collection::vec(op(), 0..40)) {
        let store = build(&ops);
        let before = store.items().to_vec();
        let restored = CartStore::open(store.into_store());
        prop_assert_eq!(restored.items(), before.as_slice());
    }

    #[test]
    fn test_adding_existing_id_increments(cents in 0i64..100_000, first in 1i64..50, second in 1i64..50) {
        let mut store = CartStore::open(MemoryStore::new());
        store.add_item("serum", "Serum", Money::new(cents), first).unwrap();
        store.add_item("serum", "Serum", Money::new(cents), second).unwrap();

        prop_assert_eq!(store.items().len(), 1);
        prop_assert_eq!(store.items()[0].quantity, first + second);
    }
}
