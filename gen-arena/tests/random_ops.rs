use rand::{
    rngs::StdRng,
    seq::{IndexedRandom, IteratorRandom},
    Rng, SeedableRng,
};

use gen_arena::{Arena, ArenaError, Generation, Index};

fn test_arena<G: Generation>() {
    let mut arena = Arena::<char, G>::new();
    let mut map = rustc_hash::FxHashMap::default();
    let mut dead_indices: Vec<Index<G>> = Vec::new();

    let seed = rand::random();
    let mut rng = StdRng::from_seed(seed);

    scopeguard::defer_on_unwind! {
        println!("SEED: {seed:?}");
    }

    for i in 0..1024 * 64 {
        scopeguard::defer_on_unwind! {
            println!("failed on iteration {i}")
        }
        match rng.random_range(0..=6) {
            0 => {
                let x = rng.random();
                let index = arena.append(x);
                println!("append {x:?} -> {index}");
                assert!(!map.contains_key(&index));
                map.insert(index, x);
            }
            1 => {
                let Some((&index, &val)) = map.iter().choose(&mut rng) else {
                    continue;
                };
                println!("access {index} => {val:?}");

                assert_eq!(arena[index], val);
                assert_eq!(arena.get(index), Some(&val));
            }
            2 => {
                let Some((&index, val)) = map.iter_mut().choose(&mut rng) else {
                    continue;
                };

                let new_val = rng.random();
                println!("mutate {index} => {val:?} => {new_val:?}");

                assert_eq!(arena.mutate(index, new_val), Ok(*val));
                *val = new_val;
            }
            3 => {
                let Some((&index, val)) = map.iter_mut().choose(&mut rng) else {
                    continue;
                };

                let new_val = rng.random();
                println!("write {index} => {val:?} => {new_val:?}");

                *val = new_val;
                arena[index] = new_val;
            }
            4 => {
                let Some((&index, &val)) = map.iter().choose(&mut rng) else {
                    continue;
                };
                map.remove(&index);
                println!("remove {index} => {val:?}");

                assert_eq!(arena.remove(index), Some(val));
                dead_indices.push(index);
            }
            5 => {
                let Some(&index) = dead_indices.choose(&mut rng) else {
                    continue;
                };
                println!("test dead {index}");

                assert!(!arena.contains(index));
                assert!(arena.get(index).is_none());
                assert!(arena.get_mut(index).is_none());
                assert!(matches!(
                    arena.mutate(index, 'x'),
                    Err(ArenaError::MutateOnEmptyEntry { .. })
                ));
                assert!(arena.remove(index).is_none());
            }
            6 => {
                println!("check len {}", map.len());
                assert_eq!(arena.len(), map.len());
                assert!(arena.len() <= arena.capacity());
            }
            _ => unreachable!(),
        }
    }

    assert_eq!(arena.indices().len(), map.len());
    for (index, &value) in arena.iter() {
        assert_eq!(map.get(&index), Some(&value));
    }

    for index in dead_indices {
        assert!(arena.get(index).is_none());
        assert!(arena.get_mut(index).is_none());
        assert!(arena.remove(index).is_none());
    }
}

#[test]
fn test_small_generation() {
    test_arena::<u8>();
}

#[test]
fn test_default_generation() {
    test_arena::<u32>();
}
