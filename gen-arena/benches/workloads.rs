use std::hint::black_box;

use criterion::{criterion_group, Criterion};
use gen_arena::{Arena, Index};
use rand::Rng;

/// Actions refer to elements by the order they were appended in, so every container can map
/// them onto its own handle type
#[derive(Debug, Clone, Copy)]
enum Action {
    Append(char),
    Remove(usize),
    Access(usize),
}

#[derive(Debug, Clone, Copy)]
enum ActionType {
    Append,
    Remove,
    Access,
}

#[derive(Clone, Copy)]
struct WorkloadConfig {
    appends: usize,
    removals: usize,
    accesses: usize,
}

fn make_workload(rng: &mut impl Rng, config: WorkloadConfig) -> Vec<Action> {
    let mut workload = Vec::new();
    assert!(config.removals <= config.appends);

    let mut pool = Vec::new();
    pool.extend(std::iter::repeat_n(ActionType::Append, config.appends));
    pool.extend(std::iter::repeat_n(ActionType::Remove, config.removals));
    pool.extend(std::iter::repeat_n(ActionType::Access, config.accesses));
    let mut pool_removed = Vec::new();
    let mut live = Vec::new();

    'shuffle: loop {
        workload.clear();
        live.clear();
        pool.append(&mut pool_removed);
        let mut appended = 0;

        while !pool.is_empty() {
            let i = rng.random_range(0..pool.len());

            match pool[i] {
                ActionType::Append => {
                    live.push(appended);
                    appended += 1;
                    pool_removed.push(pool.remove(i));
                    workload.push(Action::Append(rng.random()));
                }
                ActionType::Remove => {
                    if live.is_empty() {
                        continue;
                    }

                    let x = rng.random_range(0..live.len());
                    workload.push(Action::Remove(live.swap_remove(x)));
                    pool_removed.push(pool.remove(i));
                }
                ActionType::Access => {
                    if live.is_empty() {
                        if appended == config.appends {
                            continue 'shuffle;
                        }

                        continue;
                    }

                    let x = rng.random_range(0..live.len());
                    workload.push(Action::Access(live[x]));
                    pool_removed.push(pool.remove(i));
                }
            }
        }
        break;
    }

    let actions = config.appends + config.removals + config.accesses;

    assert_eq!(pool_removed.len(), actions);
    assert_eq!(workload.len(), actions);

    workload
}

fn run_workloads(c: &mut Criterion) {
    let mut bench_workload = move |name: &str, config: WorkloadConfig| {
        let workload = make_workload(&mut rand::rng(), config);

        c.benchmark_group(name)
            .throughput(criterion::Throughput::Elements(workload.len() as u64))
            .bench_function("slab", |b| {
                b.iter(|| run_workload_slab(&workload));
            })
            .bench_function("slotmap", |b| {
                b.iter(|| run_workload_slotmap(&workload));
            })
            .bench_function("gen-arena", |b| {
                b.iter(|| run_workload_arena::<u32>(&workload));
            })
            .bench_function("gen-arena-u8", |b| {
                b.iter(|| run_workload_arena::<u8>(&workload));
            });
    };

    bench_workload(
        "append-removal",
        WorkloadConfig {
            appends: 1024,
            removals: 1024,
            accesses: 0,
        },
    );

    bench_workload(
        "append-heavy",
        WorkloadConfig {
            appends: 1024,
            removals: 64,
            accesses: 64,
        },
    );

    bench_workload(
        "read-heavy-small",
        WorkloadConfig {
            appends: 64,
            removals: 64,
            accesses: 1024,
        },
    );

    bench_workload(
        "read-heavy-large",
        WorkloadConfig {
            appends: 1024,
            removals: 1024,
            accesses: 1024,
        },
    );
}

fn run_workload_arena<G: gen_arena::Generation>(workload: &[Action]) {
    let mut arena = Arena::<char, G>::new();
    let mut handles: Vec<Index<G>> = Vec::new();
    for &action in workload {
        match action {
            Action::Append(c) => {
                handles.push(arena.append(c));
            }
            Action::Remove(ordinal) => {
                arena.remove(handles[ordinal]);
            }
            Action::Access(ordinal) => {
                black_box(arena[handles[ordinal]]);
            }
        }
    }
}

fn run_workload_slotmap(workload: &[Action]) {
    let mut map = slotmap::SlotMap::new();
    let mut handles: Vec<slotmap::DefaultKey> = Vec::new();
    for &action in workload {
        match action {
            Action::Append(c) => {
                handles.push(map.insert(c));
            }
            Action::Remove(ordinal) => {
                map.remove(handles[ordinal]);
            }
            Action::Access(ordinal) => {
                black_box(map[handles[ordinal]]);
            }
        }
    }
}

fn run_workload_slab(workload: &[Action]) {
    let mut slab = slab::Slab::new();
    let mut handles = Vec::new();
    for &action in workload {
        match action {
            Action::Append(c) => {
                handles.push(slab.insert(c));
            }
            Action::Remove(ordinal) => {
                slab.remove(handles[ordinal]);
            }
            Action::Access(ordinal) => {
                black_box(slab[handles[ordinal]]);
            }
        }
    }
}

criterion_group! {
    bench_workloads, run_workloads
}

criterion::criterion_main! { bench_workloads }
