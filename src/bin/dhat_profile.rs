//! DHAT heap profiler for heapkit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use heapkit::ds::{ChainedHashMap, IndexedMinHeap};

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Fill the heap, then interleave priority changes with polls and re-adds.
fn churn_workload(heap: &mut IndexedMinHeap<u64, u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);

    for value in 0..universe {
        let _ = heap.add(value, rng.next_u64() % 1_000_000);
    }

    for _ in 0..operations {
        let value = rng.next_u64() % universe;
        let priority = rng.next_u64() % 1_000_000;
        match rng.next_u64() % 4 {
            0 => {
                if let Ok(polled) = heap.poll() {
                    let _ = heap.add(polled, priority);
                }
            },
            _ => {
                let _ = heap.change_priority(&value, priority);
            },
        }
    }
}

fn profile_heap_default_capacity() {
    println!("=== Profiling IndexedMinHeap (default capacity) ===");
    let mut heap = IndexedMinHeap::new();

    churn_workload(&mut heap, 100_000, 16_384, 42);

    println!("  Final size: {}", heap.len());
}

fn profile_heap_presized() {
    println!("=== Profiling IndexedMinHeap (presized) ===");
    let universe = 16_384;
    let mut heap = IndexedMinHeap::with_capacity(universe, universe * 2);

    churn_workload(&mut heap, 100_000, universe as u64, 7);

    let mut drained = 0usize;
    while heap.poll().is_ok() {
        drained += 1;
    }
    println!("  Drained: {}", drained);
}

fn profile_map_growth() {
    println!("=== Profiling ChainedHashMap growth ===");
    let mut map = ChainedHashMap::with_capacity(1);
    let mut rng = XorShift64::new(99);

    for _ in 0..50_000 {
        let key = rng.next_u64() % 65_536;
        map.put(key, key);
    }
    for key in 0..32_768u64 {
        map.remove(&key);
    }

    println!("  Final size: {} capacity: {}", map.len(), map.capacity());
}

fn main() {
    env_logger::init();
    let _profiler = dhat::Profiler::new_heap();

    println!("heapkit DHAT Heap Profiling");
    println!("===========================\n");

    profile_heap_default_capacity();
    profile_heap_presized();
    profile_map_growth();

    println!("\n===========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
