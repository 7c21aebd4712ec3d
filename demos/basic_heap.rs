//! Example demonstrating IndexedMinHeap as a task scheduler.
//!
//! Run with: cargo run --example basic_heap
//! Set RUST_LOG=trace to see buffer growth and index rehashing.

use heapkit::prelude::*;

fn main() {
    env_logger::init();

    println!("=== IndexedMinHeap Examples ===\n");

    // Example 1: Poll in priority order
    println!("1. Poll order");
    let mut heap: IndexedMinHeap<&str, u32> = IndexedMinHeap::new();
    heap.add("compile", 5).unwrap();
    heap.add("lint", 3).unwrap();
    heap.add("deploy", 8).unwrap();
    heap.add("fetch", 1).unwrap();

    while let Ok((task, priority)) = heap.poll_with_priority() {
        println!("   {} (priority {})", task, priority);
    }
    println!();

    // Example 2: Reprioritize a queued task
    println!("2. change_priority");
    let mut heap = HeapBuilder::new()
        .buffer_capacity(4)
        .index_capacity(7)
        .build::<String, u32>();
    for (i, name) in ["alpha", "beta", "gamma", "delta"].iter().enumerate() {
        heap.add(name.to_string(), (i as u32 + 1) * 10).unwrap();
    }
    println!("   next before: {:?}", heap.peek());

    // Move delta to the front
    let old = heap.change_priority(&"delta".to_string(), 1).unwrap();
    println!("   delta moved from {} to 1", old);
    println!("   next after: {:?}", heap.peek());
    println!();

    // Example 3: Errors are values
    println!("3. Errors");
    match heap.add("alpha".to_string(), 0) {
        Ok(()) => println!("   unexpected success"),
        Err(e) => println!("   add alpha again: {}", e),
    }
    match heap.change_priority(&"omega".to_string(), 0) {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   change omega: {}", e),
    }
    let mut empty: IndexedMinHeap<u8, u8> = IndexedMinHeap::new();
    if let Err(e) = empty.poll() {
        println!("   poll empty: {}", e);
    }
    println!();

    // Example 4: The containers on their own
    println!("4. Containers");
    let mut map = ChainedHashMap::with_capacity(3);
    map.put("a", 1);
    map.put("b", 2);
    map.put("c", 3);
    println!("   map {:?} capacity {}", map, map.capacity());

    let mut array = DynamicArray::with_capacity(2);
    for i in 0..5 {
        array.append(i * i);
    }
    println!("   array {:?} capacity {}", array, array.capacity());
}
