#![no_main]

use std::collections::HashMap;

use heapkit::ds::ChainedHashMap;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on ChainedHashMap
//
// Tests random sequences of put, get, remove, contains_key, clear operations
// against std's HashMap as a model.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let initial = usize::from(data[0] % 8) + 1;
    let mut map: ChainedHashMap<u8, u8> = ChainedHashMap::with_capacity(initial);
    let mut model: HashMap<u8, u8> = HashMap::new();

    let mut idx = 1;
    while idx + 2 < data.len() {
        let op = data[idx] % 5;
        let key = data[idx + 1];
        let value = data[idx + 2];

        match op {
            0 => {
                let old_capacity = map.capacity();
                assert_eq!(map.put(key, value), model.insert(key, value));
                assert!(map.capacity() == old_capacity || map.capacity() == old_capacity * 2);
            },
            1 => assert_eq!(map.get(&key), model.get(&key)),
            2 => assert_eq!(map.remove(&key), model.remove(&key)),
            3 => assert_eq!(map.contains_key(&key), model.contains_key(&key)),
            4 => {
                if value == 0 {
                    let capacity = map.capacity();
                    map.clear();
                    model.clear();
                    assert_eq!(map.capacity(), capacity);
                }
            },
            _ => unreachable!(),
        }

        assert_eq!(map.len(), model.len());
        assert!(map.len() * 5 <= map.capacity() * 4);
        map.check_invariants().unwrap();
        idx += 3;
    }

    assert_eq!(map.iter().count(), model.len());
});
