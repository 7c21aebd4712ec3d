#![no_main]

use heapkit::ds::IndexedMinHeap;
use heapkit::error::ContainerError;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on IndexedMinHeap
//
// Tests random sequences of add, poll, peek, change_priority, contains operations.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut heap: IndexedMinHeap<u8, u8> = IndexedMinHeap::with_capacity(1, 1);

    let mut idx = 0;
    while idx + 2 < data.len() {
        let op = data[idx] % 6;
        let value = data[idx + 1];
        let priority = data[idx + 2];

        match op {
            0 => {
                // add
                let old_len = heap.len();
                let present = heap.contains(&value);
                match heap.add(value, priority) {
                    Ok(()) => {
                        assert!(!present);
                        assert_eq!(heap.len(), old_len + 1);
                        assert_eq!(heap.priority_of(&value), Some(&priority));
                    },
                    Err(err) => {
                        assert!(present);
                        assert_eq!(err, ContainerError::DuplicateValue);
                        assert_eq!(heap.len(), old_len);
                    },
                }
            },
            1 => {
                // poll
                let old_len = heap.len();
                let peeked = heap.peek_with_priority().map(|(v, p)| (*v, *p));
                match heap.poll_with_priority() {
                    Ok(polled) => {
                        assert_eq!(Ok(polled), peeked);
                        assert_eq!(heap.len(), old_len - 1);
                        assert!(!heap.contains(&polled.0));
                        if let Ok((_, next)) = heap.peek_with_priority() {
                            assert!(*next >= polled.1);
                        }
                    },
                    Err(err) => {
                        assert_eq!(err, ContainerError::Empty);
                        assert!(heap.is_empty());
                    },
                }
            },
            2 => {
                // peek
                match heap.peek() {
                    Ok(top) => {
                        let top_priority = heap.priority_of(top).copied();
                        assert!(heap.iter().all(|(_, p)| Some(*p) >= top_priority));
                    },
                    Err(_) => assert!(heap.is_empty()),
                }
            },
            3 => {
                // change_priority
                let old_len = heap.len();
                let old = heap.priority_of(&value).copied();
                match heap.change_priority(&value, priority) {
                    Ok(previous) => {
                        assert_eq!(Some(previous), old);
                        assert_eq!(heap.priority_of(&value), Some(&priority));
                    },
                    Err(err) => {
                        assert_eq!(old, None);
                        assert_eq!(err, ContainerError::MissingValue);
                    },
                }
                assert_eq!(heap.len(), old_len);
            },
            4 => {
                // contains agrees with iteration
                let listed = heap.iter().any(|(v, _)| *v == value);
                assert_eq!(heap.contains(&value), listed);
            },
            5 => {
                // drain a few
                for _ in 0..(value % 4) {
                    let _ = heap.poll();
                }
            },
            _ => unreachable!(),
        }

        heap.check_invariants().unwrap();
        idx += 3;
    }
});
