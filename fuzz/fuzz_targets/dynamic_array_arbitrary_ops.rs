#![no_main]

use heapkit::ds::DynamicArray;
use heapkit::error::ContainerError;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on DynamicArray
//
// Tests random sequences of append, pop, put, get, swap, resize operations
// against a Vec<Option<u8>> model.
fuzz_target!(|data: &[u8]| {
    let mut array: DynamicArray<u8> = DynamicArray::with_capacity(0);
    let mut model: Vec<Option<u8>> = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let arg = data[idx + 1];
        let index = usize::from(arg) % (model.len() + 1);

        match op {
            0 => {
                array.append(arg);
                model.push(Some(arg));
            },
            1 => match model.last().copied() {
                None => assert_eq!(array.pop(), Err(ContainerError::Empty)),
                Some(None) => {
                    let len = array.len();
                    assert!(array.pop().is_err());
                    assert_eq!(array.len(), len);
                },
                Some(Some(v)) => {
                    assert_eq!(array.pop(), Ok(v));
                    model.pop();
                },
            },
            2 => {
                let result = array.put(index, arg);
                if index < model.len() {
                    assert_eq!(result, Ok(model[index].replace(arg)));
                } else {
                    assert!(result.is_err());
                }
            },
            3 => {
                let got = array.get(index).ok().copied();
                assert_eq!(got, model.get(index).copied().flatten());
            },
            4 => {
                let other = usize::from(arg / 2) % (model.len() + 1);
                let result = array.swap(index, other);
                if index < model.len() && other < model.len() {
                    assert!(result.is_ok());
                    model.swap(index, other);
                } else {
                    assert!(result.is_err());
                }
            },
            5 => {
                let new_len = usize::from(arg % 32);
                let old_capacity = array.capacity();
                array.resize(new_len);
                model.resize(new_len, None);
                assert!(array.capacity() >= old_capacity);
            },
            _ => unreachable!(),
        }

        assert_eq!(array.len(), model.len());
        assert!(array.len() <= array.capacity());
        array.check_invariants().unwrap();
        idx += 2;
    }
});
