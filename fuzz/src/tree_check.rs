#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use adaptive_radix::RadixTree;

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Search { key: Vec<u8> },
    Insert { key: Vec<u8>, val: usize },
    Update { key: Vec<u8>, val: usize },
    Delete { key: Vec<u8> },
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut art = RadixTree::<usize>::new();
    let mut bt_map = BTreeMap::<Vec<u8>, usize>::new();

    for m in &methods {
        match m {
            MapMethod::Search { key } => {
                assert_eq!(art.search(key), bt_map.get(key));
            }
            MapMethod::Insert { key, val } => {
                let btree_insert = bt_map.insert(key.clone(), *val);
                let a_insert = art.insert(key, *val);
                assert_eq!(a_insert, btree_insert, "insert {key:?}");
            }
            MapMethod::Update { key, val } => {
                let old_bt = bt_map.get_mut(key);
                let old_art = art.get_mut(key);
                assert_eq!(old_art, old_bt);

                if let (Some(old_bt), Some(old_art)) = (old_bt, old_art) {
                    *old_bt = *val;
                    *old_art = *val;
                }
                assert_eq!(art.search(key), bt_map.get(key));
            }
            MapMethod::Delete { key } => {
                assert_eq!(art.delete(key), bt_map.remove(key), "delete {key:?}");
            }
        }
        assert_eq!(art.len(), bt_map.len());
    }

    for (k, expected_value) in bt_map.iter() {
        assert_eq!(art.search(k), Some(expected_value), "key {k:?}");
    }
    assert!(
        art.iter()
            .eq(bt_map.iter().map(|(k, v)| (k.as_slice(), v)))
    );
});
