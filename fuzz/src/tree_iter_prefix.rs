#![no_main]

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use adaptive_radix::RadixTree;

#[derive(Arbitrary, Debug)]
struct Input {
    keys: Vec<Vec<u8>>,
    probe: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let keys: BTreeSet<Vec<u8>> = input.keys.into_iter().collect();
    let art: RadixTree<()> = keys.iter().map(|k| (k, ())).collect();

    let by_prefix: Vec<&[u8]> = art.prefix_iter(&input.probe).map(|(k, _)| k).collect();
    let expected: Vec<&[u8]> = keys
        .iter()
        .filter(|k| k.starts_with(&input.probe))
        .map(|k| k.as_slice())
        .collect();
    assert_eq!(by_prefix, expected);

    let by_path: Vec<&[u8]> = art.path_iter(&input.probe).map(|(k, _)| k).collect();
    let expected: Vec<&[u8]> = keys
        .iter()
        .filter(|k| input.probe.starts_with(k))
        .map(|k| k.as_slice())
        .collect();
    assert_eq!(by_path, expected);
});
