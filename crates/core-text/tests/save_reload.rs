//! Serializing then re-reading a store reproduces its rows byte for byte.

use core_text::RowStore;
use std::io::BufReader;

#[test]
fn save_then_reload_is_identical() {
    let lines: [&[u8]; 5] = [b"fn main() {", b"\tlet x = 1;", b"", b"}", b"trailing \xff byte"];
    let store = RowStore::from_lines(lines, 4, None);

    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), store.to_bytes()).unwrap();

    let file = std::fs::File::open(tmp.path()).unwrap();
    let reloaded = RowStore::from_reader(BufReader::new(file), 4, None).unwrap();

    assert_eq!(reloaded.len(), store.len());
    for (a, b) in store.iter().zip(reloaded.iter()) {
        assert_eq!(a.chars(), b.chars());
        assert_eq!(a.render(), b.render());
    }
    assert_eq!(reloaded.to_bytes(), store.to_bytes());
}
