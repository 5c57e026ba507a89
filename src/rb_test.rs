use rand::prelude::random;

use crate::bst::{Bst, Strategy};

#[test]
fn test_rb_scenario() {
    // drop each key in turn out of a sequentially loaded tree; several
    // of the targets sit on two children
    for target in 0..10_i64 {
        let mut index: Bst<i64, i64> = Bst::new("test-rb", Strategy::RedBlack);
        for key in 0..10 {
            index.set(key, key * 10);
        }
        assert_eq!(index.remove(&target), Ok(target * 10));
        assert_eq!(index.len(), 9);

        let stats = index.validate().unwrap();
        assert!(stats.blacks().unwrap() >= 1);

        let keys: Vec<i64> = index.iter().map(|item| item.0).collect();
        let expect: Vec<i64> = (0..10).filter(|key| *key != target).collect();
        assert_eq!(keys, expect);
    }
}

#[test]
fn test_rb_sequential() {
    let n = 10_000_i64;
    let mut index: Bst<i64, i64> = Bst::new("test-rb", Strategy::RedBlack);
    for key in 0..n {
        index.set(key, key);
    }
    assert_eq!(index.len(), n as usize);

    let stats = index.validate().unwrap();
    let height = stats.depths().unwrap().max() as f64;
    let bound = 2.0 * ((n + 1) as f64).log2();
    assert!(height <= bound, "height {} bound {}", height, bound);

    for key in (0..n).step_by(2) {
        assert_eq!(index.remove(&key), Ok(key));
    }
    assert_eq!(index.len(), (n / 2) as usize);
    assert!(index.validate().is_ok());
}

#[test]
fn test_rb_remove_all() {
    let n = 1_000_i64;
    let mut index: Bst<i64, i64> = Bst::new("test-rb", Strategy::RedBlack);
    for key in 0..n {
        index.set(key, key);
    }
    // a permuted removal order crosses all the fixup cases
    for i in 0..n {
        let key = (i * 313) % n;
        assert_eq!(index.remove(&key), Ok(key));
        assert!(index.validate().is_ok());
    }
    assert!(index.is_empty());
}

#[test]
fn test_rb_fuzz() {
    let size = 200_i64;
    let mut index: Bst<i64, i64> = Bst::new("test-rb", Strategy::RedBlack);
    for _ in 0..10_000 {
        let key = (random::<i64>() % size).abs();
        if random::<u8>() % 2 == 0 {
            index.set(key, key);
        } else {
            let _ = index.remove(&key);
        }
        assert!(index.validate().is_ok());
    }
}
