#[derive(Clone)]
struct RefNode {
    key: i64,
    value: i64,
}

struct RefNodes {
    entries: Vec<RefNode>,
}

impl RefNodes {
    fn new(capacity: usize) -> RefNodes {
        let mut entries: Vec<RefNode> = Vec::with_capacity(capacity);
        (0..capacity).for_each(|_| entries.push(RefNode { key: -1, value: 0 }));
        RefNodes { entries }
    }

    fn get(&self, key: i64) -> Option<i64> {
        let entry = &self.entries[key as usize];
        if entry.key < 0 {
            None
        } else {
            Some(entry.value)
        }
    }

    fn set(&mut self, key: i64, value: i64) -> Option<i64> {
        let entry = &mut self.entries[key as usize];
        let old_value = if entry.key < 0 {
            None
        } else {
            Some(entry.value)
        };
        entry.key = key;
        entry.value = value;
        old_value
    }

    fn remove(&mut self, key: i64) -> Option<i64> {
        let entry = &mut self.entries[key as usize];
        if entry.key < 0 {
            None
        } else {
            entry.key = -1;
            Some(entry.value)
        }
    }

    fn iter(&self) -> std::vec::IntoIter<(i64, i64)> {
        self.entries
            .iter()
            .filter_map(|item| {
                if item.key < 0 {
                    None
                } else {
                    Some((item.key, item.value))
                }
            })
            .collect::<Vec<(i64, i64)>>()
            .into_iter()
    }

    fn range(
        &self,
        start: Option<i64>,
        end: Option<i64>,
        reverse: bool,
    ) -> std::vec::IntoIter<(i64, i64)> {
        let mut items: Vec<(i64, i64)> = self
            .entries
            .iter()
            .filter(|item| item.key >= 0)
            .filter(|item| start.map_or(true, |start| item.key >= start))
            .filter(|item| end.map_or(true, |end| item.key < end))
            .map(|item| (item.key, item.value))
            .collect();
        if reverse {
            items.reverse();
        }
        items.into_iter()
    }

    fn succ(&self, key: i64) -> Option<(i64, i64)> {
        self.entries
            .iter()
            .find(|item| item.key >= 0 && item.key > key)
            .map(|item| (item.key, item.value))
    }

    fn prev(&self, key: i64) -> Option<(i64, i64)> {
        self.entries
            .iter()
            .rev()
            .find(|item| item.key >= 0 && item.key < key)
            .map(|item| (item.key, item.value))
    }

    fn floor(&self, key: i64) -> Option<(i64, i64)> {
        self.entries
            .iter()
            .rev()
            .find(|item| item.key >= 0 && item.key <= key)
            .map(|item| (item.key, item.value))
    }

    fn ceiling(&self, key: i64) -> Option<(i64, i64)> {
        self.entries
            .iter()
            .find(|item| item.key >= 0 && item.key >= key)
            .map(|item| (item.key, item.value))
    }
}

fn random_range(size: usize) -> (Option<i64>, Option<i64>) {
    let size = size as u64;
    let start = match random::<u8>() % 2 {
        0 => Some((random::<u64>() % size) as i64),
        _ => None,
    };
    let end = match random::<u8>() % 2 {
        0 => Some((random::<u64>() % size) as i64),
        _ => None,
    };
    (start, end)
}
