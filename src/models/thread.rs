//! Thread-tree ordering for the message list.

use std::collections::{HashMap, HashSet};

use super::{MessageId, MessageRecord};

/// A record placed in the thread tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadedRecord {
    pub record: MessageRecord,
    /// Reply depth; top-level messages are 0.
    pub depth: usize,
}

/// Order records so every reply follows its parent, depth first.
///
/// Siblings keep their relative order from the input. Records whose parent
/// is not in the input are treated as top-level. Every input record appears
/// exactly once in the output.
pub fn thread_order(records: &[MessageRecord]) -> Vec<ThreadedRecord> {
    let index: HashMap<&MessageId, usize> = records
        .iter()
        .enumerate()
        .map(|(i, record)| (&record.id, i))
        .collect();

    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (i, record) in records.iter().enumerate() {
        match record.parent.as_ref().and_then(|parent| index.get(parent)) {
            Some(&parent) if parent != i => children.entry(parent).or_default().push(i),
            _ => roots.push(i),
        }
    }

    let mut ordered = Vec::with_capacity(records.len());
    let mut visited = HashSet::with_capacity(records.len());
    let mut walk = |start: usize, ordered: &mut Vec<ThreadedRecord>| {
        let mut stack = vec![(start, 0usize)];
        while let Some((i, depth)) = stack.pop() {
            if !visited.insert(i) {
                continue;
            }
            ordered.push(ThreadedRecord {
                record: records[i].clone(),
                depth,
            });
            if let Some(kids) = children.get(&i) {
                stack.extend(kids.iter().rev().map(|&kid| (kid, depth + 1)));
            }
        }
    };

    for root in roots {
        walk(root, &mut ordered);
    }
    // Parent cycles are unreachable from any root.
    for i in 0..records.len() {
        walk(i, &mut ordered);
    }
    ordered
}
