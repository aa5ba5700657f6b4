use std::collections::BTreeMap;
use std::ops::Add;

use crate::model::entity::NodeResourceSample;

/// Nodes sharing the same number of idle resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleBucket {
    pub node_count: u64,
    /// Free memory in MB.
    pub min_free_mem: u64,
    /// Free memory in MB.
    pub max_free_mem: u64,
}

impl IdleBucket {
    fn new(free_mem: u64) -> Self {
        Self {
            node_count: 1,
            min_free_mem: free_mem,
            max_free_mem: free_mem,
        }
    }

    fn add_node(&mut self, free_mem: u64) {
        self.node_count += 1;
        self.min_free_mem = self.min_free_mem.min(free_mem);
        self.max_free_mem = self.max_free_mem.max(free_mem);
    }
}

/// Idle resources of a partition, keyed by the number of idle cores or GPUs per node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdleResources {
    buckets: BTreeMap<u64, IdleBucket>,
}

impl IdleResources {
    #[inline]
    pub fn get(&self, idle: u64) -> Option<&IdleBucket> {
        self.buckets.get(&idle)
    }

    /// Buckets in ascending order of idle count.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &IdleBucket)> {
        self.buckets.iter().map(|(idle, bucket)| (*idle, bucket))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[inline]
    pub fn node_count(&self) -> u64 {
        self.buckets.values().map(|b| b.node_count).sum()
    }

    /// No node offers a single idle resource. True for an empty partition as well.
    pub fn is_exhausted(&self) -> bool {
        self.buckets.keys().all(|idle| *idle == 0)
    }
}

impl Add<&NodeResourceSample> for IdleResources {
    type Output = Self;

    fn add(mut self, rhs: &NodeResourceSample) -> Self::Output {
        let free_mem = rhs.available_free_mem();
        self.buckets
            .entry(rhs.available())
            .and_modify(|bucket| bucket.add_node(free_mem))
            .or_insert_with(|| IdleBucket::new(free_mem));
        self
    }
}

impl<'a> FromIterator<&'a NodeResourceSample> for IdleResources {
    fn from_iter<T: IntoIterator<Item = &'a NodeResourceSample>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |acc, n| acc + n)
    }
}
