//! Cluster chains
//!
//! A chain is produced lazily by following FAT links from a seed cluster. It
//! ends on a "last" or "bad" marker, or on a free entry (a truncated chain).
//! Revisiting a cluster or outgrowing the table is reported as
//! `MalformedChain` instead of looping.

use super::{FatEntry, FatTable};
use crate::error::{Fat12Error, Result};
use alloc::collections::BTreeSet;

/// Tracks the clusters one walk has touched
#[derive(Debug, Clone)]
pub(crate) struct ChainGuard {
    visited: BTreeSet<u16>,
    limit: usize,
}

impl ChainGuard {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            visited: BTreeSet::new(),
            limit,
        }
    }

    /// Record a visit, failing on a repeat or once the limit is exceeded
    pub(crate) fn visit(&mut self, cluster: u16) -> Result<()> {
        if !self.visited.insert(cluster) {
            log::warn!("cluster {} revisited, chain loops", cluster);
            return Err(Fat12Error::MalformedChain);
        }
        if self.visited.len() > self.limit {
            log::warn!("chain longer than {} clusters", self.limit);
            return Err(Fat12Error::MalformedChain);
        }
        Ok(())
    }
}

/// Iterator over the clusters of one file or directory
#[derive(Debug, Clone)]
pub struct ClusterChain<'a> {
    table: FatTable<'a>,
    next: Option<u16>,
    guard: ChainGuard,
}

impl<'a> ClusterChain<'a> {
    /// Chain starting at `seed`; a seed of 0 is an empty chain
    pub fn new(table: FatTable<'a>, seed: u16, max_len: usize) -> Self {
        Self {
            table,
            next: (seed != 0).then_some(seed),
            guard: ChainGuard::new(max_len),
        }
    }
}

impl<'a> Iterator for ClusterChain<'a> {
    type Item = Result<u16>;

    fn next(&mut self) -> Option<Self::Item> {
        let cluster = self.next.take()?;

        if !self.table.is_addressable(cluster) {
            log::warn!("chain points at cluster {:#05x} outside the table", cluster);
            return Some(Err(Fat12Error::MalformedChain));
        }
        if let Err(e) = self.guard.visit(cluster) {
            return Some(Err(e));
        }

        self.next = match self.table.successor(cluster) {
            FatEntry::Next(next) => Some(next),
            FatEntry::Free => {
                log::warn!("chain ends on free cluster after {}", cluster);
                None
            }
            FatEntry::Bad | FatEntry::Last => None,
        };

        Some(Ok(cluster))
    }
}
