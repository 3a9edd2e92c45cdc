use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;
use smallvec::{SmallVec, smallvec};

use super::arena::Arena;
use super::handle::Handle;
use super::level::{LevelGenerator, perfect_level};
use super::node::{Link, Node};
use crate::compare::Compare;

const HEAD: Handle = Handle::HEAD;
const TAIL: Handle = Handle::TAIL;

/// One level of the predecessor frontier.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Step {
    /// The last node at this level that compares strictly less than the query.
    pub(crate) node: Handle,
    /// 1-based rank of `node`; the head sentinel has rank 0.
    pub(crate) rank: usize,
}

/// Per-level predecessors of a query, indexed by level.
pub(crate) type Frontier = SmallVec<[Step; 32]>;

/// The skip list backing `SkipSet`.
///
/// Two sentinels bound every level: `HEAD` carries `capacity_level` links and `TAIL` none.
/// Every link also records its span so positional queries run in expected O(log n).
#[derive(Clone)]
pub(crate) struct RawSkipSet<T, C> {
    nodes: Arena<Node<T>>,
    cmp: C,
    levels: LevelGenerator,
    /// Number of levels the head participates in. Grows, never shrinks.
    capacity_level: usize,
    /// Number of non-sentinel nodes.
    len: usize,
    /// Bumped on every structural change.
    stamp: u64,
}

impl<T, C> RawSkipSet<T, C> {
    pub(crate) fn new(cmp: C, seed: u64, levels: usize, capacity: usize) -> Self {
        let capacity_level = levels.max(1);
        let mut nodes = Arena::with_capacity(capacity.saturating_add(2));
        let head = nodes.alloc(Node::sentinel(capacity_level, TAIL, 1));
        let tail = nodes.alloc(Node::sentinel(0, TAIL, 0));
        debug_assert_eq!((head, tail), (HEAD, TAIL));

        Self {
            nodes,
            cmp,
            levels: LevelGenerator::new(seed),
            capacity_level,
            len: 0,
            stamp: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn capacity_level(&self) -> usize {
        self.capacity_level
    }

    pub(crate) const fn stamp(&self) -> u64 {
        self.stamp
    }

    /// Number of elements the arena can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity().saturating_sub(2)
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Removes every element. The capacity level is kept.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.alloc(Node::sentinel(self.capacity_level, TAIL, 1));
        self.nodes.alloc(Node::sentinel(0, TAIL, 0));
        self.len = 0;
        self.stamp += 1;
    }

    /// Level-0 successor of `handle`.
    #[inline]
    pub(crate) fn next(&self, handle: Handle) -> Handle {
        self.nodes.get(handle).next(0)
    }

    /// Level-0 successor of `handle`, or `None` if the slot is vacant.
    pub(crate) fn try_next(&self, handle: Handle) -> Option<Handle> {
        self.nodes.try_get(handle).filter(|node| node.level() > 0).map(|node| node.next(0))
    }

    /// Payload of a real node; `None` for the sentinels.
    #[inline]
    pub(crate) fn element(&self, handle: Handle) -> Option<&T> {
        self.nodes.get(handle).element()
    }

    pub(crate) fn first(&self) -> Option<&T> {
        self.element(self.next(HEAD))
    }

    /// Returns the element at 0-based `index` using link spans.
    pub(crate) fn find_index(&self, index: usize) -> Option<&T> {
        self.handle_at(index).and_then(|handle| self.element(handle))
    }

    /// Handle of the node at 0-based `index`.
    pub(crate) fn handle_at(&self, index: usize) -> Option<Handle> {
        if index >= self.len {
            return None;
        }

        let target = index + 1;
        let mut current = HEAD;
        let mut rank = 0;
        for level in (0..self.capacity_level).rev() {
            loop {
                let link = self.nodes.get(current).link(level);
                if rank + link.span > target {
                    break;
                }
                rank += link.span;
                current = link.next;
            }
            if rank == target {
                return Some(current);
            }
        }
        None
    }

    /// Moves every element out in ascending order, leaving the set empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.len);
        let mut current = self.next(HEAD);
        while current != TAIL {
            let node = self.nodes.take(current);
            current = node.next(0);
            result.push(node.into_element());
        }
        self.clear();
        result
    }

    /// Lazily extends the head to `target` levels. New levels start empty.
    ///
    /// `tail_rank` is the rank the tail has while the pending insertion is still unlinked.
    fn grow(&mut self, target: usize, tail_rank: usize, frontier: &mut Frontier) {
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.capacity_level, to = target, len = self.len, "growing skip list levels");

        let head = self.nodes.get_mut(HEAD);
        for _ in self.capacity_level..target {
            head.push_link(Link { next: TAIL, span: tail_rank });
            frontier.push(Step { node: HEAD, rank: 0 });
        }
        self.capacity_level = target;
    }

    /// Redistributes every element into a perfectly balanced tower layout.
    pub(crate) fn rebuild(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(levels = self.capacity_level, len = self.len, "rebuilding skip list");

        let cap = self.capacity_level;
        let mut last: Frontier = smallvec![Step { node: HEAD, rank: 0 }; cap];
        let mut current = self.next(HEAD);
        let mut position = 0;

        while current != TAIL {
            position += 1;
            let following = self.next(current);
            let level = perfect_level(position, cap);
            self.nodes.get_mut(current).reset_links(level, Link { next: TAIL, span: 0 });

            for (lvl, step) in last.iter_mut().enumerate().take(level) {
                *self.nodes.get_mut(step.node).link_mut(lvl) = Link {
                    next: current,
                    span: position - step.rank,
                };
                *step = Step {
                    node: current,
                    rank: position,
                };
            }
            current = following;
        }

        for (lvl, step) in last.iter().enumerate() {
            *self.nodes.get_mut(step.node).link_mut(lvl) = Link {
                next: TAIL,
                span: self.len + 1 - step.rank,
            };
        }
        self.stamp += 1;
    }

    /// Unlinks `target` from every level it participates in and frees its slot.
    ///
    /// `frontier` must be the predecessor frontier of `target`'s element.
    fn unlink(&mut self, frontier: &Frontier, target: Handle) -> T {
        let node = self.nodes.take(target);
        for (level, step) in frontier.iter().enumerate() {
            let link = self.nodes.get_mut(step.node).link_mut(level);
            if link.next == target {
                *link = Link {
                    next: node.next(level),
                    span: link.span + node.link(level).span - 1,
                };
            } else {
                link.span -= 1;
            }
        }
        self.len -= 1;
        self.stamp += 1;
        debug_assert_eq!(self.nodes.len(), self.len + 2);
        node.into_element()
    }
}

impl<T, C: Compare<T>> RawSkipSet<T, C> {
    /// `true` if the node at `handle` holds an element strictly less than `x`.
    ///
    /// The tail has no element and compares greater than everything.
    #[inline]
    fn precedes(&self, handle: Handle, x: &T) -> bool {
        self.element(handle).is_some_and(|e| self.cmp.compare(e, x) == Ordering::Less)
    }

    #[inline]
    fn is_match(&self, handle: Handle, x: &T) -> bool {
        self.element(handle).is_some_and(|e| self.cmp.compare(e, x) == Ordering::Equal)
    }

    /// Walks from the top level down, recording the rightmost node below `x` at each level.
    pub(crate) fn locate(&self, x: &T) -> Frontier {
        let mut frontier: Frontier = smallvec![Step { node: HEAD, rank: 0 }; self.capacity_level];
        let mut current = HEAD;
        let mut rank = 0;
        for level in (0..self.capacity_level).rev() {
            loop {
                let link = self.nodes.get(current).link(level);
                if !self.precedes(link.next, x) {
                    break;
                }
                rank += link.span;
                current = link.next;
            }
            frontier[level] = Step { node: current, rank };
        }
        frontier
    }

    /// Handle of the node equal to `x`, if any.
    pub(crate) fn search(&self, x: &T) -> Option<Handle> {
        let frontier = self.locate(x);
        let successor = self.next(frontier[0].node);
        self.is_match(successor, x).then_some(successor)
    }

    pub(crate) fn get(&self, x: &T) -> Option<&T> {
        self.search(x).and_then(|handle| self.element(handle))
    }

    /// Inserts `element`, or overwrites the stored equal element and returns it.
    pub(crate) fn replace(&mut self, element: T) -> Option<T> {
        let mut frontier = self.locate(&element);
        let successor = self.next(frontier[0].node);
        if self.is_match(successor, &element) {
            let slot = self.nodes.get_mut(successor).element_mut()?;
            return Some(mem::replace(slot, element));
        }

        self.len += 1;
        let target = self.len.ilog2() as usize;
        if target > self.capacity_level {
            self.grow(target, self.len, &mut frontier);
        }

        let level = self.levels.random(self.capacity_level);
        let rank = frontier[0].rank + 1;
        let handle = self.nodes.alloc(Node::with_level(element, level));

        for (lvl, step) in frontier.iter().enumerate() {
            let before = self.nodes.get(step.node).link(lvl);
            if lvl < level {
                // Spans are still in pre-insertion ranks: everything after `step.node` shifts by one.
                let left = rank - step.rank;
                self.nodes.get_mut(handle).push_link(Link {
                    next: before.next,
                    span: before.span + 1 - left,
                });
                *self.nodes.get_mut(step.node).link_mut(lvl) = Link {
                    next: handle,
                    span: left,
                };
            } else {
                self.nodes.get_mut(step.node).link_mut(lvl).span += 1;
            }
        }

        self.stamp += 1;
        None
    }

    pub(crate) fn remove(&mut self, x: &T) -> Option<T> {
        let frontier = self.locate(x);
        let target = self.next(frontier[0].node);
        if !self.is_match(target, x) {
            return None;
        }
        Some(self.unlink(&frontier, target))
    }

    /// Removes the node at `handle` and returns its element with the handle of its level-0
    /// predecessor.
    pub(crate) fn remove_handle(&mut self, handle: Handle) -> (T, Handle) {
        let frontier = match self.element(handle) {
            Some(element) => self.locate(element),
            None => panic!("`RawSkipSet::remove_handle()` - cannot remove a sentinel!"),
        };
        debug_assert_eq!(self.next(frontier[0].node), handle);
        let predecessor = frontier[0].node;
        (self.unlink(&frontier, handle), predecessor)
    }

    pub(crate) fn contains(&self, x: &T) -> bool {
        self.search(x).is_some()
    }

    /// Least element greater than or equal to `x`.
    pub(crate) fn ceiling(&self, x: &T) -> Option<&T> {
        let frontier = self.locate(x);
        self.element(self.next(frontier[0].node))
    }

    /// Greatest element less than or equal to `x`.
    pub(crate) fn floor(&self, x: &T) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let frontier = self.locate(x);
        let successor = self.next(frontier[0].node);
        if self.is_match(successor, x) {
            return self.element(successor);
        }
        self.element(frontier[0].node)
    }

    /// 0-based position of the element equal to `x`.
    pub(crate) fn rank_of(&self, x: &T) -> Option<usize> {
        let frontier = self.locate(x);
        let successor = self.next(frontier[0].node);
        self.is_match(successor, x).then_some(frontier[0].rank)
    }
}

#[cfg(test)]
impl<T, C: Compare<T>> RawSkipSet<T, C> {
    /// Returns the element at 0-based `index` by walking level 0, ignoring spans.
    pub(crate) fn find_index_linear(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let mut current = HEAD;
        for _ in 0..=index {
            current = self.next(current);
        }
        self.element(current)
    }

    /// Asserts ordering, level-prefix, span and length invariants at every level.
    pub(crate) fn check_invariants(&self) {
        // Ranks along level 0.
        let mut ranks = alloc::collections::BTreeMap::new();
        ranks.insert(HEAD.to_index(), 0usize);
        let mut current = self.next(HEAD);
        let mut rank = 0;
        while current != TAIL {
            rank += 1;
            ranks.insert(current.to_index(), rank);
            current = self.next(current);
        }
        ranks.insert(TAIL.to_index(), rank + 1);
        assert_eq!(rank, self.len, "len does not match level-0 walk");
        assert_eq!(self.nodes.len(), self.len + 2, "arena holds unreachable nodes");
        assert_eq!(self.nodes.get(HEAD).level(), self.capacity_level);

        for level in 0..self.capacity_level {
            let mut current = HEAD;
            while current != TAIL {
                let node = self.nodes.get(current);
                assert!(node.level() > level, "tower is not a contiguous prefix");
                let link = node.link(level);
                assert!(ranks.contains_key(&link.next.to_index()), "level {level} reaches an unlinked node");
                assert_eq!(link.span, ranks[&link.next.to_index()] - ranks[&current.to_index()], "bad span at level {level}");
                if let (Some(a), Some(b)) = (node.element(), self.element(link.next)) {
                    assert_eq!(self.cmp.compare(a, b), Ordering::Less, "level {level} is not strictly increasing");
                }
                if !current.is_sentinel() {
                    assert!(node.level() <= self.capacity_level);
                }
                current = link.next;
            }
        }
    }
}
