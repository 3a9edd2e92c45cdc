use smallvec::SmallVec;

use super::handle::Handle;

// Most towers are short: P(level > 4) = 1/16.
const INLINE_LINKS: usize = 4;

/// A forward reference at one level.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Link {
    pub(crate) next: Handle,
    // Number of level-0 hops from the owning node to `next`.
    pub(crate) span: usize,
}

/// A leveled link record: a payload plus one forward link per level it participates in.
///
/// Sentinels carry no payload. Levels are always a contiguous prefix `0..level()`.
#[derive(Clone)]
pub(crate) struct Node<T> {
    element: Option<T>,
    links: SmallVec<[Link; INLINE_LINKS]>,
}

impl<T> Node<T> {
    /// Creates a payload-free sentinel with `levels` links, all pointing at `next`.
    pub(crate) fn sentinel(levels: usize, next: Handle, span: usize) -> Self {
        Self {
            element: None,
            links: core::iter::repeat_n(Link { next, span }, levels).collect(),
        }
    }

    /// Creates a node with no links and room for `level` of them.
    pub(crate) fn with_level(element: T, level: usize) -> Self {
        Self {
            element: Some(element),
            links: SmallVec::with_capacity(level),
        }
    }

    pub(crate) fn level(&self) -> usize {
        self.links.len()
    }

    pub(crate) fn element(&self) -> Option<&T> {
        self.element.as_ref()
    }

    pub(crate) fn element_mut(&mut self) -> Option<&mut T> {
        self.element.as_mut()
    }

    pub(crate) fn into_element(self) -> T {
        self.element.expect("`Node::into_element()` - sentinel nodes have no element!")
    }

    #[inline]
    pub(crate) fn link(&self, level: usize) -> Link {
        self.links[level]
    }

    #[inline]
    pub(crate) fn link_mut(&mut self, level: usize) -> &mut Link {
        &mut self.links[level]
    }

    #[inline]
    pub(crate) fn next(&self, level: usize) -> Handle {
        self.links[level].next
    }

    /// Appends a link at the next level up.
    pub(crate) fn push_link(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Resizes the tower to `level` links, each set to `link`.
    pub(crate) fn reset_links(&mut self, level: usize, link: Link) {
        self.links.clear();
        self.links.resize(level, link);
    }
}
