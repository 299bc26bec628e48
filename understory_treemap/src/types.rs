// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the treemap tree: node identifiers, colours, and flavors.

use core::fmt::Debug;

/// Identifier for a node in a [`Tree`](crate::Tree).
///
/// Nodes are never freed while the tree is alive, so a `NodeId` stays valid for the lifetime of
/// the tree that handed it out. Using it with a different tree is a logic error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// An opaque RGB fill colour attached to every node.
///
/// The tree assigns it once on insertion and never changes it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Per-variant naming capability of a tree.
///
/// A flavor decides how path strings are rendered and what metadata a leaf carries. A filesystem
/// tree and a publication taxonomy share every algorithm in this crate and differ only here.
pub trait Flavor {
    /// Opaque per-node payload (for example, a file path or citation details).
    type Meta: Clone + Debug;

    /// String placed between two names in a path string.
    fn separator(&self) -> &str;

    /// Descriptor appended to the final name in a path string.
    ///
    /// `is_leaf` is true when the node the suffix is attached to has no children.
    fn suffix(&self, is_leaf: bool) -> &str;
}

/// Deterministic colour sequence used to colour new nodes.
///
/// This is a `SplitMix64` stream; each call yields the next colour.
#[derive(Clone, Debug)]
pub(crate) struct ColourSeq {
    state: u64,
}

impl ColourSeq {
    pub(crate) const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_colour(&mut self) -> Rgb {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        let [r, g, b, ..] = z.to_le_bytes();
        Rgb::new(r, g, b)
    }
}
