//! # Shared Storage and Region Addressing
//!
//! The host owns a single word-addressed storage space. Plugins never get a
//! storage space of their own: they are handed the host's, and locate their
//! data inside it through a [`StorageTag`] derived from a namespace string
//! only they know.
//!
//! # Layout
//!
//! - Scalar field `n` of a region lives at slot `tag + n` (256-bit,
//!   big-endian, wrapping).
//! - Entry `key` of keyed field `n` lives at slot `sha256(key ‖ (tag + n))`.
//!
//! Distinct namespaces map to disjoint regions with overwhelming probability.
//! Nothing here detects collisions; two plugins that pick the same namespace
//! share a region.
//!
//! # Journaling
//!
//! [`Storage`] records the previous value of every slot written while a
//! [`Checkpoint`] is open, so a failed call can be undone completely with
//! [`Storage::revert`].

use crate::address::Address;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// A 256-bit storage word.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Word(pub [u8; 32]);

impl Word {
    /// The all-zero word. Unwritten slots read as zero.
    pub const ZERO: Word = Word([0; 32]);

    /// Returns `true` if every byte is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// The low 64 bits, big-endian.
    pub fn low_u64(&self) -> u64 {
        let mut be = [0u8; 8];
        be.copy_from_slice(&self.0[24..]);
        u64::from_be_bytes(be)
    }

    /// The value as `u64`, or `None` if it does not fit.
    pub fn to_u64(&self) -> Option<u64> {
        self.0[..24]
            .iter()
            .all(|b| *b == 0)
            .then(|| self.low_u64())
    }

    /// The low 20 bytes interpreted as an [`Address`].
    pub fn to_address(&self) -> Address {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&self.0[12..]);
        Address(bytes)
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<Address> for Word {
    fn from(address: Address) -> Self {
        let mut bytes = [0u8; 32];
        bytes[12..].copy_from_slice(address.as_bytes());
        Self(bytes)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_u64() {
            Some(v) => write!(f, "Word({v})"),
            None => {
                f.write_str("Word(0x")?;
                for byte in self.0 {
                    write!(f, "{byte:02x}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Absolute position in the shared storage space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Slot(pub [u8; 32]);

/// Base address of a plugin's region, derived from its namespace.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StorageTag(pub [u8; 32]);

impl StorageTag {
    /// Derive the tag for a namespace: `sha256(namespace)`.
    ///
    /// Pure function of the namespace; the same namespace always lands on
    /// the same region regardless of plugin id or caller.
    pub fn from_namespace(namespace: &str) -> Self {
        Self(Sha256::digest(namespace.as_bytes()).into())
    }

    /// Slot of scalar field `offset`.
    pub fn slot(&self, offset: u64) -> Slot {
        Slot(add_offset(self.0, offset))
    }

    /// Slot of the entry for `key` in keyed field `field`.
    pub fn entry_slot(&self, field: u64, key: Word) -> Slot {
        let base = self.slot(field);
        let mut hasher = Sha256::new();
        hasher.update(key.0);
        hasher.update(base.0);
        Slot(hasher.finalize().into())
    }
}

fn add_offset(mut base: [u8; 32], offset: u64) -> [u8; 32] {
    let mut carry = offset;
    for byte in base.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let sum = u16::from(*byte) + (carry & 0xff) as u16;
        *byte = sum as u8;
        carry = (carry >> 8) + u64::from(sum >> 8);
    }
    base
}

/// Marker returned by [`Storage::checkpoint`].
///
/// Must be handed back to either [`Storage::commit`] or [`Storage::revert`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a checkpoint must be committed or reverted"]
pub struct Checkpoint {
    mark: usize,
    depth: usize,
}

/// The host's shared, journaled storage space.
#[derive(Debug, Default, Clone)]
pub struct Storage {
    slots: BTreeMap<Slot, Word>,
    journal: Vec<(Slot, Option<Word>)>,
    open: usize,
}

impl Storage {
    /// Create an empty storage space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a slot. Unwritten slots read as [`Word::ZERO`].
    pub fn load(&self, slot: &Slot) -> Word {
        self.slots.get(slot).copied().unwrap_or(Word::ZERO)
    }

    /// Write a slot. Writing zero clears it.
    pub fn store(&mut self, slot: Slot, value: Word) {
        let previous = if value.is_zero() {
            self.slots.remove(&slot)
        } else {
            self.slots.insert(slot, value)
        };
        if self.open > 0 {
            self.journal.push((slot, previous));
        }
    }

    /// Open a checkpoint. Checkpoints nest.
    pub fn checkpoint(&mut self) -> Checkpoint {
        self.open += 1;
        Checkpoint {
            mark: self.journal.len(),
            depth: self.open,
        }
    }

    /// Keep every write made since `checkpoint`.
    ///
    /// Any checkpoint opened after this one and never closed is closed
    /// along with it.
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        self.open = checkpoint.depth.saturating_sub(1);
        // Outer checkpoints still need the entries to undo.
        if self.open == 0 {
            self.journal.clear();
        }
    }

    /// Undo every write made since `checkpoint`.
    pub fn revert(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.mark {
            let Some((slot, previous)) = self.journal.pop() else {
                break;
            };
            match previous {
                Some(word) => self.slots.insert(slot, word),
                None => self.slots.remove(&slot),
            };
        }
        self.open = checkpoint.depth.saturating_sub(1);
    }

    /// Number of non-zero slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot holds a non-zero word.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over all non-zero slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &Word)> {
        self.slots.iter()
    }

    /// Mutable view of the region identified by `tag`.
    pub fn region(&mut self, tag: StorageTag) -> Region<'_> {
        Region { storage: self, tag }
    }
}

/// Typed view of one plugin's region inside the shared storage.
pub struct Region<'s> {
    storage: &'s mut Storage,
    tag: StorageTag,
}

impl Region<'_> {
    /// Read scalar field `offset`.
    pub fn load(&self, offset: u64) -> Word {
        self.storage.load(&self.tag.slot(offset))
    }

    /// Write scalar field `offset`.
    pub fn store(&mut self, offset: u64, value: impl Into<Word>) {
        self.storage.store(self.tag.slot(offset), value.into());
    }

    /// Read entry `key` of keyed field `field`.
    pub fn load_entry(&self, field: u64, key: impl Into<Word>) -> Word {
        self.storage.load(&self.tag.entry_slot(field, key.into()))
    }

    /// Write entry `key` of keyed field `field`.
    pub fn store_entry(&mut self, field: u64, key: impl Into<Word>, value: impl Into<Word>) {
        self.storage
            .store(self.tag.entry_slot(field, key.into()), value.into());
    }
}
