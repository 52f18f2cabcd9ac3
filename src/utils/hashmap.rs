//! Hash-maps used by the cutting algorithms.
//!
//! These maps are only used for lookups: no output depends on their iteration order.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;
