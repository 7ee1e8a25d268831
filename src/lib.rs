//! Errant - Autonomous Idle RPG Resolution Engine
//!
//! The deterministic core behind an auto-playing RPG: d21 action rolls,
//! combat resolution, loot and rarity allocation, auto-equip decisions, and
//! the principal/secondary mission state machines. Every resolver is a pure
//! function of its inputs plus an explicitly injected random source, so a
//! fixed seed reproduces an entire run bit-for-bit.
//!
//! Content tables (items, enemies, missions) and persistence are external
//! collaborators: the driver feeds snapshots in and persists the immutable
//! outcome records that come back.

pub mod character;
pub mod combat;
pub mod config;
pub mod content;
pub mod dice;
pub mod enemy;
pub mod equipment;
pub mod error;
pub mod items;
pub mod loot;
pub mod message;
pub mod missions;
pub mod progress;
pub mod rarity;
pub mod rewards;
pub mod rng;
pub mod stats;
