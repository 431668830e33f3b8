//! ChoreQuest engine ports
//!
//! Outbound port traits the application services depend on. Adapters live in
//! `chorequest-engine-adapters`; deterministic test doubles for randomness
//! and time live beside their traits here.

pub mod outbound;
