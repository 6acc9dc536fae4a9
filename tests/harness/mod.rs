#![allow(dead_code)]

pub mod recording_notifier;
pub mod reentrant_treasury;
