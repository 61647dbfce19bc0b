//! Integration tests for the tracker core.
//!
//! These tests drive the public `Tracker` API the way the runtime does:
//! edge events from several threads, a periodic sampler, button bursts and
//! concurrent point-store access.

mod integration;
