//! Form Assistant - conversational form filling.
//!
//! A slot-filling engine that completes structured university forms through
//! chat: every user turn runs REASON (advisory text generation), PLAN (pick
//! the focus field), ACT (extract and merge values, compose the reply) and
//! REFLECT (decide completion).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
