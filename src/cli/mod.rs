//! CLI infrastructure for the Blackjack Q-learning demo
//!
//! This module provides the command-line interface for training a tabular
//! agent, inspecting what it learned, and watching it play.

pub mod commands;
pub mod config;
pub mod output;
