//! Terminal arcade: Hangman, Pong, Snake and Zombie Attack behind one
//! launcher, each also playable on its own.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod games;
pub mod rng;
pub mod ui;
