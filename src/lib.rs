//! Factor Miner library
//!
//! An arcade asteroid miner built on number theory: collect prime-numbered
//! asteroids, shoot composite ones apart into their prime factors, and keep
//! the company solvent while every thrust, turn and shot costs money.
//!
//! The simulation, collision and economy modules are plain Rust with no ECS
//! state; the Bevy shell in `graphics`, `input`, `rendering` and
//! `asteroid_rendering` only reads and drives a [`session::GameSession`].

pub mod asteroid;
pub mod asteroid_rendering;
pub mod audio;
pub mod collision;
pub mod config;
pub mod constants;
pub mod economy;
pub mod error;
pub mod graphics;
pub mod input;
pub mod number_theory;
pub mod particles;
pub mod rendering;
pub mod session;
pub mod ship;
pub mod simulation;
