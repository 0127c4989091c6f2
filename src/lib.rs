//! Timer-driven control loops for two ATmega328P boards: a debounced button
//! that turns a stepper a quarter revolution, and a pin-change armed LED chase.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod drivers;
pub mod hal;
pub mod os;
