//! Carbon emission calculator server.
//!
//! A web application that estimates the CO₂ emitted by a trip, compares
//! transport modes against driving, and prices the carbon credits needed
//! to offset the emission.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod web;
