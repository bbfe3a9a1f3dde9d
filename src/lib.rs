//! overlay-tui - progress, notification and modal overlays for terminal apps
//!
//! The `model` layer holds pure, clock-driven state machines; `components`
//! draws them with ratatui. Time only moves when the host calls `tick`.

pub mod action;
pub mod app;
pub mod cli;
pub mod component;
pub mod components;
pub mod config;
pub mod logging;
pub mod model;
pub mod scheduler;
pub mod services;
pub mod tui;
