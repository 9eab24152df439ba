//! Todo Likes Frontend Entry Point
//!
//! Client-side rendered Leptos app listing todos from a REST API,
//! with optimistic like toggles and a detail route per todo.

mod api;
mod app;
mod components;
mod config;
mod context;
mod likes;
mod models;
mod view_model;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

/// Records kept in the in-memory log ring
const LOG_CAPACITY: usize = 500;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = rolling_logger::init(level, LOG_CAPACITY) {
        web_sys::console::warn_1(&format!("logger not installed: {}", err).into());
    }

    mount_to_body(App);
}
