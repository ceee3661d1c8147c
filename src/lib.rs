//! docfind-tui library: filter/sort/param-state engine and the TUI around it.

pub mod app_core;
pub mod controller;
pub mod data;
pub mod filter;
pub mod model;
pub mod query;
pub mod records;
pub mod sort;
pub mod theme;
pub mod ui;
