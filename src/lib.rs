//! Production plan-vs-actual dashboard.
//!
//! The core is two pure steps: [`data::prepare::prepare`] turns loosely-typed
//! rows into a [`data::model::ProductionTable`], and [`chart::build`] turns
//! that table plus a [`data::filter::FilterCriteria`] into a
//! [`chart::ChartDescription`]. Everything else (loading, egui panels) feeds
//! or renders those.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod labels;
pub mod state;
pub mod ui;
