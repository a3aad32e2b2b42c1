//! AC4 supplemental-duty pay calculator and duty calendar.
//!
//! This crate prices extra-duty hours under the AC4 tariff (a weekday/weekend
//! scale color crossed with a day/night period, with early-morning hours
//! attributed to the previous operational day), keeps a ledger of priced
//! duties, and maintains a personal calendar of styled shift markers with
//! per-day overrides.
//!
//! The [`book::DutyBook`] ties the pieces together over a
//! [`storage::KeyValueStore`], and [`api`] exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod book;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod rates;
pub mod storage;
