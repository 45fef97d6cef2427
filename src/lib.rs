//! Payroll Export Engine
//!
//! This crate groups payroll transaction lines by employee, classifies each
//! payroll concept as base salary, income, deduction or employer-paid, and
//! produces a two-sheet workbook (payroll and analysis) with deterministic
//! column ordering and per-employee totals.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
