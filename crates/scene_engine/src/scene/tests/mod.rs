//! Hierarchy scenario and property tests

mod scenarios;
