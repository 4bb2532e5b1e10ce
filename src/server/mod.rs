//! HTTP bridge exposing the translator

pub mod api;
