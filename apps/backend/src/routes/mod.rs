//! HTTP route handlers

pub mod admin;
pub mod auth;
pub mod home;
pub mod quiz;
pub mod support;
