pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repository;
pub mod schema;
pub mod service;
pub mod validation;
