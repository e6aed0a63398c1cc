pub mod app_config;
pub mod conference;
pub mod db;
pub mod i18n;
pub mod orm;
pub mod role;
pub mod vote;
pub mod web;
