//! Menu tree editing and page content storage for the Stars' English Centre site.
//!
//! The menu is an arena-backed tree edited through [`application::services::MenuService`];
//! the public page is a single HTML document held by [`application::services::ContentService`].
//! Both are exposed over HTTP by [`infrastructure::http`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
