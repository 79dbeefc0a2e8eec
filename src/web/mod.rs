//! HTML layer: the index page and the create form.
//!
//! Uses Askama templates from `templates/` for server-side rendering.
//!
//! - [`handlers`] - Template rendering handlers

pub mod handlers;
