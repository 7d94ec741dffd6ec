//! Form rendering module
//!
//! - `field_renderer`: one drawing function per kind of field adapter
//! - `register_form`: the registration form layout

mod field_renderer;
mod register_form;

pub use register_form::draw_register_form;
