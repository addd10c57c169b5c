pub mod browser;
pub mod compare;
pub mod confirm;
mod helpers;
pub mod menu_bar;
pub mod score_panel;
pub mod status;

pub(crate) use helpers::{enum_combo, placeholder, section_header, to_point};
