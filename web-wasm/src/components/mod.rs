pub mod error_banner;
pub mod header;
pub mod reset_button;
pub mod result_panel;
pub mod upload_area;
