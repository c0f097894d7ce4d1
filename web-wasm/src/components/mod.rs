pub mod header;
pub mod image_panel;
pub mod video_panel;
