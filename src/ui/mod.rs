//! UI components for the Umrah Companion

pub mod audio;
pub mod collection;
pub mod forms;
pub mod maqam;
pub mod notice;
pub mod pages;
pub mod sidebar;
pub mod tawaf;
