pub mod popup;
pub mod scatter;
pub mod sidebar;
