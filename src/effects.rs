pub mod blend;
pub mod mode_filter;
