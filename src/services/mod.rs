pub mod board_view;
pub mod membership;
pub mod mover;
