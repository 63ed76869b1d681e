pub mod components;
pub mod layout;
pub mod theme;
pub mod view;
