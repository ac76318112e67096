pub mod items;
pub mod shared;
pub mod traits;
pub mod views;
