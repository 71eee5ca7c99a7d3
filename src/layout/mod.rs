pub mod align;
pub mod cover;
pub mod wrap;
