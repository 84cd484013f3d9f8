pub mod hangul;
pub mod ime;
pub mod layout;
pub mod normalize;
