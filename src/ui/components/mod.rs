pub mod combo_meter;
pub mod conveyor;
pub mod dashboard;
pub mod menu;
pub mod plate_bar;
pub mod typing_area;
