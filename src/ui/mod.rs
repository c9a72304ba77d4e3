pub mod cloud;
pub mod panels;
pub mod plot;
pub mod table;
