pub mod controller;
pub mod index;
