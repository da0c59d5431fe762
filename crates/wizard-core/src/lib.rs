#![deny(warnings)]
pub mod framework;
pub mod game;
pub mod model;
