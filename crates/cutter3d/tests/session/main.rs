#[macro_use]
extern crate approx;

mod scene;

mod lifecycle;
mod rejections;
mod swept;
