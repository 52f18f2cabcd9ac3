#[macro_use]
extern crate approx;

mod cube_cut;
mod idempotence;
mod random_planes;
mod round_trip;
