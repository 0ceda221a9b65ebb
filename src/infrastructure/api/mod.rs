mod advising;
mod auth;
mod client;
mod courses;
mod majors;
mod programs;

pub use client::*;
