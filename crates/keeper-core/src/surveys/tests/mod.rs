mod common;

mod results;
mod scoring;
