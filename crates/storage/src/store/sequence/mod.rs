#![forbid(unsafe_code)]

mod read;
mod structure;
