#![forbid(unsafe_code)]

mod history;
mod record;
mod settle;
mod upload;
