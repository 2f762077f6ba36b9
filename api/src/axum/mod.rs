pub mod app;
pub mod errors;
pub mod state;

#[cfg(test)]
pub mod testing;
