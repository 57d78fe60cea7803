pub mod draft;
pub mod provider;
pub mod ui;
pub mod view_model;

#[cfg(test)]
pub(crate) mod testing;
