//! Core layer: page loading, selection and the table controller.

pub mod accumulator;
pub mod controller;
pub mod page_loader;
pub mod selection;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;
