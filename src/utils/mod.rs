//! Stateless helpers shared by mappers and assets.

pub mod mp3;
pub mod options;
