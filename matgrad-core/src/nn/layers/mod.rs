pub mod linear;

pub use linear::Linear;
