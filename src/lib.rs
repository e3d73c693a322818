// Public library interface for slicemap
// The CLI and the debug-layout tool are thin front ends over these modules

pub mod app;
pub mod data;
pub mod layout;
pub mod render;
pub mod tree;
