//! Pure data structures shared by the clients, the scan resolver and the workflow.

pub mod permission;
pub mod product;
pub mod user;

pub use permission::*;
pub use product::*;
pub use user::*;
