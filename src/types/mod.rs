/*
[INPUT]:  Backend schema definitions
[OUTPUT]: Typed data model for API communication
[POS]:    Data layer - module wiring
[UPDATE]: When backend schema changes or new types added
*/

pub mod models;
pub mod requests;
pub mod responses;

pub use models::*;
pub use requests::*;
pub use responses::*;
