pub mod decode;
pub mod dir;
pub mod http;
pub mod solid;
pub mod store;
