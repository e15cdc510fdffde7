pub mod key;
pub mod profile;
pub mod request;
pub mod series;
