pub mod dispatch;
pub mod items;
pub mod response;
